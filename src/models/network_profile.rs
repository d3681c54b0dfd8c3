//! Network profile model.
//!
//! A [`NetworkProfile`] describes how the estimator treats the chain it is connected to:
//! whether the target contract already lives at a fixed address, must be freshly deployed,
//! or whether the chain is not supported at all.
use alloy::primitives::Address;
use serde::Serialize;
use strum::Display;

/// How the target contract is obtained on a given chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum NetworkMode {
    /// Long-lived chain; the contract is attached at a recorded address.
    Production,
    /// Disposable chain; a fresh contract instance is deployed for every run.
    Ephemeral,
    /// Chain id absent from the network table.
    Unsupported,
}

/// Resolved metadata for the chain the estimator is running against.
///
/// Built once per run by the network resolver and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkProfile {
    pub chain_id: u64,
    pub name: &'static str,
    pub mode: NetworkMode,
    pub known_contract_address: Option<Address>,
    pub l1_fee_oracle: Option<Address>,
}

impl NetworkProfile {
    /// Profile returned for chain ids that are not in the network table.
    pub fn unsupported(chain_id: u64) -> Self {
        Self {
            chain_id,
            name: "unknown",
            mode: NetworkMode::Unsupported,
            known_contract_address: None,
            l1_fee_oracle: None,
        }
    }

    pub fn is_supported(&self) -> bool {
        !matches!(self.mode, NetworkMode::Unsupported)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_profile_has_no_addresses() {
        let profile = NetworkProfile::unsupported(1337);

        assert_eq!(profile.chain_id, 1337);
        assert_eq!(profile.mode, NetworkMode::Unsupported);
        assert!(profile.known_contract_address.is_none());
        assert!(profile.l1_fee_oracle.is_none());
        assert!(!profile.is_supported());
    }

    #[test]
    fn test_network_mode_display() {
        assert_eq!(NetworkMode::Production.to_string(), "production");
        assert_eq!(NetworkMode::Ephemeral.to_string(), "ephemeral");
        assert_eq!(NetworkMode::Unsupported.to_string(), "unsupported");
    }
}
