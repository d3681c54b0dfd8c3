//! Maps a chain id to the [`NetworkProfile`] the estimator runs with.
//!
//! Supporting a new chain is an edit to [`KNOWN_NETWORKS`]; resolution itself never changes.
use alloy::primitives::Address;

use crate::{
    constants::{
        OPTIMISM_DEVNET_CHAIN_ID, OPTIMISM_GOERLI_CHAIN_ID, OPTIMISM_KOVAN_CHAIN_ID,
        OPTIMISM_MAINNET_CHAIN_ID, OPTIMISM_MAINNET_GREETER_ADDRESS, OPTIMISM_SEPOLIA_CHAIN_ID,
        OVM_GAS_PRICE_ORACLE_ADDRESS,
    },
    models::{NetworkMode, NetworkProfile, ResolverError},
};

/// Static description of a supported chain.
#[derive(Debug, Clone, Copy)]
pub struct KnownNetwork {
    pub chain_id: u64,
    pub name: &'static str,
    pub mode: NetworkMode,
    pub contract_address: Option<Address>,
    pub l1_fee_oracle: Address,
}

pub const KNOWN_NETWORKS: &[KnownNetwork] = &[
    KnownNetwork {
        chain_id: OPTIMISM_MAINNET_CHAIN_ID,
        name: "optimism-mainnet",
        mode: NetworkMode::Production,
        contract_address: Some(OPTIMISM_MAINNET_GREETER_ADDRESS),
        l1_fee_oracle: OVM_GAS_PRICE_ORACLE_ADDRESS,
    },
    KnownNetwork {
        chain_id: OPTIMISM_GOERLI_CHAIN_ID,
        name: "optimism-goerli",
        mode: NetworkMode::Ephemeral,
        contract_address: None,
        l1_fee_oracle: OVM_GAS_PRICE_ORACLE_ADDRESS,
    },
    KnownNetwork {
        chain_id: OPTIMISM_KOVAN_CHAIN_ID,
        name: "optimism-kovan",
        mode: NetworkMode::Ephemeral,
        contract_address: None,
        l1_fee_oracle: OVM_GAS_PRICE_ORACLE_ADDRESS,
    },
    KnownNetwork {
        chain_id: OPTIMISM_DEVNET_CHAIN_ID,
        name: "optimism-devnet",
        mode: NetworkMode::Ephemeral,
        contract_address: None,
        l1_fee_oracle: OVM_GAS_PRICE_ORACLE_ADDRESS,
    },
    KnownNetwork {
        chain_id: OPTIMISM_SEPOLIA_CHAIN_ID,
        name: "optimism-sepolia",
        mode: NetworkMode::Ephemeral,
        contract_address: None,
        l1_fee_oracle: OVM_GAS_PRICE_ORACLE_ADDRESS,
    },
];

impl From<&KnownNetwork> for NetworkProfile {
    fn from(network: &KnownNetwork) -> Self {
        NetworkProfile {
            chain_id: network.chain_id,
            name: network.name,
            mode: network.mode,
            known_contract_address: network.contract_address,
            l1_fee_oracle: Some(network.l1_fee_oracle),
        }
    }
}

/// Resolves `chain_id` against the network table.
///
/// Total and deterministic: unknown ids yield an `Unsupported` profile.
pub fn resolve_network(chain_id: u64) -> NetworkProfile {
    KNOWN_NETWORKS
        .iter()
        .find(|network| network.chain_id == chain_id)
        .map(NetworkProfile::from)
        .unwrap_or_else(|| NetworkProfile::unsupported(chain_id))
}

/// Chain ids in table order.
pub fn supported_chain_ids() -> Vec<u64> {
    KNOWN_NETWORKS.iter().map(|network| network.chain_id).collect()
}

/// Error for a chain id that is not in the network table.
pub fn unsupported_chain(chain_id: u64) -> ResolverError {
    ResolverError::UnsupportedChain {
        chain_id,
        supported: supported_chain_ids(),
    }
}
