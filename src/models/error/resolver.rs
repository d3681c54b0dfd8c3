use thiserror::Error;

/// Failures resolving the contract a fee estimate targets.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolverError {
    #[error("Unsupported chain {chain_id} (supported: {})", join_chain_ids(.supported))]
    UnsupportedChain { chain_id: u64, supported: Vec<u64> },
    #[error("No contract address recorded for chain {chain_id}")]
    UnresolvedAddress { chain_id: u64 },
    #[error("Contract deployment failed: {0}")]
    DeploymentFailed(String),
    #[error("Contract resolution cancelled before deployment was broadcast")]
    Cancelled,
}

impl ResolverError {
    /// Remediation text shown to the user when the run cannot continue.
    pub fn guidance(&self) -> String {
        match self {
            ResolverError::UnsupportedChain {
                chain_id,
                supported,
            } => format!(
                "Chain id {chain_id} is not supported by this tool.\n\
                 Connect to one of the supported chains ({}) by passing a configured \
                 --network name or an --rpc-url that serves one of them.",
                join_chain_ids(supported)
            ),
            other => other.to_string(),
        }
    }
}

fn join_chain_ids(ids: &[u64]) -> String {
    ids.iter()
        .map(u64::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
