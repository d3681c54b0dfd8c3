use thiserror::Error;

use super::{EncodingError, EstimationError, ResolverError};
use crate::services::provider::ProviderError;

/// Failures of a complete quote run, from chain detection to the final fee quote.
#[derive(Error, Debug)]
pub enum QuoteError {
    #[error("Failed to read chain id: {0}")]
    ChainId(ProviderError),
    #[error("No L1 fee oracle known for chain {0}")]
    MissingFeeOracle(u64),
    #[error(transparent)]
    Encoding(#[from] EncodingError),
    #[error(transparent)]
    Resolver(#[from] ResolverError),
    #[error(transparent)]
    Estimation(#[from] EstimationError),
    #[error("Quote cancelled")]
    Cancelled,
}

impl QuoteError {
    pub fn is_unsupported_chain(&self) -> bool {
        matches!(
            self,
            QuoteError::Resolver(ResolverError::UnsupportedChain { .. })
        )
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(
            self,
            QuoteError::Cancelled | QuoteError::Resolver(ResolverError::Cancelled)
        )
    }

    /// Text printed to the user before exiting.
    pub fn guidance(&self) -> String {
        match self {
            QuoteError::Resolver(err) => err.guidance(),
            other => other.to_string(),
        }
    }
}
