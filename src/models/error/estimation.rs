use alloy::primitives::U256;
use strum::Display;
use thiserror::Error;

use super::EncodingError;
use crate::services::provider::ProviderError;

/// RPC-backed step of a fee estimation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum EstimationStep {
    #[strum(serialize = "gas_price")]
    GasPrice,
    #[strum(serialize = "gas_estimate")]
    GasEstimate,
    #[strum(serialize = "l1_fee")]
    L1Fee,
}

/// Failures producing a [`FeeQuote`](crate::models::FeeQuote).
///
/// None of these are retried by the estimator; callers decide whether to run the whole
/// estimation again.
#[derive(Error, Debug)]
pub enum EstimationError {
    #[error("Estimation failed at {step}: {cause}")]
    EstimationFailed {
        step: EstimationStep,
        cause: ProviderError,
    },
    #[error("Call would revert: {0}")]
    CallWouldRevert(String),
    #[error("Encoding error: {0}")]
    Encoding(#[from] EncodingError),
    #[error("Fee total overflows 256 bits (l2 fee {l2_fee}, l1 fee {l1_fee})")]
    FeeOverflow { l2_fee: U256, l1_fee: U256 },
}

impl EstimationError {
    pub fn failed(step: EstimationStep, cause: ProviderError) -> Self {
        EstimationError::EstimationFailed { step, cause }
    }

    /// Transport and infrastructure faults may succeed when the caller retries.
    pub fn is_transient(&self) -> bool {
        match self {
            EstimationError::EstimationFailed { .. } => true,
            EstimationError::CallWouldRevert(_) => false,
            EstimationError::Encoding(_) => false,
            EstimationError::FeeOverflow { .. } => false,
        }
    }
}
