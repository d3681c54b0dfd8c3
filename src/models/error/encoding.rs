use thiserror::Error;

/// Raised when call arguments do not fit the target method's parameters.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EncodingError {
    #[error("Method '{method}' not found in {contract} interface")]
    UnknownMethod { contract: String, method: String },
    #[error("Method '{method}' takes {expected} argument(s), got {actual}")]
    ArgumentCount {
        method: String,
        expected: String,
        actual: usize,
    },
    #[error("Invalid argument #{index} for '{method}': {reason}")]
    ArgumentType {
        method: String,
        index: usize,
        reason: String,
    },
    #[error("Failed to encode call to '{method}': {reason}")]
    Encode { method: String, reason: String },
}
