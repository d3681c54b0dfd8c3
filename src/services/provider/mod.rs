use serde::Serialize;
use thiserror::Error;

use alloy::transports::RpcError;

pub mod evm;
pub use evm::*;

/// JSON-RPC error code geth and op-geth use for `execution reverted`.
const EXECUTION_REVERTED_CODE: i64 = 3;

#[derive(Error, Debug, Serialize)]
pub enum ProviderError {
    #[error("Invalid address: {0}")]
    InvalidAddress(String),
    #[error("Network configuration error: {0}")]
    NetworkConfiguration(String),
    #[error("Request timeout")]
    Timeout,
    #[error("Rate limited (HTTP 429)")]
    RateLimited,
    #[error("Bad gateway (HTTP 502)")]
    BadGateway,
    #[error("Request error (HTTP {status_code}): {error}")]
    RequestError { error: String, status_code: u16 },
    #[error("JSON-RPC error (code {code}): {message}")]
    RpcErrorCode { code: i64, message: String },
    #[error("Transport error: {0}")]
    TransportError(String),
    #[error("Signer error: {0}")]
    SignerError(String),
    #[error("Other provider error: {0}")]
    Other(String),
}

impl ProviderError {
    /// Whether the node rejected the call because its execution reverted.
    pub fn is_revert(&self) -> bool {
        match self {
            ProviderError::RpcErrorCode { code, message } => {
                *code == EXECUTION_REVERTED_CODE || message.to_lowercase().contains("revert")
            }
            _ => false,
        }
    }
}

/// Categorizes a reqwest error into an appropriate `ProviderError` variant.
///
/// - Timeout errors become `ProviderError::Timeout`
/// - HTTP 429 responses become `ProviderError::RateLimited`
/// - HTTP 502 responses become `ProviderError::BadGateway`
/// - Other HTTP statuses become `ProviderError::RequestError`
/// - All other errors become `ProviderError::Other` with the error message
fn categorize_reqwest_error(err: &reqwest::Error) -> ProviderError {
    if err.is_timeout() {
        return ProviderError::Timeout;
    }

    if let Some(status) = err.status() {
        match status.as_u16() {
            429 => return ProviderError::RateLimited,
            502 => return ProviderError::BadGateway,
            _ => {
                return ProviderError::RequestError {
                    error: err.to_string(),
                    status_code: status.as_u16(),
                }
            }
        }
    }

    ProviderError::Other(err.to_string())
}

impl From<reqwest::Error> for ProviderError {
    fn from(err: reqwest::Error) -> Self {
        categorize_reqwest_error(&err)
    }
}

impl From<alloy::signers::local::LocalSignerError> for ProviderError {
    fn from(err: alloy::signers::local::LocalSignerError) -> Self {
        ProviderError::SignerError(err.to_string())
    }
}

// Generic implementation for all RpcError types
impl<E> From<RpcError<E>> for ProviderError
where
    E: std::fmt::Display + std::any::Any + 'static,
{
    fn from(err: RpcError<E>) -> Self {
        match err {
            RpcError::Transport(transport_err) => {
                if let Some(reqwest_err) =
                    (&transport_err as &dyn std::any::Any).downcast_ref::<reqwest::Error>()
                {
                    return categorize_reqwest_error(reqwest_err);
                }

                ProviderError::TransportError(transport_err.to_string())
            }
            RpcError::ErrorResp(json_rpc_err) => ProviderError::RpcErrorCode {
                code: json_rpc_err.code,
                message: json_rpc_err.message.to_string(),
            },
            _ => ProviderError::Other(format!("Other RPC error: {err}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::rpc::json_rpc::ErrorPayload;
    use alloy::transports::TransportErrorKind;

    #[test]
    fn test_error_response_conversion() {
        let err: RpcError<TransportErrorKind> = RpcError::ErrorResp(ErrorPayload {
            code: -32000,
            message: "insufficient funds for gas * price + value".into(),
            data: None,
        });

        let provider_error = ProviderError::from(err);

        assert!(matches!(
            provider_error,
            ProviderError::RpcErrorCode { code: -32000, ref message } if message.contains("insufficient funds")
        ));
        assert!(!provider_error.is_revert());
    }

    #[test]
    fn test_transport_error_conversion() {
        let err: RpcError<TransportErrorKind> =
            RpcError::Transport(TransportErrorKind::Custom("connection refused".into()));

        let provider_error = ProviderError::from(err);

        assert!(matches!(provider_error, ProviderError::TransportError(ref msg) if msg.contains("connection refused")));
    }

    #[test]
    fn test_is_revert_by_code() {
        let error = ProviderError::RpcErrorCode {
            code: 3,
            message: "execution reverted: Greeting too long".to_string(),
        };
        assert!(error.is_revert());
    }

    #[test]
    fn test_is_revert_by_message() {
        let test_cases = vec![
            (-32000, "execution reverted", true),
            (-32015, "VM Exception while processing transaction: revert", true),
            (-32000, "nonce too low", false),
            (-32603, "Internal error", false),
        ];

        for (code, message, expected) in test_cases {
            let error = ProviderError::RpcErrorCode {
                code,
                message: message.to_string(),
            };
            assert_eq!(
                error.is_revert(),
                expected,
                "code {} with '{}' should{} be a revert",
                code,
                message,
                if expected { "" } else { " NOT" }
            );
        }
    }

    #[test]
    fn test_transport_failures_are_not_reverts() {
        assert!(!ProviderError::Timeout.is_revert());
        assert!(!ProviderError::TransportError("execution reverted".into()).is_revert());
        assert!(!ProviderError::Other("revert".into()).is_revert());
    }
}
