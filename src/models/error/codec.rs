use thiserror::Error;

/// Failures decoding a serialized fee-quote transaction.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum TransactionCodecError {
    #[error("RLP error: {0}")]
    Rlp(#[from] alloy::rlp::Error),
    #[error("Expected an RLP list")]
    NotAList,
    #[error("Payload length mismatch: header says {expected} bytes, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },
    #[error("Contract creation cannot be fee-quoted")]
    MissingRecipient,
    #[error("Unexpected trailing fields ({0} bytes)")]
    TrailingFields(usize),
}
