//! Unsigned transaction used for fee quoting.
//!
//! There is no sender field. The L1 data fee is a function of the serialized bytes, which must
//! be identical for every account that may later sign them.
use alloy::{
    consensus::{SignableTransaction, TxLegacy},
    primitives::{Address, Bytes, TxKind, U256},
    rlp::{Decodable, Header},
    rpc::types::{TransactionInput, TransactionRequest},
};
use serde::Serialize;

use super::TransactionCodecError;

/// A contract call as it would be broadcast by an arbitrary signer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UnsignedTransaction {
    to: Address,
    data: Bytes,
    gas_limit: u64,
    gas_price: u128,
}

impl UnsignedTransaction {
    pub fn new(to: Address, data: Bytes, gas_limit: u64, gas_price: u128) -> Self {
        Self {
            to,
            data,
            gas_limit,
            gas_price,
        }
    }

    /// Returns a copy with the gas fields replaced.
    pub fn with_gas(self, gas_limit: u64, gas_price: u128) -> Self {
        Self {
            gas_limit,
            gas_price,
            ..self
        }
    }

    pub fn to(&self) -> Address {
        self.to
    }

    pub fn data(&self) -> &Bytes {
        &self.data
    }

    pub fn gas_limit(&self) -> u64 {
        self.gas_limit
    }

    pub fn gas_price(&self) -> u128 {
        self.gas_price
    }

    /// Request handed to `eth_estimateGas` / `eth_call`.
    ///
    /// Only the target and calldata are set; the node picks its own defaults for everything
    /// else, including the sender.
    pub fn to_call_request(&self) -> TransactionRequest {
        TransactionRequest {
            to: Some(TxKind::Call(self.to)),
            input: TransactionInput::new(self.data.clone()),
            ..Default::default()
        }
    }

    /// Canonical byte encoding consumed by the L1 fee oracle.
    ///
    /// Legacy RLP list `[nonce, gasPrice, gasLimit, to, value, data]` with a zero nonce, zero
    /// value and no chain id or signature fields.
    pub fn serialize(&self) -> Bytes {
        let tx = TxLegacy {
            chain_id: None,
            nonce: 0,
            gas_price: self.gas_price,
            gas_limit: self.gas_limit,
            to: TxKind::Call(self.to),
            value: U256::ZERO,
            input: self.data.clone(),
        };

        let mut out = Vec::new();
        tx.encode_for_signing(&mut out);
        out.into()
    }

    /// Decodes bytes produced by [`UnsignedTransaction::serialize`].
    pub fn decode(mut buf: &[u8]) -> Result<Self, TransactionCodecError> {
        let header = Header::decode(&mut buf)?;
        if !header.list {
            return Err(TransactionCodecError::NotAList);
        }
        if buf.len() != header.payload_length {
            return Err(TransactionCodecError::LengthMismatch {
                expected: header.payload_length,
                actual: buf.len(),
            });
        }

        let _nonce = u64::decode(&mut buf)?;
        let gas_price = u128::decode(&mut buf)?;
        let gas_limit = u64::decode(&mut buf)?;
        let to = match TxKind::decode(&mut buf)? {
            TxKind::Call(to) => to,
            TxKind::Create => return Err(TransactionCodecError::MissingRecipient),
        };
        let _value = U256::decode(&mut buf)?;
        let data = Bytes::decode(&mut buf)?;

        if !buf.is_empty() {
            return Err(TransactionCodecError::TrailingFields(buf.len()));
        }

        Ok(Self::new(to, data, gas_limit, gas_price))
    }
}
