//! Client for the OP Stack `GasPriceOracle` predeploy.
use alloy::{
    primitives::{Address, Bytes, TxKind, U256},
    rpc::types::{TransactionInput, TransactionRequest},
    sol,
    sol_types::SolCall,
};
use log::debug;

use crate::services::provider::{EvmProviderTrait, ProviderError};

sol! {
    interface GasPriceOracle {
        function getL1Fee(bytes memory _data) external view returns (uint256);
    }
}

/// Read-only view of the L1 fee oracle deployed at `address`.
pub struct L1FeeOracle<'a, P> {
    provider: &'a P,
    address: Address,
}

impl<'a, P: EvmProviderTrait> L1FeeOracle<'a, P> {
    pub fn new(provider: &'a P, address: Address) -> Self {
        Self { provider, address }
    }

    /// Quotes the L1 data fee, in wei, for publishing `serialized_tx`.
    pub async fn get_l1_fee(&self, serialized_tx: &Bytes) -> Result<U256, ProviderError> {
        let calldata = GasPriceOracle::getL1FeeCall {
            _data: serialized_tx.clone(),
        }
        .abi_encode();

        let request = TransactionRequest {
            to: Some(TxKind::Call(self.address)),
            input: TransactionInput::new(calldata.into()),
            ..Default::default()
        };

        debug!(
            "Querying L1 fee for {} serialized bytes from {}",
            serialized_tx.len(),
            self.address
        );
        let response = self.provider.call_contract(&request).await?;

        GasPriceOracle::getL1FeeCall::abi_decode_returns(&response)
            .map_err(|e| ProviderError::Other(format!("Invalid getL1Fee response: {e}")))
    }
}
