//! Rollup fee estimation.
//!
//! The fee a sender pays on an OP Stack rollup has two parts:
//! - the L2 execution fee, `gas used * L2 gas price`
//! - the L1 data fee, quoted by the `GasPriceOracle` for the transaction's serialized bytes
//!
//! [`FeeEstimator::estimate`] computes both for a single contract call and combines them into a
//! [`FeeQuote`].
use alloy::{dyn_abi::DynSolValue, primitives::Address};
use log::debug;

use crate::{
    models::{ContractHandle, EstimationError, EstimationStep, FeeQuote, NetworkProfile},
    services::{
        gas::L1FeeOracle,
        provider::{EvmProviderTrait, ProviderError},
        transaction_builder::build_unsigned_transaction,
    },
};

#[derive(Debug, Clone)]
pub struct FeeEstimator<P> {
    provider: P,
    l1_fee_oracle: Address,
}

impl<P: EvmProviderTrait> FeeEstimator<P> {
    pub fn new(provider: P, l1_fee_oracle: Address) -> Self {
        Self {
            provider,
            l1_fee_oracle,
        }
    }

    /// Estimator for the profile's chain, or `None` if the chain has no known fee oracle.
    pub fn for_network(provider: P, profile: &NetworkProfile) -> Option<Self> {
        profile
            .l1_fee_oracle
            .map(|oracle| Self::new(provider, oracle))
    }

    /// Estimates the total fee of calling `method` with `args` on `handle`.
    ///
    /// Gas price and gas usage are fetched concurrently; the oracle is queried once both are
    /// known. Nothing is retried, and no partial quote is ever returned.
    pub async fn estimate(
        &self,
        handle: &ContractHandle,
        method: &str,
        args: &[DynSolValue],
    ) -> Result<FeeQuote, EstimationError> {
        let call = build_unsigned_transaction(handle, method, args)?;
        let request = call.to_call_request();

        let (gas_price, gas_used) = tokio::join!(
            self.provider.get_gas_price(),
            self.provider.estimate_gas(&request),
        );

        let l2_gas_price =
            gas_price.map_err(|e| EstimationError::failed(EstimationStep::GasPrice, e))?;
        let l2_gas_used = gas_used.map_err(classify_gas_estimate_error)?;
        debug!(
            "{}.{}: {} gas at {} wei",
            handle.name(),
            method,
            l2_gas_used,
            l2_gas_price
        );

        let serialized = call.with_gas(l2_gas_used, l2_gas_price).serialize();
        debug!("Fee-quote transaction: {}", serialized);

        let l1_fee = L1FeeOracle::new(&self.provider, self.l1_fee_oracle)
            .get_l1_fee(&serialized)
            .await
            .map_err(|e| EstimationError::failed(EstimationStep::L1Fee, e))?;

        FeeQuote::new(l2_gas_used, l2_gas_price, l1_fee)
    }
}

fn classify_gas_estimate_error(error: ProviderError) -> EstimationError {
    if !error.is_revert() {
        return EstimationError::failed(EstimationStep::GasEstimate, error);
    }

    match error {
        ProviderError::RpcErrorCode { message, .. } => EstimationError::CallWouldRevert(message),
        other => EstimationError::CallWouldRevert(other.to_string()),
    }
}
