//! EVM chain client used by the fee estimator.
//!
//! This module wraps a single HTTP JSON-RPC endpoint of an EVM-compatible rollup. Reads
//! (chain id, gas price, gas estimation, `eth_call`) need no credentials; the one
//! state-changing operation, contract deployment, signs with a locally held key.

use std::{sync::Arc, time::Duration};

use alloy::{
    network::{EthereumWallet, ReceiptResponse, TransactionBuilder},
    primitives::{Address, Bytes, TxHash},
    providers::{Provider, ProviderBuilder, RootProvider},
    rpc::{client::ClientBuilder, types::TransactionRequest},
    signers::local::PrivateKeySigner,
    transports::http::Http,
};
use async_trait::async_trait;
use log::debug;
use reqwest::{ClientBuilder as ReqwestClientBuilder, Url};

#[cfg(test)]
use mockall::automock;

use super::ProviderError;

/// Outcome of a mined deployment transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeploymentReceipt {
    /// `true` when the transaction executed successfully.
    pub status: bool,
    /// Address of the created contract, if any.
    pub contract_address: Option<Address>,
}

/// Provider implementation for EVM-compatible rollups.
///
/// Every call goes straight to the endpoint; failures are returned to the caller without retry.
#[derive(Clone)]
pub struct EvmProvider {
    /// JSON-RPC endpoint
    rpc_url: Url,
    /// Timeout for each HTTP request
    timeout: Duration,
    /// Key used to sign deployment transactions
    deployer: Option<PrivateKeySigner>,
}

/// Trait defining the chain operations the estimator depends on.
///
/// Everything except [`send_deployment`](EvmProviderTrait::send_deployment) is read-only.
#[async_trait]
#[cfg_attr(test, automock)]
pub trait EvmProviderTrait: Send + Sync {
    /// Gets the chain id reported by the endpoint.
    async fn get_chain_id(&self) -> Result<u64, ProviderError>;

    /// Gets the current gas price from the network.
    async fn get_gas_price(&self) -> Result<u128, ProviderError>;

    /// Estimates the gas a call would consume.
    ///
    /// # Arguments
    /// * `tx` - The call to simulate
    async fn estimate_gas(&self, tx: &TransactionRequest) -> Result<u64, ProviderError>;

    /// Calls a contract function without creating a transaction.
    ///
    /// # Arguments
    /// * `tx` - The transaction request to call the contract function
    async fn call_contract(&self, tx: &TransactionRequest) -> Result<Bytes, ProviderError>;

    /// Signs and broadcasts a contract creation transaction.
    ///
    /// # Arguments
    /// * `creation_code` - Contract bytecode followed by the ABI-encoded constructor arguments
    async fn send_deployment(&self, creation_code: Bytes) -> Result<TxHash, ProviderError>;

    /// Gets the receipt of a deployment transaction, or `None` while it is pending.
    ///
    /// # Arguments
    /// * `tx_hash` - Hash returned by `send_deployment`
    async fn get_deployment_receipt(
        &self,
        tx_hash: TxHash,
    ) -> Result<Option<DeploymentReceipt>, ProviderError>;
}

#[async_trait]
impl<T: EvmProviderTrait + ?Sized> EvmProviderTrait for Arc<T> {
    async fn get_chain_id(&self) -> Result<u64, ProviderError> {
        (**self).get_chain_id().await
    }

    async fn get_gas_price(&self) -> Result<u128, ProviderError> {
        (**self).get_gas_price().await
    }

    async fn estimate_gas(&self, tx: &TransactionRequest) -> Result<u64, ProviderError> {
        (**self).estimate_gas(tx).await
    }

    async fn call_contract(&self, tx: &TransactionRequest) -> Result<Bytes, ProviderError> {
        (**self).call_contract(tx).await
    }

    async fn send_deployment(&self, creation_code: Bytes) -> Result<TxHash, ProviderError> {
        (**self).send_deployment(creation_code).await
    }

    async fn get_deployment_receipt(
        &self,
        tx_hash: TxHash,
    ) -> Result<Option<DeploymentReceipt>, ProviderError> {
        (**self).get_deployment_receipt(tx_hash).await
    }
}

impl EvmProvider {
    /// Creates a new EVM provider instance.
    ///
    /// # Arguments
    /// * `rpc_url` - JSON-RPC endpoint URL (http or https)
    /// * `timeout_ms` - Per-request timeout in milliseconds
    /// * `deployer` - Signer for deployment transactions, if deployments are needed
    pub fn new(
        rpc_url: &str,
        timeout_ms: u64,
        deployer: Option<PrivateKeySigner>,
    ) -> Result<Self, ProviderError> {
        let rpc_url: Url = rpc_url
            .parse()
            .map_err(|e| ProviderError::NetworkConfiguration(format!("Invalid URL format: {e}")))?;

        if !matches!(rpc_url.scheme(), "http" | "https") {
            return Err(ProviderError::NetworkConfiguration(format!(
                "Unsupported URL scheme '{}', expected http or https",
                rpc_url.scheme()
            )));
        }

        Ok(Self {
            rpc_url,
            timeout: Duration::from_millis(timeout_ms),
            deployer,
        })
    }

    pub fn rpc_url(&self) -> &Url {
        &self.rpc_url
    }

    /// Address deployments are sent from, if a deployer key is configured.
    pub fn deployer_address(&self) -> Option<Address> {
        self.deployer.as_ref().map(PrivateKeySigner::address)
    }

    fn rpc_client(&self) -> Result<alloy::rpc::client::RpcClient, ProviderError> {
        // Using use_rustls_tls() forces the use of rustls instead of native-tls to support TLS 1.3
        let client = ReqwestClientBuilder::new()
            .timeout(self.timeout)
            .use_rustls_tls()
            .build()
            .map_err(|e| ProviderError::Other(format!("Failed to build HTTP client: {e}")))?;

        let mut transport = Http::new(self.rpc_url.clone());
        transport.set_client(client);

        let is_local = transport.guess_local();
        Ok(ClientBuilder::default().transport(transport, is_local))
    }

    fn read_provider(&self) -> Result<RootProvider, ProviderError> {
        Ok(RootProvider::new(self.rpc_client()?))
    }
}

#[async_trait]
impl EvmProviderTrait for EvmProvider {
    async fn get_chain_id(&self) -> Result<u64, ProviderError> {
        debug!("eth_chainId on {}", self.rpc_url);
        self.read_provider()?
            .get_chain_id()
            .await
            .map_err(ProviderError::from)
    }

    async fn get_gas_price(&self) -> Result<u128, ProviderError> {
        debug!("eth_gasPrice on {}", self.rpc_url);
        self.read_provider()?
            .get_gas_price()
            .await
            .map_err(ProviderError::from)
    }

    async fn estimate_gas(&self, tx: &TransactionRequest) -> Result<u64, ProviderError> {
        debug!("eth_estimateGas on {}", self.rpc_url);
        self.read_provider()?
            .estimate_gas(tx.clone())
            .await
            .map_err(ProviderError::from)
    }

    async fn call_contract(&self, tx: &TransactionRequest) -> Result<Bytes, ProviderError> {
        debug!("eth_call on {}", self.rpc_url);
        self.read_provider()?
            .call(tx.clone())
            .await
            .map_err(ProviderError::from)
    }

    async fn send_deployment(&self, creation_code: Bytes) -> Result<TxHash, ProviderError> {
        let signer = self.deployer.clone().ok_or_else(|| {
            ProviderError::SignerError("No deployer key configured".to_string())
        })?;
        let from = signer.address();

        let provider = ProviderBuilder::new()
            .wallet(EthereumWallet::from(signer))
            .connect_client(self.rpc_client()?);

        let tx = TransactionRequest::default()
            .with_from(from)
            .with_deploy_code(creation_code);

        debug!("Broadcasting deployment from {} on {}", from, self.rpc_url);
        let pending = provider
            .send_transaction(tx)
            .await
            .map_err(ProviderError::from)?;

        Ok(*pending.tx_hash())
    }

    async fn get_deployment_receipt(
        &self,
        tx_hash: TxHash,
    ) -> Result<Option<DeploymentReceipt>, ProviderError> {
        let receipt = self
            .read_provider()?
            .get_transaction_receipt(tx_hash)
            .await
            .map_err(ProviderError::from)?;

        Ok(receipt.map(|receipt| DeploymentReceipt {
            status: receipt.status(),
            contract_address: receipt.contract_address(),
        }))
    }
}
