//! Turns a [`NetworkProfile`] into a callable [`ContractHandle`].
//!
//! Production chains attach to the recorded address without touching the chain. Ephemeral
//! chains get a freshly deployed instance, which is the only state-changing call the estimator
//! ever makes.
use std::time::Duration;

use alloy::{
    dyn_abi::{DynSolValue, JsonAbiExt},
    primitives::{Bytes, TxHash},
};
use log::{debug, info};
use tokio_util::sync::CancellationToken;

use crate::{
    constants::DEFAULT_GREETING,
    models::{ContractArtifact, ContractHandle, NetworkMode, NetworkProfile, ResolverError},
    services::{network_resolver::unsupported_chain, provider::EvmProviderTrait},
    utils::poll_until,
};

#[derive(Debug, Clone)]
pub struct ContractResolver<P> {
    provider: P,
    confirmation_timeout: Duration,
    poll_interval: Duration,
}

impl<P: EvmProviderTrait> ContractResolver<P> {
    pub fn new(provider: P, confirmation_timeout: Duration, poll_interval: Duration) -> Self {
        Self {
            provider,
            confirmation_timeout,
            poll_interval,
        }
    }

    /// Resolves the contract described by `artifact` on the profile's chain.
    ///
    /// `cancel` is honored until the deployment transaction is broadcast. Once broadcast,
    /// the resolver waits for the receipt (or the confirmation timeout) regardless.
    pub async fn resolve(
        &self,
        profile: &NetworkProfile,
        artifact: &ContractArtifact,
        cancel: &CancellationToken,
    ) -> Result<ContractHandle, ResolverError> {
        match profile.mode {
            NetworkMode::Production => {
                let address = profile.known_contract_address.ok_or(
                    ResolverError::UnresolvedAddress {
                        chain_id: profile.chain_id,
                    },
                )?;
                info!(
                    "Attaching to {} at {} on {}",
                    artifact.contract_name, address, profile.name
                );
                Ok(ContractHandle::attach(address, artifact))
            }
            NetworkMode::Ephemeral => self.deploy(profile, artifact, cancel).await,
            NetworkMode::Unsupported => Err(unsupported_chain(profile.chain_id)),
        }
    }

    async fn deploy(
        &self,
        profile: &NetworkProfile,
        artifact: &ContractArtifact,
        cancel: &CancellationToken,
    ) -> Result<ContractHandle, ResolverError> {
        let creation_code = creation_code_with_args(artifact)?;

        if cancel.is_cancelled() {
            return Err(ResolverError::Cancelled);
        }

        info!(
            "Deploying fresh {} on {} ({})",
            artifact.contract_name, profile.name, profile.chain_id
        );
        let tx_hash = self
            .provider
            .send_deployment(creation_code)
            .await
            .map_err(|e| ResolverError::DeploymentFailed(format!("broadcast failed: {e}")))?;

        let address = self.wait_for_contract(tx_hash).await?;
        info!("{} deployed at {}", artifact.contract_name, address);

        Ok(ContractHandle::attach(address, artifact))
    }

    async fn wait_for_contract(
        &self,
        tx_hash: TxHash,
    ) -> Result<alloy::primitives::Address, ResolverError> {
        debug!("Waiting for deployment {} to be mined", tx_hash);

        let receipt = poll_until(
            || self.provider.get_deployment_receipt(tx_hash),
            self.confirmation_timeout,
            self.poll_interval,
            "deployment confirmation",
        )
        .await
        .ok_or_else(|| {
            ResolverError::DeploymentFailed(format!(
                "no receipt for {} within {:?}",
                tx_hash, self.confirmation_timeout
            ))
        })?;

        if !receipt.status {
            return Err(ResolverError::DeploymentFailed(format!(
                "transaction {tx_hash} reverted"
            )));
        }

        receipt.contract_address.ok_or_else(|| {
            ResolverError::DeploymentFailed(format!(
                "receipt for {tx_hash} has no contract address"
            ))
        })
    }
}

/// Creation bytecode followed by the ABI-encoded fixed constructor arguments.
fn creation_code_with_args(artifact: &ContractArtifact) -> Result<Bytes, ResolverError> {
    let code = artifact.creation_code().ok_or_else(|| {
        ResolverError::DeploymentFailed(format!(
            "artifact for {} has no creation bytecode",
            artifact.contract_name
        ))
    })?;

    let args = match artifact.abi.constructor() {
        Some(constructor) => constructor
            .abi_encode_input(&[DynSolValue::String(DEFAULT_GREETING.to_string())])
            .map_err(|e| {
                ResolverError::DeploymentFailed(format!("invalid constructor arguments: {e}"))
            })?,
        None => Vec::new(),
    };

    let mut creation_code = code.to_vec();
    creation_code.extend_from_slice(&args);
    Ok(creation_code.into())
}
