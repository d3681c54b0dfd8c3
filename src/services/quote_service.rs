//! End-to-end fee quote for one contract call.
//!
//! Detects the connected chain, resolves its network profile and target contract, then runs the
//! fee estimation. Every step takes the chain client explicitly; nothing is read from global
//! state.
use std::{future::Future, time::Duration};

use alloy::primitives::Address;
use log::{debug, info};
use serde::Serialize;
use tokio_util::sync::CancellationToken;

use crate::{
    models::{ContractArtifact, FeeQuote, NetworkMode, NetworkProfile, QuoteError},
    services::{
        contract_resolver::ContractResolver,
        gas::FeeEstimator,
        network_resolver::{resolve_network, unsupported_chain},
        provider::EvmProviderTrait,
        transaction_builder::parse_args,
    },
};

/// What to quote: a method call on the contract described by `artifact`.
#[derive(Debug, Clone)]
pub struct QuoteRequest {
    pub artifact: ContractArtifact,
    pub method: String,
    pub args: Vec<String>,
}

/// Result of a successful run.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteReport {
    pub network: NetworkProfile,
    pub contract: String,
    pub contract_address: Address,
    pub method: String,
    pub quote: FeeQuote,
}

pub struct QuoteService<P> {
    provider: P,
    resolver: ContractResolver<P>,
}

impl<P: EvmProviderTrait + Clone> QuoteService<P> {
    pub fn new(provider: P, confirmation_timeout: Duration, poll_interval: Duration) -> Self {
        Self {
            resolver: ContractResolver::new(provider.clone(), confirmation_timeout, poll_interval),
            provider,
        }
    }

    /// Runs the whole quote for `request`.
    ///
    /// Arguments are checked against the ABI before any deployment is attempted. Read-only steps
    /// stop as soon as `cancel` fires; a broadcast deployment is always awaited.
    pub async fn run(
        &self,
        request: &QuoteRequest,
        cancel: &CancellationToken,
    ) -> Result<QuoteReport, QuoteError> {
        let chain_id = until_cancelled(cancel, self.provider.get_chain_id())
            .await?
            .map_err(QuoteError::ChainId)?;

        let profile = resolve_network(chain_id);
        if profile.mode == NetworkMode::Unsupported {
            return Err(unsupported_chain(chain_id).into());
        }
        info!("Network: {} {}", profile.name, profile.chain_id);

        let estimator = FeeEstimator::for_network(self.provider.clone(), &profile)
            .ok_or(QuoteError::MissingFeeOracle(chain_id))?;
        let args = parse_args(
            &request.artifact.abi,
            &request.artifact.contract_name,
            &request.method,
            &request.args,
        )?;

        let handle = self
            .resolver
            .resolve(&profile, &request.artifact, cancel)
            .await?;
        debug!("Resolved {} at {}", handle.name(), handle.address());

        let quote = until_cancelled(cancel, estimator.estimate(&handle, &request.method, &args))
            .await??;

        Ok(QuoteReport {
            network: profile,
            contract: handle.name().to_string(),
            contract_address: handle.address(),
            method: request.method.clone(),
            quote,
        })
    }
}

async fn until_cancelled<F: Future>(
    cancel: &CancellationToken,
    future: F,
) -> Result<F::Output, QuoteError> {
    tokio::select! {
        biased;
        _ = cancel.cancelled() => Err(QuoteError::Cancelled),
        output = future => Ok(output),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        constants::OPTIMISM_MAINNET_GREETER_ADDRESS,
        models::{EncodingError, EstimationError, ResolverError},
        services::provider::{DeploymentReceipt, MockEvmProviderTrait, ProviderError},
    };
    use alloy::{
        primitives::{address, b256, Bytes, TxHash, U256},
        sol_types::SolValue,
    };
    use futures::FutureExt;
    use mockall::Sequence;
    use std::sync::Arc;

    const DEPLOYED: Address = address!("5FbDB2315678afecb367f032d93F642f64180aa3");
    const DEPLOY_TX: TxHash =
        b256!("3333333333333333333333333333333333333333333333333333333333333333");

    fn greeter_request() -> QuoteRequest {
        QuoteRequest {
            artifact: ContractArtifact {
                bytecode: Some(Bytes::from_static(&[0x60, 0x80, 0x60, 0x40])),
                ..ContractArtifact::greeter().unwrap()
            },
            method: "setGreeting".to_string(),
            args: vec!["Hola, mundo!".to_string()],
        }
    }

    fn service(provider: MockEvmProviderTrait) -> QuoteService<Arc<MockEvmProviderTrait>> {
        QuoteService::new(
            Arc::new(provider),
            Duration::from_millis(200),
            Duration::from_millis(5),
        )
    }

    fn expect_chain_id(provider: &mut MockEvmProviderTrait, chain_id: u64) {
        provider
            .expect_get_chain_id()
            .times(1)
            .returning(move || async move { Ok(chain_id) }.boxed());
    }

    fn expect_estimation(provider: &mut MockEvmProviderTrait) {
        provider
            .expect_get_gas_price()
            .times(1)
            .returning(|| async { Ok(1_000) }.boxed());
        provider
            .expect_estimate_gas()
            .times(1)
            .returning(|_| async { Ok(45_000) }.boxed());
        provider
            .expect_call_contract()
            .times(1)
            .returning(|_| async { Ok(Bytes::from(U256::from(2_100).abi_encode())) }.boxed());
    }

    #[tokio::test]
    async fn test_optimism_mainnet_attaches_and_quotes() {
        let mut provider = MockEvmProviderTrait::new();
        expect_chain_id(&mut provider, 10);
        expect_estimation(&mut provider);
        provider.expect_send_deployment().never();

        let report = service(provider)
            .run(&greeter_request(), &CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(report.network.name, "optimism-mainnet");
        assert_eq!(report.contract, "Greeter");
        assert_eq!(report.contract_address, OPTIMISM_MAINNET_GREETER_ADDRESS);
        assert_eq!(report.quote.l2_fee(), U256::from(45_000_000u64));
        assert_eq!(report.quote.total(), U256::from(45_002_100u64));
    }

    #[tokio::test]
    async fn test_ephemeral_chain_deploys_once_before_estimating() {
        let mut seq = Sequence::new();
        let mut provider = MockEvmProviderTrait::new();
        provider
            .expect_get_chain_id()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|| async { Ok(420) }.boxed());
        provider
            .expect_send_deployment()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| async { Ok(DEPLOY_TX) }.boxed());
        provider
            .expect_get_deployment_receipt()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| {
                async {
                    Ok(Some(DeploymentReceipt {
                        status: true,
                        contract_address: Some(DEPLOYED),
                    }))
                }
                .boxed()
            });
        provider
            .expect_get_gas_price()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|| async { Ok(1_000) }.boxed());
        provider
            .expect_estimate_gas()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| async { Ok(45_000) }.boxed());
        provider
            .expect_call_contract()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| async { Ok(Bytes::from(U256::from(2_100).abi_encode())) }.boxed());

        let report = service(provider)
            .run(&greeter_request(), &CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(report.network.mode, NetworkMode::Ephemeral);
        assert_eq!(report.contract_address, DEPLOYED);
        assert_eq!(report.quote.total(), U256::from(45_002_100u64));
    }

    #[tokio::test]
    async fn test_builtin_greeter_deploys_on_ephemeral_chain() {
        let mut provider = MockEvmProviderTrait::new();
        expect_chain_id(&mut provider, 420);
        provider
            .expect_send_deployment()
            .withf(|code| {
                let builtin = ContractArtifact::greeter().unwrap();
                let init = builtin.creation_code().unwrap();
                let constructor_args = ("Hello, Hardhat!".to_string(),).abi_encode_params();
                code.starts_with(init) && code[init.len()..] == constructor_args[..]
            })
            .times(1)
            .returning(|_| async { Ok(DEPLOY_TX) }.boxed());
        provider
            .expect_get_deployment_receipt()
            .times(1)
            .returning(|_| {
                async {
                    Ok(Some(DeploymentReceipt {
                        status: true,
                        contract_address: Some(DEPLOYED),
                    }))
                }
                .boxed()
            });
        expect_estimation(&mut provider);

        let request = QuoteRequest {
            artifact: ContractArtifact::greeter().unwrap(),
            method: "setGreeting".to_string(),
            args: vec!["Hola, mundo!".to_string()],
        };
        let report = service(provider)
            .run(&request, &CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(report.network.name, "optimism-goerli");
        assert_eq!(report.contract_address, DEPLOYED);
        assert_eq!(report.quote.total(), U256::from(45_002_100u64));
    }

    #[tokio::test]
    async fn test_unsupported_chain_reads_only_chain_id() {
        let mut provider = MockEvmProviderTrait::new();
        expect_chain_id(&mut provider, 1337);

        let err = service(provider)
            .run(&greeter_request(), &CancellationToken::new())
            .await
            .unwrap_err();

        assert!(err.is_unsupported_chain());
        assert!(matches!(
            err,
            QuoteError::Resolver(ResolverError::UnsupportedChain { chain_id: 1337, ref supported })
                if supported == &vec![10, 420, 69, 17, 11_155_420]
        ));
    }

    #[tokio::test]
    async fn test_bad_arguments_fail_before_deployment() {
        let mut provider = MockEvmProviderTrait::new();
        expect_chain_id(&mut provider, 420);
        provider.expect_send_deployment().never();

        let request = QuoteRequest {
            args: vec![],
            ..greeter_request()
        };
        let err = service(provider)
            .run(&request, &CancellationToken::new())
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            QuoteError::Encoding(EncodingError::ArgumentCount { actual: 0, .. })
        ));
    }

    #[tokio::test]
    async fn test_chain_id_failure() {
        let mut provider = MockEvmProviderTrait::new();
        provider
            .expect_get_chain_id()
            .returning(|| async { Err(ProviderError::Timeout) }.boxed());

        let err = service(provider)
            .run(&greeter_request(), &CancellationToken::new())
            .await
            .unwrap_err();

        assert!(matches!(err, QuoteError::ChainId(ProviderError::Timeout)));
    }

    #[tokio::test]
    async fn test_revert_surfaces_as_estimation_error() {
        let mut provider = MockEvmProviderTrait::new();
        expect_chain_id(&mut provider, 10);
        provider
            .expect_get_gas_price()
            .returning(|| async { Ok(1_000) }.boxed());
        provider.expect_estimate_gas().returning(|_| {
            async {
                Err(ProviderError::RpcErrorCode {
                    code: 3,
                    message: "execution reverted".to_string(),
                })
            }
            .boxed()
        });
        provider.expect_call_contract().never();

        let err = service(provider)
            .run(&greeter_request(), &CancellationToken::new())
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            QuoteError::Estimation(EstimationError::CallWouldRevert(_))
        ));
    }

    #[tokio::test]
    async fn test_cancel_while_reading_chain_id() {
        let mut provider = MockEvmProviderTrait::new();
        provider
            .expect_get_chain_id()
            .returning(|| futures::future::pending().boxed());
        let cancel = CancellationToken::new();
        cancel.cancel();

        let err = service(provider)
            .run(&greeter_request(), &cancel)
            .await
            .unwrap_err();

        assert!(err.is_cancelled());
    }

    #[test]
    fn test_report_serializes_fees_as_strings() {
        let report = QuoteReport {
            network: resolve_network(10),
            contract: "Greeter".to_string(),
            contract_address: OPTIMISM_MAINNET_GREETER_ADDRESS,
            method: "setGreeting".to_string(),
            quote: FeeQuote::new(45_000, 1_000, U256::from(2_100)).unwrap(),
        };

        let json = serde_json::to_value(&report).unwrap();

        assert_eq!(json["network"]["chainId"], 10);
        assert_eq!(
            json["contractAddress"].as_str().unwrap().parse::<Address>().unwrap(),
            OPTIMISM_MAINNET_GREETER_ADDRESS
        );
        assert_eq!(json["quote"]["total"], "45002100");
    }
}
