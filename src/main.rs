//! Estimates the total fee (L2 execution + L1 data) of a contract call on an OP Stack rollup.
//!
//! ```text
//! rollup-fee-estimator --network optimism-mainnet
//! rollup-fee-estimator --rpc-url http://127.0.0.1:8545 --artifact artifacts/Greeter.json \
//!     --method setGreeting --arg "Hola, mundo!" --json
//! ```
//!
//! Exit codes: 0 on success, 2 for an unsupported chain, 130 when interrupted, 1 otherwise.
use std::{path::PathBuf, process::ExitCode, sync::Arc};

use clap::Parser;
use color_eyre::{eyre::bail, Result};
use dotenvy::dotenv;
use log::info;
use tokio_util::sync::CancellationToken;

use rollup_fee_estimator::{
    config::{load_networks, EstimatorConfig},
    constants::{DEFAULT_METHOD, DEFAULT_METHOD_ARG},
    logging::setup_logging,
    models::{ContractArtifact, QuoteError},
    services::{
        provider::EvmProvider,
        quote_service::{QuoteRequest, QuoteService},
        report::format_report,
    },
    utils::setup_signal_handler,
};

#[derive(Parser, Debug)]
#[command(name = "rollup-fee-estimator")]
#[command(about = "Estimate the L2 + L1 fee of a contract call on an OP Stack rollup")]
struct Args {
    /// Network name from the networks file
    #[arg(long, required_unless_present = "rpc_url")]
    network: Option<String>,

    /// JSON-RPC endpoint, overrides --network
    #[arg(long)]
    rpc_url: Option<String>,

    /// Networks file (default: CONFIG_PATH or ./config/networks.json)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Hardhat artifact of the target contract (default: built-in Greeter interface)
    #[arg(long)]
    artifact: Option<PathBuf>,

    /// Method to estimate
    #[arg(long, default_value = DEFAULT_METHOD)]
    method: String,

    /// Method argument, repeat for each parameter
    #[arg(long = "arg")]
    args: Option<Vec<String>>,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,
}

impl Args {
    fn method_args(&self) -> Vec<String> {
        match &self.args {
            Some(args) => args.clone(),
            None if self.method == DEFAULT_METHOD => vec![DEFAULT_METHOD_ARG.to_string()],
            None => Vec::new(),
        }
    }
}

async fn run(args: Args) -> Result<()> {
    let config = EstimatorConfig::from_env()?;

    let rpc_url = match (&args.rpc_url, &args.network) {
        (Some(url), _) => url.clone(),
        (None, Some(name)) => {
            let config_path = args.config.as_ref().unwrap_or(&config.config_path);
            load_networks(config_path)?.find(name)?.url.clone()
        }
        (None, None) => bail!("either --network or --rpc-url is required"),
    };

    let artifact = match &args.artifact {
        Some(path) => ContractArtifact::from_file(path)?,
        None => ContractArtifact::greeter()?,
    };

    let provider = EvmProvider::new(
        &rpc_url,
        config.rpc_timeout_ms,
        Some(config.deployer_signer()?),
    )?;
    info!("Using RPC endpoint {}", provider.rpc_url());

    let service = QuoteService::new(
        Arc::new(provider),
        config.deploy_confirmation_timeout(),
        config.deploy_poll_interval(),
    );
    let request = QuoteRequest {
        artifact,
        method: args.method.clone(),
        args: args.method_args(),
    };

    let cancel = CancellationToken::new();
    setup_signal_handler(cancel.clone());

    let report = service.run(&request, &cancel).await?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{} is at: {}", report.contract, report.contract_address);
        println!("Network: {} {}", report.network.name, report.network.chain_id);
        println!("{}", format_report(&report.quote));
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    color_eyre::install()?;
    dotenv().ok();

    let args = Args::parse();
    setup_logging()?;

    let Err(err) = run(args).await else {
        return Ok(ExitCode::SUCCESS);
    };

    let (code, message) = failure_report(&err);
    eprintln!("{message}");

    Ok(ExitCode::from(code))
}

/// Exit code and the single stderr line for a failed run.
fn failure_report(err: &color_eyre::Report) -> (u8, String) {
    match err.downcast_ref::<QuoteError>() {
        Some(quote_err) if quote_err.is_cancelled() => (130, "Interrupted".to_string()),
        Some(quote_err) if quote_err.is_unsupported_chain() => (2, quote_err.guidance()),
        _ => (1, format!("Error: {err:?}")),
    }
}
