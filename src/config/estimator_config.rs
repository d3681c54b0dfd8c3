use std::{env, fmt, path::PathBuf, str::FromStr, time::Duration};

use alloy::signers::local::{coins_bip39::English, MnemonicBuilder, PrivateKeySigner};

use super::ConfigError;
use crate::constants::{
    DEFAULT_CONFIG_PATH, DEFAULT_DEPLOY_CONFIRMATION_TIMEOUT_MS, DEFAULT_DEPLOY_POLL_INTERVAL_MS,
    DEFAULT_DEV_MNEMONIC, DEFAULT_RPC_TIMEOUT_MS,
};

/// Runtime settings read from the environment (and `.env`).
#[derive(Clone)]
pub struct EstimatorConfig {
    pub rpc_timeout_ms: u64,
    pub private_key: Option<String>,
    pub mnemonic: Option<String>,
    pub deploy_confirmation_timeout_ms: u64,
    pub deploy_poll_interval_ms: u64,
    pub config_path: PathBuf,
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        Self {
            rpc_timeout_ms: DEFAULT_RPC_TIMEOUT_MS,
            private_key: None,
            mnemonic: None,
            deploy_confirmation_timeout_ms: DEFAULT_DEPLOY_CONFIRMATION_TIMEOUT_MS,
            deploy_poll_interval_ms: DEFAULT_DEPLOY_POLL_INTERVAL_MS,
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
        }
    }
}

impl fmt::Debug for EstimatorConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EstimatorConfig")
            .field("rpc_timeout_ms", &self.rpc_timeout_ms)
            .field("private_key", &self.private_key.as_ref().map(|_| "<redacted>"))
            .field("mnemonic", &self.mnemonic.as_ref().map(|_| "<redacted>"))
            .field(
                "deploy_confirmation_timeout_ms",
                &self.deploy_confirmation_timeout_ms,
            )
            .field("deploy_poll_interval_ms", &self.deploy_poll_interval_ms)
            .field("config_path", &self.config_path)
            .finish()
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}

fn parse_var<T: FromStr>(key: &str, default: T) -> Result<T, ConfigError> {
    match non_empty_var(key) {
        Some(value) => value.trim().parse().map_err(|_| ConfigError::InvalidValue {
            key: key.to_string(),
            value,
        }),
        None => Ok(default),
    }
}

impl EstimatorConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            rpc_timeout_ms: parse_var("RPC_TIMEOUT_MS", DEFAULT_RPC_TIMEOUT_MS)?,
            private_key: non_empty_var("PRIVATE_KEY"),
            mnemonic: non_empty_var("MNEMONIC"),
            deploy_confirmation_timeout_ms: parse_var(
                "DEPLOY_CONFIRMATION_TIMEOUT_MS",
                DEFAULT_DEPLOY_CONFIRMATION_TIMEOUT_MS,
            )?,
            deploy_poll_interval_ms: parse_var(
                "DEPLOY_POLL_INTERVAL_MS",
                DEFAULT_DEPLOY_POLL_INTERVAL_MS,
            )?,
            config_path: non_empty_var("CONFIG_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH)),
        })
    }

    pub fn deploy_confirmation_timeout(&self) -> Duration {
        Duration::from_millis(self.deploy_confirmation_timeout_ms)
    }

    pub fn deploy_poll_interval(&self) -> Duration {
        Duration::from_millis(self.deploy_poll_interval_ms)
    }

    /// Key used to sign deployments on ephemeral chains.
    ///
    /// `PRIVATE_KEY` wins over `MNEMONIC`; with neither set, account 0 of the public development
    /// mnemonic is used.
    pub fn deployer_signer(&self) -> Result<PrivateKeySigner, ConfigError> {
        if let Some(key) = &self.private_key {
            return key
                .trim()
                .parse::<PrivateKeySigner>()
                .map_err(|e| ConfigError::InvalidSigner(format!("PRIVATE_KEY: {e}")));
        }

        let phrase = self.mnemonic.as_deref().unwrap_or(DEFAULT_DEV_MNEMONIC);
        MnemonicBuilder::<English>::default()
            .phrase(phrase)
            .index(0u32)
            .and_then(|builder| builder.build())
            .map_err(|e| ConfigError::InvalidSigner(format!("MNEMONIC: {e}")))
    }
}
