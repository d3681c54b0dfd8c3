//! Named RPC endpoints, read from a JSON networks file.
//!
//! ```json
//! { "networks": [ { "name": "optimism-mainnet", "url": "https://mainnet.optimism.io" } ] }
//! ```
//!
//! When the file does not exist the built-in endpoints are used.
use regex::Regex;
use reqwest::Url;
use serde::{Deserialize, Serialize};
use std::{collections::HashSet, fs, path::Path};
use thiserror::Error;

const NETWORK_NAME_PATTERN: &str = r"^[a-zA-Z0-9-_]+$";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid network name format: {0}")]
    InvalidNameFormat(String),
    #[error("Missing required field: {0}")]
    MissingField(String),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
    #[error("Duplicate network name: {0}")]
    DuplicateName(String),
    #[error("Invalid RPC URL for {name}: {url}")]
    InvalidUrl { name: String, url: String },
    #[error("Unknown network {name} (available: {})", .available.join(", "))]
    UnknownNetwork {
        name: String,
        available: Vec<String>,
    },
    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },
    #[error("Invalid deployer key: {0}")]
    InvalidSigner(String),
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct NetworkConfig {
    pub name: String,
    pub url: String,
}

impl NetworkConfig {
    fn new(name: &str, url: &str) -> Self {
        Self {
            name: name.to_string(),
            url: url.to_string(),
        }
    }

    pub fn validate(&self, name_pattern: &Regex) -> Result<(), ConfigError> {
        if self.name.is_empty() {
            return Err(ConfigError::MissingField("network name".into()));
        }
        if !name_pattern.is_match(&self.name) {
            return Err(ConfigError::InvalidNameFormat(format!(
                "{}: name must contain only letters, numbers, dashes and underscores",
                self.name
            )));
        }
        if self.url.is_empty() {
            return Err(ConfigError::MissingField(format!("url for {}", self.name)));
        }

        let is_http = Url::parse(&self.url)
            .map(|url| matches!(url.scheme(), "http" | "https"))
            .unwrap_or(false);
        if !is_http {
            return Err(ConfigError::InvalidUrl {
                name: self.name.clone(),
                url: self.url.clone(),
            });
        }

        Ok(())
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct NetworksFile {
    pub networks: Vec<NetworkConfig>,
}

impl Default for NetworksFile {
    /// Local OP Stack devnet (L2 and L1), OP Mainnet and the retired Kovan testnet.
    fn default() -> Self {
        Self {
            networks: vec![
                NetworkConfig::new("optimism", "http://127.0.0.1:8545"),
                NetworkConfig::new("optimism-l1", "http://127.0.0.1:9545"),
                NetworkConfig::new("optimism-mainnet", "https://mainnet.optimism.io"),
                NetworkConfig::new("optimistic-kovan", "https://kovan.optimism.io"),
            ],
        }
    }
}

impl NetworksFile {
    fn validate_name_uniqueness(networks: &[NetworkConfig]) -> Result<(), ConfigError> {
        let mut seen_names = HashSet::new();
        for network in networks {
            if !seen_names.insert(&network.name) {
                return Err(ConfigError::DuplicateName(network.name.clone()));
            }
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.networks.is_empty() {
            return Err(ConfigError::MissingField("networks".into()));
        }
        Self::validate_name_uniqueness(&self.networks)?;

        let name_pattern = Regex::new(NETWORK_NAME_PATTERN)
            .map_err(|e| ConfigError::InvalidNameFormat(e.to_string()))?;
        for network in &self.networks {
            network.validate(&name_pattern)?;
        }
        Ok(())
    }

    pub fn find(&self, name: &str) -> Result<&NetworkConfig, ConfigError> {
        self.networks
            .iter()
            .find(|network| network.name == name)
            .ok_or_else(|| ConfigError::UnknownNetwork {
                name: name.to_string(),
                available: self.networks.iter().map(|n| n.name.clone()).collect(),
            })
    }
}

/// Loads and validates the networks file at `path`, falling back to the built-in endpoints
/// when the file does not exist.
pub fn load_networks(path: impl AsRef<Path>) -> Result<NetworksFile, ConfigError> {
    let path = path.as_ref();
    if !path.exists() {
        return Ok(NetworksFile::default());
    }

    let config_str = fs::read_to_string(path)?;
    let networks: NetworksFile = serde_json::from_str(&config_str)?;
    networks.validate()?;
    Ok(networks)
}
