//! Contract artifacts and handles.
//!
//! A [`ContractArtifact`] is the compiled interface (and optionally the creation bytecode) of a
//! contract, read from a Hardhat-style artifact file. A [`ContractHandle`] binds an artifact's
//! interface to a concrete on-chain address.
use std::{fs, path::Path, sync::Arc};

use alloy::{
    json_abi::JsonAbi,
    primitives::{Address, Bytes},
};
use serde::Deserialize;

use super::ArtifactError;

const GREETER_ARTIFACT: &str = include_str!("../../artifacts/Greeter.json");

/// Compiled contract as emitted by Hardhat (`artifacts/contracts/<Name>.sol/<Name>.json`).
///
/// Only the fields the estimator needs are read; everything else in the file is ignored.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractArtifact {
    pub contract_name: String,
    pub abi: JsonAbi,
    #[serde(default)]
    pub bytecode: Option<Bytes>,
}

impl ContractArtifact {
    /// Loads an artifact from a JSON file on disk.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ArtifactError> {
        let content = fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Parses an artifact from its JSON text.
    pub fn from_json(content: &str) -> Result<Self, ArtifactError> {
        let artifact: ContractArtifact = serde_json::from_str(content)?;

        if artifact.contract_name.is_empty() {
            return Err(ArtifactError::MissingField("contractName".into()));
        }

        Ok(artifact)
    }

    /// The sample `Greeter` contract bundled with the binary, creation bytecode included.
    pub fn greeter() -> Result<Self, ArtifactError> {
        Self::from_json(GREETER_ARTIFACT)
    }

    /// Creation bytecode, if the artifact carries a non-empty one.
    pub fn creation_code(&self) -> Option<&Bytes> {
        self.bytecode.as_ref().filter(|code| !code.is_empty())
    }
}

/// A contract interface bound to a deployed address.
///
/// Handles are created by the contract resolver and only ever read downstream.
#[derive(Debug, Clone)]
pub struct ContractHandle {
    name: String,
    address: Address,
    abi: Arc<JsonAbi>,
}

impl ContractHandle {
    /// Binds the artifact's interface to `address`. No RPC call is made.
    pub fn attach(address: Address, artifact: &ContractArtifact) -> Self {
        Self {
            name: artifact.contract_name.clone(),
            address,
            abi: Arc::new(artifact.abi.clone()),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn address(&self) -> Address {
        self.address
    }

    pub fn abi(&self) -> &JsonAbi {
        &self.abi
    }
}
