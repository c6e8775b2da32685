//! Logical contract name → ledger address resolution.
//!
//! Addresses come from two read-only sources, checked in order: literal
//! addresses in the runner configuration, then a structured address book
//! file as emitted by the deployment tool (`network -> name ->
//! {contractAddresses: {default}}`). Loaded once per workflow start.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;

use crate::config::schema::ContractsConfig;
use crate::error::{Error, Result};

/// The deployment tool's address book file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct AddressBook {
    networks: BTreeMap<String, BTreeMap<String, ContractEntry>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ContractEntry {
    #[serde(rename = "contractAddresses")]
    pub contract_addresses: AddressSet,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AddressSet {
    pub default: String,
}

impl AddressBook {
    /// Parse an address book from its JSON text.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| Error::Configuration(format!("malformed address book: {}", e)))
    }

    /// Load an address book file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::Configuration(format!("cannot read address book {}: {}", path.display(), e))
        })?;
        Self::from_json(&content)
    }

    fn lookup(&self, network: &str, name: &str) -> Option<&str> {
        self.networks
            .get(network)
            .and_then(|contracts| contracts.get(name))
            .map(|entry| entry.contract_addresses.default.as_str())
    }
}

/// Resolves logical contract names for one process. Pure lookup: a given
/// loaded book returns the same address every time.
#[derive(Debug, Default)]
pub struct AddressResolver {
    literals: BTreeMap<String, BTreeMap<String, String>>,
    book: AddressBook,
}

impl AddressResolver {
    /// Build a resolver from the contracts section of the configuration,
    /// loading the address book file if one is configured.
    pub fn from_config(config: &ContractsConfig) -> Result<Self> {
        let book = match &config.address_book_path {
            Some(path) => AddressBook::from_file(Path::new(path))?,
            None => AddressBook::default(),
        };
        Ok(Self {
            literals: config.addresses.clone(),
            book,
        })
    }

    pub fn new(book: AddressBook) -> Self {
        Self {
            literals: BTreeMap::new(),
            book,
        }
    }

    /// Resolve a logical contract name on a network.
    pub fn resolve(&self, network: &str, name: &str) -> Result<&str> {
        if let Some(address) = self
            .literals
            .get(network)
            .and_then(|contracts| contracts.get(name))
        {
            return Ok(address.as_str());
        }
        self.book
            .lookup(network, name)
            .ok_or_else(|| Error::NotFound {
                network: network.to_string(),
                name: name.to_string(),
            })
    }
}
