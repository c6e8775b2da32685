//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the runner.
//! All types derive Serde traits for deserialization from config files.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Root configuration for the runner.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct RunnerConfig {
    /// Network key used for address resolution (e.g. "testnet").
    pub network: String,

    /// Ledger endpoint and transaction parameters.
    pub ledger: LedgerConfig,

    /// Fee pricing service.
    pub fees: FeeOracleConfig,

    /// Key table: identity name → mnemonic phrase. Local and trusted;
    /// never transmitted, used only for local signing.
    pub keys: BTreeMap<String, String>,

    /// Contract address sources.
    pub contracts: ContractsConfig,
}

/// Ledger endpoint configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LedgerConfig {
    /// LCD endpoint URL.
    pub lcd_url: String,

    /// Chain identifier transactions are signed against.
    pub chain_id: String,

    /// Bech32 prefix for derived account addresses.
    pub account_prefix: String,

    /// Denomination fees are paid in.
    pub fee_denom: String,

    /// Gas limit per transaction.
    pub gas_limit: u64,

    /// Fee buffer multiplier so transactions go through smoothly.
    pub gas_adjustment: f64,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            lcd_url: "https://bombay-lcd.terra.dev".to_string(),
            chain_id: "bombay-12".to_string(),
            account_prefix: "terra".to_string(),
            fee_denom: "uluna".to_string(),
            gas_limit: 10_000_000,
            gas_adjustment: 1.5,
        }
    }
}

/// Fee pricing service configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct FeeOracleConfig {
    /// HTTP endpoint returning the `denom → decimal price` map.
    pub oracle_url: String,
}

impl Default for FeeOracleConfig {
    fn default() -> Self {
        Self {
            oracle_url: "https://bombay-fcd.terra.dev/v1/txs/gas_prices".to_string(),
        }
    }
}

/// Contract address sources.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ContractsConfig {
    /// Optional path to the deployment tool's address book file.
    pub address_book_path: Option<String>,

    /// Literal addresses: network → logical name → address. Checked before
    /// the address book.
    pub addresses: BTreeMap<String, BTreeMap<String, String>>,
}
