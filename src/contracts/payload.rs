//! Typed contract payloads.
//!
//! Query and execute bodies are structured key→value commands on the wire.
//! Each known contract operation gets a tagged variant with an explicit
//! field schema; `Raw` is the fallback for genuinely unknown contracts.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::ledger::tx::{de_u128_string_or_number, ser_u128_string};

/// Read-only contract queries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueryMsg {
    /// Current oracle price: `{"query_price": {}}`.
    QueryPrice {},
    /// Token balance of an address: `{"balance": {"address": ...}}`.
    Balance { address: String },
    /// Token minter: `{"minter": {}}`.
    Minter {},
    /// Escape hatch for contracts this crate has no schema for.
    #[serde(untagged)]
    Raw(Value),
}

/// State-changing contract commands.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExecuteMsg {
    /// Push a new price to the oracle.
    UpdatePrice { price: u64 },
    /// Transfer tokens to a recipient.
    Transfer {
        recipient: String,
        #[serde(
            serialize_with = "ser_u128_string",
            deserialize_with = "de_u128_string_or_number"
        )]
        amount: u128,
    },
    /// Mint tokens to a recipient.
    Mint {
        recipient: String,
        #[serde(
            serialize_with = "ser_u128_string",
            deserialize_with = "de_u128_string_or_number"
        )]
        amount: u128,
    },
    /// Burn tokens from the sender's balance.
    Burn {
        #[serde(
            serialize_with = "ser_u128_string",
            deserialize_with = "de_u128_string_or_number"
        )]
        amount: u128,
    },
    /// Buy from the swap contract; payment travels as attached funds.
    Buy {},
    /// Withdraw native funds from the swap contract. The swap contract
    /// takes this amount as a bare number, not a decimal string.
    Withdraw { amount: u64 },
    /// Escape hatch for contracts this crate has no schema for.
    #[serde(untagged)]
    Raw(Value),
}

/// Oracle price response: `{"price": N}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct PriceResponse {
    pub price: u64,
}

/// Token balance response; the amount is a decimal string on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct BalanceResponse {
    #[serde(deserialize_with = "de_u128_string_or_number")]
    pub balance: u128,
}

/// Token minter response.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MinterResponse {
    pub minter: String,
    #[serde(default)]
    pub cap: Option<String>,
}
