//! Ledger LCD client.
//!
//! # Responsibilities
//! - Execute read-only contract queries
//! - Fetch account state for signing
//! - Submit signed transactions and classify the outcome
//!
//! The key failure-classification decision lives in [`LedgerClient::broadcast`]:
//! a transport failure is a local, retryable error, while a ledger-side
//! rejection is returned as inspectable data and never raised.

use serde::Deserialize;
use serde_json::Value;
use url::Url;

use crate::config::schema::LedgerConfig;
use crate::contracts::payload::QueryMsg;
use crate::error::{Error, Result};
use crate::fees::GasPrices;
use crate::ledger::tx::{
    de_u64_string_or_number, AccountState, BroadcastResult, Coin, Fee, SignedTx,
};

/// Result of a read-only contract query. The payload schema is
/// contract-specific; callers decode the named fields they expect.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct QueryResult {
    /// Address the query was executed against.
    pub contract: String,
    /// The contract's response, verbatim.
    pub value: Value,
}

impl QueryResult {
    /// Decode the response into an expected shape.
    pub fn decode<T: serde::de::DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_value(self.value.clone()).map_err(|e| Error::Query {
            contract: self.contract.clone(),
            reason: format!("unexpected response shape: {}", e),
        })
    }
}

impl std::fmt::Display for QueryResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value)
    }
}

#[derive(Deserialize)]
struct QueryEnvelope {
    result: Value,
}

#[derive(Deserialize)]
struct AccountEnvelope {
    result: AccountWrapper,
}

#[derive(Deserialize)]
struct AccountWrapper {
    value: AccountState,
}

#[derive(Deserialize)]
struct BroadcastEnvelope {
    #[serde(default)]
    txhash: String,
    #[serde(default)]
    code: u32,
    #[serde(default)]
    raw_log: String,
    #[serde(default, deserialize_with = "de_u64_string_or_number")]
    height: u64,
}

/// Wrapper around the remote LCD endpoint. Constructed once per process and
/// read-only afterwards; safely shared by every wallet and workflow.
pub struct LedgerClient {
    http: reqwest::Client,
    lcd_url: String,
    chain_id: String,
    fee_denom: String,
    gas_limit: u64,
    gas_adjustment: f64,
    gas_prices: GasPrices,
}

impl LedgerClient {
    /// Create a client from ledger configuration and a fetched pricing table.
    pub fn new(config: &LedgerConfig, gas_prices: GasPrices) -> Result<Self> {
        Url::parse(&config.lcd_url)
            .map_err(|e| Error::Configuration(format!("invalid LCD URL '{}': {}", config.lcd_url, e)))?;

        tracing::info!(
            lcd_url = %config.lcd_url,
            chain_id = %config.chain_id,
            gas_limit = config.gas_limit,
            "ledger client initialized"
        );

        Ok(Self {
            http: reqwest::Client::new(),
            lcd_url: config.lcd_url.trim_end_matches('/').to_string(),
            chain_id: config.chain_id.clone(),
            fee_denom: config.fee_denom.clone(),
            gas_limit: config.gas_limit,
            gas_adjustment: config.gas_adjustment,
            gas_prices,
        })
    }

    /// The chain identifier transactions are signed against.
    pub fn chain_id(&self) -> &str {
        &self.chain_id
    }

    /// The standard fee for one transaction, from the pricing table, the
    /// configured gas limit, and the adjustment factor. Rounds up: an
    /// underpaid fee is the failure the adjustment exists to avoid.
    pub fn standard_fee(&self) -> Result<Fee> {
        let price = self.gas_prices.price(&self.fee_denom).ok_or_else(|| {
            Error::Configuration(format!("no gas price for fee denom '{}'", self.fee_denom))
        })?;
        let amount = (self.gas_limit as f64 * price * self.gas_adjustment).ceil() as u128;
        Ok(Fee {
            amount: vec![Coin::new(&self.fee_denom, amount)],
            gas: self.gas_limit,
        })
    }

    /// Execute a read-only contract query. Side-effect-free from this
    /// system's perspective.
    pub async fn query(&self, contract: &str, payload: &QueryMsg) -> Result<QueryResult> {
        let payload_json = serde_json::to_string(payload).map_err(|e| Error::Query {
            contract: contract.to_string(),
            reason: format!("unserializable query payload: {}", e),
        })?;

        let url = format!("{}/wasm/contracts/{}/store", self.lcd_url, contract);
        let response = self
            .http
            .get(&url)
            .query(&[("query_msg", payload_json.as_str())])
            .send()
            .await
            .map_err(|e| Error::Network(format!("ledger unreachable: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Query {
                contract: contract.to_string(),
                reason: format!("ledger returned {}: {}", status, body),
            });
        }

        let envelope: QueryEnvelope = response.json().await.map_err(|e| Error::Query {
            contract: contract.to_string(),
            reason: format!("malformed query response: {}", e),
        })?;

        Ok(QueryResult {
            contract: contract.to_string(),
            value: envelope.result,
        })
    }

    /// Fetch the account number and sequence for an address.
    pub async fn account(&self, address: &str) -> Result<AccountState> {
        let url = format!("{}/auth/accounts/{}", self.lcd_url, address);
        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| Error::Network(format!("ledger unreachable: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Query {
                contract: address.to_string(),
                reason: format!("account lookup returned {}", status),
            });
        }

        let envelope: AccountEnvelope = response.json().await.map_err(|e| Error::Query {
            contract: address.to_string(),
            reason: format!("malformed account response: {}", e),
        })?;
        Ok(envelope.result.value)
    }

    /// Submit a signed transaction in sync mode.
    ///
    /// Fails with a network error only on transport failure. A ledger-side
    /// rejection (insufficient funds, contract error) comes back as a
    /// [`BroadcastResult`] with `success == false` for the operator to
    /// inspect; it is never converted into an error.
    pub async fn broadcast(&self, tx: SignedTx) -> Result<BroadcastResult> {
        let body = serde_json::json!({
            "tx": tx.into_envelope(),
            "mode": "sync",
        });

        let url = format!("{}/txs", self.lcd_url);
        let response = self
            .http
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| Error::Network(format!("broadcast failed in transport: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Network(format!(
                "broadcast endpoint returned {}",
                status
            )));
        }

        let envelope: BroadcastEnvelope = response
            .json()
            .await
            .map_err(|e| Error::Network(format!("malformed broadcast response: {}", e)))?;

        let result = BroadcastResult {
            success: envelope.code == 0,
            txhash: envelope.txhash,
            raw_log: envelope.raw_log,
            height: envelope.height,
        };

        if result.success {
            tracing::info!(txhash = %result.txhash, height = result.height, "transaction accepted");
        } else {
            tracing::warn!(
                txhash = %result.txhash,
                code = envelope.code,
                raw_log = %result.raw_log,
                "transaction rejected by the ledger"
            );
        }

        Ok(result)
    }
}

impl std::fmt::Debug for LedgerClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LedgerClient")
            .field("lcd_url", &self.lcd_url)
            .field("chain_id", &self.chain_id)
            .field("gas_limit", &self.gas_limit)
            .finish()
    }
}
