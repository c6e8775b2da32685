//! Transaction and query wire types.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use crate::contracts::payload::ExecuteMsg;
use crate::error::{Error, Result};

/// An amount of a native denomination. Amounts travel as integer strings
/// on the wire; fractional units do not exist on the ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coin {
    pub denom: String,
    #[serde(
        serialize_with = "ser_u128_string",
        deserialize_with = "de_u128_string_or_number"
    )]
    pub amount: u128,
}

impl Coin {
    pub fn new(denom: &str, amount: u128) -> Self {
        Self {
            denom: denom.to_string(),
            amount,
        }
    }
}

/// Transaction fee: a gas limit plus the coins paying for it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fee {
    pub amount: Vec<Coin>,
    #[serde(
        serialize_with = "ser_u64_string",
        deserialize_with = "de_u64_string_or_number"
    )]
    pub gas: u64,
}

/// On-chain account state needed to sign: fetched fresh for every signing
/// pass, never cached locally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct AccountState {
    #[serde(deserialize_with = "de_u64_string_or_number")]
    pub account_number: u64,
    #[serde(default, deserialize_with = "de_u64_string_or_number")]
    pub sequence: u64,
}

/// A single contract execution: sender, target contract, the structured
/// command payload, and optional attached funds. Ephemeral — built, signed,
/// broadcast, then discarded.
#[derive(Debug, Clone, PartialEq)]
pub struct ContractCall {
    pub sender: String,
    pub contract: String,
    pub msg: ExecuteMsg,
    pub funds: Vec<Coin>,
}

impl ContractCall {
    /// The wire representation of this call inside a transaction envelope.
    pub(crate) fn to_wire(&self) -> Result<Value> {
        Ok(serde_json::json!({
            "type": "wasm/MsgExecuteContract",
            "value": {
                "sender": &self.sender,
                "contract": &self.contract,
                "execute_msg": serde_json::to_value(&self.msg)
                    .map_err(|e| Error::Signing(format!("unserializable payload: {}", e)))?,
                "coins": &self.funds,
            }
        }))
    }
}

/// A signed transaction envelope, ready for broadcast. Consumed exactly
/// once by [`crate::ledger::LedgerClient::broadcast`].
#[derive(Debug, Clone)]
pub struct SignedTx {
    envelope: Value,
}

impl SignedTx {
    pub(crate) fn new(envelope: Value) -> Self {
        Self { envelope }
    }

    /// The `StdTx` JSON envelope.
    pub fn envelope(&self) -> &Value {
        &self.envelope
    }

    pub(crate) fn into_envelope(self) -> Value {
        self.envelope
    }
}

/// Terminal artifact of a broadcast. `success == false` means the ledger
/// rejected the transaction after the transport accepted it; that is a
/// normal, inspectable outcome, not a local failure.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BroadcastResult {
    pub success: bool,
    pub txhash: String,
    pub raw_log: String,
    pub height: u64,
}

pub(crate) fn ser_u128_string<S: Serializer>(v: &u128, s: S) -> std::result::Result<S::Ok, S::Error> {
    s.serialize_str(&v.to_string())
}

pub(crate) fn ser_u64_string<S: Serializer>(v: &u64, s: S) -> std::result::Result<S::Ok, S::Error> {
    s.serialize_str(&v.to_string())
}

/// The ledger is inconsistent about numeric encoding: token amounts are
/// decimal strings, some heights and codes are bare numbers. Accept both.
pub(crate) fn de_u128_string_or_number<'de, D: Deserializer<'de>>(
    d: D,
) -> std::result::Result<u128, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(u64),
    }
    match Raw::deserialize(d)? {
        Raw::Text(text) => text
            .parse()
            .map_err(|_| serde::de::Error::custom(format!("non-integer amount '{}'", text))),
        Raw::Number(n) => Ok(u128::from(n)),
    }
}

pub(crate) fn de_u64_string_or_number<'de, D: Deserializer<'de>>(
    d: D,
) -> std::result::Result<u64, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(u64),
    }
    match Raw::deserialize(d)? {
        Raw::Text(text) => text
            .parse()
            .map_err(|_| serde::de::Error::custom(format!("non-integer value '{}'", text))),
        Raw::Number(n) => Ok(n),
    }
}
