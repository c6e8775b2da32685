//! Wallet: a signing identity bound to the ledger client.

use std::sync::Arc;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use serde_json::Value;

use crate::error::{Error, Result};
use crate::keys::Identity;
use crate::ledger::client::LedgerClient;
use crate::ledger::tx::{AccountState, ContractCall, Fee, SignedTx};

/// Binds one identity to a shared ledger client. Stateless beyond the
/// binding; one wallet per identity.
#[derive(Debug, Clone)]
pub struct Wallet {
    identity: Identity,
    client: Arc<LedgerClient>,
}

impl Wallet {
    pub fn new(identity: Identity, client: Arc<LedgerClient>) -> Self {
        Self { identity, client }
    }

    /// The bound identity's account address.
    pub fn address(&self) -> &str {
        self.identity.address()
    }

    /// Build and sign a transaction from an ordered sequence of contract
    /// calls.
    ///
    /// Message order is preserved exactly as given: the ledger executes
    /// messages within one transaction strictly in sequence, and a later
    /// message may depend on an earlier one's effect. Account number and
    /// sequence are fetched fresh from the chain for every signing pass,
    /// so a re-invoked workflow always signs against current state.
    pub async fn create_and_sign(&self, msgs: Vec<ContractCall>) -> Result<SignedTx> {
        if msgs.is_empty() {
            return Err(Error::Signing(
                "a transaction requires at least one message".to_string(),
            ));
        }

        let account = self.client.account(self.identity.address()).await?;
        let fee = self.client.standard_fee()?;

        let wire_msgs = msgs
            .iter()
            .map(ContractCall::to_wire)
            .collect::<Result<Vec<Value>>>()?;

        let sign_doc = sign_doc(self.client.chain_id(), &account, &fee, &wire_msgs)?;
        let signature = self.identity.sign(&sign_doc)?;

        let envelope = serde_json::json!({
            "msg": &wire_msgs,
            "fee": &fee,
            "signatures": [{
                "signature": BASE64.encode(signature),
                "pub_key": {
                    "type": "tendermint/PubKeySecp256k1",
                    "value": BASE64.encode(self.identity.public_key()),
                },
            }],
            "memo": "",
        });

        tracing::debug!(
            sender = %self.identity.address(),
            msgs = msgs.len(),
            sequence = account.sequence,
            "transaction signed"
        );

        Ok(SignedTx::new(envelope))
    }
}

/// Canonical sign-doc bytes for a transaction.
///
/// The chain verifies the signature over the sorted-key JSON form.
/// `serde_json` maps are BTree-backed, so serializing through `Value`
/// yields exactly that canonical ordering.
fn sign_doc(
    chain_id: &str,
    account: &AccountState,
    fee: &Fee,
    wire_msgs: &[Value],
) -> Result<Vec<u8>> {
    let doc = serde_json::json!({
        "account_number": account.account_number.to_string(),
        "chain_id": chain_id,
        "fee": fee,
        "memo": "",
        "msgs": wire_msgs,
        "sequence": account.sequence.to_string(),
    });
    serde_json::to_vec(&doc).map_err(|e| Error::Signing(format!("sign-doc encoding failed: {}", e)))
}
