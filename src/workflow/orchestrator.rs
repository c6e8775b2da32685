//! The read-modify-verify workflow.
//!
//! # Responsibilities
//! - Wire the subsystems into a session with no process-wide state
//! - Drive one workflow through its ordered phases:
//!   query before → decide/build → sign → broadcast → query after
//! - Report every observation for operator inspection
//!
//! Each phase short-circuits the remainder on failure. A workflow runs
//! exactly once: there is no loop, no resumption, and no automatic
//! resubmission — resubmitting the same signed transaction could
//! double-apply financial side effects, so the operator re-invokes the
//! whole workflow and a fresh transaction is derived from fresh state.

use std::sync::Arc;

use serde::Serialize;

use crate::config::schema::RunnerConfig;
use crate::contracts::payload::QueryMsg;
use crate::contracts::resolver::AddressResolver;
use crate::error::Result;
use crate::fees::FeeOracleClient;
use crate::keys::KeyStore;
use crate::ledger::client::{LedgerClient, QueryResult};
use crate::ledger::tx::{BroadcastResult, ContractCall};
use crate::ledger::wallet::Wallet;
use crate::workflow::policy::DecisionPolicy;

/// Everything one process needs to run workflows: ledger client, key
/// store, and address resolver, built explicitly from configuration.
/// Sessions are independent; tests construct several against mock ledgers.
#[derive(Debug)]
pub struct Session {
    client: Arc<LedgerClient>,
    keys: KeyStore,
    resolver: AddressResolver,
    network: String,
}

impl Session {
    /// Build a session: fetch current gas prices, construct the ledger
    /// client around them, derive all identities, load the address book.
    pub async fn connect(config: &RunnerConfig) -> Result<Self> {
        let prices = FeeOracleClient::new(&config.fees.oracle_url)
            .current_prices(&config.ledger.fee_denom)
            .await?;
        let client = Arc::new(LedgerClient::new(&config.ledger, prices)?);
        let keys = KeyStore::from_table(&config.keys, &config.ledger.account_prefix)?;
        tracing::debug!(identities = keys.names().count(), "key store ready");
        let resolver = AddressResolver::from_config(&config.contracts)?;

        Ok(Self {
            client,
            keys,
            resolver,
            network: config.network.clone(),
        })
    }

    /// The shared ledger client.
    pub fn client(&self) -> &LedgerClient {
        &self.client
    }

    /// A wallet for the named identity.
    pub fn wallet(&self, name: &str) -> Result<Wallet> {
        let identity = self.keys.identity(name)?.clone();
        Ok(Wallet::new(identity, Arc::clone(&self.client)))
    }

    /// The address of the named identity.
    pub fn identity_address(&self, name: &str) -> Result<&str> {
        Ok(self.keys.identity(name)?.address())
    }

    /// Resolve a logical contract name on the session's network.
    pub fn resolve(&self, name: &str) -> Result<&str> {
        self.resolver.resolve(&self.network, name)
    }
}

/// A read query against one contract.
#[derive(Debug, Clone, PartialEq)]
pub struct Probe {
    /// Logical name of the contract to query.
    pub contract: String,
    pub query: QueryMsg,
}

/// When to run the post-submit verification query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verify {
    /// Re-query even when the ledger rejected the transaction.
    Always,
    /// Skip the re-query when the broadcast reported failure.
    SkipOnRejection,
    /// Never re-query.
    Never,
}

/// One workflow invocation: who signs, what is probed, how the decision
/// is made, and what is executed.
#[derive(Debug, Clone)]
pub struct Workflow {
    /// Identity name in the key table.
    pub signer: String,
    /// Logical name of the contract receiving the execute message.
    pub target: String,
    /// Pre-submit read; its result feeds the decision policy.
    pub probe: Probe,
    pub policy: DecisionPolicy,
    pub verify: Verify,
    /// Optional distinct post-submit read; defaults to re-running `probe`.
    pub verify_probe: Option<Probe>,
}

/// Terminal report of one workflow pass. Logged, not persisted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorkflowReport {
    /// Resolved address of the execute target.
    pub target: String,
    /// State observed before deciding.
    pub before: QueryResult,
    pub outcome: Outcome,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// The decision policy concluded no state change is warranted. A valid
    /// terminal state, not an error.
    Skipped,
    /// A transaction was signed and broadcast.
    Submitted {
        broadcast: BroadcastResult,
        /// State observed after the submit, when verification ran.
        ///
        /// This is verification by observation, not a guarantee: ledger
        /// finality is opaque to this client, and without a
        /// block-confirmation wait the re-read may be stale. Both values
        /// are reported for the operator to compare.
        after: Option<QueryResult>,
    },
}

impl Workflow {
    /// Run the workflow once against a session.
    pub async fn run(&self, session: &Session) -> Result<WorkflowReport> {
        let target = session.resolve(&self.target)?.to_string();
        let probe_address = session.resolve(&self.probe.contract)?.to_string();

        tracing::info!(
            policy = self.policy.label(),
            signer = %self.signer,
            target = %target,
            "workflow started"
        );

        // Read-before-write: every workflow observes state before it may
        // construct a call.
        let before = session.client().query(&probe_address, &self.probe.query).await?;
        tracing::info!(contract = %probe_address, state = %before, "pre-submit state");

        let Some(decision) = self.policy.decide(&before)? else {
            tracing::info!("no state change warranted, skipping submit");
            return Ok(WorkflowReport {
                target,
                before,
                outcome: Outcome::Skipped,
            });
        };

        let wallet = session.wallet(&self.signer)?;
        let call = ContractCall {
            sender: wallet.address().to_string(),
            contract: target.clone(),
            msg: decision.msg,
            funds: decision.funds,
        };
        let signed = wallet.create_and_sign(vec![call]).await?;
        let broadcast = session.client().broadcast(signed).await?;

        let after = if self.should_verify(broadcast.success) {
            let probe = self.verify_probe.as_ref().unwrap_or(&self.probe);
            let address = session.resolve(&probe.contract)?;
            let result = session.client().query(address, &probe.query).await?;
            tracing::info!(contract = %address, state = %result, "post-submit state");
            Some(result)
        } else {
            None
        };

        Ok(WorkflowReport {
            target,
            before,
            outcome: Outcome::Submitted { broadcast, after },
        })
    }

    fn should_verify(&self, broadcast_succeeded: bool) -> bool {
        match self.verify {
            Verify::Always => true,
            Verify::SkipOnRejection => broadcast_succeeded,
            Verify::Never => false,
        }
    }
}
