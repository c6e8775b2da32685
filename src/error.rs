//! Error taxonomy for the runner.
//!
//! Four kinds abort a workflow and propagate to the process boundary:
//! configuration, network, query, and signing failures. A ledger-side
//! rejection of a broadcast transaction is deliberately NOT an error —
//! the transport accepted the submission and the rejection is a normal,
//! inspectable outcome carried in [`crate::ledger::BroadcastResult`].

use thiserror::Error;

/// Errors that abort a workflow.
#[derive(Debug, Error)]
pub enum Error {
    /// Missing or invalid local configuration (key table, address book,
    /// config file). Not retryable; fix the configuration.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Transport failure reaching the fee oracle or the ledger endpoint.
    /// The whole workflow may be re-invoked.
    #[error("network error: {0}")]
    Network(String),

    /// The ledger rejected a read, or a query result did not have the
    /// expected shape. Typically a schema bug; not retryable.
    #[error("query against {contract} failed: {reason}")]
    Query { contract: String, reason: String },

    /// Key material is invalid or signing failed locally. Not retryable.
    #[error("signing error: {0}")]
    Signing(String),

    /// The (network, contract name) pair is absent from the address book.
    #[error("no address for contract '{name}' on network '{network}'")]
    NotFound { network: String, name: String },
}

/// Result type used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
