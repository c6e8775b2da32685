//! Ledger automation runner library.
//!
//! A client of an already-running contract ledger: each workflow reads
//! contract state, decides whether a state change is warranted, signs and
//! broadcasts the resulting transaction, and re-reads the state for the
//! operator to inspect.

pub mod config;
pub mod contracts;
pub mod error;
pub mod fees;
pub mod keys;
pub mod ledger;
pub mod observability;
pub mod workflow;

pub use config::schema::RunnerConfig;
pub use error::{Error, Result};
pub use workflow::{DecisionPolicy, Session, Workflow, WorkflowReport};
