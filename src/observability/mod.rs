//! Observability subsystem.
//!
//! Logging only: the runner is a short-lived, operator-observed script, so
//! every workflow prints its before-state, broadcast result, and after-state
//! through structured log events.

pub mod logging;
