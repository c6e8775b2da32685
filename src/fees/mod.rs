//! Fee pricing subsystem.

pub mod oracle;

pub use oracle::{FeeOracleClient, GasPrices};
