//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → RunnerConfig (validated, immutable)
//!     → consumed by Session construction
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; the runner is one-shot, no reload
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::load_config;
pub use schema::{ContractsConfig, FeeOracleConfig, LedgerConfig, RunnerConfig};
