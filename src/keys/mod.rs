//! Key management subsystem.
//!
//! # Data Flow
//! ```text
//! Key table (name → mnemonic, local trusted config)
//!     → identity.rs (deterministic key + address derivation)
//!     → keystore.rs (named lookup)
//! ```
//!
//! # Security Constraints
//! - Mnemonics come ONLY from local trusted configuration
//! - Key material is never logged, serialized, or transmitted
//! - Derivation is pure; an identity is immutable for the process lifetime

pub mod identity;
pub mod keystore;

pub use identity::Identity;
pub use keystore::KeyStore;
