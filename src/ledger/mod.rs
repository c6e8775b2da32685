//! Ledger access subsystem.
//!
//! # Data Flow
//! ```text
//! Fee oracle prices + ledger config
//!     → client.rs (LCD queries, account reads, broadcast)
//!     → wallet.rs (identity bound to the client; build + sign)
//!     → tx.rs (wire types: calls, fees, signed envelopes, results)
//! ```

pub mod client;
pub mod tx;
pub mod wallet;

pub use client::{LedgerClient, QueryResult};
pub use tx::{AccountState, BroadcastResult, Coin, ContractCall, Fee, SignedTx};
pub use wallet::Wallet;
