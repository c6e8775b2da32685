//! Contract payloads and address resolution.

pub mod payload;
pub mod resolver;

pub use payload::{BalanceResponse, ExecuteMsg, MinterResponse, PriceResponse, QueryMsg};
pub use resolver::{AddressBook, AddressResolver};
