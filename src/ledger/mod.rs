//! Transactions and the ledger that groups them into accounts.

#[allow(clippy::module_inception)]
pub mod ledger;
pub mod transaction;

pub use ledger::{Ledger, LoadFailure, LoadReport};
pub use transaction::{Payment, Transaction, Transfer};
