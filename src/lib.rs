#![doc(test(attr(deny(warnings))))]

//! Private Bank keeps named accounts of transfers and interest-bearing
//! payments, computes their balances, and persists each account as a tagged
//! JSON document.

pub mod config;
pub mod errors;
pub mod ledger;
pub mod storage;
pub mod utils;

pub use errors::{ErrorKind, LedgerError, LedgerResult};
pub use ledger::{Ledger, LoadReport, Payment, Transaction, Transfer};
pub use storage::{AccountStore, JsonAccountStore};

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Private Bank tracing initialized.");
    });
}
