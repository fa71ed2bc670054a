#![allow(dead_code)]

use std::sync::Mutex;

use once_cell::sync::Lazy;
use private_bank::{JsonAccountStore, Ledger, Transaction, Transfer};
use tempfile::TempDir;

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

/// Creates a store backed by a unique directory for each test.
pub fn setup_store() -> JsonAccountStore {
    let temp = TempDir::new().expect("create temp dir");
    let root = temp.path().join("persist");
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);
    JsonAccountStore::new(root)
}

pub fn rent() -> Transaction {
    Transaction::outgoing(
        Transfer::new("01.01.2019", "Miete", 800.0, "Lisa", "Frank").expect("valid transfer"),
    )
}

pub fn salary() -> Transaction {
    Transaction::incoming(
        Transfer::new("01.01.2019", "Gehalt", 2000.0, "Herr Mustermann", "Lisa")
            .expect("valid transfer"),
    )
}

/// Ledger with default interests (0.2, 0.2) and Lisa's account seeded.
pub fn lisa_ledger() -> Ledger {
    let mut ledger = Ledger::new("Meine Bank", 0.2, 0.2).expect("valid interests");
    ledger
        .create_account_with("Lisa", vec![salary(), rent()])
        .expect("seed Lisa");
    ledger
}
