pub mod codec;
pub mod json_backend;

use std::path::PathBuf;

use crate::{errors::LedgerResult, ledger::Transaction};

/// One account file found while scanning a directory.
#[derive(Debug)]
pub struct StoredAccount {
    pub name: String,
    pub path: PathBuf,
    /// Decoded transactions, or the error that stopped this file from loading.
    pub transactions: LedgerResult<Vec<Transaction>>,
}

/// Abstraction over persistence backends that keep one document per account.
pub trait AccountStore: Send + Sync {
    /// Persists the account's transactions, replacing any earlier document.
    fn write(&self, directory: &str, account: &str, transactions: &[Transaction])
        -> LedgerResult<PathBuf>;

    /// Reads every account document in `directory`. A missing directory yields
    /// no accounts; a broken document is reported in its own entry.
    fn read_all(&self, directory: &str) -> LedgerResult<Vec<StoredAccount>>;

    /// Removes the account's document. A missing document counts as deleted:
    /// accounts live in memory until written, so an account that was never
    /// written has no file and deleting it must still succeed. Any other I/O
    /// failure is returned as `StorageFailure`.
    fn delete(&self, directory: &str, account: &str) -> LedgerResult<()>;
}

pub use codec::{decode, encode, Envelope, VariantTag};
pub use json_backend::JsonAccountStore;
