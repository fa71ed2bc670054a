use std::{collections::BTreeMap, fmt, path::PathBuf};

use crate::{
    config::BankConfig,
    errors::{LedgerError, LedgerResult},
    storage::AccountStore,
};

use super::transaction::{validate_interest, Transaction};

/// A single bank's accounts, each holding its transactions in insertion order.
///
/// Read accessors hand out owned snapshots; stored sequences only change
/// through the mutation methods. Cloning copies every account's sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct Ledger {
    name: String,
    incoming_interest: f64,
    outgoing_interest: f64,
    accounts: BTreeMap<String, Vec<Transaction>>,
}

/// Outcome of [`Ledger::read_accounts`].
#[derive(Debug, Default)]
pub struct LoadReport {
    pub loaded: Vec<String>,
    pub failures: Vec<LoadFailure>,
}

#[derive(Debug)]
pub struct LoadFailure {
    pub account: String,
    pub path: PathBuf,
    pub error: LedgerError,
}

impl LoadReport {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

impl Ledger {
    pub fn new(
        name: impl Into<String>,
        incoming_interest: f64,
        outgoing_interest: f64,
    ) -> LedgerResult<Self> {
        Ok(Self {
            name: name.into(),
            incoming_interest: validate_interest("incoming", incoming_interest)?,
            outgoing_interest: validate_interest("outgoing", outgoing_interest)?,
            accounts: BTreeMap::new(),
        })
    }

    pub fn from_config(config: &BankConfig) -> LedgerResult<Self> {
        Self::new(
            config.name.clone(),
            config.incoming_interest,
            config.outgoing_interest,
        )
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn incoming_interest(&self) -> f64 {
        self.incoming_interest
    }

    pub fn outgoing_interest(&self) -> f64 {
        self.outgoing_interest
    }

    /// Rejects values outside `[0, 1]` and keeps the previous rate.
    pub fn set_incoming_interest(&mut self, interest: f64) -> LedgerResult<()> {
        self.incoming_interest = validate_interest("incoming", interest)?;
        Ok(())
    }

    /// Rejects values outside `[0, 1]` and keeps the previous rate.
    pub fn set_outgoing_interest(&mut self, interest: f64) -> LedgerResult<()> {
        self.outgoing_interest = validate_interest("outgoing", interest)?;
        Ok(())
    }

    pub fn create_account(&mut self, name: &str) -> LedgerResult<()> {
        if self.accounts.contains_key(name) {
            return Err(LedgerError::AccountExists(name.to_string()));
        }
        self.accounts.insert(name.to_string(), Vec::new());
        tracing::info!(account = name, "account created");
        Ok(())
    }

    /// Creates an account seeded with `transactions`.
    ///
    /// Each transaction goes through [`Ledger::add_transaction`] in order. The
    /// first failure removes the new account again and is returned, so callers
    /// never see a partially seeded account.
    pub fn create_account_with<I>(&mut self, name: &str, transactions: I) -> LedgerResult<()>
    where
        I: IntoIterator<Item = Transaction>,
    {
        self.create_account(name)?;
        for transaction in transactions {
            if let Err(err) = self.add_transaction(name, transaction) {
                self.accounts.remove(name);
                tracing::warn!(account = name, "account creation rolled back: {err}");
                return Err(err);
            }
        }
        Ok(())
    }

    pub fn add_transaction(&mut self, name: &str, transaction: Transaction) -> LedgerResult<()> {
        let entries = self
            .accounts
            .get_mut(name)
            .ok_or_else(|| LedgerError::AccountNotFound(name.to_string()))?;
        if entries.contains(&transaction) {
            return Err(LedgerError::DuplicateTransaction(name.to_string()));
        }
        if transaction.amount() == 0.0 {
            return Err(LedgerError::InvalidAttribute(
                "transaction amount must not be zero".into(),
            ));
        }
        // Payments keep their own rates; the ledger defaults are not applied.
        transaction.validate()?;
        entries.push(transaction);
        tracing::debug!(account = name, count = entries.len(), "transaction added");
        Ok(())
    }

    /// Removes the first stored transaction equal to `transaction`.
    pub fn remove_transaction(
        &mut self,
        name: &str,
        transaction: &Transaction,
    ) -> LedgerResult<()> {
        let entries = self
            .accounts
            .get_mut(name)
            .ok_or_else(|| LedgerError::AccountNotFound(name.to_string()))?;
        let index = entries
            .iter()
            .position(|entry| entry == transaction)
            .ok_or_else(|| LedgerError::TransactionNotFound(name.to_string()))?;
        entries.remove(index);
        tracing::debug!(account = name, count = entries.len(), "transaction removed");
        Ok(())
    }

    /// Value-based membership; unknown accounts contain nothing.
    pub fn contains_transaction(&self, name: &str, transaction: &Transaction) -> bool {
        self.accounts
            .get(name)
            .is_some_and(|entries| entries.contains(transaction))
    }

    pub fn account_balance(&self, name: &str) -> LedgerResult<f64> {
        Ok(self.entries(name)?.iter().map(Transaction::settle).sum())
    }

    pub fn transactions(&self, name: &str) -> LedgerResult<Vec<Transaction>> {
        Ok(self.entries(name)?.to_vec())
    }

    /// Snapshot ordered by settlement value; ties keep their stored order.
    pub fn transactions_sorted(
        &self,
        name: &str,
        ascending: bool,
    ) -> LedgerResult<Vec<Transaction>> {
        let mut sorted = self.transactions(name)?;
        if ascending {
            sorted.sort_by(|a, b| a.settle().total_cmp(&b.settle()));
        } else {
            sorted.sort_by(|a, b| b.settle().total_cmp(&a.settle()));
        }
        Ok(sorted)
    }

    /// Snapshot of credits (`positive`) or debits. Zero settlements match neither.
    pub fn transactions_by_type(
        &self,
        name: &str,
        positive: bool,
    ) -> LedgerResult<Vec<Transaction>> {
        Ok(self
            .entries(name)?
            .iter()
            .filter(|transaction| {
                let value = transaction.settle();
                if positive {
                    value > 0.0
                } else {
                    value < 0.0
                }
            })
            .cloned()
            .collect())
    }

    /// Deletes the account's persisted document, then the account itself.
    /// A storage failure leaves the in-memory account untouched.
    pub fn delete_account(
        &mut self,
        store: &dyn AccountStore,
        directory: &str,
        name: &str,
    ) -> LedgerResult<()> {
        if !self.accounts.contains_key(name) {
            return Err(LedgerError::AccountNotFound(name.to_string()));
        }
        store.delete(directory, name)?;
        self.accounts.remove(name);
        tracing::info!(account = name, directory, "account deleted");
        Ok(())
    }

    pub fn all_account_names(&self) -> Vec<String> {
        self.accounts.keys().cloned().collect()
    }

    pub fn account_count(&self) -> usize {
        self.accounts.len()
    }

    pub fn has_account(&self, name: &str) -> bool {
        self.accounts.contains_key(name)
    }

    pub fn write_account(
        &self,
        store: &dyn AccountStore,
        directory: &str,
        name: &str,
    ) -> LedgerResult<PathBuf> {
        store.write(directory, name, self.entries(name)?)
    }

    /// Writes every account; stops at the first storage failure.
    pub fn write_all(
        &self,
        store: &dyn AccountStore,
        directory: &str,
    ) -> LedgerResult<Vec<PathBuf>> {
        self.accounts
            .iter()
            .map(|(name, entries)| store.write(directory, name, entries))
            .collect()
    }

    /// Loads every account document in `directory` through the seeded
    /// creation path. Files that fail to decode, and accounts that cannot be
    /// created (already present, duplicate entries), are reported per account
    /// without stopping the others.
    pub fn read_accounts(
        &mut self,
        store: &dyn AccountStore,
        directory: &str,
    ) -> LedgerResult<LoadReport> {
        let mut report = LoadReport::default();
        for stored in store.read_all(directory)? {
            let outcome = stored
                .transactions
                .and_then(|transactions| self.create_account_with(&stored.name, transactions));
            match outcome {
                Ok(()) => report.loaded.push(stored.name),
                Err(error) => {
                    tracing::warn!(account = %stored.name, "account not loaded: {error}");
                    report.failures.push(LoadFailure {
                        account: stored.name,
                        path: stored.path,
                        error,
                    });
                }
            }
        }
        tracing::info!(
            directory,
            loaded = report.loaded.len(),
            failed = report.failures.len(),
            "accounts read"
        );
        Ok(report)
    }

    fn entries(&self, name: &str) -> LedgerResult<&[Transaction]> {
        self.accounts
            .get(name)
            .map(Vec::as_slice)
            .ok_or_else(|| LedgerError::AccountNotFound(name.to_string()))
    }
}

impl fmt::Display for Ledger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Name: {}", self.name)?;
        writeln!(f, "Incoming Interest: {:?}", self.incoming_interest)?;
        writeln!(f, "Outgoing Interest: {:?}", self.outgoing_interest)?;
        writeln!(f, "Accounts:")?;
        for (name, entries) in &self.accounts {
            writeln!(f, "{name}:")?;
            for transaction in entries {
                write!(f, "{transaction}")?;
            }
        }
        Ok(())
    }
}
