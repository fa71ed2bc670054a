use std::{
    fs, io,
    path::{Path, PathBuf},
};

use crate::{
    config::BankConfig,
    errors::{LedgerError, LedgerResult},
    ledger::Transaction,
    utils::write_atomic,
};

use super::{codec, AccountStore, StoredAccount};

const ACCOUNT_PREFIX: &str = "Konto_";
const ACCOUNT_EXTENSION: &str = "json";
pub const DEFAULT_ROOT: &str = "persist";

/// Filesystem-backed JSON persistence: `<root>/<directory>/Konto_<account>.json`.
#[derive(Debug, Clone)]
pub struct JsonAccountStore {
    root: PathBuf,
}

impl JsonAccountStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn from_config(config: &BankConfig) -> Self {
        Self::new(config.persist_root.clone())
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn directory_path(&self, directory: &str) -> LedgerResult<PathBuf> {
        check_path_component("directory", directory)?;
        Ok(self.root.join(directory))
    }

    pub fn account_path(&self, directory: &str, account: &str) -> LedgerResult<PathBuf> {
        check_path_component("account", account)?;
        Ok(self
            .directory_path(directory)?
            .join(format!("{ACCOUNT_PREFIX}{account}.{ACCOUNT_EXTENSION}")))
    }
}

impl Default for JsonAccountStore {
    fn default() -> Self {
        Self::new(DEFAULT_ROOT)
    }
}

impl AccountStore for JsonAccountStore {
    fn write(
        &self,
        directory: &str,
        account: &str,
        transactions: &[Transaction],
    ) -> LedgerResult<PathBuf> {
        let path = self.account_path(directory, account)?;
        let json = codec::encode_all(transactions)?;
        write_atomic(&path, &json)?;
        tracing::debug!(
            account,
            path = %path.display(),
            count = transactions.len(),
            "account written"
        );
        Ok(path)
    }

    fn read_all(&self, directory: &str) -> LedgerResult<Vec<StoredAccount>> {
        let dir = self.directory_path(directory)?;
        if !dir.exists() {
            return Ok(Vec::new());
        }
        let mut accounts = Vec::new();
        for entry in fs::read_dir(&dir)? {
            let path = entry?.path();
            if !path.is_file() {
                continue;
            }
            let Some(name) = account_name_from_path(&path) else {
                continue;
            };
            let transactions = fs::read_to_string(&path)
                .map_err(LedgerError::from)
                .and_then(|json| codec::decode_all(&json));
            if let Err(err) = &transactions {
                tracing::warn!(
                    account = %name,
                    path = %path.display(),
                    "unreadable account file: {err}"
                );
            }
            accounts.push(StoredAccount {
                name,
                path,
                transactions,
            });
        }
        accounts.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(accounts)
    }

    fn delete(&self, directory: &str, account: &str) -> LedgerResult<()> {
        let path = self.account_path(directory, account)?;
        match fs::remove_file(&path) {
            Ok(()) => {
                tracing::debug!(account, path = %path.display(), "account file removed");
                Ok(())
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

/// Extracts `<name>` from `Konto_<name>.json`; other files are not accounts.
fn account_name_from_path(path: &Path) -> Option<String> {
    if path.extension().and_then(|ext| ext.to_str()) != Some(ACCOUNT_EXTENSION) {
        return None;
    }
    let stem = path.file_stem()?.to_str()?;
    let name = stem.strip_prefix(ACCOUNT_PREFIX)?;
    if name.is_empty() {
        None
    } else {
        Some(name.to_string())
    }
}

fn check_path_component(label: &str, value: &str) -> LedgerResult<()> {
    let invalid = value.is_empty()
        || value == "."
        || value == ".."
        || value.contains(['/', '\\'])
        || value.contains('\0');
    if invalid {
        return Err(LedgerError::InvalidAttribute(format!(
            "{label} name `{value}` cannot be used in a file path"
        )));
    }
    Ok(())
}
