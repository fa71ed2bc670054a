use std::{
    env, fs,
    path::{Path, PathBuf},
};

use dirs::home_dir;
use serde::{Deserialize, Serialize};

use crate::{
    errors::LedgerResult,
    storage::json_backend::DEFAULT_ROOT,
    utils::{ensure_dir, write_atomic},
};

const DEFAULT_DIR_NAME: &str = ".private_bank";
const CONFIG_FILE: &str = "config.json";
const HOME_ENV: &str = "PRIVATE_BANK_HOME";

/// Settings a host needs to build a ledger and its account store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BankConfig {
    pub name: String,
    pub incoming_interest: f64,
    pub outgoing_interest: f64,
    #[serde(default = "BankConfig::default_persist_root")]
    pub persist_root: PathBuf,
    #[serde(default = "BankConfig::default_directory")]
    pub directory: String,
}

impl BankConfig {
    fn default_persist_root() -> PathBuf {
        PathBuf::from(DEFAULT_ROOT)
    }

    fn default_directory() -> String {
        "default".into()
    }
}

impl Default for BankConfig {
    fn default() -> Self {
        Self {
            name: "Private Bank".into(),
            incoming_interest: 0.0,
            outgoing_interest: 0.0,
            persist_root: Self::default_persist_root(),
            directory: Self::default_directory(),
        }
    }
}

pub struct ConfigManager {
    path: PathBuf,
}

impl ConfigManager {
    /// Uses `$PRIVATE_BANK_HOME`, falling back to `~/.private_bank`.
    pub fn new() -> LedgerResult<Self> {
        Self::with_base_dir(base_dir())
    }

    pub fn with_base_dir(base: PathBuf) -> LedgerResult<Self> {
        ensure_dir(&base)?;
        Ok(Self {
            path: base.join(CONFIG_FILE),
        })
    }

    pub fn load(&self) -> LedgerResult<BankConfig> {
        if self.path.exists() {
            let data = fs::read_to_string(&self.path)?;
            Ok(serde_json::from_str(&data)?)
        } else {
            Ok(BankConfig::default())
        }
    }

    pub fn save(&self, config: &BankConfig) -> LedgerResult<()> {
        let json = serde_json::to_string_pretty(config)?;
        write_atomic(&self.path, &json)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn base_dir() -> PathBuf {
    if let Some(custom) = env::var_os(HOME_ENV) {
        return PathBuf::from(custom);
    }
    home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_DIR_NAME)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_loads_defaults() {
        let temp = TempDir::new().unwrap();
        let manager = ConfigManager::with_base_dir(temp.path().to_path_buf()).unwrap();
        assert_eq!(manager.load().unwrap(), BankConfig::default());
    }

    #[test]
    fn save_then_load() {
        let temp = TempDir::new().unwrap();
        let manager = ConfigManager::with_base_dir(temp.path().join("cfg")).unwrap();
        let config = BankConfig {
            name: "Meine Bank".into(),
            incoming_interest: 0.2,
            outgoing_interest: 0.2,
            persist_root: temp.path().join("persist"),
            directory: "lisa".into(),
        };
        manager.save(&config).unwrap();
        assert_eq!(manager.load().unwrap(), config);
        assert!(manager.path().ends_with("cfg/config.json"));
    }

    #[test]
    fn optional_fields_fall_back_to_defaults() {
        let config: BankConfig = serde_json::from_str(
            r#"{"name": "Bank", "incoming_interest": 0.1, "outgoing_interest": 0.3}"#,
        )
        .unwrap();
        assert_eq!(config.persist_root, PathBuf::from("persist"));
        assert_eq!(config.directory, "default");
    }
}
