use std::{
    env, fs,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};

use crate::{
    currency::DEFAULT_SYMBOL,
    errors::Result,
    ledger::CorruptFilePolicy,
    utils::persistence::{ensure_dir, write_atomic},
};

const DEFAULT_DIR_NAME: &str = ".finance_tracker";
const CONFIG_FILE: &str = "config.json";
const DEFAULT_DATA_FILE: &str = "financial_data.json";

/// Overrides the application directory.
pub const HOME_ENV: &str = "FINANCE_TRACKER_HOME";
/// Overrides the ledger data file.
pub const DATA_ENV: &str = "FINANCE_TRACKER_DATA";

/// Returns the application-specific data directory, defaulting to `~/.finance_tracker`.
pub fn app_data_dir() -> PathBuf {
    if let Some(custom) = env::var_os(HOME_ENV) {
        return PathBuf::from(custom);
    }
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_DIR_NAME)
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    /// Ledger file; relative paths resolve against the app directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_file: Option<PathBuf>,
    #[serde(default = "Config::default_symbol")]
    pub currency_symbol: String,
    #[serde(default = "Config::default_quarantine")]
    pub quarantine_corrupt: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_file: None,
            currency_symbol: Self::default_symbol(),
            quarantine_corrupt: Self::default_quarantine(),
        }
    }
}

impl Config {
    fn default_symbol() -> String {
        DEFAULT_SYMBOL.into()
    }

    fn default_quarantine() -> bool {
        true
    }

    pub fn corrupt_file_policy(&self) -> CorruptFilePolicy {
        if self.quarantine_corrupt {
            CorruptFilePolicy::Quarantine
        } else {
            CorruptFilePolicy::Overwrite
        }
    }
}

/// Loads and stores `config.json` inside the app directory.
pub struct ConfigManager {
    base: PathBuf,
    path: PathBuf,
}

impl ConfigManager {
    pub fn new() -> Result<Self> {
        Self::with_base_dir(app_data_dir())
    }

    pub fn with_base_dir(base: PathBuf) -> Result<Self> {
        ensure_dir(&base)?;
        Ok(Self {
            path: base.join(CONFIG_FILE),
            base,
        })
    }

    /// Reads the config file, or returns defaults when none exists.
    pub fn load(&self) -> Result<Config> {
        if self.path.exists() {
            let data = fs::read_to_string(&self.path)?;
            Ok(serde_json::from_str(&data)?)
        } else {
            Ok(Config::default())
        }
    }

    pub fn save(&self, config: &Config) -> Result<()> {
        let json = serde_json::to_string_pretty(config)?;
        write_atomic(&self.path, &json)
    }

    /// Resolves the ledger file: `FINANCE_TRACKER_DATA`, then the configured
    /// path, then `financial_data.json` in the app directory.
    pub fn data_file(&self, config: &Config) -> PathBuf {
        self.resolve_data_file(config, env::var_os(DATA_ENV).map(PathBuf::from))
    }

    /// Same as [`data_file`](Self::data_file) with the override passed in.
    pub fn resolve_data_file(&self, config: &Config, override_path: Option<PathBuf>) -> PathBuf {
        if let Some(custom) = override_path {
            return custom;
        }
        match &config.data_file {
            Some(path) if path.is_absolute() => path.clone(),
            Some(path) => self.base.join(path),
            None => self.base.join(DEFAULT_DATA_FILE),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn base_dir(&self) -> &Path {
        &self.base
    }
}
