//! Configuration for the notification subsystem.
//!
//! Loaded from a TOML file when present; every field has a default so a
//! missing file yields a usable config.

use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Directory under the platform data dir that holds ledger entries.
const LEDGER_SUBDIR: &str = "crescendo/notices";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("I/O error reading config: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct NotifyConfig {
    /// Override for the ledger directory. Defaults to
    /// `{data_dir}/crescendo/notices`.
    #[serde(default)]
    pub ledger_dir: Option<PathBuf>,
}

impl NotifyConfig {
    /// Load from `path`. A missing file is not an error and produces the
    /// default config.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = match std::fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(Self::default());
            }
            Err(e) => return Err(e.into()),
        };
        Ok(toml::from_str(&contents)?)
    }

    /// Directory the ledger should live in, or `None` when no override is
    /// set and the platform data dir cannot be determined.
    pub fn resolve_ledger_dir(&self) -> Option<PathBuf> {
        match &self.ledger_dir {
            Some(dir) => Some(dir.clone()),
            None => dirs::data_dir().map(|d| d.join(LEDGER_SUBDIR)),
        }
    }
}
