use anyhow::{Context, Result};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::models::Currency;

/// User settings read from `config.json`. Every field is optional on disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct Config {
    /// Currency for a fresh spend breakdown.
    pub(crate) default_currency: Currency,
    /// Total amount for a fresh spend breakdown.
    pub(crate) default_total_amount: Decimal,
    /// Where exports land when no path is given. Home directory when unset.
    pub(crate) export_dir: Option<PathBuf>,
    /// `tracing` filter used when `SPENDSPLIT_LOG` is not set.
    pub(crate) log_filter: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_currency: Currency::Ngn,
            default_total_amount: Decimal::from(100_000),
            export_dir: None,
            log_filter: "spendsplit=info".into(),
        }
    }
}

impl Config {
    pub(crate) const FILE_NAME: &'static str = "config.json";

    /// Missing file means defaults; a file that does not parse is an error.
    pub(crate) fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let data = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        serde_json::from_str(&data)
            .with_context(|| format!("Invalid config file: {}", path.display()))
    }

    pub(crate) fn export_dir(&self) -> PathBuf {
        self.export_dir
            .as_deref()
            .map(|p| PathBuf::from(crate::run::shellexpand(&p.to_string_lossy())))
            .unwrap_or_else(home_dir)
    }
}

fn home_dir() -> PathBuf {
    directories::UserDirs::new()
        .map(|d| d.home_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Data and config directories for this install.
pub(crate) struct Paths {
    pub(crate) data_dir: PathBuf,
    pub(crate) config_dir: PathBuf,
}

impl Paths {
    /// `SPENDSPLIT_DATA_DIR` relocates both directories, which keeps scripted
    /// runs away from the real data.
    pub(crate) fn resolve() -> Result<Self> {
        let paths = if let Ok(dir) = std::env::var("SPENDSPLIT_DATA_DIR") {
            let dir = PathBuf::from(dir);
            Self {
                config_dir: dir.clone(),
                data_dir: dir,
            }
        } else {
            let proj_dirs = directories::ProjectDirs::from("com", "spendsplit", "SpendSplit")
                .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))?;
            Self {
                data_dir: proj_dirs.data_dir().to_path_buf(),
                config_dir: proj_dirs.config_dir().to_path_buf(),
            }
        };
        std::fs::create_dir_all(&paths.data_dir).with_context(|| {
            format!("Failed to create data directory: {}", paths.data_dir.display())
        })?;
        Ok(paths)
    }

    pub(crate) fn db_path(&self) -> PathBuf {
        self.data_dir.join("spendsplit.db")
    }

    pub(crate) fn log_path(&self) -> PathBuf {
        self.data_dir.join("spendsplit.log")
    }

    pub(crate) fn config_path(&self) -> PathBuf {
        self.config_dir.join(Config::FILE_NAME)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use rust_decimal_macros::dec;
    use std::io::Write;

    #[test]
    fn test_missing_config_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load(&dir.path().join("config.json")).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.default_currency, Currency::Ngn);
        assert_eq!(config.default_total_amount, dec!(100000));
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(br#"{"default_currency": "GHS"}"#).unwrap();
        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.default_currency, Currency::Ghs);
        assert_eq!(config.default_total_amount, dec!(100000));
        assert_eq!(config.log_filter, "spendsplit=info");
    }

    #[test]
    fn test_total_amount_accepts_string_or_number() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(br#"{"default_total_amount": "250000"}"#).unwrap();
        assert_eq!(
            Config::load(file.path()).unwrap().default_total_amount,
            dec!(250000)
        );

        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(br#"{"default_total_amount": 5000}"#).unwrap();
        assert_eq!(
            Config::load(file.path()).unwrap().default_total_amount,
            dec!(5000)
        );
    }

    #[test]
    fn test_malformed_config_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"{ not json").unwrap();
        let err = Config::load(file.path()).unwrap_err();
        assert!(err.to_string().contains("Invalid config file"));
    }

    #[test]
    fn test_export_dir_override() {
        let config = Config {
            export_dir: Some(PathBuf::from("/tmp/exports")),
            ..Config::default()
        };
        assert_eq!(config.export_dir(), PathBuf::from("/tmp/exports"));
    }
}
