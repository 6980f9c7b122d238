//! Configuration file support.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::PathBuf;

use crate::store::PageRequest;

/// Environment variable naming the database file.
pub const DB_ENV: &str = "FOLIO_DB";

/// Application configuration loaded from config file.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Database file
    pub db: Option<PathBuf>,

    /// Default number of top-level notes per `ls` page
    pub page_size: Option<usize>,
}

impl Config {
    /// Load configuration from the default config file location.
    ///
    /// Returns default config if the file doesn't exist.
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(&config_path)
            .with_context(|| format!("failed to read config file: {}", config_path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("failed to parse config file: {}", config_path.display()))
    }

    /// Returns the path to the config file.
    ///
    /// Default: `~/.config/folio/config.toml`
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("folio")
            .join("config.toml")
    }

    /// Returns the database used when nothing else names one.
    ///
    /// Default: `~/.local/share/folio/folio.db`
    pub fn default_db_path() -> PathBuf {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("folio")
            .join("folio.db")
    }

    /// Resolve the database path.
    ///
    /// Precedence order:
    /// 1. CLI `--db` argument
    /// 2. `FOLIO_DB` environment variable
    /// 3. Config file `db` setting
    /// 4. The platform data directory
    pub fn db_path(&self, cli_db: Option<&PathBuf>) -> PathBuf {
        let env_db = std::env::var_os(DB_ENV)
            .filter(|v| !v.is_empty())
            .map(PathBuf::from);
        self.db_path_from(cli_db, env_db)
    }

    fn db_path_from(&self, cli_db: Option<&PathBuf>, env_db: Option<PathBuf>) -> PathBuf {
        cli_db
            .cloned()
            .or(env_db)
            .or_else(|| self.db.clone())
            .unwrap_or_else(Self::default_db_path)
    }

    /// Page size for `ls`, falling back to the built-in default.
    pub fn page_size(&self) -> usize {
        self.page_size
            .filter(|&size| size > 0)
            .unwrap_or(PageRequest::DEFAULT_PER_PAGE)
    }
}
