use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::recent::DEFAULT_RECENT_CAPACITY;
use crate::{Result, VaultError};

pub const APP_DIR: &str = "profile-vault";
pub const CONFIG_FILE: &str = "config.toml";
pub const CONFIG_ENV: &str = "PROFILE_VAULT_CONFIG";
pub const DATA_DIR_ENV: &str = "PROFILE_VAULT_DIR";

pub const GITHUB_API: &str = "https://api.github.com";
const DEFAULT_TIMEOUT_SECS: u64 = 8;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory holding the saved profiles and recent searches.
    pub data_dir: PathBuf,
    pub recent_capacity: usize,
    pub lookup: LookupConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LookupConfig {
    pub api_base: String,
    pub timeout_secs: u64,
    pub user_agent: String,
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            api_base: GITHUB_API.to_owned(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            user_agent: format!("{}/{}", APP_DIR, env!("CARGO_PKG_VERSION")),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        let data_dir = dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(APP_DIR);
        Self {
            data_dir,
            recent_capacity: DEFAULT_RECENT_CAPACITY,
            lookup: LookupConfig::default(),
        }
    }
}

impl Config {
    /// Default location: `<config dir>/profile-vault/config.toml`.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_DIR).join(CONFIG_FILE))
    }

    /// Load from `$PROFILE_VAULT_CONFIG` or the default location, then
    /// apply `$PROFILE_VAULT_DIR`. A missing file gives the defaults.
    pub fn load() -> Result<Self> {
        let path = std::env::var_os(CONFIG_ENV)
            .map(PathBuf::from)
            .or_else(Self::default_path);
        let mut config = match path {
            Some(path) if path.exists() => Self::from_file(&path)?,
            _ => Self::default(),
        };
        if let Some(dir) = std::env::var_os(DATA_DIR_ENV) {
            config.data_dir = PathBuf::from(dir);
        }
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        log::debug!("reading config from {}", path.display());
        let raw = std::fs::read_to_string(path)?;
        Self::parse(&raw)
    }

    pub fn parse(raw: &str) -> Result<Self> {
        let config: Config = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.recent_capacity == 0 {
            return Err(VaultError::Config(
                "recent_capacity must be at least 1".to_owned(),
            ));
        }
        if self.lookup.timeout_secs == 0 {
            return Err(VaultError::Config(
                "lookup.timeout_secs must be at least 1".to_owned(),
            ));
        }
        Ok(())
    }

    pub fn lookup_timeout(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.lookup.timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempdir::TempDir;

    #[test]
    fn partial_file_keeps_defaults() {
        let config = Config::parse(
            r#"
            data_dir = "/tmp/vault"

            [lookup]
            timeout_secs = 3
            "#,
        )
        .unwrap();
        assert_eq!(config.data_dir, PathBuf::from("/tmp/vault"));
        assert_eq!(config.recent_capacity, DEFAULT_RECENT_CAPACITY);
        assert_eq!(config.lookup.timeout_secs, 3);
        assert_eq!(config.lookup.api_base, GITHUB_API);
    }

    #[test]
    fn zero_capacity_is_rejected() {
        assert!(matches!(
            Config::parse("recent_capacity = 0"),
            Err(VaultError::Config(_))
        ));
    }

    #[test]
    fn broken_toml_is_a_config_error() {
        assert!(matches!(
            Config::parse("data_dir = "),
            Err(VaultError::Config(_))
        ));
    }

    #[test]
    fn reads_from_file() {
        let dir = TempDir::new("config").unwrap();
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(&path, "recent_capacity = 9\n").unwrap();
        let config = Config::from_file(&path).unwrap();
        assert_eq!(config.recent_capacity, 9);
    }
}
