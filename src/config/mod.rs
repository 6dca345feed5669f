//! Configuration management for flatdb

pub mod network;
pub mod schema;

pub use network::{Network, NetworkTag};
pub use schema::Config;

use crate::error::{FlatDbError, FlatDbResult};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Explicit storage settings passed to every flat database
///
/// Built once from `Config`; nothing in the storage core reads global state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    data_dir: PathBuf,
    network_tag: NetworkTag,
}

impl StoreConfig {
    pub fn new(data_dir: impl Into<PathBuf>, network_tag: NetworkTag) -> Self {
        Self {
            data_dir: data_dir.into(),
            network_tag,
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn network_tag(&self) -> &NetworkTag {
        &self.network_tag
    }

    /// Full path of `filename` under the data directory
    pub fn path_for(&self, filename: &str) -> PathBuf {
        self.data_dir.join(filename)
    }

    /// Create the data directory if missing
    pub fn ensure_data_dir(&self) -> FlatDbResult<()> {
        fs::create_dir_all(&self.data_dir).map_err(|e| {
            FlatDbError::io(
                format!("creating data directory {}", self.data_dir.display()),
                e,
            )
        })
    }
}

/// Configuration manager
pub struct ConfigManager {
    config_path: PathBuf,
}

impl ConfigManager {
    /// Create a new config manager with default path
    pub fn new() -> Self {
        Self {
            config_path: Self::default_config_path(),
        }
    }

    /// Create a config manager with a custom path
    pub fn with_path(path: PathBuf) -> Self {
        Self { config_path: path }
    }

    /// Get the default config file path
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("flatdb")
            .join("config.toml")
    }

    /// Default data directory; non-main networks get their own subdirectory
    pub fn default_data_dir(network: Network) -> PathBuf {
        let root = dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("flatdb");

        match network {
            Network::Main => root,
            other => root.join(other.to_string()),
        }
    }

    /// Load configuration, using defaults if the file does not exist
    pub fn load(&self) -> FlatDbResult<Config> {
        if !self.config_path.exists() {
            debug!("Config file not found, using defaults");
            return Ok(Config::default());
        }

        self.load_from_file(&self.config_path)
    }

    /// Load configuration from a specific file
    pub fn load_from_file(&self, path: &Path) -> FlatDbResult<Config> {
        let content = fs::read_to_string(path)
            .map_err(|e| FlatDbError::io(format!("reading config from {}", path.display()), e))?;

        toml::from_str(&content).map_err(|e| FlatDbError::ConfigInvalid {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }

    /// Save configuration to file
    pub fn save(&self, config: &Config) -> FlatDbResult<()> {
        self.ensure_config_dir()?;

        let content = toml::to_string_pretty(config)?;
        fs::write(&self.config_path, content).map_err(|e| {
            FlatDbError::io(
                format!("writing config to {}", self.config_path.display()),
                e,
            )
        })?;

        info!("Configuration saved to {}", self.config_path.display());
        Ok(())
    }

    /// Ensure the config directory exists
    fn ensure_config_dir(&self) -> FlatDbResult<()> {
        if let Some(parent) = self.config_path.parent() {
            fs::create_dir_all(parent).map_err(|e| FlatDbError::ConfigDirCreate {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }
        Ok(())
    }

    /// Get the config file path
    pub fn path(&self) -> &Path {
        &self.config_path
    }
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn load_default_when_missing() {
        let temp = TempDir::new().unwrap();
        let manager = ConfigManager::with_path(temp.path().join("nonexistent.toml"));

        let config = manager.load().unwrap();
        assert_eq!(config.network.name, Network::Main);
    }

    #[test]
    fn save_and_load_roundtrip() {
        let temp = TempDir::new().unwrap();
        let manager = ConfigManager::with_path(temp.path().join("nested").join("config.toml"));

        let mut config = Config::default();
        config.network.name = Network::Devnet;
        config.storage.data_dir = Some(temp.path().join("data"));

        manager.save(&config).unwrap();
        let loaded = manager.load().unwrap();

        assert_eq!(loaded.network.name, Network::Devnet);
        assert_eq!(loaded.storage.data_dir, Some(temp.path().join("data")));
    }

    #[test]
    fn load_invalid_toml() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        fs::write(&path, "[network\nname = ").unwrap();

        let err = ConfigManager::with_path(path).load().unwrap_err();
        assert!(matches!(err, FlatDbError::ConfigInvalid { .. }));
    }

    #[test]
    fn default_data_dir_per_network() {
        let main = ConfigManager::default_data_dir(Network::Main);
        let test = ConfigManager::default_data_dir(Network::Test);
        assert_eq!(test, main.join("test"));
    }

    #[test]
    fn store_path_for() {
        let temp = TempDir::new().unwrap();
        let store = StoreConfig::new(temp.path().join("data"), Network::Main.tag());
        assert_eq!(
            store.path_for("flatcache.dat"),
            temp.path().join("data").join("flatcache.dat")
        );

        store.ensure_data_dir().unwrap();
        assert!(store.data_dir().is_dir());
    }
}
