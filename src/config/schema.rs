//! Configuration schema for flatdb
//!
//! Configuration is stored at `~/.config/flatdb/config.toml`

use super::network::{Network, NetworkTag};
use super::StoreConfig;
use crate::error::FlatDbResult;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// General settings
    pub general: GeneralConfig,

    /// Where flat files live
    pub storage: StorageConfig,

    /// Deployment network
    pub network: NetworkConfig,
}

impl Config {
    /// Resolve the explicit store settings handed to each flat database
    pub fn store_config(&self) -> FlatDbResult<StoreConfig> {
        let network_tag = match &self.network.tag {
            Some(hex) => NetworkTag::from_hex(hex)?,
            None => self.network.name.tag(),
        };

        let data_dir = self
            .storage
            .data_dir
            .clone()
            .unwrap_or_else(|| super::ConfigManager::default_data_dir(self.network.name));

        Ok(StoreConfig::new(data_dir, network_tag))
    }
}

/// General application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Log format: "text" or "json"
    pub log_format: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_format: "text".to_string(),
        }
    }
}

/// Storage settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Data directory root (default: per-network directory under the user data dir)
    pub data_dir: Option<PathBuf>,
}

/// Network settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkConfig {
    /// Network name: main, test, regtest or devnet
    pub name: Network,

    /// Hex override for the network tag
    pub tag: Option<String>,
}
