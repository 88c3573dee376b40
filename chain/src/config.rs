//! Network endpoints and client settings
//!
//! Defaults target the Paseo test network; mainnet and the Westend
//! testnet are selectable for the other deployment flavors.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    ParseError(#[from] toml::de::Error),
}

/// Selectable target network.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    Mainnet,
    Westend,
    #[default]
    Paseo,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChainConfig {
    pub mainnet_endpoint: String,
    pub westend_endpoint: String,
    pub paseo_endpoint: String,
    pub default_network: Network,
    /// Per-request timeout for all node calls, in seconds.
    pub request_timeout_secs: u64,
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self {
            mainnet_endpoint: "https://rpc.polkadot.io".to_string(),
            westend_endpoint: "https://westend-rpc.polkadot.io".to_string(),
            paseo_endpoint: "https://paseo-rpc.dwellir.com".to_string(),
            default_network: Network::Paseo,
            request_timeout_secs: 30,
        }
    }
}

impl ChainConfig {
    /// Load configuration from a TOML file. Missing fields fall back to
    /// the defaults.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path)?;
        Ok(toml::from_str(&raw)?)
    }

    /// Endpoint for the configured default network.
    pub fn endpoint(&self) -> &str {
        match self.default_network {
            Network::Mainnet => &self.mainnet_endpoint,
            Network::Westend => &self.westend_endpoint,
            Network::Paseo => &self.paseo_endpoint,
        }
    }
}
