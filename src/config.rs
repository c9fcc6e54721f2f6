//! Configuration types and loading.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

fn default_device() -> String {
    "wlan0".to_string()
}

fn default_listen() -> String {
    "0.0.0.0:8080".to_string()
}

/// Sampler configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    /// Interface to monitor
    #[serde(default = "default_device")]
    pub device: String,

    /// Address the HTTP server binds to
    #[serde(default = "default_listen")]
    pub listen: String,

    /// Devices matching this pattern are excluded from the stats fetch
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ignore_pattern: Option<String>,

    /// When set, only devices matching this pattern are fetched
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accept_pattern: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            device: default_device(),
            listen: default_listen(),
            ignore_pattern: None,
            accept_pattern: None,
        }
    }
}

pub fn load_config(config_path: &str) -> Result<Config> {
    let config_content = std::fs::read_to_string(config_path)
        .map_err(|e| anyhow::anyhow!("Failed to read config file '{}': {}", config_path, e))?;

    let config: Config = toml::from_str(&config_content)
        .map_err(|e| anyhow::anyhow!("Failed to parse config file '{}': {}", config_path, e))?;

    Ok(config)
}

pub fn create_default_config() -> Config {
    Config::default()
}

/// Load the config file, or create a default one when the path does not
/// exist. A present-but-broken file is an error, not silently replaced.
pub fn load_config_with_fallback(config_path: &str) -> Result<Config> {
    if std::path::Path::new(config_path).exists() {
        return load_config(config_path);
    }

    warn!(
        "Config file '{}' not found, creating default config",
        config_path
    );
    let default_config = create_default_config();
    let config_toml = toml::to_string_pretty(&default_config)?;
    std::fs::write(config_path, &config_toml)?;
    info!("Created default config file: {}", config_path);
    Ok(default_config)
}
