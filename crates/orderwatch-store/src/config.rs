use serde::{Deserialize, Serialize};

use crate::fsutil::{read_if_exists, write_private};
use crate::layout::StoreLayout;
use crate::StoreError;

pub const CONFIG_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub version: u32,
    /// Seconds between refresh cycles in `watch`.
    pub refresh_interval_secs: u64,
    pub device_language: String,
    pub device_country: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            refresh_interval_secs: 300,
            device_language: "en".to_string(),
            device_country: "US".to_string(),
        }
    }
}

pub fn write_default_config(layout: &StoreLayout) -> Result<AppConfig, StoreError> {
    let config = AppConfig::default();
    write_config(layout, &config)?;
    Ok(config)
}

pub fn write_config(layout: &StoreLayout, config: &AppConfig) -> Result<(), StoreError> {
    let toml_str =
        toml::to_string_pretty(config).map_err(|e| StoreError::Config(e.to_string()))?;
    write_private(&layout.config_file(), toml_str.as_bytes())
}

/// The stored config, or defaults when no file has been written.
pub fn read_config_or_default(layout: &StoreLayout) -> Result<AppConfig, StoreError> {
    let Some(data) = read_if_exists(&layout.config_file())? else {
        return Ok(AppConfig::default());
    };
    let content = String::from_utf8(data).map_err(|e| StoreError::Config(e.to_string()))?;
    let config: AppConfig =
        toml::from_str(&content).map_err(|e| StoreError::Config(e.to_string()))?;
    if config.version > CONFIG_VERSION {
        return Err(StoreError::Config(format!(
            "unsupported config version {}",
            config.version
        )));
    }
    Ok(config)
}
