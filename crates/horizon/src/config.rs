//! Configuration management for the Horizon inventory runtime.
//!
//! This module handles loading and validation of the runtime configuration
//! from TOML files.

use horizon_inventory::render::MAX_ROWS;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;

/// Default tick interval for serde deserialization
fn default_tick_interval() -> u64 {
    50 // 20 ticks per second
}

fn default_animation_period() -> u64 {
    500
}

fn default_max_rows() -> u8 {
    MAX_ROWS
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Application configuration loaded from TOML file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Scheduling settings
    #[serde(default)]
    pub runtime: RuntimeSettings,
    /// Inventory session settings
    #[serde(default)]
    pub inventory: InventorySettings,
    /// Logging configuration settings
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuntimeSettings {
    /// Interval between NPC behavior ticks in milliseconds; 0 disables ticking
    #[serde(default = "default_tick_interval")]
    pub tick_interval_ms: u64,
}

impl Default for RuntimeSettings {
    fn default() -> Self {
        Self {
            tick_interval_ms: default_tick_interval(),
        }
    }
}

impl RuntimeSettings {
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InventorySettings {
    /// Period of animated view updates in milliseconds
    #[serde(default = "default_animation_period")]
    pub animation_period_ms: u64,
    /// Largest number of rows a rendered inventory may have
    #[serde(default = "default_max_rows")]
    pub max_rows: u8,
}

impl Default for InventorySettings {
    fn default() -> Self {
        Self {
            animation_period_ms: default_animation_period(),
            max_rows: default_max_rows(),
        }
    }
}

impl InventorySettings {
    pub fn animation_period(&self) -> Duration {
        Duration::from_millis(self.animation_period_ms)
    }
}

/// Logging configuration settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Whether to use JSON formatting for logs
    #[serde(default)]
    pub json_format: bool,
    /// Optional file path for log output
    #[serde(default)]
    pub file_path: Option<String>,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json_format: false,
            file_path: None,
        }
    }
}

impl AppConfig {
    /// Loads configuration from a TOML file.
    ///
    /// If the file doesn't exist, a default configuration is written to
    /// `path` and returned.
    pub async fn load_from_file(path: &PathBuf) -> Result<Self, Box<dyn std::error::Error>> {
        if path.exists() {
            let content = tokio::fs::read_to_string(path).await?;
            let config: AppConfig = toml::from_str(&content)?;
            Ok(config)
        } else {
            let default_config = AppConfig::default();
            let toml_content = toml::to_string_pretty(&default_config)?;
            tokio::fs::write(path, toml_content).await?;
            info!("Created default configuration file: {}", path.display());
            Ok(default_config)
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.inventory.animation_period_ms == 0 {
            return Err("inventory.animation_period_ms must be greater than 0".to_string());
        }

        if self.inventory.max_rows == 0 || self.inventory.max_rows > MAX_ROWS {
            return Err(format!(
                "inventory.max_rows must be between 1 and {MAX_ROWS}, got {}",
                self.inventory.max_rows
            ));
        }

        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.logging.level.as_str()) {
            return Err(format!(
                "Invalid log level: {}. Must be one of: {valid_levels:?}",
                &self.logging.level
            ));
        }

        Ok(())
    }
}
