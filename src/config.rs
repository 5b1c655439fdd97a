//! Application Configuration
//! Optional JSON settings file; every field falls back to the TradeMap defaults.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// File looked up in the working directory at startup.
pub const CONFIG_FILE_NAME: &str = "trade_chart.json";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("Invalid config {path}: {source}")]
    Parse {
        path: String,
        source: serde_json::Error,
    },
}

/// Source header names bound to the canonical table columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnMapping {
    pub country: String,
    pub import_value: String,
    pub trade_balance: String,
}

impl Default for ColumnMapping {
    fn default() -> Self {
        Self {
            country: "Importers".to_string(),
            import_value: "Value imported in 2024 (USD thousand)".to_string(),
            trade_balance: "Trade balance in 2024 (USD thousand)".to_string(),
        }
    }
}

impl ColumnMapping {
    /// Required source names in display order.
    pub fn required(&self) -> [&str; 3] {
        [
            self.country.as_str(),
            self.import_value.as_str(),
            self.trade_balance.as_str(),
        ]
    }
}

/// Static chart settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartSettings {
    pub width: u32,
    pub height: u32,
    /// Bar width in category units
    pub bar_width: f64,
    pub product: String,
    pub year: u16,
}

impl Default for ChartSettings {
    fn default() -> Self {
        Self {
            width: 1200,
            height: 700,
            bar_width: 0.35,
            product: "Charcoal".to_string(),
            year: 2024,
        }
    }
}

impl ChartSettings {
    pub fn title(&self) -> String {
        format!("Trade Balance Chart of {} in {}", self.product, self.year)
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub columns: ColumnMapping,
    pub chart: ChartSettings,
}

impl AppConfig {
    /// Load config from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    /// Load config if the file exists; defaults otherwise or on error.
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            tracing::info!("no config at {}, using defaults", path.display());
            return Self::default();
        }

        match Self::from_file(path) {
            Ok(config) => {
                tracing::info!("loaded config from {}", path.display());
                config
            }
            Err(e) => {
                tracing::warn!("{}; using defaults", e);
                Self::default()
            }
        }
    }
}
