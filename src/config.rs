use crate::error::DashboardError;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Configuration settings for mspdash
///
/// Read-only user preferences:
/// - Dataset file location
/// - Tab shown when the dashboard opens
/// - How many clients the charts show
/// - Compact table mode for report commands
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub struct Config {
    /// Dataset file (JSON or `window.MSP_DASHBOARD_DATA = ...;` script)
    pub dataset_path: Option<PathBuf>,
    /// Tab identifier selected at startup
    pub default_tab: String,
    /// Number of clients in the bar charts
    pub chart_top_n: usize,
    /// Always hide secondary columns in report tables
    pub compact: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            dataset_path: None,
            default_tab: "overview".to_string(),
            chart_top_n: 10,
            compact: false,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            let content = fs::read_to_string(&config_path)?;
            Self::from_yaml(&content)
        } else {
            Ok(Config::default())
        }
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        let config: Config = serde_yaml::from_str(content).map_err(DashboardError::from)?;
        if config.chart_top_n == 0 {
            return Err(DashboardError::config_error("chart_top_n must be at least 1").into());
        }
        Ok(config)
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = std::env::var("HOME")
            .map_err(|_| anyhow::anyhow!("HOME environment variable not set"))?;
        Ok(PathBuf::from(home)
            .join(".config")
            .join("mspdash")
            .join("config.yaml"))
    }
}
