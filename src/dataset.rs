use crate::config::Config;
use crate::error::{DashboardError, Result};
use crate::models::Dataset;
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable that points at the dataset file
pub const DATASET_ENV: &str = "MSPDASH_DATA";

/// File names the build step writes, checked in the working directory
const DEFAULT_FILES: [&str; 2] = ["dashboard-data.json", "dashboard-data.js"];

/// Global the build step assigns in its script output
const SCRIPT_GLOBAL: &str = "MSP_DASHBOARD_DATA";

pub struct DatasetLoader;

impl DatasetLoader {
    /// Pick the dataset file: CLI flag, then environment, then config, then defaults
    pub fn resolve_path(cli_path: Option<&Path>, config: &Config) -> Option<PathBuf> {
        if let Some(path) = cli_path {
            return Some(path.to_path_buf());
        }
        if let Some(path) = std::env::var_os(DATASET_ENV).filter(|v| !v.is_empty()) {
            return Some(PathBuf::from(path));
        }
        if let Some(path) = &config.dataset_path {
            return Some(path.clone());
        }
        DEFAULT_FILES
            .iter()
            .map(PathBuf::from)
            .find(|path| path.exists())
    }

    /// Resolve and load in one step. No dataset at all is fatal.
    pub fn load_resolved(cli_path: Option<&Path>, config: &Config) -> Result<Dataset> {
        match Self::resolve_path(cli_path, config) {
            Some(path) => Self::load(&path),
            None => Err(DashboardError::dataset_missing(&DEFAULT_FILES.join(", "))),
        }
    }

    pub fn load(path: &Path) -> Result<Dataset> {
        if !path.exists() {
            return Err(DashboardError::dataset_missing(&path.display().to_string()));
        }
        let content = fs::read_to_string(path)?;
        Self::parse(&content).map_err(|e| DashboardError::json_parse_error(path, e))
    }

    /// Parse plain JSON or the `window.MSP_DASHBOARD_DATA = {...};` script form
    pub fn parse(content: &str) -> std::result::Result<Dataset, serde_json::Error> {
        serde_json::from_str(strip_script_wrapper(content))
    }
}

fn strip_script_wrapper(content: &str) -> &str {
    let trimmed = content.trim().trim_start_matches('\u{feff}');
    if trimmed.starts_with('{') {
        return trimmed;
    }

    let Some(eq) = trimmed.find('=') else {
        return trimmed;
    };
    let lhs = trimmed[..eq].trim();
    let lhs = lhs
        .strip_prefix("window.")
        .or_else(|| lhs.strip_prefix("var "))
        .or_else(|| lhs.strip_prefix("const "))
        .or_else(|| lhs.strip_prefix("let "))
        .unwrap_or(lhs)
        .trim();
    if lhs != SCRIPT_GLOBAL {
        return trimmed;
    }

    trimmed[eq + 1..].trim().trim_end_matches(';').trim_end()
}
