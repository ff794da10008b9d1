use std::fmt;
use std::io;
use std::path::Path;

/// Errors raised while bringing up the dashboard
#[derive(Debug)]
pub enum DashboardError {
    /// File I/O error
    Io(io::Error),
    /// Dataset file is not valid JSON or does not match the dataset shape
    JsonParse {
        file_path: String,
        source: serde_json::Error,
    },
    /// No dataset was found at startup
    DatasetMissing { searched: String },
    /// Configuration file is unreadable or holds invalid values
    Config { message: String },
}

impl fmt::Display for DashboardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DashboardError::Io(err) => write!(f, "I/O error: {}", err),
            DashboardError::JsonParse { file_path, source } => {
                write!(f, "Dataset parse error in {}: {}", file_path, source)
            }
            DashboardError::DatasetMissing { searched } => {
                write!(f, "No data found (searched: {})", searched)
            }
            DashboardError::Config { message } => write!(f, "Configuration error: {}", message),
        }
    }
}

impl std::error::Error for DashboardError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DashboardError::Io(err) => Some(err),
            DashboardError::JsonParse { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<io::Error> for DashboardError {
    fn from(err: io::Error) -> Self {
        DashboardError::Io(err)
    }
}

impl From<serde_json::Error> for DashboardError {
    fn from(err: serde_json::Error) -> Self {
        DashboardError::JsonParse {
            file_path: "unknown".to_string(),
            source: err,
        }
    }
}

impl From<serde_yaml::Error> for DashboardError {
    fn from(err: serde_yaml::Error) -> Self {
        DashboardError::Config {
            message: err.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, DashboardError>;

impl DashboardError {
    pub fn json_parse_error(file_path: &Path, source: serde_json::Error) -> Self {
        Self::JsonParse {
            file_path: file_path.display().to_string(),
            source,
        }
    }

    pub fn dataset_missing(searched: &str) -> Self {
        Self::DatasetMissing {
            searched: searched.to_string(),
        }
    }

    pub fn config_error(message: &str) -> Self {
        Self::Config {
            message: message.to_string(),
        }
    }

    /// Longer explanation shown on fatal startup errors
    pub fn detailed_message(&self) -> String {
        match self {
            DashboardError::DatasetMissing { searched } => format!(
                "No data found. Please run the dataset build step.\nSearched: {}\nPass --data <FILE>, set MSPDASH_DATA, or set dataset_path in the config file.",
                searched
            ),
            DashboardError::JsonParse { file_path, source } => format!(
                "Failed to parse dataset '{}'\nError: {}\nThe file must be a JSON object or a `window.MSP_DASHBOARD_DATA = {{...}};` script.",
                file_path, source
            ),
            _ => self.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = DashboardError::dataset_missing("./dashboard-data.json");
        assert!(err.to_string().contains("No data found"));
        assert!(err.to_string().contains("dashboard-data.json"));
    }

    #[test]
    fn test_detailed_message() {
        let err = DashboardError::dataset_missing("nowhere");
        let detailed = err.detailed_message();
        assert!(detailed.contains("Please run the dataset build step"));
        assert!(detailed.contains("--data"));
    }

    #[test]
    fn test_json_error_has_source() {
        let source = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = DashboardError::json_parse_error(Path::new("data.json"), source);
        assert!(std::error::Error::source(&err).is_some());
        assert!(err.to_string().contains("data.json"));
    }
}
