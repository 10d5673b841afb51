use std::path::PathBuf;
use thiserror::Error;

/// All errors produced by the funding dashboard.
#[derive(Error, Debug)]
pub enum DashboardError {
    /// The dataset file could not be opened or read from disk.
    #[error("Failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The dataset is not well-formed CSV (ragged rows, invalid UTF-8, ...).
    #[error("Malformed CSV: {0}")]
    Csv(#[from] csv::Error),

    /// One or more required columns are absent from the header row.
    #[error("Missing required columns in {path}: {}", .columns.join(", "))]
    MissingColumns { path: PathBuf, columns: Vec<String> },

    /// The investor view was requested without an investor name.
    #[error("Investor name must not be empty")]
    EmptyInvestor,

    /// The investor name is not one of the selectable investors.
    #[error("Unknown investor: {0}")]
    UnknownInvestor(String),

    /// A report could not be serialised for `--output json`.
    #[error("Failed to process JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// The terminal could not be set up, drawn to, read from or restored.
    #[error("Terminal error: {0}")]
    Terminal(String),

    /// A configuration value is missing or invalid.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl DashboardError {
    /// Whether the error aborts startup (the dataset could not be loaded).
    pub fn is_load_error(&self) -> bool {
        matches!(
            self,
            Self::FileRead { .. } | Self::Csv(_) | Self::MissingColumns { .. }
        )
    }
}

/// Convenience alias used throughout the dashboard crates.
pub type Result<T> = std::result::Result<T, DashboardError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_file_read() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
        let err = DashboardError::FileRead {
            path: PathBuf::from("/data/startup_cleaned.csv"),
            source: io_err,
        };
        let msg = err.to_string();
        assert!(msg.contains("Failed to read file"));
        assert!(msg.contains("/data/startup_cleaned.csv"));
        assert!(msg.contains("no such file"));
    }

    #[test]
    fn test_error_display_missing_columns() {
        let err = DashboardError::MissingColumns {
            path: PathBuf::from("funding.csv"),
            columns: vec!["amount".to_string(), "investors".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "Missing required columns in funding.csv: amount, investors"
        );
    }

    #[test]
    fn test_error_display_empty_investor() {
        assert_eq!(
            DashboardError::EmptyInvestor.to_string(),
            "Investor name must not be empty"
        );
    }

    #[test]
    fn test_error_display_unknown_investor() {
        let err = DashboardError::UnknownInvestor("Tiger".to_string());
        assert_eq!(err.to_string(), "Unknown investor: Tiger");
    }

    #[test]
    fn test_error_display_config() {
        let err = DashboardError::Config("top-n must be positive".to_string());
        assert_eq!(err.to_string(), "Configuration error: top-n must be positive");
    }

    #[test]
    fn test_load_error_classification() {
        let missing = DashboardError::MissingColumns {
            path: PathBuf::from("x.csv"),
            columns: vec!["date".to_string()],
        };
        assert!(missing.is_load_error());
        assert!(!DashboardError::EmptyInvestor.is_load_error());
        assert!(!DashboardError::Terminal("raw mode".to_string()).is_load_error());
    }

    #[test]
    fn test_error_display_terminal() {
        let err = DashboardError::Terminal("enable raw mode: not a tty".to_string());
        assert_eq!(err.to_string(), "Terminal error: enable raw mode: not a tty");
    }

    #[test]
    fn test_error_from_serde_json() {
        let json_err = serde_json::from_str::<serde_json::Value>("{invalid}").unwrap_err();
        let err: DashboardError = json_err.into();
        assert!(err.to_string().contains("Failed to process JSON"));
    }
}
