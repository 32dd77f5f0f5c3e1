//! Configuration types.
//!
//! [`FrequencyConfig`] is deserialized from JSON with every field optional,
//! so a config file only needs to name the values it overrides:
//!
//! ```json
//! { "top_n": 10, "stop_words_path": "../stop_words.txt", "format": "json" }
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::errors::{Error, Result};

/// Number of entries printed by default.
pub const DEFAULT_TOP_N: usize = 25;

/// Stop-word list location, resolved against the working directory.
pub const DEFAULT_STOP_WORDS_PATH: &str = "stopwords.txt";

/// How the final report is rendered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportFormat {
    /// One `<word> - <count>` line per entry.
    #[default]
    Text,
    /// A JSON array of `{ "word": ..., "count": ... }` objects.
    Json,
}

impl ReportFormat {
    /// Returns the user-facing name used in JSON and on the command line.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Json => "json",
        }
    }
}

impl std::str::FromStr for ReportFormat {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self> {
        match value.to_lowercase().as_str() {
            "text" | "txt" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => Err(Error::InvalidConfig(format!(
                "unknown report format `{other}` (expected `text` or `json`)"
            ))),
        }
    }
}

/// Runtime settings for a word-frequency run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrequencyConfig {
    /// Maximum number of entries in the report.
    pub top_n: usize,
    /// Comma-separated stop-word list, relative to the working directory.
    pub stop_words_path: PathBuf,
    /// Output rendering.
    pub format: ReportFormat,
}

impl Default for FrequencyConfig {
    fn default() -> Self {
        Self {
            top_n: DEFAULT_TOP_N,
            stop_words_path: PathBuf::from(DEFAULT_STOP_WORDS_PATH),
            format: ReportFormat::Text,
        }
    }
}

impl FrequencyConfig {
    /// Parse a config from a JSON string. Missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a JSON config file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        Self::from_json_str(&json)
    }

    /// Set the report size.
    pub fn with_top_n(mut self, top_n: usize) -> Self {
        self.top_n = top_n;
        self
    }

    /// Set the stop-word list location.
    pub fn with_stop_words_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.stop_words_path = path.into();
        self
    }

    /// Set the report format.
    pub fn with_format(mut self, format: ReportFormat) -> Self {
        self.format = format;
        self
    }

    /// Reject values the pipeline cannot honor.
    pub fn validate(&self) -> Result<()> {
        if self.top_n == 0 {
            return Err(Error::InvalidConfig("top_n must be at least 1".into()));
        }
        if self.stop_words_path.as_os_str().is_empty() {
            return Err(Error::InvalidConfig(
                "stop_words_path must not be empty".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = FrequencyConfig::default();
        assert_eq!(cfg.top_n, 25);
        assert_eq!(cfg.stop_words_path, PathBuf::from("stopwords.txt"));
        assert_eq!(cfg.format, ReportFormat::Text);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let cfg = FrequencyConfig::from_json_str(r#"{ "top_n": 10 }"#).unwrap();
        assert_eq!(cfg.top_n, 10);
        assert_eq!(cfg.stop_words_path, PathBuf::from(DEFAULT_STOP_WORDS_PATH));
    }

    #[test]
    fn test_json_format_field() {
        let cfg = FrequencyConfig::from_json_str(r#"{ "format": "json" }"#).unwrap();
        assert_eq!(cfg.format, ReportFormat::Json);
    }

    #[test]
    fn test_zero_top_n_rejected() {
        let err = FrequencyConfig::from_json_str(r#"{ "top_n": 0 }"#).unwrap_err();
        assert!(matches!(err, Error::InvalidConfig(_)));
    }

    #[test]
    fn test_empty_stop_words_path_rejected() {
        let cfg = FrequencyConfig::default().with_stop_words_path("");
        assert!(matches!(cfg.validate(), Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn test_malformed_json() {
        let err = FrequencyConfig::from_json_str("{ top_n: ").unwrap_err();
        assert!(matches!(err, Error::ConfigParse(_)));
    }

    #[test]
    fn test_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{ "stop_words_path": "other.txt" }"#).unwrap();

        let cfg = FrequencyConfig::from_json_file(&path).unwrap();
        assert_eq!(cfg.stop_words_path, PathBuf::from("other.txt"));
        assert_eq!(cfg.top_n, DEFAULT_TOP_N);
    }

    #[test]
    fn test_missing_config_file() {
        let err = FrequencyConfig::from_json_file("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
    }

    #[test]
    fn test_report_format_parse() {
        assert_eq!("TEXT".parse::<ReportFormat>().unwrap(), ReportFormat::Text);
        assert_eq!("json".parse::<ReportFormat>().unwrap(), ReportFormat::Json);
        assert!("yaml".parse::<ReportFormat>().is_err());
    }
}
