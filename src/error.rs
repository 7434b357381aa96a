//! Error types used by timelane.
//!
//! The lane operator itself never fails: it only observes a stream. Errors
//! come from the configuration surface around it:
//!
//! - [`LaneError`]: invalid filter strings, invalid config values and
//!   attempts to install a second process-wide default logger.
//!
//! Like the rest of the crate's errors it provides `as_label` / `as_message`
//! helpers for logs and metrics.

use thiserror::Error;

/// # Errors produced by timelane configuration.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LaneError {
    /// A lane category name was not recognized while parsing a filter.
    #[error("unknown lane category {token:?} (expected \"subscription\" or \"event\")")]
    InvalidFilter {
        /// The offending token, trimmed.
        token: String,
    },

    /// A configuration value could not be interpreted.
    #[error("invalid value {value:?} for {key}")]
    InvalidConfig {
        /// Configuration key (usually an environment variable name).
        key: &'static str,
        /// The raw value that was rejected.
        value: String,
    },

    /// A process-wide default logger has already been installed.
    #[error("default lane logger already set")]
    DefaultLoggerAlreadySet,
}

impl LaneError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use timelane::LaneError;
    ///
    /// let err = LaneError::InvalidFilter { token: "values".into() };
    /// assert_eq!(err.as_label(), "lane_invalid_filter");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            LaneError::InvalidFilter { .. } => "lane_invalid_filter",
            LaneError::InvalidConfig { .. } => "lane_invalid_config",
            LaneError::DefaultLoggerAlreadySet => "lane_default_logger_set",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            LaneError::InvalidFilter { token } => format!("unknown category: {token}"),
            LaneError::InvalidConfig { key, value } => format!("{key}={value}"),
            LaneError::DefaultLoggerAlreadySet => "default logger already set".to_string(),
        }
    }
}
