//! # Lane configuration.
//!
//! Provides [`Config`] shared defaults for lanes built through
//! [`LaneBuilder::with_config`](crate::LaneBuilder::with_config).
//!
//! Config can be built in code or read from the environment:
//! - `TIMELANE_FILTER`: comma-separated categories (`subscription`, `event`, `all`, `none`)
//! - `TIMELANE_FULL_PATHS`: `true`/`false` (`1`/`0`, `yes`/`no`, `on`/`off`)
//!
//! Unset variables keep the defaults.

use crate::error::LaneError;
use crate::events::LaneFilter;

/// Defaults applied to lanes.
///
/// ## Field semantics
/// - `filter`: categories reported to the logger (default: all)
/// - `full_paths`: keep the full file path in source locations instead of the
///   file name only (default: `false`)
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// Categories reported to the logger.
    pub filter: LaneFilter,

    /// Render source locations with the full file path.
    pub full_paths: bool,
}

impl Config {
    /// Environment variable holding the filter list.
    pub const FILTER_ENV: &'static str = "TIMELANE_FILTER";
    /// Environment variable toggling full source paths.
    pub const FULL_PATHS_ENV: &'static str = "TIMELANE_FULL_PATHS";

    /// Reads the configuration from the process environment.
    ///
    /// # Errors
    /// [`LaneError::InvalidFilter`] or [`LaneError::InvalidConfig`] when a
    /// variable is set to something unparsable.
    pub fn from_env() -> Result<Self, LaneError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, LaneError> {
        let mut cfg = Self::default();
        if let Some(raw) = lookup(Self::FILTER_ENV) {
            cfg.filter = raw.parse()?;
        }
        if let Some(raw) = lookup(Self::FULL_PATHS_ENV) {
            cfg.full_paths = parse_flag(Self::FULL_PATHS_ENV, &raw)?;
        }
        Ok(cfg)
    }
}

impl Default for Config {
    /// Default configuration:
    ///
    /// - `filter = LaneFilter::all()`
    /// - `full_paths = false`
    fn default() -> Self {
        Self {
            filter: LaneFilter::all(),
            full_paths: false,
        }
    }
}

fn parse_flag(key: &'static str, raw: &str) -> Result<bool, LaneError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        _ => Err(LaneError::InvalidConfig {
            key,
            value: raw.to_string(),
        }),
    }
}
