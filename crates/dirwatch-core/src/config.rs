//! Configuration structures for the dirwatch tool.
//!
//! This module provides configuration types for the components of the workspace:
//!
//! - [`WatchConfig`] - Watcher settings (debounce window, trailing delay, recursion)
//! - [`LogConfig`] - Logging defaults for the command-line front end
//! - [`Config`] - Root configuration combining all settings
//!
//! All configuration types implement [`Default`] with the values the watcher
//! was tuned for: a 100ms gap between debounce windows and a 100ms trailing
//! quiet delay.

use std::time::Duration;

use camino::Utf8Path;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Default minimum gap, in milliseconds, before a new debounce window opens.
pub const DEFAULT_MIN_INTERVAL_MS: u64 = 100;

/// Default trailing delay, in milliseconds, before a notification is delivered.
pub const DEFAULT_TRAILING_DELAY_MS: u64 = 100;

/// Configuration for the debounced directory watcher.
///
/// The two timing knobs are independent. `min_interval_ms` gates when a raw
/// change may open a new debounce window; `trailing_delay_ms` is how long the
/// watcher waits after the triggering change before telling the consumer.
/// Both default to 100ms.
///
/// # Examples
///
/// ```
/// use dirwatch_core::WatchConfig;
///
/// let config = WatchConfig::default();
/// assert_eq!(config.min_interval_ms, 100);
/// assert_eq!(config.trailing_delay_ms, 100);
/// assert!(config.recursive);
/// assert_eq!(config.channel_capacity, 1);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct WatchConfig {
    /// Minimum time since the last scheduled notification before a raw change
    /// may open a new debounce window.
    pub min_interval_ms: u64,

    /// Delay between the triggering change and the delivery of its notification.
    pub trailing_delay_ms: u64,

    /// Whether changes in subdirectories are reported.
    pub recursive: bool,

    /// Capacity of the notification channel. Must be at least 1.
    pub channel_capacity: usize,
}

impl WatchConfig {
    /// Returns the debounce window gate as a [`Duration`].
    #[inline]
    #[must_use]
    pub const fn min_interval(&self) -> Duration {
        Duration::from_millis(self.min_interval_ms)
    }

    /// Returns the trailing quiet delay as a [`Duration`].
    #[inline]
    #[must_use]
    pub const fn trailing_delay(&self) -> Duration {
        Duration::from_millis(self.trailing_delay_ms)
    }

    /// Sets both timing knobs, builder style.
    #[must_use]
    pub const fn with_timings(mut self, min_interval_ms: u64, trailing_delay_ms: u64) -> Self {
        self.min_interval_ms = min_interval_ms;
        self.trailing_delay_ms = trailing_delay_ms;
        self
    }

    /// Checks that the configuration can be used to start a watcher.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidOption`] if `channel_capacity` is zero.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.channel_capacity == 0 {
            return Err(ConfigError::invalid_option(
                "channel_capacity",
                "must be at least 1",
            ));
        }
        Ok(())
    }
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            min_interval_ms: DEFAULT_MIN_INTERVAL_MS,
            trailing_delay_ms: DEFAULT_TRAILING_DELAY_MS,
            recursive: true,
            channel_capacity: 1,
        }
    }
}

/// Logging defaults for the command-line front end.
///
/// `RUST_LOG` always takes precedence over `level` when it is set.
///
/// # Examples
///
/// ```
/// use dirwatch_core::LogConfig;
///
/// let config = LogConfig::default();
/// assert_eq!(config.level, "info");
/// assert!(config.ansi);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Default `tracing` filter directive.
    pub level: String,

    /// Whether log output may use ANSI colors.
    pub ansi: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_owned(),
            ansi: true,
        }
    }
}

/// Root configuration for the dirwatch tool.
///
/// Combines all component configurations into a single structure that can be
/// loaded from a JSON file or constructed programmatically. Missing fields
/// fall back to their defaults.
///
/// # Examples
///
/// ```
/// use dirwatch_core::Config;
///
/// let config = Config::from_json_str(r#"{"watch": {"trailing_delay_ms": 250}}"#).unwrap();
/// assert_eq!(config.watch.trailing_delay_ms, 250);
/// assert_eq!(config.watch.min_interval_ms, 100);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Watcher configuration.
    pub watch: WatchConfig,

    /// Logging configuration.
    pub log: LogConfig,
}

impl Config {
    /// Parses and validates a configuration from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed JSON and
    /// [`ConfigError::InvalidOption`] if validation fails.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads and validates a configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidPath`] if the path is not a file,
    /// [`ConfigError::Io`] if it cannot be read, and the errors of
    /// [`Config::from_json_str`] otherwise.
    pub fn from_file(path: &Utf8Path) -> Result<Self, ConfigError> {
        if !path.is_file() {
            return Err(ConfigError::invalid_path(path, "not a readable file"));
        }
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    /// Validates every section of the configuration.
    ///
    /// # Errors
    ///
    /// Returns the first validation failure.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.watch.validate()
    }
}
