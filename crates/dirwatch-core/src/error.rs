//! Errors raised while loading a dirwatch configuration file.

use camino::Utf8PathBuf;

/// Why a dirwatch configuration could not be used.
///
/// Loading goes through three stages, and each has its own variant: locating
/// the file ([`InvalidPath`](Self::InvalidPath), [`Io`](Self::Io)), decoding
/// the JSON ([`Parse`](Self::Parse)) and checking the values
/// ([`InvalidOption`](Self::InvalidOption)).
///
/// # Examples
///
/// ```
/// use dirwatch_core::WatchConfig;
///
/// let config = WatchConfig { channel_capacity: 0, ..WatchConfig::default() };
/// let err = config.validate().unwrap_err();
/// assert_eq!(err.option(), Some("channel_capacity"));
/// ```
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The configuration path does not name a readable file.
    #[error("config file {path} unusable: {reason}")]
    InvalidPath {
        /// Path passed as `--config` or `DIRWATCH_CONFIG`.
        path: Utf8PathBuf,
        /// What is wrong with it.
        reason: String,
    },

    /// A setting parsed but holds a value the watcher cannot run with.
    #[error("setting `{option}` rejected: {reason}")]
    InvalidOption {
        /// Field name as written in the JSON file, e.g. `channel_capacity`.
        option: String,
        /// Constraint the value violates.
        reason: String,
    },

    /// The configuration file could not be read.
    #[error("could not read config file: {0}")]
    Io(#[from] std::io::Error),

    /// The configuration file is not valid JSON for [`Config`](crate::Config).
    #[error("malformed config file: {0}")]
    Parse(#[from] serde_json::Error),
}

impl ConfigError {
    /// Creates a new [`ConfigError::InvalidPath`] error.
    #[inline]
    pub fn invalid_path(path: impl Into<Utf8PathBuf>, reason: impl Into<String>) -> Self {
        Self::InvalidPath {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Creates a new [`ConfigError::InvalidOption`] error.
    #[inline]
    pub fn invalid_option(option: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidOption {
            option: option.into(),
            reason: reason.into(),
        }
    }

    /// Returns the rejected setting's name for [`ConfigError::InvalidOption`].
    #[must_use]
    pub fn option(&self) -> Option<&str> {
        match self {
            Self::InvalidOption { option, .. } => Some(option),
            Self::InvalidPath { .. } | Self::Io(_) | Self::Parse(_) => None,
        }
    }
}
