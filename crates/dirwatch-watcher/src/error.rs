//! Error types for the dirwatch-watcher crate.
//!
//! This module provides the [`WatchError`] type for errors that can occur
//! while constructing a watcher or while its supervision loop is running.

use camino::Utf8PathBuf;
use dirwatch_core::ConfigError;

/// Errors that can occur during directory watching.
///
/// # Error Lifecycle
///
/// - **Construction errors** ([`WatchError::PathNotFound`],
///   [`WatchError::NotADirectory`], [`WatchError::ArmFailed`],
///   [`WatchError::Config`], [`WatchError::NonUtf8Path`], [`WatchError::Io`]):
///   returned by the constructor, no background task is started
/// - **Runtime errors** ([`WatchError::Notify`]): end the supervision loop;
///   the watcher goes inert and the error is returned from `shutdown()`
/// - **Task errors** ([`WatchError::Join`]): the supervision task panicked
///   or was aborted
///
/// # Examples
///
/// ```
/// use dirwatch_watcher::WatchError;
///
/// fn report(err: &WatchError) {
///     match err {
///         WatchError::PathNotFound(p) => eprintln!("no such directory: {p}"),
///         WatchError::Notify { code: Some(code), .. } => eprintln!("os error {code}"),
///         other => eprintln!("{other}"),
///     }
/// }
/// ```
#[derive(Debug, thiserror::Error)]
pub enum WatchError {
    /// The directory to watch does not exist.
    #[error("path does not exist: {0}")]
    PathNotFound(Utf8PathBuf),

    /// The path exists but is not a directory.
    #[error("path is not a directory: {0}")]
    NotADirectory(Utf8PathBuf),

    /// The OS change-notification primitive could not be armed.
    #[error("failed to arm change notification for {path}: {source}")]
    ArmFailed {
        /// The directory that could not be watched.
        path: Utf8PathBuf,
        /// The underlying notify error.
        #[source]
        source: notify::Error,
    },

    /// The change-notification primitive failed after the watcher started.
    ///
    /// Carries the OS status code when the backend reported one.
    #[error("change notification failed: {message}")]
    Notify {
        /// Raw OS error code, if any.
        code: Option<i32>,
        /// Description of the failure.
        message: String,
    },

    /// The watcher configuration is invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A path is not valid UTF-8.
    #[error("path is not valid UTF-8: {}", _0.display())]
    NonUtf8Path(std::path::PathBuf),

    /// An I/O error occurred while resolving the watched path.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The supervision task panicked or was aborted.
    #[error("supervision task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

impl WatchError {
    /// Creates a new [`WatchError::PathNotFound`] error.
    #[inline]
    pub fn path_not_found(path: impl Into<Utf8PathBuf>) -> Self {
        Self::PathNotFound(path.into())
    }

    /// Creates a new [`WatchError::ArmFailed`] error.
    #[inline]
    pub fn arm_failed(path: impl Into<Utf8PathBuf>, source: notify::Error) -> Self {
        Self::ArmFailed {
            path: path.into(),
            source,
        }
    }

    /// Creates a new [`WatchError::Notify`] error.
    #[inline]
    pub fn notify(code: Option<i32>, message: impl Into<String>) -> Self {
        Self::Notify {
            code,
            message: message.into(),
        }
    }

    /// Converts a runtime notify failure, keeping the OS code if present.
    pub fn from_notify(error: &notify::Error) -> Self {
        let code = match &error.kind {
            notify::ErrorKind::Io(io) => io.raw_os_error(),
            _ => None,
        };
        Self::notify(code, error.to_string())
    }

    /// Returns `true` if this error was raised before any task was started.
    #[must_use]
    pub const fn is_construction_error(&self) -> bool {
        matches!(
            self,
            Self::PathNotFound(_)
                | Self::NotADirectory(_)
                | Self::ArmFailed { .. }
                | Self::Config(_)
                | Self::NonUtf8Path(_)
                | Self::Io(_)
        )
    }

    /// Returns the OS status code carried by a [`WatchError::Notify`] error.
    #[must_use]
    pub const fn os_code(&self) -> Option<i32> {
        match self {
            Self::Notify { code, .. } => *code,
            _ => None,
        }
    }

    /// Returns the directory associated with this error, if any.
    #[must_use]
    pub fn path(&self) -> Option<&Utf8PathBuf> {
        match self {
            Self::PathNotFound(path) | Self::NotADirectory(path) | Self::ArmFailed { path, .. } => {
                Some(path)
            }
            Self::Notify { .. }
            | Self::Config(_)
            | Self::NonUtf8Path(_)
            | Self::Io(_)
            | Self::Join(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_watch_error_path_not_found() {
        let err = WatchError::path_not_found("src/missing");
        assert!(err.is_construction_error());
        assert_eq!(err.path().map(|p| p.as_str()), Some("src/missing"));
        assert_eq!(err.to_string(), "path does not exist: src/missing");
    }

    #[test]
    fn test_watch_error_not_a_directory() {
        let err = WatchError::NotADirectory(Utf8PathBuf::from("/etc/hosts"));
        assert!(err.is_construction_error());
        assert!(err.to_string().contains("not a directory"));
    }

    #[test]
    fn test_watch_error_arm_failed() {
        let err = WatchError::arm_failed("/watched", notify::Error::generic("invalid handle"));
        assert!(err.is_construction_error());
        assert_eq!(err.path().map(|p| p.as_str()), Some("/watched"));
        assert!(err.to_string().contains("invalid handle"));
    }

    #[test]
    fn test_watch_error_notify_carries_code() {
        let err = WatchError::notify(Some(6), "wait failed");
        assert!(!err.is_construction_error());
        assert_eq!(err.os_code(), Some(6));
        assert!(err.path().is_none());
        assert_eq!(err.to_string(), "change notification failed: wait failed");
    }

    #[test]
    fn test_watch_error_from_notify_io() {
        let source = notify::Error::io(io::Error::from_raw_os_error(2));
        let err = WatchError::from_notify(&source);
        assert_eq!(err.os_code(), Some(2));
    }

    #[test]
    fn test_watch_error_from_notify_generic() {
        let source = notify::Error::generic("backend gone");
        let err = WatchError::from_notify(&source);
        assert_eq!(err.os_code(), None);
        assert!(err.to_string().contains("backend gone"));
    }

    #[test]
    fn test_watch_error_config() {
        let err = WatchError::from(ConfigError::invalid_option("channel_capacity", "must be at least 1"));
        assert!(err.is_construction_error());
        assert!(err.to_string().contains("channel_capacity"));
    }
}
