//! Error types for the dirwatch-fs crate.
//!
//! This module provides the [`FsError`] type for errors that can occur
//! while listing, reading, writing, or archiving files.

use camino::Utf8PathBuf;

/// Errors that can occur during filesystem operations.
///
/// # Examples
///
/// ```
/// use dirwatch_fs::FsError;
///
/// fn describe(err: &FsError) -> String {
///     match err {
///         FsError::InvalidArgument(msg) => format!("bad input: {msg}"),
///         FsError::NotFound(path) => format!("missing: {path}"),
///         other => other.to_string(),
///     }
/// }
/// ```
#[derive(Debug, thiserror::Error)]
pub enum FsError {
    /// An argument was blank or otherwise unusable.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A path that must exist does not.
    #[error("path does not exist: {0}")]
    NotFound(Utf8PathBuf),

    /// Failed to read a file.
    #[error("failed to read file {path}: {source}")]
    Read {
        /// The path of the file that couldn't be read.
        path: Utf8PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to write a file.
    #[error("failed to write file {path}: {source}")]
    Write {
        /// The path of the file that couldn't be written.
        path: Utf8PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to walk a directory.
    #[error("failed to walk directory: {0}")]
    Walk(#[from] ignore::Error),

    /// Failed to build a zip archive.
    #[error("failed to write archive {path}: {source}")]
    Zip {
        /// The archive being written.
        path: Utf8PathBuf,
        /// The underlying archive error.
        #[source]
        source: zip::result::ZipError,
    },

    /// A path is not valid UTF-8.
    #[error("path is not valid UTF-8: {}", _0.display())]
    NonUtf8Path(std::path::PathBuf),
}

impl FsError {
    /// Creates a new [`FsError::InvalidArgument`] error.
    #[inline]
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    /// Creates a new [`FsError::Read`] error.
    #[inline]
    pub fn read(path: impl Into<Utf8PathBuf>, source: std::io::Error) -> Self {
        Self::Read {
            path: path.into(),
            source,
        }
    }

    /// Creates a new [`FsError::Write`] error.
    #[inline]
    pub fn write(path: impl Into<Utf8PathBuf>, source: std::io::Error) -> Self {
        Self::Write {
            path: path.into(),
            source,
        }
    }

    /// Creates a new [`FsError::Zip`] error.
    #[inline]
    pub fn zip(path: impl Into<Utf8PathBuf>, source: zip::result::ZipError) -> Self {
        Self::Zip {
            path: path.into(),
            source,
        }
    }

    /// Returns the file path associated with this error, if any.
    #[must_use]
    pub fn path(&self) -> Option<&Utf8PathBuf> {
        match self {
            Self::NotFound(path)
            | Self::Read { path, .. }
            | Self::Write { path, .. }
            | Self::Zip { path, .. } => Some(path),
            Self::InvalidArgument(_) | Self::Walk(_) | Self::NonUtf8Path(_) => None,
        }
    }
}
