//! Filesystem helpers for applications built on dirwatch.
//!
//! A debounced notification says only that *something* in a directory
//! changed. This crate holds the utilities a consumer typically reaches for
//! next: listing the files it cares about, reading or rewriting them line by
//! line, and bundling them into an archive.
//!
//! # Overview
//!
//! - [`collect_file_paths`] / [`FileWalker`]: recursive, sorted file listing
//! - [`FileFilter`] and its implementations: [`ExtensionFilter`],
//!   [`TextFileFilter`], [`AcceptAllFilter`], [`CompositeFilter`]
//! - [`dir_exists`], [`file_exists`]: existence checks that never fail
//! - [`read_file_lines`], [`write_file_lines`]: line-oriented text I/O
//! - [`flat_zip`]: deflate archive of files stored under their base names
//!
//! # Example
//!
//! ```no_run
//! use dirwatch_fs::{collect_file_paths, flat_zip, ExtensionFilter};
//! use camino::Utf8Path;
//!
//! let logs = collect_file_paths(Utf8Path::new("/var/log/app"), &ExtensionFilter::new(&["log"]))?;
//! flat_zip(Utf8Path::new("/tmp/logs.zip"), &logs)?;
//! # Ok::<(), dirwatch_fs::FsError>(())
//! ```

#![deny(clippy::all)]
#![warn(missing_docs)]

pub mod archive;
pub mod error;
pub mod exts;
pub mod files;
pub mod filter;
pub mod walker;

pub use archive::flat_zip;
pub use error::FsError;
pub use exts::TEXT_FILE_EXTS;
pub use files::{dir_exists, file_exists, read_file_lines, write_file_lines};
pub use filter::{
    AcceptAllFilter, CompositeFilter, ExtensionFilter, FileFilter, TextFileFilter, is_file_ext,
    is_text_file,
};
pub use walker::{FileWalker, collect_file_paths};
