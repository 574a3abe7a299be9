//! Recursive file listing.
//!
//! This module provides [`FileWalker`], which uses the `ignore` crate to walk
//! a directory tree and collect the regular files a [`FileFilter`] accepts.
//!
//! Unlike a source-tree scanner, the walker lists everything by default:
//! hidden files and `.gitignore`d files are included unless
//! [`FileWalker::with_standard_filters`] turns the `ignore` crate's filters on.
//! Paths containing `$RECYCLE.BIN` are always skipped.
//!
//! # Examples
//!
//! ```no_run
//! use dirwatch_fs::{FileWalker, TextFileFilter};
//! use camino::Utf8Path;
//!
//! let walker = FileWalker::new(Utf8Path::new("/srv/share"))?;
//! for path in walker.collect_paths(&TextFileFilter::default())? {
//!     println!("{path}");
//! }
//! # Ok::<(), dirwatch_fs::FsError>(())
//! ```

use camino::{Utf8Path, Utf8PathBuf};
use ignore::WalkBuilder;
use tracing::warn;

use crate::error::FsError;
use crate::filter::FileFilter;

/// Path fragment that marks the Windows recycle bin.
const RECYCLE_BIN: &str = "$RECYCLE.BIN";

/// Walks a directory tree collecting matching files.
#[derive(Debug)]
pub struct FileWalker {
    /// The root directory to walk.
    root: Utf8PathBuf,
    /// Whether to follow symbolic links.
    follow_links: bool,
    /// Whether to apply `.gitignore`, `.ignore` and hidden-file filtering.
    standard_filters: bool,
}

impl FileWalker {
    /// Creates a new file walker for the given root directory.
    ///
    /// # Errors
    ///
    /// Returns [`FsError::InvalidArgument`] if `root` is blank and
    /// [`FsError::NotFound`] if it doesn't exist or isn't a directory.
    pub fn new(root: &Utf8Path) -> Result<Self, FsError> {
        if root.as_str().trim().is_empty() {
            return Err(FsError::invalid_argument("directory path is blank"));
        }
        if !root.is_dir() {
            return Err(FsError::NotFound(root.to_owned()));
        }

        Ok(Self {
            root: root.to_owned(),
            follow_links: false,
            standard_filters: false,
        })
    }

    /// Configures whether to follow symbolic links.
    ///
    /// By default, symbolic links are not followed.
    #[must_use]
    pub const fn with_follow_links(mut self, follow: bool) -> Self {
        self.follow_links = follow;
        self
    }

    /// Configures whether hidden and ignored files are skipped.
    #[must_use]
    pub const fn with_standard_filters(mut self, enabled: bool) -> Self {
        self.standard_filters = enabled;
        self
    }

    /// Collects every regular file under the root that `filter` accepts.
    ///
    /// Entries that cannot be read are logged and skipped. The result is
    /// sorted.
    ///
    /// # Errors
    ///
    /// Returns [`FsError::NonUtf8Path`] if a matching path is not UTF-8.
    pub fn collect_paths<F: FileFilter + ?Sized>(
        &self,
        filter: &F,
    ) -> Result<Vec<Utf8PathBuf>, FsError> {
        let mut paths = Vec::new();

        for result in self.build_walker() {
            let entry = match result {
                Ok(entry) => entry,
                Err(e) => {
                    warn!(root = %self.root, error = %e, "Skipping unreadable entry");
                    continue;
                }
            };

            if !entry.file_type().is_some_and(|ft| ft.is_file()) {
                continue;
            }

            let path = entry.path();
            let utf8_path =
                Utf8Path::from_path(path).ok_or_else(|| FsError::NonUtf8Path(path.to_owned()))?;

            if utf8_path.as_str().contains(RECYCLE_BIN) || !filter.accepts(utf8_path) {
                continue;
            }

            paths.push(utf8_path.to_owned());
        }

        paths.sort();
        Ok(paths)
    }

    /// Builds the ignore walker with configured settings.
    fn build_walker(&self) -> ignore::Walk {
        WalkBuilder::new(&self.root)
            .standard_filters(self.standard_filters)
            .follow_links(self.follow_links)
            .require_git(false)
            .build()
    }

    /// Returns the root directory being walked.
    #[inline]
    #[must_use]
    pub fn root(&self) -> &Utf8Path {
        &self.root
    }
}

/// Collects every regular file under `dir` that `filter` accepts, sorted.
///
/// Shorthand for [`FileWalker::new`] followed by
/// [`FileWalker::collect_paths`].
///
/// # Errors
///
/// See [`FileWalker::new`] and [`FileWalker::collect_paths`].
pub fn collect_file_paths<F: FileFilter + ?Sized>(
    dir: &Utf8Path,
    filter: &F,
) -> Result<Vec<Utf8PathBuf>, FsError> {
    FileWalker::new(dir)?.collect_paths(filter)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::{AcceptAllFilter, ExtensionFilter};
    use std::fs;
    use tempfile::TempDir;

    fn populated_dir() -> TempDir {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let root = temp_dir.path();
        fs::create_dir_all(root.join("sub/deeper")).expect("mkdir");
        fs::create_dir_all(root.join("$RECYCLE.BIN")).expect("mkdir");
        for file in [
            "b.txt",
            "a.LOG",
            "image.png",
            ".hidden.txt",
            "sub/c.txt",
            "sub/deeper/d.log",
            "$RECYCLE.BIN/deleted.txt",
        ] {
            fs::write(root.join(file), "x").expect("write");
        }
        temp_dir
    }

    fn names(root: &Utf8Path, paths: &[Utf8PathBuf]) -> Vec<String> {
        paths
            .iter()
            .map(|p| p.strip_prefix(root).expect("under root").as_str().replace('\\', "/"))
            .collect()
    }

    #[test]
    fn test_collect_all_files_sorted() {
        let temp_dir = populated_dir();
        let root = Utf8Path::from_path(temp_dir.path()).expect("Invalid path");

        let paths = collect_file_paths(root, &AcceptAllFilter).expect("walk failed");
        assert_eq!(
            names(root, &paths),
            vec![
                ".hidden.txt",
                "a.LOG",
                "b.txt",
                "image.png",
                "sub/c.txt",
                "sub/deeper/d.log",
            ]
        );
    }

    #[test]
    fn test_collect_with_extension_filter() {
        let temp_dir = populated_dir();
        let root = Utf8Path::from_path(temp_dir.path()).expect("Invalid path");

        let filter = ExtensionFilter::new(&["*.log"]);
        let paths = collect_file_paths(root, &filter).expect("walk failed");
        assert_eq!(names(root, &paths), vec!["a.LOG", "sub/deeper/d.log"]);
    }

    #[test]
    fn test_standard_filters_skip_hidden() {
        let temp_dir = populated_dir();
        let root = Utf8Path::from_path(temp_dir.path()).expect("Invalid path");

        let paths = FileWalker::new(root)
            .expect("walker")
            .with_standard_filters(true)
            .collect_paths(&ExtensionFilter::new(&["txt"]))
            .expect("walk failed");
        assert_eq!(names(root, &paths), vec!["b.txt", "sub/c.txt"]);
    }

    #[test]
    fn test_blank_dir_rejected() {
        let result = collect_file_paths(Utf8Path::new(""), &AcceptAllFilter);
        assert!(matches!(result, Err(FsError::InvalidArgument(_))));
    }

    #[test]
    fn test_missing_dir_rejected() {
        let result = collect_file_paths(Utf8Path::new("/nonexistent/dirwatch"), &AcceptAllFilter);
        assert!(matches!(result, Err(FsError::NotFound(_))));
    }

    #[test]
    fn test_with_follow_links() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let root = Utf8Path::from_path(temp_dir.path()).expect("Invalid path");
        let walker = FileWalker::new(root).expect("walker").with_follow_links(true);
        assert!(walker.follow_links);
        assert_eq!(walker.root(), root);
    }
}
