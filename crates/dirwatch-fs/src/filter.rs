//! File name filters for listings.
//!
//! The [`FileFilter`] trait is a simple predicate over paths. Listings such
//! as [`collect_file_paths`](crate::collect_file_paths) keep only the files a
//! filter accepts.
//!
//! # Examples
//!
//! ```
//! use dirwatch_fs::{FileFilter, ExtensionFilter};
//! use camino::Utf8Path;
//!
//! let filter = ExtensionFilter::new(&["*.LOG", ".txt"]);
//!
//! assert!(filter.accepts(Utf8Path::new("logs/app.log")));
//! assert!(filter.accepts(Utf8Path::new("README.TXT")));
//! assert!(!filter.accepts(Utf8Path::new("image.png")));
//! ```

use camino::Utf8Path;
use smallvec::SmallVec;

use crate::exts::TEXT_FILE_EXTS;

/// A predicate deciding which files a listing keeps.
///
/// Filters must be [`Send`] and [`Sync`] so one filter can be shared across
/// tasks behind an [`Arc`](std::sync::Arc).
pub trait FileFilter: Send + Sync + 'static {
    /// Returns `true` if the file at `path` should be kept.
    fn accepts(&self, path: &Utf8Path) -> bool;
}

/// A filter that accepts every file.
#[derive(Debug, Clone, Copy, Default)]
pub struct AcceptAllFilter;

impl FileFilter for AcceptAllFilter {
    #[inline]
    fn accepts(&self, _path: &Utf8Path) -> bool {
        true
    }
}

/// Accepts files whose name ends in `.<ext>` for any configured extension.
///
/// Extensions may be written as `ext`, `.ext` or `*.ext`; leading `*` and `.`
/// characters are trimmed. Matching ignores ASCII case. Because matching is a
/// suffix test on the whole name, `"tar.gz"` works as an extension.
#[derive(Debug, Clone)]
pub struct ExtensionFilter {
    /// Lowercase suffixes including the leading dot, e.g. `".txt"`.
    suffixes: SmallVec<[String; 8]>,
}

impl ExtensionFilter {
    /// Creates a filter accepting any of `extensions`.
    ///
    /// Entries that are empty after trimming are ignored.
    #[must_use]
    pub fn new<S: AsRef<str>>(extensions: &[S]) -> Self {
        Self::from_iter(extensions.iter().map(AsRef::as_ref))
    }

    /// Returns `true` if no usable extension was configured.
    ///
    /// An empty filter accepts nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.suffixes.is_empty()
    }

    /// Returns the normalized suffixes this filter matches.
    pub fn suffixes(&self) -> impl Iterator<Item = &str> {
        self.suffixes.iter().map(String::as_str)
    }
}

impl<'a> FromIterator<&'a str> for ExtensionFilter {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        let suffixes = iter
            .into_iter()
            .map(|ext| ext.trim_start_matches(['*', '.']))
            .filter(|ext| !ext.is_empty())
            .map(|ext| format!(".{}", ext.to_ascii_lowercase()))
            .collect();
        Self { suffixes }
    }
}

impl FileFilter for ExtensionFilter {
    fn accepts(&self, path: &Utf8Path) -> bool {
        let name = path.as_str().to_ascii_lowercase();
        self.suffixes.iter().any(|suffix| name.ends_with(suffix.as_str()))
    }
}

/// Accepts files whose extension is listed in [`TEXT_FILE_EXTS`].
#[derive(Debug, Clone)]
pub struct TextFileFilter {
    inner: ExtensionFilter,
}

impl TextFileFilter {
    /// Creates a filter over the built-in text extension table.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: ExtensionFilter::new(TEXT_FILE_EXTS),
        }
    }
}

impl Default for TextFileFilter {
    fn default() -> Self {
        Self::new()
    }
}

impl FileFilter for TextFileFilter {
    #[inline]
    fn accepts(&self, path: &Utf8Path) -> bool {
        self.inner.accepts(path)
    }
}

/// A composite filter that combines multiple filters with AND logic.
///
/// An empty composite accepts every file.
///
/// # Examples
///
/// ```
/// use dirwatch_fs::{CompositeFilter, ExtensionFilter, FileFilter};
/// use camino::Utf8Path;
///
/// struct NoBackups;
/// impl FileFilter for NoBackups {
///     fn accepts(&self, path: &Utf8Path) -> bool {
///         !path.as_str().contains("backup")
///     }
/// }
///
/// let filter = CompositeFilter::new()
///     .and(ExtensionFilter::new(&["csv"]))
///     .and(NoBackups);
///
/// assert!(filter.accepts(Utf8Path::new("data/2024.csv")));
/// assert!(!filter.accepts(Utf8Path::new("backup/2024.csv")));
/// ```
#[derive(Default)]
pub struct CompositeFilter {
    filters: Vec<Box<dyn FileFilter>>,
}

impl CompositeFilter {
    /// Creates a new empty composite filter.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a filter to the composite.
    #[must_use]
    pub fn and<F: FileFilter>(mut self, filter: F) -> Self {
        self.filters.push(Box::new(filter));
        self
    }
}

impl FileFilter for CompositeFilter {
    fn accepts(&self, path: &Utf8Path) -> bool {
        self.filters.iter().all(|f| f.accepts(path))
    }
}

impl<F: FileFilter + ?Sized> FileFilter for Box<F> {
    fn accepts(&self, path: &Utf8Path) -> bool {
        (**self).accepts(path)
    }
}

impl<F: FileFilter + ?Sized> FileFilter for std::sync::Arc<F> {
    fn accepts(&self, path: &Utf8Path) -> bool {
        (**self).accepts(path)
    }
}

/// Returns `true` if `name` ends in `.<ext>` for one of `exts`, ignoring
/// ASCII case.
///
/// ```
/// use dirwatch_fs::is_file_ext;
///
/// assert!(is_file_ext("Report.PDF", &["pdf"]));
/// assert!(!is_file_ext("pdf", &["pdf"]));
/// ```
#[must_use]
pub fn is_file_ext<S: AsRef<str>>(name: &str, exts: &[S]) -> bool {
    ExtensionFilter::new(exts).accepts(Utf8Path::new(name))
}

/// Returns `true` if `name` has a known text file extension.
#[must_use]
pub fn is_text_file(name: &str) -> bool {
    is_file_ext(name, TEXT_FILE_EXTS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accept_all_filter() {
        let filter = AcceptAllFilter;
        assert!(filter.accepts(Utf8Path::new("anything.bin")));
        assert!(filter.accepts(Utf8Path::new("")));
    }

    #[test]
    fn test_extension_filter_normalizes_patterns() {
        let filter = ExtensionFilter::new(&["*.TXT", ".log", "csv", "*", ""]);
        let suffixes: Vec<_> = filter.suffixes().collect();
        assert_eq!(suffixes, vec![".txt", ".log", ".csv"]);
    }

    #[test]
    fn test_extension_filter_case_insensitive() {
        let filter = ExtensionFilter::new(&["txt"]);
        assert!(filter.accepts(Utf8Path::new("notes.txt")));
        assert!(filter.accepts(Utf8Path::new("NOTES.TXT")));
        assert!(filter.accepts(Utf8Path::new("dir/Mixed.TxT")));
        assert!(!filter.accepts(Utf8Path::new("notes.txt.bak")));
        assert!(!filter.accepts(Utf8Path::new("txt")));
    }

    #[test]
    fn test_extension_filter_multi_part_extension() {
        let filter = ExtensionFilter::new(&["tar.gz"]);
        assert!(filter.accepts(Utf8Path::new("backup.tar.gz")));
        assert!(!filter.accepts(Utf8Path::new("backup.gz")));
    }

    #[test]
    fn test_empty_extension_filter_accepts_nothing() {
        let filter = ExtensionFilter::new::<&str>(&[]);
        assert!(filter.is_empty());
        assert!(!filter.accepts(Utf8Path::new("a.txt")));
    }

    #[test]
    fn test_text_file_filter() {
        let filter = TextFileFilter::default();
        assert!(filter.accepts(Utf8Path::new("readme.txt")));
        assert!(filter.accepts(Utf8Path::new("src/main.rs")));
        assert!(filter.accepts(Utf8Path::new("Project.CSPROJ")));
        assert!(!filter.accepts(Utf8Path::new("image.png")));
        assert!(!filter.accepts(Utf8Path::new("archive.zip")));
    }

    #[test]
    fn test_is_file_ext_and_is_text_file() {
        assert!(is_file_ext("data.CSV", &["csv", "tsv"]));
        assert!(!is_file_ext("data.xlsx", &["csv", "tsv"]));
        assert!(is_text_file("readme.txt"));
        assert!(is_text_file(".gitignore"));
        assert!(!is_text_file("image.png"));
    }

    #[test]
    fn test_composite_filter_empty() {
        let filter = CompositeFilter::new();
        assert!(filter.accepts(Utf8Path::new("anything")));
    }

    #[test]
    fn test_composite_filter_and() {
        struct NoRecycleBin;
        impl FileFilter for NoRecycleBin {
            fn accepts(&self, path: &Utf8Path) -> bool {
                !path.as_str().contains("$RECYCLE.BIN")
            }
        }

        let filter = CompositeFilter::new()
            .and(TextFileFilter::default())
            .and(NoRecycleBin);

        assert!(filter.accepts(Utf8Path::new("docs/a.md")));
        assert!(!filter.accepts(Utf8Path::new("$RECYCLE.BIN/a.md")));
        assert!(!filter.accepts(Utf8Path::new("docs/a.png")));
    }

    #[test]
    fn test_boxed_and_arc_filters() {
        let boxed: Box<dyn FileFilter> = Box::new(ExtensionFilter::new(&["rs"]));
        assert!(boxed.accepts(Utf8Path::new("lib.rs")));

        let shared = std::sync::Arc::new(TextFileFilter::default());
        assert!(shared.accepts(Utf8Path::new("lib.rs")));
        assert!(!shared.accepts(Utf8Path::new("lib.so")));
    }
}
