//! Flat zip archives.

use std::fs::File;
use std::io;

use camino::Utf8Path;
use tracing::debug;
use zip::CompressionMethod;
use zip::write::FileOptions;

use crate::error::FsError;

/// Writes a deflate-compressed zip archive at `zip_path` holding `files`.
///
/// Each entry is stored under its base name only, so the archive has no
/// directories. Files are added in the given order; an existing archive is
/// overwritten.
///
/// # Errors
///
/// Returns [`FsError::InvalidArgument`] for a blank archive path or an input
/// without a file name, [`FsError::Read`] if an input cannot be opened,
/// [`FsError::Write`] if the archive cannot be created or written, and
/// [`FsError::Zip`] for archive encoding failures.
///
/// # Examples
///
/// ```no_run
/// use dirwatch_fs::flat_zip;
/// use camino::Utf8Path;
///
/// flat_zip(
///     Utf8Path::new("bundle.zip"),
///     &[Utf8Path::new("logs/app.log"), Utf8Path::new("conf/app.json")],
/// )?;
/// # Ok::<(), dirwatch_fs::FsError>(())
/// ```
pub fn flat_zip<P: AsRef<Utf8Path>>(zip_path: &Utf8Path, files: &[P]) -> Result<(), FsError> {
    if zip_path.as_str().trim().is_empty() {
        return Err(FsError::invalid_argument("archive path is blank"));
    }

    let archive = File::create(zip_path).map_err(|e| FsError::write(zip_path, e))?;
    let mut writer = zip::ZipWriter::new(archive);
    let options = FileOptions::default().compression_method(CompressionMethod::Deflated);

    for file in files {
        let file = file.as_ref();
        let name = file
            .file_name()
            .ok_or_else(|| FsError::invalid_argument(format!("no file name in {file}")))?;

        let mut input = File::open(file).map_err(|e| FsError::read(file, e))?;
        writer
            .start_file(name, options)
            .map_err(|e| FsError::zip(zip_path, e))?;
        io::copy(&mut input, &mut writer).map_err(|e| FsError::write(zip_path, e))?;
    }

    writer.finish().map_err(|e| FsError::zip(zip_path, e))?;
    debug!(archive = %zip_path, entries = files.len(), "Wrote flat zip archive");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use camino::Utf8PathBuf;
    use std::fs;
    use std::io::Read;
    use tempfile::TempDir;

    fn create_temp_dir() -> TempDir {
        TempDir::new().expect("Failed to create temp directory")
    }

    fn root(dir: &TempDir) -> Utf8PathBuf {
        Utf8Path::from_path(dir.path()).expect("Invalid path").to_owned()
    }

    #[test]
    fn test_flat_zip_stores_base_names() {
        let temp_dir = create_temp_dir();
        let root = root(&temp_dir);
        fs::create_dir_all(root.join("nested/deeper")).expect("mkdir");
        fs::write(root.join("top.txt"), "top").expect("write");
        fs::write(root.join("nested/deeper/inner.log"), "inner contents").expect("write");

        let archive_path = root.join("out.zip");
        flat_zip(
            &archive_path,
            &[root.join("top.txt"), root.join("nested/deeper/inner.log")],
        )
        .expect("zip failed");

        let mut archive =
            zip::ZipArchive::new(File::open(&archive_path).expect("open")).expect("read archive");
        let mut names: Vec<_> = archive.file_names().map(str::to_owned).collect();
        names.sort();
        assert_eq!(names, vec!["inner.log", "top.txt"]);

        let mut entry = archive.by_name("inner.log").expect("entry");
        assert_eq!(entry.compression(), CompressionMethod::Deflated);
        let mut contents = String::new();
        entry.read_to_string(&mut contents).expect("read entry");
        assert_eq!(contents, "inner contents");
    }

    #[test]
    fn test_flat_zip_empty_file_list() {
        let temp_dir = create_temp_dir();
        let archive_path = root(&temp_dir).join("empty.zip");

        flat_zip::<&Utf8Path>(&archive_path, &[]).expect("zip failed");

        let archive =
            zip::ZipArchive::new(File::open(&archive_path).expect("open")).expect("read archive");
        assert_eq!(archive.len(), 0);
    }

    #[test]
    fn test_flat_zip_missing_input() {
        let temp_dir = create_temp_dir();
        let root = root(&temp_dir);
        let missing = root.join("missing.txt");

        let err = flat_zip(&root.join("out.zip"), &[&missing]).expect_err("Expected error");
        assert!(matches!(err, FsError::Read { .. }));
        assert_eq!(err.path(), Some(&missing));
    }

    #[test]
    fn test_flat_zip_blank_archive_path() {
        let err = flat_zip::<&Utf8Path>(Utf8Path::new(" "), &[]).expect_err("Expected error");
        assert!(matches!(err, FsError::InvalidArgument(_)));
    }
}
