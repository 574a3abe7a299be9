//! Existence checks and line-oriented file I/O.

use std::fs;

use camino::Utf8Path;

use crate::error::FsError;

/// Returns `true` only if `path` exists and is a directory.
///
/// Any error while inspecting the path counts as "does not exist".
#[must_use]
pub fn dir_exists(path: &Utf8Path) -> bool {
    fs::metadata(path).is_ok_and(|meta| meta.is_dir())
}

/// Returns `true` only if `path` exists and is a regular file.
///
/// Any error while inspecting the path counts as "does not exist".
#[must_use]
pub fn file_exists(path: &Utf8Path) -> bool {
    fs::metadata(path).is_ok_and(|meta| meta.is_file())
}

/// Reads `path` and splits its contents on `\n`.
///
/// Line terminators are not interpreted further: a trailing newline yields
/// a final empty line, and `\r` stays attached to Windows-style lines.
///
/// # Errors
///
/// Returns [`FsError::Read`] if the file cannot be read or is not UTF-8.
pub fn read_file_lines(path: &Utf8Path) -> Result<Vec<String>, FsError> {
    let content = fs::read_to_string(path).map_err(|e| FsError::read(path, e))?;
    Ok(content.split('\n').map(str::to_owned).collect())
}

/// Writes `lines` to `path`, joined with `\n`.
///
/// If the joined text does not already end with a newline, one is appended;
/// it is `\r\n` when the text already contains `\r\n`. An empty `lines`
/// writes a single `\n`.
///
/// # Errors
///
/// Returns [`FsError::InvalidArgument`] if `path` is blank and
/// [`FsError::Write`] if the file cannot be written.
pub fn write_file_lines<S: AsRef<str>>(path: &Utf8Path, lines: &[S]) -> Result<(), FsError> {
    let trimmed = path.as_str().trim();
    if trimmed.is_empty() {
        return Err(FsError::invalid_argument("file path is blank"));
    }
    let path = Utf8Path::new(trimmed);

    let mut content = lines
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<&str>>()
        .join("\n");
    if !content.ends_with('\n') {
        if content.contains("\r\n") {
            content.push('\r');
        }
        content.push('\n');
    }

    fs::write(path, content).map_err(|e| FsError::write(path, e))?;
    tracing::trace!(path = %path, lines = lines.len(), "Wrote file");
    Ok(())
}
