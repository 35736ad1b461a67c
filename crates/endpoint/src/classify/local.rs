//! Recognition of local repository paths.

use std::io;
use std::path::{Path, PathBuf};

use crate::error::ClassifyError;

/// Returns `true` when `raw` could name a local path: it is non-empty and
/// has no `:` before its first `/`.
pub(crate) fn is_candidate(raw: &str) -> bool {
    if raw.is_empty() {
        return false;
    }
    let head = raw.find('/').map_or(raw, |slash| &raw[..slash]);
    !head.contains(':')
}

/// Resolves `raw` to the repository directory it names.
///
/// Only directories count; a regular file at the candidate location yields
/// `Ok(None)` just like a missing path, so the caller can try the remaining
/// URL forms.
pub(crate) fn resolve(raw: &str) -> Result<Option<PathBuf>, ClassifyError> {
    let path = std::path::absolute(raw).map_err(|source| ClassifyError::Io {
        path: PathBuf::from(raw),
        source,
    })?;

    if path.file_name().is_some_and(|name| name == ".git") {
        if is_dir(&path)? {
            return Ok(Some(path));
        }
        let Some(parent) = path.parent() else {
            return Ok(None);
        };
        return Ok(is_dir(parent)?.then(|| parent.to_path_buf()));
    }

    let dot_git = path.join(".git");
    if is_dir(&dot_git)? {
        return Ok(Some(dot_git));
    }
    Ok(is_dir(&path)?.then_some(path))
}

/// Renders a resolved path as a `file://` URL.
pub(crate) fn file_url(path: &Path) -> String {
    let display = path.to_string_lossy();
    if display.starts_with('/') {
        format!("file://{display}")
    } else {
        format!("file:///{}", display.replace('\\', "/"))
    }
}

fn is_dir(path: &Path) -> Result<bool, ClassifyError> {
    match std::fs::metadata(path) {
        Ok(metadata) => Ok(metadata.is_dir()),
        Err(error) if error.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(error) if error.kind() == io::ErrorKind::NotADirectory => Ok(false),
        Err(source) => Err(ClassifyError::Io {
            path: path.to_path_buf(),
            source,
        }),
    }
}
