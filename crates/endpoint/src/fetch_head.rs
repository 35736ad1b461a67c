//! Remote URL extraction from `FETCH_HEAD`.
//!
//! After a fetch of a URL with no configured remote, git records lines such
//! as
//!
//! ```text
//! 14d0e09d4643d7547267c1cbf9972ac1c4db0b2d\tnot-for-merge\tbranch 'master' of https://example.com/repo
//! ```
//!
//! The URL after `of` is the only place the fetched remote is remembered.

use std::path::Path;

use crate::error::FetchHeadError;

const OBJECT_ID_LEN: usize = 40;
const NOT_FOR_MERGE: &str = "not-for-merge";
const URL_SEPARATOR: &str = "' of ";

/// Extracts the remote URL from one `FETCH_HEAD` line.
///
/// The line must consist of a 40-character lowercase hex object id, a tab,
/// an empty or `not-for-merge` label, a tab, `branch` or `tag`, a quoted ref
/// name, ` of `, and the URL. Anything else is rejected without attempting
/// recovery.
///
/// # Errors
///
/// Returns [`FetchHeadError::Format`] naming the first violated part.
///
/// # Examples
///
/// ```
/// use endpoint::extract_remote_url;
///
/// let line = "cb2ad9f68531e6afe76326d46acf566acf8af4f9\t\ttag 'v1.0' of ssh://example.com/repo";
/// assert_eq!(extract_remote_url(line).unwrap(), "ssh://example.com/repo");
/// assert!(extract_remote_url("text without url").is_err());
/// ```
pub fn extract_remote_url(line: &str) -> Result<&str, FetchHeadError> {
    let fail = |reason| FetchHeadError::format(line, reason);

    let object_id = line
        .get(..OBJECT_ID_LEN)
        .ok_or_else(|| fail("line is shorter than an object id"))?;
    if !object_id
        .bytes()
        .all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b))
    {
        return Err(fail("object id is not 40 lowercase hex characters"));
    }

    let rest = line[OBJECT_ID_LEN..]
        .strip_prefix('\t')
        .ok_or_else(|| fail("expected a tab after the object id"))?;
    let (label, rest) = rest
        .split_once('\t')
        .ok_or_else(|| fail("expected a tab after the label"))?;
    if !label.is_empty() && label != NOT_FOR_MERGE {
        return Err(fail("label must be empty or \"not-for-merge\""));
    }

    let (ref_type, rest) = rest
        .split_once(' ')
        .ok_or_else(|| fail("expected a ref type"))?;
    if ref_type != "branch" && ref_type != "tag" {
        return Err(fail("ref type must be \"branch\" or \"tag\""));
    }

    let quoted = rest
        .strip_prefix('\'')
        .ok_or_else(|| fail("expected a quoted ref name"))?;
    let separator = quoted
        .rfind(URL_SEPARATOR)
        .filter(|&index| index > 0)
        .ok_or_else(|| fail("expected \"'<name>' of <url>\""))?;
    let url = &quoted[separator + URL_SEPARATOR.len()..];
    if url.is_empty() {
        return Err(fail("missing URL"));
    }

    logging::trace_fetch_head!(url, "extracted remote URL");
    Ok(url)
}

/// Reads `<git_dir>/FETCH_HEAD` and extracts the URL from its first line.
///
/// # Errors
///
/// Returns [`FetchHeadError::Io`] when the file cannot be read and
/// [`FetchHeadError::Format`] when its first line is malformed.
pub fn remote_url_from_fetch_head(git_dir: &Path) -> Result<String, FetchHeadError> {
    let path = git_dir.join("FETCH_HEAD");
    let contents = std::fs::read_to_string(&path)
        .map_err(|source| FetchHeadError::Io { path, source })?;
    let first = contents.lines().next().unwrap_or_default();
    extract_remote_url(first).map(str::to_owned)
}
