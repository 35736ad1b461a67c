//! Error types for endpoint classification and FETCH_HEAD parsing.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failure while classifying a URL-like string.
///
/// Classification of well-formed and malformed strings alike is infallible;
/// only probing the filesystem for a local repository can fail.
#[derive(Debug, Error)]
pub enum ClassifyError {
    /// Inspecting a local repository path failed for a reason other than
    /// the path not existing.
    #[error("failed to inspect local path {}: {source}", path.display())]
    Io {
        /// Path being inspected.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: io::Error,
    },
}

/// Failure while extracting a remote URL from a FETCH_HEAD line.
#[derive(Debug, Error)]
pub enum FetchHeadError {
    /// The line does not follow the advisory format.
    #[error("failed to extract remote URL from {line:?}: {reason}")]
    Format {
        /// The offending line.
        line: String,
        /// Which part of the format was violated.
        reason: &'static str,
    },

    /// `FETCH_HEAD` could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        /// Path of the `FETCH_HEAD` file.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: io::Error,
    },
}

impl FetchHeadError {
    pub(crate) fn format(line: &str, reason: &'static str) -> Self {
        Self::Format {
            line: line.to_owned(),
            reason,
        }
    }
}
