//! Errors raised while loading configuration.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while loading or parsing configuration.
///
/// Lookups through [`ConfigView`](crate::ConfigView) never fail; only the
/// loaders that populate a [`GitConfig`](crate::GitConfig) report errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A record in `git config --list` output could not be parsed.
    #[error("config record {record}: {reason}")]
    Parse {
        /// 1-based index of the offending record.
        record: usize,
        /// What was wrong with the record.
        reason: &'static str,
    },

    /// A configuration file could not be read.
    #[error("failed to read '{}': {source}", path.display())]
    Io {
        /// Path of the file being read.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },

    /// `git config` could not be spawned.
    #[error("failed to run git config: {0}")]
    GitSpawn(#[source] io::Error),

    /// `git config` ran but reported failure.
    #[error("git config exited with {status}: {stderr}")]
    GitStatus {
        /// Rendered exit status.
        status: String,
        /// Trimmed standard error of the child.
        stderr: String,
    },
}

impl ConfigError {
    pub(crate) const fn parse(record: usize, reason: &'static str) -> Self {
        Self::Parse { record, reason }
    }

    /// Returns the 1-based record number for parse failures.
    #[must_use]
    pub const fn record(&self) -> Option<usize> {
        match self {
            Self::Parse { record, .. } => Some(*record),
            _ => None,
        }
    }
}
