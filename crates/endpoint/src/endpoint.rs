//! Resolved transfer endpoint values.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// URL reported when an SSH-style address cannot be decomposed.
pub const UNKNOWN_URL: &str = "<unknown>";

/// Direction of a transfer.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Operation {
    /// Fetching objects from the remote.
    Download,
    /// Pushing objects to the remote.
    Upload,
}

impl Operation {
    /// Returns the wire spelling (`"download"` or `"upload"`).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Download => "download",
            Self::Upload => "upload",
        }
    }

    /// Returns `true` for [`Operation::Upload`].
    #[must_use]
    pub const fn is_upload(self) -> bool {
        matches!(self, Self::Upload)
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown operation name.
#[derive(Clone, Debug, Eq, Error, PartialEq)]
#[error("unknown operation {0:?} (expected \"download\" or \"upload\")")]
pub struct ParseOperationError(String);

impl FromStr for Operation {
    type Err = ParseOperationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "download" => Ok(Self::Download),
            "upload" => Ok(Self::Upload),
            other => Err(ParseOperationError(other.to_owned())),
        }
    }
}

/// Connection details for endpoints reached through an SSH tunnel.
///
/// All fields are empty when the transport does not use SSH.
#[derive(Clone, Debug, Default, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SshMetadata {
    user_and_host: String,
    path: String,
    port: String,
}

impl SshMetadata {
    /// Creates metadata from its components.
    #[must_use]
    pub fn new(
        user_and_host: impl Into<String>,
        path: impl Into<String>,
        port: impl Into<String>,
    ) -> Self {
        Self {
            user_and_host: user_and_host.into(),
            path: path.into(),
            port: port.into(),
        }
    }

    /// Returns `user@host`, or just `host` when no user was given.
    #[must_use]
    pub fn user_and_host(&self) -> &str {
        &self.user_and_host
    }

    /// Returns the repository path exactly as it should be passed to the
    /// remote side.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Returns the SSH port, or an empty string for the default port.
    #[must_use]
    pub fn port(&self) -> &str {
        &self.port
    }

    /// Returns `true` when no SSH tunnel is involved.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.user_and_host.is_empty() && self.path.is_empty() && self.port.is_empty()
    }
}

/// Resolved transfer target for one operation against one remote.
///
/// Endpoints are plain values recomputed on every resolution. An empty
/// [`url`](Self::url) means no endpoint is configured; callers decide
/// whether that is fatal.
#[derive(Clone, Debug, Default, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Endpoint {
    url: String,
    #[cfg_attr(feature = "serde", serde(rename = "ssh"))]
    ssh_metadata: SshMetadata,
    operation: Option<Operation>,
    original_url: String,
}

impl Endpoint {
    /// An endpoint whose URL is used exactly as given, with nothing else
    /// known about it.
    pub(crate) fn verbatim(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }

    pub(crate) fn with_original(url: impl Into<String>, original_url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            original_url: original_url.into(),
            ..Self::default()
        }
    }

    pub(crate) fn tunnelled(
        url: String,
        ssh_metadata: SshMetadata,
        original_url: String,
    ) -> Self {
        Self {
            url,
            ssh_metadata,
            operation: None,
            original_url,
        }
    }

    pub(crate) fn unknown() -> Self {
        Self::verbatim(UNKNOWN_URL)
    }

    pub(crate) fn set_url(&mut self, url: String) {
        self.url = url;
    }

    pub(crate) fn clear_original_url(&mut self) {
        self.original_url.clear();
    }

    pub(crate) fn with_operation(mut self, operation: Operation) -> Self {
        self.operation = Some(operation);
        self
    }

    /// Returns the URL transfer clients should talk to.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Returns the SSH tunnel details; empty unless the remote is SSH-based.
    #[must_use]
    pub const fn ssh_metadata(&self) -> &SshMetadata {
        &self.ssh_metadata
    }

    /// Returns the operation the endpoint was resolved for, if any.
    #[must_use]
    pub const fn operation(&self) -> Option<Operation> {
        self.operation
    }

    /// Returns the URL before the `/info/lfs` suffix was applied.
    ///
    /// Empty for remote helpers, opaque values, and explicit overrides used
    /// byte-for-byte.
    #[must_use]
    pub fn original_url(&self) -> &str {
        &self.original_url
    }

    /// Returns `true` when no endpoint is configured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.url.is_empty()
    }

    /// Returns `true` when the configured address could not be decomposed.
    #[must_use]
    pub fn is_unknown(&self) -> bool {
        self.url == UNKNOWN_URL
    }
}
