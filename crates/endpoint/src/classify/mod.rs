//! URL classification and normalisation.
//!
//! [`Classifier::classify`] turns a URL-like string (already alias-rewritten)
//! into an [`Endpoint`] plus the [`TransportKind`] that was recognised. The
//! forms are tried in a fixed order:
//!
//! 1. remote-helper references (`<token>::<address>`), kept verbatim;
//! 2. existing local paths, emitted as `file://` URLs;
//! 3. `file://`, `http(s)://`, and other scheme URLs, kept as-is;
//! 4. `git://`, whose scheme is replaced by the configured git protocol;
//! 5. `ssh://` spellings and scp-like addresses, tunnelled over SSH with an
//!    `https://<host>/<path>` transfer URL;
//! 6. anything else, kept verbatim.
//!
//! Classification never appends the `/info/lfs` suffix; callers decide
//! with [`TransportKind::accepts_suffix`] and [`with_lfs_suffix`].

mod local;
mod pattern;


use config::ConfigView;

use crate::endpoint::{Endpoint, SshMetadata};
use crate::error::ClassifyError;
use pattern::{Form, SshTarget};

/// Scheme substituted for `git://` when `lfs.gitprotocol` is unset.
pub const DEFAULT_GIT_PROTOCOL: &str = "https";

const LFS_SUFFIX: &str = "/info/lfs";

/// Transport recognised for a URL-like string.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum TransportKind {
    /// `<token>::<address>` handed to a git remote helper.
    RemoteHelper,
    /// Existing repository on the local filesystem.
    Local,
    /// `file://` URL.
    File,
    /// `http://` or `https://` URL.
    Http,
    /// `git://` URL, rewritten to the configured protocol.
    Git,
    /// `ssh://`, `git+ssh://`, or `ssh+git://` URL.
    Ssh,
    /// Any other `<scheme>://` URL.
    OtherScheme,
    /// scp-like `[user@]host:path` address.
    ScpLike,
    /// Token with no scheme and no host separator.
    Opaque,
    /// SSH-shaped address whose authority could not be decomposed.
    Unknown,
}

impl TransportKind {
    /// Returns `true` when the transfer is tunnelled over SSH.
    #[must_use]
    pub const fn is_ssh(self) -> bool {
        matches!(self, Self::Ssh | Self::ScpLike)
    }

    /// Returns `true` when a clone URL of this kind receives the
    /// `.git/info/lfs` suffix.
    #[must_use]
    pub const fn accepts_suffix(self) -> bool {
        !matches!(
            self,
            Self::RemoteHelper | Self::Local | Self::File | Self::Unknown
        )
    }
}

/// Result of classifying one URL-like string.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Classification {
    endpoint: Endpoint,
    kind: TransportKind,
}

impl Classification {
    /// Returns the normalised endpoint (operation unset, no suffix).
    #[must_use]
    pub const fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    /// Returns the recognised transport.
    #[must_use]
    pub const fn kind(&self) -> TransportKind {
        self.kind
    }

    /// Consumes the classification, returning the endpoint.
    #[must_use]
    pub fn into_endpoint(self) -> Endpoint {
        self.endpoint
    }
}

/// Classifies URL-like strings into endpoints.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Classifier {
    git_protocol: String,
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new(DEFAULT_GIT_PROTOCOL)
    }
}

impl Classifier {
    /// Creates a classifier that rewrites `git://` to `git_protocol`.
    #[must_use]
    pub fn new(git_protocol: impl Into<String>) -> Self {
        Self {
            git_protocol: git_protocol.into(),
        }
    }

    /// Creates a classifier honouring `lfs.gitprotocol`.
    #[must_use]
    pub fn from_config<C: ConfigView + ?Sized>(config: &C) -> Self {
        config
            .get("lfs.gitprotocol")
            .filter(|protocol| !protocol.is_empty())
            .map_or_else(Self::default, Self::new)
    }

    /// Returns the scheme `git://` URLs are rewritten to.
    #[must_use]
    pub fn git_protocol(&self) -> &str {
        &self.git_protocol
    }

    /// Classifies `raw`.
    ///
    /// # Errors
    ///
    /// Returns [`ClassifyError::Io`] when probing a candidate local path
    /// fails for a reason other than the path not existing.
    pub fn classify(&self, raw: &str) -> Result<Classification, ClassifyError> {
        let classification = self.classify_inner(raw)?;
        logging::trace_classify!(
            kind = ?classification.kind,
            url = classification.endpoint.url(),
            "classified {raw:?}"
        );
        Ok(classification)
    }

    fn classify_inner(&self, raw: &str) -> Result<Classification, ClassifyError> {
        if pattern::is_remote_helper(raw) {
            return Ok(classified(Endpoint::verbatim(raw), TransportKind::RemoteHelper));
        }

        if local::is_candidate(raw)
            && let Some(path) = local::resolve(raw)?
        {
            let url = local::file_url(&path);
            return Ok(classified(
                Endpoint::with_original(url.clone(), url),
                TransportKind::Local,
            ));
        }

        let (matcher, form) = pattern::match_form(raw);
        logging::trace_classify!(matcher, "pattern matched {raw:?}");
        let classification = match form {
            Form::RemoteHelper => classified(Endpoint::verbatim(raw), TransportKind::RemoteHelper),
            Form::File => classified(Endpoint::with_original(raw, raw), TransportKind::File),
            Form::Http => classified(Endpoint::with_original(raw, raw), TransportKind::Http),
            Form::Git { rest } => classified(
                Endpoint::with_original(format!("{}://{rest}", self.git_protocol), raw),
                TransportKind::Git,
            ),
            Form::Ssh(target) => classified(
                Endpoint::tunnelled(
                    format!("https://{}{}", url_host(target.host), target.path),
                    ssh_metadata(&target),
                    raw.to_owned(),
                ),
                TransportKind::Ssh,
            ),
            Form::OtherScheme => {
                classified(Endpoint::with_original(raw, raw), TransportKind::OtherScheme)
            }
            Form::ScpLike(target) => classified(
                Endpoint::tunnelled(
                    format!("https://{}/{}", url_host(target.host), target.path),
                    ssh_metadata(&target),
                    scp_to_ssh_url(&target),
                ),
                TransportKind::ScpLike,
            ),
            Form::Opaque => classified(Endpoint::verbatim(raw), TransportKind::Opaque),
            Form::Malformed => classified(Endpoint::unknown(), TransportKind::Unknown),
        };
        Ok(classification)
    }
}

/// Appends the transfer suffix to a clone URL.
///
/// A single trailing `/` is dropped first. URLs already ending in
/// `/info/lfs` are returned unchanged, URLs ending in `.git` get
/// `/info/lfs`, and everything else gets `.git/info/lfs`.
///
/// # Examples
///
/// ```
/// use endpoint::with_lfs_suffix;
///
/// assert_eq!(with_lfs_suffix("https://foo/bar"), "https://foo/bar.git/info/lfs");
/// assert_eq!(with_lfs_suffix("https://foo/bar.git/"), "https://foo/bar.git/info/lfs");
/// ```
#[must_use]
pub fn with_lfs_suffix(url: &str) -> String {
    let url = url.strip_suffix('/').unwrap_or(url);
    if url.ends_with(LFS_SUFFIX) {
        url.to_owned()
    } else if url.ends_with(".git") {
        format!("{url}{LFS_SUFFIX}")
    } else {
        format!("{url}.git{LFS_SUFFIX}")
    }
}

fn classified(endpoint: Endpoint, kind: TransportKind) -> Classification {
    Classification { endpoint, kind }
}

fn ssh_metadata(target: &SshTarget<'_>) -> SshMetadata {
    let user_and_host = match target.user {
        Some(user) => format!("{user}@{}", target.host),
        None => target.host.to_owned(),
    };
    SshMetadata::new(user_and_host, target.path, target.port.unwrap_or_default())
}

/// Brackets IPv6 literals for use in a URL authority.
fn url_host(host: &str) -> std::borrow::Cow<'_, str> {
    if host.contains(':') {
        format!("[{host}]").into()
    } else {
        host.into()
    }
}

/// Spells an scp-like address as the equivalent `ssh://` URL.
fn scp_to_ssh_url(target: &SshTarget<'_>) -> String {
    let mut url = String::from("ssh://");
    if let Some(user) = target.user {
        url.push_str(user);
        url.push('@');
    }
    url.push_str(&url_host(target.host));
    if let Some(port) = target.port {
        url.push(':');
        url.push_str(port);
    }
    url.push('/');
    url.push_str(target.path);
    url
}
