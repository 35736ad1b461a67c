#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `endpoint` decides where large-file transfers for a git repository go.
//! Given a read-only configuration snapshot, a remote name, and a transfer
//! direction, [`EndpointFinder`] produces an [`Endpoint`]: the HTTP(S) URL
//! of the transfer API, optional SSH tunnelling metadata, and the URL the
//! user originally wrote. It also remembers, per URL, which authentication
//! [`AccessMode`] is known to work.
//!
//! # Design
//!
//! - [`AliasTable`] applies `url.<base>.insteadOf` and
//!   `url.<base>.pushInsteadOf` rewriting, longest prefix first.
//! - [`Classifier`] recognises remote-helper references, local paths,
//!   `file://`, `http(s)://`, `git://`, `ssh://` (and its `git+ssh`/`ssh+git`
//!   spellings), scp-like addresses, and opaque tokens.
//! - [`EndpointFinder`] walks a fixed precedence table of configuration keys
//!   (`lfs.pushurl`, `lfs.url`, `remote.<name>.lfspushurl`, ...) and falls
//!   back to the default remote and finally to `FETCH_HEAD`.
//! - [`AccessCache`] seeds access modes from `lfs.<url>.access` and lets
//!   transfer workers record what the server actually accepted.
//!
//! # Invariants
//!
//! - Resolution is a pure function of the configuration snapshot and, for
//!   local paths and `FETCH_HEAD`, the filesystem. Only the access cache
//!   changes over a finder's lifetime.
//! - Explicit LFS URLs are never suffixed; clone URLs receive
//!   `.git/info/lfs` unless they already end in `/info/lfs` or name a remote
//!   helper, a local path, or a `file://` URL.
//! - Access-cache keys ignore credentials embedded in the URL.
//!
//! # Errors
//!
//! Resolution is infallible at the API surface: nothing configured yields an
//! empty endpoint and an undecomposable SSH address yields
//! [`UNKNOWN_URL`]. Filesystem failures while probing local paths are
//! reported through the `try_*` methods as [`ClassifyError`].
//! [`extract_remote_url`] reports malformed lines as [`FetchHeadError`].
//!
//! # Examples
//!
//! ```
//! use config::GitConfig;
//! use endpoint::{AccessMode, EndpointFinder, Operation};
//!
//! let finder = EndpointFinder::new(
//!     GitConfig::new()
//!         .with("remote.origin.url", "https://example.com/foo/bar")
//!         .with("lfs.https://example.com/foo/bar.git/info/lfs.access", "basic"),
//! );
//!
//! let endpoint = finder.endpoint(Operation::Download, "");
//! assert_eq!(endpoint.url(), "https://example.com/foo/bar.git/info/lfs");
//!
//! let access = finder.access_for(endpoint.url());
//! assert_eq!(access.mode(), &AccessMode::Basic);
//!
//! finder.set_access(access.upgrade(AccessMode::Negotiate));
//! assert_eq!(finder.access_for(endpoint.url()).mode(), &AccessMode::Negotiate);
//! ```
//!
//! # See also
//!
//! - `config` for the [`ConfigView`](config::ConfigView) seam and
//!   [`GitConfig`](config::GitConfig).
//! - `logging` for the `lfs::*` tracing targets emitted here.

mod access;
mod alias;
mod classify;
mod endpoint;
mod error;
mod fetch_head;
mod resolver;

pub use access::{Access, AccessCache, AccessMode, url_without_auth};
pub use alias::{AliasRule, AliasTable};
pub use classify::{
    Classification, Classifier, DEFAULT_GIT_PROTOCOL, TransportKind, with_lfs_suffix,
};
pub use endpoint::{Endpoint, Operation, ParseOperationError, SshMetadata, UNKNOWN_URL};
pub use error::{ClassifyError, FetchHeadError};
pub use fetch_head::{extract_remote_url, remote_url_from_fetch_head};
pub use resolver::{DEFAULT_REMOTE, EndpointFinder};
