#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `config` provides the read-only configuration view that endpoint
//! resolution is computed from. Resolution never mutates configuration; it
//! only asks for keys such as `remote.<name>.url`, `lfs.url`,
//! `lfs.<url>.access`, and the multi-valued `url.<base>.insteadof` aliases.
//!
//! # Design
//!
//! - [`ConfigView`] is the seam: any layered store that can answer `get`,
//!   `get_all`, and `entries` can drive resolution.
//! - [`GitConfig`] is the in-memory implementation. It is populated from
//!   `(key, value)` pairs, from `git config --list` output
//!   ([`GitConfig::parse_list`], [`GitConfig::parse_list_z`]), or by running
//!   git itself ([`GitConfig::load_from_git`]).
//! - [`UrlConfig`] layers git's URL-scoped lookups over any view.
//!
//! # Invariants
//!
//! - Keys are folded with [`canonical_key`]: section and variable name are
//!   case-insensitive, the subsection is case-sensitive.
//! - Values keep configuration order; the last value wins for single-valued
//!   reads.
//!
//! # Errors
//!
//! Lookups are infallible. Loading reports [`ConfigError`] for malformed
//! records, unreadable files, and failed `git` invocations.
//!
//! # Examples
//!
//! ```
//! use config::{ConfigView, GitConfig};
//!
//! let config = GitConfig::parse_list(
//!     "remote.origin.url=git@example.com:foo/bar.git\nlfs.gitprotocol=http\n",
//! )
//! .expect("valid listing");
//!
//! assert_eq!(config.get("remote.origin.url"), Some("git@example.com:foo/bar.git"));
//! assert_eq!(config.get("lfs.gitProtocol"), Some("http"));
//! ```

mod error;
mod git;
mod parse;
mod store;
mod url_config;
mod view;

pub use error::ConfigError;
pub use parse::{parse_list, parse_list_z};
pub use store::GitConfig;
pub use url_config::UrlConfig;
pub use view::{ConfigView, canonical_key, split_key};
