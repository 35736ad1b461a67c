//! URL-scoped configuration lookups (`<section>.<url>.<name>`).
//!
//! Git lets settings be scoped to a URL by using the URL as the subsection,
//! e.g. `lfs.https://example.com/team.access`. A query URL picks up a scoped
//! setting when the configured URL names the same scheme, host, and port and
//! its path is a prefix of the query path on a `/` boundary. The most
//! specific (longest path) match wins.

use tracing::trace;
use url::Url;

use crate::view::{ConfigView, split_key};

/// URL-aware lookup helper borrowing a [`ConfigView`].
///
/// # Examples
///
/// ```
/// use config::{GitConfig, UrlConfig};
///
/// let config = GitConfig::new()
///     .with("lfs.https://example.com.access", "basic")
///     .with("lfs.https://example.com/team.access", "negotiate");
/// let urls = UrlConfig::new(&config);
///
/// assert_eq!(urls.get("lfs", "https://example.com", "access"), Some("basic"));
/// assert_eq!(
///     urls.get("lfs", "https://example.com/team/repo.git/info/lfs", "access"),
///     Some("negotiate")
/// );
/// assert_eq!(urls.get("lfs", "http://example.com", "access"), None);
/// ```
#[derive(Clone, Copy, Debug)]
pub struct UrlConfig<'a, C: ?Sized> {
    config: &'a C,
}

impl<'a, C: ConfigView + ?Sized> UrlConfig<'a, C> {
    /// Wraps `config`.
    #[must_use]
    pub const fn new(config: &'a C) -> Self {
        Self { config }
    }

    /// Looks up `<section>.<raw_url>.<name>`, falling back to the closest
    /// URL-scoped match.
    pub fn get(&self, section: &str, raw_url: &str, name: &str) -> Option<&'a str> {
        let config: &'a C = self.config;
        if let Some(value) = config.get(&format!("{section}.{raw_url}.{name}")) {
            return Some(value);
        }

        let query = Url::parse(raw_url).ok()?;
        let section = section.to_ascii_lowercase();
        let name = name.to_ascii_lowercase();

        let mut best: Option<(usize, &'a str)> = None;
        for (key, value) in config.entries() {
            let Some((key_section, Some(scope), key_name)) = split_key(key) else {
                continue;
            };
            if key_section != section || key_name != name {
                continue;
            }
            let Some(specificity) = match_specificity(scope, &query) else {
                continue;
            };
            if best.is_none_or(|(current, _)| specificity >= current) {
                best = Some((specificity, value));
            }
        }

        if let Some((specificity, _)) = best {
            trace!(
                target: "lfs::config",
                url = raw_url,
                specificity,
                "matched URL-scoped {section}.*.{name}"
            );
        }
        best.map(|(_, value)| value)
    }
}

/// Returns how specific `scope` is for `query`, or `None` when it does not
/// apply.
fn match_specificity(scope: &str, query: &Url) -> Option<usize> {
    let scope = Url::parse(scope).ok()?;
    if scope.scheme() != query.scheme()
        || scope.host_str() != query.host_str()
        || scope.port_or_known_default() != query.port_or_known_default()
    {
        return None;
    }
    if !scope.username().is_empty() && scope.username() != query.username() {
        return None;
    }

    let prefix = scope.path().trim_end_matches('/');
    let path = query.path();
    let on_boundary = prefix.is_empty()
        || path == prefix
        || path
            .strip_prefix(prefix)
            .is_some_and(|rest| rest.starts_with('/'));
    on_boundary.then_some(prefix.len())
}
