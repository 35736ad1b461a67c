//! Per-URL access-mode memory.

use std::borrow::Cow;
use std::collections::HashMap;
use std::sync::Mutex;

use config::{ConfigView, UrlConfig};

use super::mode::{Access, AccessMode};

/// Access modes keyed by credential-free URL.
///
/// Modes reported at runtime through [`set_access`](Self::set_access) always
/// win over configuration. Configuration values for `lfs.<url>.access` are
/// read on the first query for a URL and remembered for the lifetime of the
/// cache. Nothing is ever written back to configuration.
///
/// One mutex guards both maps, so a write for a URL is observed by every
/// later read of that URL.
#[derive(Debug, Default)]
pub struct AccessCache {
    state: Mutex<CacheState>,
}

#[derive(Debug, Default)]
struct CacheState {
    overrides: HashMap<String, AccessMode>,
    configured: HashMap<String, AccessMode>,
}

impl AccessCache {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the access mode for `url`.
    ///
    /// Without configuration every URL answers [`AccessMode::None`].
    pub fn access_for<C: ConfigView + ?Sized>(&self, config: Option<&C>, url: &str) -> Access {
        let key = url_without_auth(url).into_owned();
        let Some(config) = config else {
            return Access::new(AccessMode::None, key);
        };

        let mut state = self
            .state
            .lock()
            .unwrap_or_else(|poison| poison.into_inner());
        if let Some(mode) = state.overrides.get(&key) {
            return Access::new(mode.clone(), key);
        }
        let mode = state
            .configured
            .entry(key.clone())
            .or_insert_with(|| {
                let configured = UrlConfig::new(config)
                    .get("lfs", &key, "access")
                    .map_or(AccessMode::None, AccessMode::parse);
                logging::trace_access!(url = %key, mode = %configured, "read configured access mode");
                configured
            })
            .clone();
        Access::new(mode, key)
    }

    /// Records `access` as the mode for its URL, replacing any earlier
    /// runtime or configured value.
    pub fn set_access(&self, access: Access) {
        let key = url_without_auth(access.url()).into_owned();
        logging::trace_access!(url = %key, mode = %access.mode(), "setting access mode");

        let mut state = self
            .state
            .lock()
            .unwrap_or_else(|poison| poison.into_inner());
        state.overrides.insert(key, access.mode().clone());
    }
}

/// Removes `user[:password]@` from the authority of `url`.
///
/// The rest of the URL is left byte-for-byte as given.
///
/// # Examples
///
/// ```
/// use endpoint::url_without_auth;
///
/// assert_eq!(url_without_auth("https://u:p@example.com/a@b"), "https://example.com/a@b");
/// assert_eq!(url_without_auth("https://example.com/a"), "https://example.com/a");
/// ```
#[must_use]
pub fn url_without_auth(url: &str) -> Cow<'_, str> {
    let Some(scheme_end) = url.find("://") else {
        return Cow::Borrowed(url);
    };
    let authority_start = scheme_end + 3;
    let authority_end = url[authority_start..]
        .find(['/', '?', '#'])
        .map_or(url.len(), |offset| authority_start + offset);
    match url[authority_start..authority_end].rfind('@') {
        Some(at) => {
            let mut stripped = String::with_capacity(url.len());
            stripped.push_str(&url[..authority_start]);
            stripped.push_str(&url[authority_start + at + 1..]);
            Cow::Owned(stripped)
        }
        None => Cow::Borrowed(url),
    }
}
