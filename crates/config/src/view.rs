//! The read-only accessor consumed by endpoint resolution.

use std::sync::Arc;

/// Read-only view over layered key/value configuration.
///
/// Keys use git's dotted `section.subsection.name` form. Implementations
/// must treat the section and the variable name case-insensitively and the
/// subsection case-sensitively; [`canonical_key`] performs that folding.
/// Alias keys such as `url.<base>.insteadof` may carry several values, so
/// [`get`](Self::get) answers with the last value and
/// [`get_all`](Self::get_all) with every value in the order it was
/// configured.
pub trait ConfigView {
    /// Returns the last value configured for `key`.
    fn get(&self, key: &str) -> Option<&str>;

    /// Returns every value configured for `key`, oldest first.
    fn get_all(&self, key: &str) -> Vec<&str>;

    /// Iterates over all `(key, value)` pairs in configuration order.
    ///
    /// Keys are yielded in canonical form.
    fn entries(&self) -> Box<dyn Iterator<Item = (&str, &str)> + '_>;
}

impl<T: ConfigView + ?Sized> ConfigView for &T {
    fn get(&self, key: &str) -> Option<&str> {
        (**self).get(key)
    }

    fn get_all(&self, key: &str) -> Vec<&str> {
        (**self).get_all(key)
    }

    fn entries(&self) -> Box<dyn Iterator<Item = (&str, &str)> + '_> {
        (**self).entries()
    }
}

impl<T: ConfigView + ?Sized> ConfigView for Arc<T> {
    fn get(&self, key: &str) -> Option<&str> {
        (**self).get(key)
    }

    fn get_all(&self, key: &str) -> Vec<&str> {
        (**self).get_all(key)
    }

    fn entries(&self) -> Box<dyn Iterator<Item = (&str, &str)> + '_> {
        (**self).entries()
    }
}

/// Folds `key` into git's canonical spelling.
///
/// The section (before the first dot) and the variable name (after the last
/// dot) are lowercased; anything between is a subsection and keeps its case.
///
/// ```
/// use config::canonical_key;
///
/// assert_eq!(canonical_key("Remote.Origin.URL"), "remote.Origin.url");
/// assert_eq!(canonical_key("LFS.URL"), "lfs.url");
/// assert_eq!(
///     canonical_key("url.https://Example.com/.insteadOf"),
///     "url.https://Example.com/.insteadof"
/// );
/// ```
#[must_use]
pub fn canonical_key(key: &str) -> String {
    let Some(first_dot) = key.find('.') else {
        return key.to_ascii_lowercase();
    };
    // rfind cannot fail once find succeeded
    let last_dot = key.rfind('.').unwrap_or(first_dot);

    let mut canonical = String::with_capacity(key.len());
    canonical.push_str(&key[..first_dot].to_ascii_lowercase());
    if last_dot > first_dot {
        canonical.push_str(&key[first_dot..last_dot]);
    }
    canonical.push_str(&key[last_dot..].to_ascii_lowercase());
    canonical
}

/// Splits a canonical key into `(section, subsection, name)`.
///
/// Returns `None` for keys without a section separator. Two-level keys have
/// no subsection.
#[must_use]
pub fn split_key(key: &str) -> Option<(&str, Option<&str>, &str)> {
    let first_dot = key.find('.')?;
    let last_dot = key.rfind('.')?;
    let section = &key[..first_dot];
    let name = &key[last_dot + 1..];
    let subsection = (last_dot > first_dot).then(|| &key[first_dot + 1..last_dot]);
    Some((section, subsection, name))
}
