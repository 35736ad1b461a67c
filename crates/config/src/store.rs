//! In-memory, ordered, multi-valued configuration store.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::error::ConfigError;
use crate::parse::{parse_list, parse_list_z};
use crate::view::{ConfigView, canonical_key};

/// Ordered key/value configuration with git's key folding rules.
///
/// Values are appended in the order they are inserted, so later layers
/// override earlier ones for [`ConfigView::get`] while
/// [`ConfigView::get_all`] still sees every value.
///
/// # Examples
///
/// ```
/// use config::{ConfigView, GitConfig};
///
/// let config = GitConfig::from_pairs([
///     ("remote.origin.url", "https://example.com/foo/bar"),
///     ("url.https://example.com/.insteadOf", "ex:"),
///     ("url.https://example.com/.insteadOf", "example:"),
/// ]);
///
/// assert_eq!(config.get("Remote.origin.URL"), Some("https://example.com/foo/bar"));
/// assert_eq!(
///     config.get_all("url.https://example.com/.insteadof"),
///     vec!["ex:", "example:"]
/// );
/// ```
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct GitConfig {
    entries: Vec<(String, String)>,
    index: HashMap<String, Vec<usize>>,
}

impl GitConfig {
    /// Creates an empty configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a configuration from `(key, value)` pairs, in order.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut config = Self::new();
        for (key, value) in pairs {
            config.insert(key.as_ref(), value);
        }
        config
    }

    /// Parses `git config --list` output.
    pub fn parse_list(text: &str) -> Result<Self, ConfigError> {
        Ok(Self::from_pairs(parse_list(text)?))
    }

    /// Parses `git config --list -z` output.
    pub fn parse_list_z(bytes: &[u8]) -> Result<Self, ConfigError> {
        Ok(Self::from_pairs(parse_list_z(bytes)?))
    }

    /// Reads a file holding `git config --list` output.
    pub fn from_list_file(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse_list(&text)
    }

    /// Appends a value for `key`.
    pub fn insert(&mut self, key: &str, value: impl Into<String>) {
        let key = canonical_key(key);
        let position = self.entries.len();
        self.index.entry(key.clone()).or_default().push(position);
        self.entries.push((key, value.into()));
    }

    /// Builder form of [`insert`](Self::insert).
    #[must_use]
    pub fn with(mut self, key: &str, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    /// Layers `other` on top of this configuration.
    pub fn extend(&mut self, other: Self) {
        for (key, value) in other.entries {
            self.insert(&key, value);
        }
    }

    /// Returns the number of stored values.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` when nothing has been configured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: AsRef<str>, V: Into<String>> FromIterator<(K, V)> for GitConfig {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self::from_pairs(iter)
    }
}

impl ConfigView for GitConfig {
    fn get(&self, key: &str) -> Option<&str> {
        let positions = self.index.get(&canonical_key(key))?;
        let last = *positions.last()?;
        Some(self.entries[last].1.as_str())
    }

    fn get_all(&self, key: &str) -> Vec<&str> {
        self.index
            .get(&canonical_key(key))
            .map(|positions| {
                positions
                    .iter()
                    .map(|&position| self.entries[position].1.as_str())
                    .collect()
            })
            .unwrap_or_default()
    }

    fn entries(&self) -> Box<dyn Iterator<Item = (&str, &str)> + '_> {
        Box::new(
            self.entries
                .iter()
                .map(|(key, value)| (key.as_str(), value.as_str())),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn later_values_win_for_get() {
        let config = GitConfig::new()
            .with("lfs.url", "https://first.example.com")
            .with("LFS.URL", "https://second.example.com");

        assert_eq!(config.get("lfs.url"), Some("https://second.example.com"));
        assert_eq!(config.get_all("lfs.url").len(), 2);
    }

    #[test]
    fn subsection_is_case_sensitive() {
        let config = GitConfig::new().with("remote.Origin.url", "https://example.com/a");

        assert_eq!(config.get("remote.origin.url"), None);
        assert_eq!(config.get("REMOTE.Origin.URL"), Some("https://example.com/a"));
    }

    #[test]
    fn missing_key_yields_nothing() {
        let config = GitConfig::new();

        assert_eq!(config.get("remote.origin.url"), None);
        assert!(config.get_all("remote.origin.url").is_empty());
        assert!(config.is_empty());
    }

    #[test]
    fn extend_layers_values_in_order() {
        let mut base = GitConfig::new().with("lfs.url", "https://base.example.com");
        base.extend(GitConfig::new().with("lfs.url", "https://layer.example.com"));

        assert_eq!(base.len(), 2);
        assert_eq!(base.get("lfs.url"), Some("https://layer.example.com"));
        assert_eq!(
            base.get_all("lfs.url"),
            vec!["https://base.example.com", "https://layer.example.com"]
        );
    }

    #[test]
    fn entries_preserve_insertion_order_and_fold_keys() {
        let config = GitConfig::from_pairs([("B.x.Y", "1"), ("a.Z", "2")]);
        let entries: Vec<_> = config.entries().collect();

        assert_eq!(entries, vec![("b.x.y", "1"), ("a.z", "2")]);
    }

    #[test]
    fn reads_list_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config.list");
        fs::write(&path, "remote.origin.url=https://example.com/r\n").expect("write");

        let config = GitConfig::from_list_file(&path).expect("parse");
        assert_eq!(config.get("remote.origin.url"), Some("https://example.com/r"));
    }

    #[test]
    fn missing_list_file_reports_path() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("absent.list");

        let error = GitConfig::from_list_file(&path).expect_err("missing file");
        assert!(error.to_string().contains("absent.list"));
    }
}
