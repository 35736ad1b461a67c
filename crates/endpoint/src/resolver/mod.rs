//! Endpoint resolution for remotes and raw URLs.
//!
//! [`EndpointFinder`] combines the configuration snapshot, the alias table,
//! and the classifier, and owns the access-mode cache for the lifetime of one
//! command invocation.

mod rules;

#[cfg(test)]
mod tests;

use std::borrow::Cow;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use config::ConfigView;

use crate::access::{Access, AccessCache};
use crate::alias::AliasTable;
use crate::classify::{Classifier, with_lfs_suffix};
use crate::endpoint::{Endpoint, Operation};
use crate::error::ClassifyError;
use rules::{GLOBAL_RULES, REMOTE_RULES, RuleInput, UrlSource};

/// Remote consulted when no remote is named.
pub const DEFAULT_REMOTE: &str = "origin";

type SharedConfig = Arc<dyn ConfigView + Send + Sync>;

/// Resolves transfer endpoints and tracks access modes.
///
/// Resolution is a pure function of the configuration captured at
/// construction time; only the access-mode cache changes afterwards.
/// The finder is `Send + Sync` and may be shared between transfer workers.
///
/// # Examples
///
/// ```
/// use config::GitConfig;
/// use endpoint::{EndpointFinder, Operation};
///
/// let finder = EndpointFinder::new(
///     GitConfig::new()
///         .with("remote.origin.url", "git@example.com:foo/bar.git")
///         .with("remote.origin.pushurl", "https://write.example.com/foo/bar"),
/// );
///
/// let download = finder.endpoint(Operation::Download, "");
/// assert_eq!(download.url(), "https://example.com/foo/bar.git/info/lfs");
/// assert_eq!(download.ssh_metadata().user_and_host(), "git@example.com");
///
/// let upload = finder.endpoint(Operation::Upload, "");
/// assert_eq!(upload.url(), "https://write.example.com/foo/bar.git/info/lfs");
/// assert!(upload.ssh_metadata().is_empty());
/// ```
pub struct EndpointFinder {
    config: Option<SharedConfig>,
    aliases: AliasTable,
    classifier: Classifier,
    git_dir: Option<PathBuf>,
    access: AccessCache,
}

impl fmt::Debug for EndpointFinder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EndpointFinder")
            .field("configured", &self.config.is_some())
            .field("aliases", &self.aliases)
            .field("classifier", &self.classifier)
            .field("git_dir", &self.git_dir)
            .field("access", &self.access)
            .finish()
    }
}

impl EndpointFinder {
    /// Creates a finder over `config`.
    ///
    /// Alias rules and `lfs.gitprotocol` are read once, here.
    #[must_use]
    pub fn new(config: impl ConfigView + Send + Sync + 'static) -> Self {
        Self::from_shared(Arc::new(config))
    }

    /// Creates a finder over an already shared configuration.
    #[must_use]
    pub fn from_shared(config: SharedConfig) -> Self {
        Self {
            aliases: AliasTable::from_config(&*config),
            classifier: Classifier::from_config(&*config),
            config: Some(config),
            git_dir: None,
            access: AccessCache::new(),
        }
    }

    /// Creates a finder with no configuration.
    ///
    /// Remote resolution yields empty endpoints and every URL has
    /// [`AccessMode::None`](crate::AccessMode::None); raw URLs are still
    /// classified.
    #[must_use]
    pub fn without_config() -> Self {
        Self {
            config: None,
            aliases: AliasTable::new(),
            classifier: Classifier::default(),
            git_dir: None,
            access: AccessCache::new(),
        }
    }

    /// Sets the repository directory whose `FETCH_HEAD` is consulted as a
    /// last resort for the default remote.
    #[must_use]
    pub fn with_git_dir(mut self, git_dir: impl Into<PathBuf>) -> Self {
        self.git_dir = Some(git_dir.into());
        self
    }

    /// Returns the configured repository directory.
    #[must_use]
    pub fn git_dir(&self) -> Option<&Path> {
        self.git_dir.as_deref()
    }

    /// Returns the scheme `git://` remotes are rewritten to.
    #[must_use]
    pub fn git_protocol(&self) -> &str {
        self.classifier.git_protocol()
    }

    /// Returns the alias rules read at construction.
    #[must_use]
    pub const fn aliases(&self) -> &AliasTable {
        &self.aliases
    }

    /// Resolves the endpoint for `operation` against `remote`.
    ///
    /// An empty `remote` means [`DEFAULT_REMOTE`]; a missing operation
    /// resolves like a download. The returned endpoint carries the requested
    /// operation. An empty URL means nothing is configured.
    ///
    /// Local-path probing failures are logged and yield an empty endpoint;
    /// use [`try_endpoint`](Self::try_endpoint) to observe them.
    #[must_use]
    pub fn endpoint(&self, operation: impl Into<Option<Operation>>, remote: &str) -> Endpoint {
        let operation = operation.into();
        self.try_endpoint(operation, remote)
            .unwrap_or_else(|error| with_operation(report_classify_error(error), operation))
    }

    /// Fallible form of [`endpoint`](Self::endpoint).
    pub fn try_endpoint(
        &self,
        operation: impl Into<Option<Operation>>,
        remote: &str,
    ) -> Result<Endpoint, ClassifyError> {
        let operation = operation.into();
        let Some(config) = self.config.as_deref() else {
            return Ok(with_operation(Endpoint::default(), operation));
        };
        let direction = operation.unwrap_or(Operation::Download);
        let remote = if remote.is_empty() { DEFAULT_REMOTE } else { remote };

        let global = RuleInput {
            config,
            operation: direction,
            remote,
            git_dir: self.git_dir.as_deref(),
        };
        if let Some(endpoint) = self.first_match(GLOBAL_RULES, &global)? {
            return Ok(with_operation(endpoint, operation));
        }

        if remote != DEFAULT_REMOTE {
            let endpoint = self.try_remote_endpoint(direction, remote)?;
            if !endpoint.is_empty() {
                return Ok(with_operation(endpoint, operation));
            }
            logging::trace_resolve!(remote, "nothing configured, falling back to {DEFAULT_REMOTE}");
        }
        let endpoint = self.try_remote_endpoint(direction, DEFAULT_REMOTE)?;
        Ok(with_operation(endpoint, operation))
    }

    /// Resolves `remote` alone, without the global `lfs.url` overrides or
    /// the fallback to the default remote.
    #[must_use]
    pub fn remote_endpoint(&self, operation: impl Into<Option<Operation>>, remote: &str) -> Endpoint {
        let direction = operation.into().unwrap_or(Operation::Download);
        self.try_remote_endpoint(direction, remote)
            .unwrap_or_else(report_classify_error)
    }

    fn try_remote_endpoint(
        &self,
        operation: Operation,
        remote: &str,
    ) -> Result<Endpoint, ClassifyError> {
        let Some(config) = self.config.as_deref() else {
            return Ok(Endpoint::default());
        };
        let remote = if remote.is_empty() { DEFAULT_REMOTE } else { remote };
        let input = RuleInput {
            config,
            operation,
            remote,
            git_dir: self.git_dir.as_deref(),
        };
        Ok(self.first_match(REMOTE_RULES, &input)?.unwrap_or_default())
    }

    fn first_match(
        &self,
        rules: &[rules::Rule],
        input: &RuleInput<'_>,
    ) -> Result<Option<Endpoint>, ClassifyError> {
        let Some((rule, url)) = rules
            .iter()
            .find_map(|rule| rule.apply(input).map(|url| (rule, url)))
        else {
            return Ok(None);
        };

        logging::trace_resolve!(
            rule = rule.name,
            remote = input.remote,
            operation = %input.operation,
            "selected {url:?}"
        );
        let endpoint = match rule.source {
            UrlSource::Override => self.override_endpoint(input.operation, &url)?,
            UrlSource::Clone => self.try_new_endpoint_from_clone_url(input.operation, &url)?,
        };
        Ok(Some(endpoint))
    }

    /// An explicit LFS URL: aliases and classification apply, the suffix
    /// does not, and a URL used byte-for-byte carries no original URL.
    fn override_endpoint(&self, operation: Operation, raw: &str) -> Result<Endpoint, ClassifyError> {
        let mut endpoint = self.try_new_endpoint(operation, raw)?;
        if endpoint.url() == raw {
            endpoint.clear_original_url();
        }
        Ok(endpoint)
    }

    /// Resolves a raw URL: alias rewriting and classification, no suffix.
    ///
    /// The operation only selects alias rules; it is not recorded on the
    /// result.
    #[must_use]
    pub fn new_endpoint(&self, operation: impl Into<Option<Operation>>, raw: &str) -> Endpoint {
        self.try_new_endpoint(operation, raw)
            .unwrap_or_else(report_classify_error)
    }

    /// Fallible form of [`new_endpoint`](Self::new_endpoint).
    pub fn try_new_endpoint(
        &self,
        operation: impl Into<Option<Operation>>,
        raw: &str,
    ) -> Result<Endpoint, ClassifyError> {
        let operation = operation.into().unwrap_or(Operation::Download);
        let rewritten = self.aliases.rewrite(raw, operation);
        Ok(self.classifier.classify(&rewritten)?.into_endpoint())
    }

    /// Resolves a clone URL, appending `.git/info/lfs` as needed.
    ///
    /// Remote helpers, local paths, `file://` URLs, and undecomposable SSH
    /// addresses are never suffixed.
    #[must_use]
    pub fn new_endpoint_from_clone_url(
        &self,
        operation: impl Into<Option<Operation>>,
        raw: &str,
    ) -> Endpoint {
        self.try_new_endpoint_from_clone_url(operation, raw)
            .unwrap_or_else(report_classify_error)
    }

    /// Fallible form of
    /// [`new_endpoint_from_clone_url`](Self::new_endpoint_from_clone_url).
    pub fn try_new_endpoint_from_clone_url(
        &self,
        operation: impl Into<Option<Operation>>,
        raw: &str,
    ) -> Result<Endpoint, ClassifyError> {
        let operation = operation.into().unwrap_or(Operation::Download);
        let rewritten = self.aliases.rewrite(raw, operation);
        let classification = self.classifier.classify(&rewritten)?;
        let kind = classification.kind();
        let mut endpoint = classification.into_endpoint();
        if kind.accepts_suffix() {
            let suffixed = with_lfs_suffix(endpoint.url());
            endpoint.set_url(suffixed);
        }
        Ok(endpoint)
    }

    /// Returns the plain git URL of `remote`: `remote.<name>.pushurl` when
    /// `for_push` is set and configured, then `remote.<name>.url`, then the
    /// remote name itself when it is a URL.
    #[must_use]
    pub fn git_remote_url(&self, remote: &str, for_push: bool) -> Option<String> {
        if let Some(config) = self.config.as_deref() {
            let mut keys = Vec::with_capacity(2);
            if for_push {
                keys.push(format!("remote.{remote}.pushurl"));
            }
            keys.push(format!("remote.{remote}.url"));
            if let Some(url) = keys
                .iter()
                .find_map(|key| config.get(key).filter(|url| !url.is_empty()))
            {
                return Some(url.to_owned());
            }
        }
        rules::is_remote_url(remote).then(|| remote.to_owned())
    }

    /// Applies the alias rules for `operation` to `url`.
    #[must_use]
    pub fn replace_url_alias<'a>(&self, operation: Operation, url: &'a str) -> Cow<'a, str> {
        self.aliases.rewrite(url, operation)
    }

    /// Returns the access mode currently in effect for `url`.
    #[must_use]
    pub fn access_for(&self, url: &str) -> Access {
        self.access.access_for(self.config.as_deref(), url)
    }

    /// Records the mode that worked (or failed) for a URL for the rest of
    /// this finder's lifetime.
    pub fn set_access(&self, access: Access) {
        self.access.set_access(access);
    }
}

fn with_operation(endpoint: Endpoint, operation: Option<Operation>) -> Endpoint {
    match operation {
        Some(operation) => endpoint.with_operation(operation),
        None => endpoint,
    }
}

fn report_classify_error(error: ClassifyError) -> Endpoint {
    tracing::warn!(target: "lfs::classify", %error, "treating endpoint as unconfigured");
    Endpoint::default()
}
