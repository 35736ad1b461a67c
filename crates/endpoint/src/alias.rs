//! `insteadOf` / `pushInsteadOf` URL rewriting.
//!
//! A configuration entry `url.<base>.insteadof = <prefix>` declares that any
//! URL starting with `<prefix>` should have that prefix replaced by
//! `<base>`. The `pushinsteadof` variant applies to uploads only. At most one
//! substitution is performed per URL.

use std::borrow::Cow;

use config::{ConfigView, split_key};

use crate::endpoint::Operation;

/// One prefix substitution.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AliasRule {
    prefix: String,
    replacement: String,
    push_only: bool,
}

impl AliasRule {
    /// Creates a rule replacing `prefix` with `replacement`.
    #[must_use]
    pub fn new(prefix: impl Into<String>, replacement: impl Into<String>, push_only: bool) -> Self {
        Self {
            prefix: prefix.into(),
            replacement: replacement.into(),
            push_only,
        }
    }

    /// Returns the prefix matched against URLs.
    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Returns the text substituted for the prefix.
    #[must_use]
    pub fn replacement(&self) -> &str {
        &self.replacement
    }

    /// Returns `true` for `pushinsteadof` rules.
    #[must_use]
    pub const fn is_push_only(&self) -> bool {
        self.push_only
    }
}

/// Ordered set of alias rules.
///
/// # Examples
///
/// ```
/// use config::GitConfig;
/// use endpoint::{AliasTable, Operation};
///
/// let config = GitConfig::new()
///     .with("url.https://example.com/.insteadof", "ex:")
///     .with("url.ssh://example.com/.pushinsteadof", "ex:");
/// let aliases = AliasTable::from_config(&config);
///
/// assert_eq!(aliases.rewrite("ex:repo", Operation::Download), "https://example.com/repo");
/// assert_eq!(aliases.rewrite("ex:repo", Operation::Upload), "ssh://example.com/repo");
/// assert_eq!(aliases.rewrite("other:repo", Operation::Upload), "other:repo");
/// ```
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct AliasTable {
    rules: Vec<AliasRule>,
}

impl AliasTable {
    /// Creates an empty table.
    #[must_use]
    pub const fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// Reads every `url.<base>.insteadof` and `url.<base>.pushinsteadof`
    /// value from `config`, in configuration order.
    #[must_use]
    pub fn from_config<C: ConfigView + ?Sized>(config: &C) -> Self {
        let rules = config
            .entries()
            .filter_map(|(key, value)| {
                let (section, Some(base), name) = split_key(key)? else {
                    return None;
                };
                if section != "url" || value.is_empty() {
                    return None;
                }
                match name {
                    "insteadof" => Some(AliasRule::new(value, base, false)),
                    "pushinsteadof" => Some(AliasRule::new(value, base, true)),
                    _ => None,
                }
            })
            .collect::<Vec<_>>();
        logging::trace_alias!(rules = rules.len(), "loaded alias rules");
        Self { rules }
    }

    /// Appends a rule; later rules win ties against earlier ones.
    pub fn push(&mut self, rule: AliasRule) {
        self.rules.push(rule);
    }

    /// Returns the rules in configuration order.
    #[must_use]
    pub fn rules(&self) -> &[AliasRule] {
        &self.rules
    }

    /// Returns `true` when no rules are configured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Applies the best matching rule to `url`.
    ///
    /// Uploads consult the push-only rules first and fall back to the
    /// generic rules when none of them matches; downloads only see the
    /// generic rules. Within one set the longest prefix wins and, for equal
    /// prefixes, the rule configured last.
    #[must_use]
    pub fn rewrite<'a>(&self, url: &'a str, operation: Operation) -> Cow<'a, str> {
        let rule = operation
            .is_upload()
            .then(|| self.best_match(url, true))
            .flatten()
            .or_else(|| self.best_match(url, false));

        match rule {
            Some(rule) => {
                let rewritten = format!("{}{}", rule.replacement, &url[rule.prefix.len()..]);
                logging::trace_alias!(
                    push_only = rule.push_only,
                    "rewrote {url:?} to {rewritten:?}"
                );
                Cow::Owned(rewritten)
            }
            None => Cow::Borrowed(url),
        }
    }

    fn best_match(&self, url: &str, push_only: bool) -> Option<&AliasRule> {
        self.rules
            .iter()
            .filter(|rule| rule.push_only == push_only && url.starts_with(&rule.prefix))
            .fold(None, |best: Option<&AliasRule>, rule| match best {
                Some(current) if current.prefix.len() > rule.prefix.len() => Some(current),
                _ => Some(rule),
            })
    }
}

impl FromIterator<AliasRule> for AliasTable {
    fn from_iter<I: IntoIterator<Item = AliasRule>>(iter: I) -> Self {
        Self {
            rules: iter.into_iter().collect(),
        }
    }
}
