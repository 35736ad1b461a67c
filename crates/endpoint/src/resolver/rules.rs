//! The ordered precedence table for endpoint resolution.
//!
//! Each rule is a pure lookup over configuration (and, for the last rule,
//! the repository's `FETCH_HEAD`). The first rule producing a non-empty URL
//! wins.

use std::borrow::Cow;
use std::path::Path;

use config::ConfigView;

use crate::endpoint::Operation;
use crate::fetch_head::remote_url_from_fetch_head;

use super::DEFAULT_REMOTE;

/// How a winning URL is turned into an endpoint.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum UrlSource {
    /// Explicit LFS URL, used without the `/info/lfs` suffix.
    Override,
    /// Plain git remote URL, suffixed like a clone URL.
    Clone,
}

/// Everything a rule may consult.
pub(crate) struct RuleInput<'a> {
    pub(crate) config: &'a dyn ConfigView,
    pub(crate) operation: Operation,
    pub(crate) remote: &'a str,
    pub(crate) git_dir: Option<&'a Path>,
}

type Lookup = for<'a> fn(&RuleInput<'a>) -> Option<Cow<'a, str>>;

/// One row of the precedence table.
pub(crate) struct Rule {
    pub(crate) name: &'static str,
    pub(crate) source: UrlSource,
    lookup: Lookup,
}

impl Rule {
    /// Runs the lookup. A value that is present but empty counts as unset
    /// so the next row still gets a chance.
    pub(crate) fn apply<'a>(&self, input: &RuleInput<'a>) -> Option<Cow<'a, str>> {
        (self.lookup)(input).filter(|url| !url.is_empty())
    }
}

/// Rules that do not depend on the remote.
pub(crate) const GLOBAL_RULES: &[Rule] = &[
    Rule {
        name: "lfs.pushurl",
        source: UrlSource::Override,
        lookup: |input| upload_only(input, |input| get(input, "lfs.pushurl")),
    },
    Rule {
        name: "lfs.url",
        source: UrlSource::Override,
        lookup: |input| get(input, "lfs.url"),
    },
];

/// Rules scoped to one remote; a non-default remote that matches none of
/// them falls back to the default remote.
pub(crate) const REMOTE_RULES: &[Rule] = &[
    Rule {
        name: "remote.<name>.lfspushurl",
        source: UrlSource::Override,
        lookup: |input| upload_only(input, |input| remote_key(input, "lfspushurl")),
    },
    Rule {
        name: "remote.<name>.lfsurl",
        source: UrlSource::Override,
        lookup: |input| remote_key(input, "lfsurl"),
    },
    Rule {
        name: "remote.<name>.pushurl",
        source: UrlSource::Clone,
        lookup: |input| upload_only(input, |input| remote_key(input, "pushurl")),
    },
    Rule {
        name: "remote.<name>.url",
        source: UrlSource::Clone,
        lookup: |input| remote_key(input, "url"),
    },
    Rule {
        name: "remote name as URL",
        source: UrlSource::Clone,
        lookup: |input| is_remote_url(input.remote).then_some(Cow::Borrowed(input.remote)),
    },
    Rule {
        name: "FETCH_HEAD",
        source: UrlSource::Clone,
        lookup: fetch_head,
    },
];

fn get<'a>(input: &RuleInput<'a>, key: &str) -> Option<Cow<'a, str>> {
    input.config.get(key).map(Cow::Borrowed)
}

fn remote_key<'a>(input: &RuleInput<'a>, name: &str) -> Option<Cow<'a, str>> {
    get(input, &format!("remote.{}.{name}", input.remote))
}

fn upload_only<'a>(
    input: &RuleInput<'a>,
    lookup: impl FnOnce(&RuleInput<'a>) -> Option<Cow<'a, str>>,
) -> Option<Cow<'a, str>> {
    input.operation.is_upload().then(|| lookup(input)).flatten()
}

fn fetch_head<'a>(input: &RuleInput<'a>) -> Option<Cow<'a, str>> {
    if input.remote != DEFAULT_REMOTE {
        return None;
    }
    let git_dir = input.git_dir?;
    match remote_url_from_fetch_head(git_dir) {
        Ok(url) => Some(Cow::Owned(url)),
        Err(error) => {
            logging::trace_fetch_head!(%error, "ignoring FETCH_HEAD");
            None
        }
    }
}

/// Returns `true` when a remote name is itself a usable URL: a URL with an
/// `ssh`, `http`, `https`, `git`, or `file` scheme, or a scheme-less string
/// containing `:`.
pub(crate) fn is_remote_url(remote: &str) -> bool {
    match remote.split_once("://") {
        Some((scheme, _)) => ["ssh", "http", "https", "git", "file"]
            .iter()
            .any(|known| scheme.eq_ignore_ascii_case(known)),
        None => remote.contains(':'),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remote_url_detection() {
        assert!(is_remote_url("https://example.com/repo"));
        assert!(is_remote_url("SSH://example.com/repo"));
        assert!(is_remote_url("file:///srv/repo"));
        assert!(is_remote_url("git@example.com:repo"));
        assert!(!is_remote_url("origin"));
        assert!(!is_remote_url("keybase://team/repo"));
    }

    #[test]
    fn table_order_matches_precedence() {
        let names: Vec<_> = GLOBAL_RULES
            .iter()
            .chain(REMOTE_RULES)
            .map(|rule| rule.name)
            .collect();

        assert_eq!(
            names,
            [
                "lfs.pushurl",
                "lfs.url",
                "remote.<name>.lfspushurl",
                "remote.<name>.lfsurl",
                "remote.<name>.pushurl",
                "remote.<name>.url",
                "remote name as URL",
                "FETCH_HEAD",
            ]
        );
    }
}
