//! Ordered pattern matchers for URL-like strings.
//!
//! Each matcher inspects the raw string and either claims it or passes. The
//! first claim wins, so the order of [`MATCHERS`] is the classifier's
//! priority order. Local filesystem paths are not handled here because
//! recognising them needs the filesystem; [`super::local`] runs between the
//! remote-helper matcher and the rest.

/// Transport recognised for a URL-like string.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) enum Form<'a> {
    /// `<token>::<address>`, handed to a git remote helper untouched.
    RemoteHelper,
    /// `file://` URL.
    File,
    /// `http://` or `https://` URL.
    Http,
    /// `git://` URL; carries everything after the scheme separator.
    Git { rest: &'a str },
    /// `ssh://`, `git+ssh://`, or `ssh+git://` URL.
    Ssh(SshTarget<'a>),
    /// Some other `<scheme>://` URL.
    OtherScheme,
    /// scp-like `[user@]host:path` or `[user@host:port]:path`.
    ScpLike(SshTarget<'a>),
    /// No scheme and no host separator.
    Opaque,
    /// Looks SSH-shaped but the authority cannot be decomposed.
    Malformed,
}

/// Components of an SSH address.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct SshTarget<'a> {
    pub(crate) user: Option<&'a str>,
    pub(crate) host: &'a str,
    pub(crate) port: Option<&'a str>,
    pub(crate) path: &'a str,
}

type Matcher = for<'a> fn(&'a str) -> Option<Form<'a>>;

/// Matchers in priority order; [`Form::Opaque`] is the fallback.
const MATCHERS: &[(&str, Matcher)] = &[
    ("remote-helper", match_remote_helper),
    ("scheme", match_scheme_url),
    ("scp-like", match_scp_like),
];

/// Classifies `raw` by running the matchers in order.
pub(crate) fn match_form(raw: &str) -> (&'static str, Form<'_>) {
    MATCHERS
        .iter()
        .find_map(|(name, matcher)| matcher(raw).map(|form| (*name, form)))
        .unwrap_or(("opaque", Form::Opaque))
}

/// Returns the length of a leading URL scheme token
/// (`ALPHA *( ALPHA / DIGIT / "+" / "-" / "." )`), if any.
fn scheme_token_len(raw: &str) -> Option<usize> {
    let bytes = raw.as_bytes();
    if !bytes.first()?.is_ascii_alphabetic() {
        return None;
    }
    let len = bytes
        .iter()
        .position(|&b| !(b.is_ascii_alphanumeric() || matches!(b, b'+' | b'-' | b'.')))
        .unwrap_or(bytes.len());
    Some(len)
}

/// Splits `scheme://rest`, returning the scheme and `rest`.
pub(crate) fn split_scheme(raw: &str) -> Option<(&str, &str)> {
    let len = scheme_token_len(raw)?;
    let rest = raw[len..].strip_prefix("://")?;
    Some((&raw[..len], rest))
}

pub(crate) fn is_remote_helper(raw: &str) -> bool {
    scheme_token_len(raw).is_some_and(|len| raw[len..].starts_with("::"))
}

fn match_remote_helper(raw: &str) -> Option<Form<'_>> {
    is_remote_helper(raw).then_some(Form::RemoteHelper)
}

fn match_scheme_url(raw: &str) -> Option<Form<'_>> {
    let (scheme, rest) = split_scheme(raw)?;
    let form = if scheme.eq_ignore_ascii_case("file") {
        Form::File
    } else if scheme.eq_ignore_ascii_case("http") || scheme.eq_ignore_ascii_case("https") {
        Form::Http
    } else if scheme.eq_ignore_ascii_case("git") {
        Form::Git { rest }
    } else if ["ssh", "git+ssh", "ssh+git"]
        .iter()
        .any(|ssh| scheme.eq_ignore_ascii_case(ssh))
    {
        parse_ssh_url(rest).map_or(Form::Malformed, Form::Ssh)
    } else {
        Form::OtherScheme
    };
    Some(form)
}

fn match_scp_like(raw: &str) -> Option<Form<'_>> {
    if !raw.contains(':') {
        return None;
    }
    Some(parse_scp_like(raw).map_or(Form::Malformed, Form::ScpLike))
}

/// Parses the part of an `ssh://` URL after the scheme separator:
/// `[user[:password]@]host[:port][/path]`.
fn parse_ssh_url(rest: &str) -> Option<SshTarget<'_>> {
    let (authority, path) = match rest.find('/') {
        Some(index) => rest.split_at(index),
        None => (rest, ""),
    };
    let (user, host_port) = match authority.rfind('@') {
        Some(index) => {
            let userinfo = &authority[..index];
            let user = userinfo.split_once(':').map_or(userinfo, |(user, _)| user);
            (Some(user).filter(|user| !user.is_empty()), &authority[index + 1..])
        }
        None => (None, authority),
    };
    let (host, port) = split_host_port(host_port)?;
    Some(SshTarget {
        user,
        host,
        port,
        path,
    })
}

/// Parses scp-like addresses.
///
/// Accepted spellings are `host:path`, `user@host:path`, the bracketed
/// `[user@host:port]:path`, and bracketed IPv6 literals such as
/// `[::1]:path` or `user@[::1]:path`. The path is everything after the
/// host separator, taken literally.
fn parse_scp_like(raw: &str) -> Option<SshTarget<'_>> {
    if let Some(bracketed) = raw.strip_prefix('[') {
        let close = bracketed.find(']')?;
        let path = bracketed[close + 1..].strip_prefix(':')?;
        let inside = &bracketed[..close];
        let (user, host_port) = split_user(inside);
        let (host, port) = split_bracketed_host_port(host_port)?;
        return Some(SshTarget {
            user,
            host,
            port,
            path,
        });
    }

    let colon = raw.find(':')?;
    let (user, rest) = match raw[..colon].rfind('@') {
        Some(at) => (Some(&raw[..at]), &raw[at + 1..]),
        None => (None, raw),
    };
    let user = user.filter(|user| !user.is_empty());

    if let Some(bracketed) = rest.strip_prefix('[') {
        let close = bracketed.find(']')?;
        let path = bracketed[close + 1..].strip_prefix(':')?;
        let (host, port) = split_bracketed_host_port(&bracketed[..close])?;
        return Some(SshTarget {
            user,
            host,
            port,
            path,
        });
    }

    let (host, path) = rest.split_once(':')?;
    if host.is_empty() {
        return None;
    }
    Some(SshTarget {
        user,
        host,
        port: None,
        path,
    })
}

fn split_user(input: &str) -> (Option<&str>, &str) {
    match input.rfind('@') {
        Some(at) => (Some(&input[..at]).filter(|user| !user.is_empty()), &input[at + 1..]),
        None => (None, input),
    }
}

/// Splits the contents of an scp-like bracket.
///
/// A single colon followed by digits separates a port; more than one colon
/// means the whole thing is an IPv6 literal.
fn split_bracketed_host_port(input: &str) -> Option<(&str, Option<&str>)> {
    if input.is_empty() {
        return None;
    }
    match input.matches(':').count() {
        0 => Some((input, None)),
        1 => {
            let (host, port) = input.split_once(':')?;
            (!host.is_empty() && is_port(port)).then_some((host, Some(port)))
        }
        _ => Some((input, None)),
    }
}

/// Splits `host[:port]` or `[ipv6][:port]` from a URL authority.
fn split_host_port(input: &str) -> Option<(&str, Option<&str>)> {
    if let Some(bracketed) = input.strip_prefix('[') {
        let close = bracketed.find(']')?;
        let host = &bracketed[..close];
        let after = &bracketed[close + 1..];
        if host.is_empty() {
            return None;
        }
        return match after.strip_prefix(':') {
            None if after.is_empty() => Some((host, None)),
            Some(port) if is_port(port) => Some((host, Some(port))),
            _ => None,
        };
    }

    match input.split_once(':') {
        None if !input.is_empty() => Some((input, None)),
        Some((host, port)) if !host.is_empty() && is_port(port) => Some((host, Some(port))),
        _ => None,
    }
}

fn is_port(candidate: &str) -> bool {
    !candidate.is_empty() && candidate.bytes().all(|b| b.is_ascii_digit())
}
