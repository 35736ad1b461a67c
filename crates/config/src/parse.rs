//! Parsers for `git config --list` output.
//!
//! Two encodings are supported. The plain form prints one `key=value` record
//! per line and cannot represent values containing newlines. The `-z` form
//! terminates each record with NUL and separates key from value with a
//! newline, so any value round-trips. In both forms a key printed without a
//! separator is a valueless boolean, which git interprets as `true`.

use crate::error::ConfigError;

const IMPLICIT_TRUE: &str = "true";

/// Parses `git config --list` output into ordered `(key, value)` pairs.
///
/// Blank lines are skipped.
pub fn parse_list(text: &str) -> Result<Vec<(String, String)>, ConfigError> {
    let mut pairs = Vec::new();
    for (index, line) in text.lines().enumerate() {
        let line = line.strip_suffix('\r').unwrap_or(line);
        if line.is_empty() {
            continue;
        }
        let (key, value) = match line.split_once('=') {
            Some((key, value)) => (key, value),
            None => (line, IMPLICIT_TRUE),
        };
        pairs.push((validate_key(key, index + 1)?, value.to_owned()));
    }
    Ok(pairs)
}

/// Parses `git config --list -z` output into ordered `(key, value)` pairs.
pub fn parse_list_z(bytes: &[u8]) -> Result<Vec<(String, String)>, ConfigError> {
    let mut pairs = Vec::new();
    for (index, record) in bytes.split(|&byte| byte == 0).enumerate() {
        if record.is_empty() {
            continue;
        }
        let record_number = index + 1;
        let text = std::str::from_utf8(record)
            .map_err(|_| ConfigError::parse(record_number, "record is not valid UTF-8"))?;
        let (key, value) = match text.split_once('\n') {
            Some((key, value)) => (key, value),
            None => (text, IMPLICIT_TRUE),
        };
        pairs.push((validate_key(key, record_number)?, value.to_owned()));
    }
    Ok(pairs)
}

fn validate_key(key: &str, record: usize) -> Result<String, ConfigError> {
    if key.is_empty() {
        return Err(ConfigError::parse(record, "empty key"));
    }
    match key.find('.') {
        None => Err(ConfigError::parse(record, "key has no section")),
        Some(0) => Err(ConfigError::parse(record, "key has an empty section")),
        Some(_) if key.ends_with('.') => {
            Err(ConfigError::parse(record, "key has an empty variable name"))
        }
        Some(_) => Ok(key.to_owned()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_listing() {
        let text = "remote.origin.url=git@example.com:foo/bar.git\n\
                    url.https://example.com/.insteadof=ex:\n\
                    core.bare\n";
        let pairs = parse_list(text).expect("parse");

        assert_eq!(
            pairs,
            vec![
                (
                    "remote.origin.url".to_owned(),
                    "git@example.com:foo/bar.git".to_owned()
                ),
                ("url.https://example.com/.insteadof".to_owned(), "ex:".to_owned()),
                ("core.bare".to_owned(), "true".to_owned()),
            ]
        );
    }

    #[test]
    fn value_may_contain_equals_sign() {
        let pairs = parse_list("lfs.url=https://example.com/?a=b\n").expect("parse");
        assert_eq!(pairs[0].1, "https://example.com/?a=b");
    }

    #[test]
    fn plain_listing_tolerates_crlf_and_blank_lines() {
        let pairs = parse_list("lfs.url=https://example.com\r\n\r\n").expect("parse");
        assert_eq!(pairs.len(), 1);
        assert_eq!(pairs[0].1, "https://example.com");
    }

    #[test]
    fn parses_nul_terminated_listing() {
        let bytes = b"remote.origin.url\nhttps://example.com/a\0core.bare\0lfs.note\nline one\nline two\0";
        let pairs = parse_list_z(bytes).expect("parse");

        assert_eq!(pairs.len(), 3);
        assert_eq!(pairs[0].1, "https://example.com/a");
        assert_eq!(pairs[1], ("core.bare".to_owned(), "true".to_owned()));
        assert_eq!(pairs[2].1, "line one\nline two");
    }

    #[test]
    fn rejects_key_without_section() {
        let error = parse_list("lfs.url=a\nbare=value\n").expect_err("invalid key");
        assert_eq!(error.record(), Some(2));
        assert!(error.to_string().contains("no section"));
    }

    #[test]
    fn rejects_empty_key() {
        let error = parse_list("=value\n").expect_err("empty key");
        assert_eq!(error.record(), Some(1));
    }

    #[test]
    fn rejects_invalid_utf8_record() {
        let error = parse_list_z(b"lfs.url\n\xff\xfe\0").expect_err("invalid utf-8");
        assert_eq!(error.record(), Some(1));
    }

    proptest::proptest! {
        #[test]
        fn plain_listing_round_trips_simple_pairs(
            sub in "[a-z0-9:/._-]{1,20}",
            value in "[^\n\r]{0,40}",
        ) {
            let key = format!("lfs.{sub}.access");
            let text = format!("{key}={value}\n");
            let pairs = parse_list(&text).expect("parse");
            proptest::prop_assert_eq!(pairs, vec![(key, value)]);
        }
    }
}
