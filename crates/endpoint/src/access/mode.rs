//! Access modes and per-URL access values.

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Authentication strength to attempt against a URL.
///
/// Variants are ordered by strength, with every custom mode ranking above
/// the built-in ones.
#[derive(Clone, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum AccessMode {
    /// Anonymous access.
    #[default]
    None,
    /// HTTP basic authentication.
    Basic,
    /// SPNEGO / Kerberos negotiation.
    Negotiate,
    /// NTLM negotiation.
    Ntlm,
    /// Any other mode, stored lowercased.
    Custom(String),
}

impl AccessMode {
    /// Normalises a configured or reported mode.
    ///
    /// Matching ignores case. `"private"` is an alias for [`Basic`](Self::Basic)
    /// and the empty string means [`None`](Self::None).
    ///
    /// # Examples
    ///
    /// ```
    /// use endpoint::AccessMode;
    ///
    /// assert_eq!(AccessMode::parse("PRIVATE"), AccessMode::Basic);
    /// assert_eq!(AccessMode::parse(""), AccessMode::None);
    /// assert_eq!(AccessMode::parse("InvalidAuth").as_str(), "invalidauth");
    /// ```
    #[must_use]
    pub fn parse(value: &str) -> Self {
        let value = value.to_ascii_lowercase();
        match value.as_str() {
            "" | "none" => Self::None,
            "basic" | "private" => Self::Basic,
            "negotiate" => Self::Negotiate,
            "ntlm" => Self::Ntlm,
            _ => Self::Custom(value),
        }
    }

    /// Returns the canonical token for the mode.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::None => "none",
            Self::Basic => "basic",
            Self::Negotiate => "negotiate",
            Self::Ntlm => "ntlm",
            Self::Custom(token) => token,
        }
    }

    /// Returns `true` for every mode that sends credentials.
    #[must_use]
    pub const fn is_private(&self) -> bool {
        !matches!(self, Self::None)
    }
}

impl fmt::Display for AccessMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AccessMode {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl From<&str> for AccessMode {
    fn from(value: &str) -> Self {
        Self::parse(value)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for AccessMode {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// The access mode in effect for one URL.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Access {
    mode: AccessMode,
    url: String,
}

impl Access {
    /// Pairs `mode` with `url`.
    #[must_use]
    pub fn new(mode: AccessMode, url: impl Into<String>) -> Self {
        Self {
            mode,
            url: url.into(),
        }
    }

    /// Returns the mode.
    #[must_use]
    pub const fn mode(&self) -> &AccessMode {
        &self.mode
    }

    /// Returns the URL the mode applies to.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Returns `true` when the mode sends credentials.
    #[must_use]
    pub const fn is_private(&self) -> bool {
        self.mode.is_private()
    }

    /// Returns a copy of this access with `mode` replacing the current one.
    ///
    /// No ordering is enforced; a "downgrade" is as valid as an upgrade.
    #[must_use]
    pub fn upgrade(&self, mode: AccessMode) -> Self {
        Self {
            mode,
            url: self.url.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_normalises_known_modes() {
        let cases = [
            ("", AccessMode::None, false),
            ("none", AccessMode::None, false),
            ("basic", AccessMode::Basic, true),
            ("BASIC", AccessMode::Basic, true),
            ("private", AccessMode::Basic, true),
            ("PRIVATE", AccessMode::Basic, true),
            ("Negotiate", AccessMode::Negotiate, true),
            ("NTLM", AccessMode::Ntlm, true),
            ("invalidauth", AccessMode::Custom("invalidauth".into()), true),
        ];

        for (value, mode, private) in cases {
            let parsed = AccessMode::parse(value);
            assert_eq!(parsed, mode, "{value:?}");
            assert_eq!(parsed.is_private(), private, "{value:?}");
        }
    }

    #[test]
    fn ordering_follows_strength() {
        assert!(AccessMode::None < AccessMode::Basic);
        assert!(AccessMode::Basic < AccessMode::Negotiate);
        assert!(AccessMode::Negotiate < AccessMode::Ntlm);
        assert!(AccessMode::Ntlm < AccessMode::Custom("aaa".into()));
    }

    #[test]
    fn display_uses_canonical_token() {
        assert_eq!(AccessMode::parse("private").to_string(), "basic");
        assert_eq!(AccessMode::None.to_string(), "none");
    }

    #[test]
    fn upgrade_keeps_url_and_allows_downgrade() {
        let access = Access::new(AccessMode::Negotiate, "https://example.com");
        let lowered = access.upgrade(AccessMode::None);

        assert_eq!(lowered.url(), "https://example.com");
        assert_eq!(lowered.mode(), &AccessMode::None);
        assert!(!lowered.is_private());
        assert!(access.is_private());
    }

    #[test]
    fn from_str_never_fails() {
        let mode: AccessMode = "Kerberos".parse().unwrap();
        assert_eq!(mode, AccessMode::Custom("kerberos".into()));
    }
}
