//! crates/logging/src/config.rs
//! Verbosity configuration and its translation into filter directives.

use super::levels::{Subsystem, SubsystemLevels, level_name};

/// Per-subsystem verbosity configuration.
#[derive(Clone, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VerbosityConfig {
    /// Subsystem levels.
    pub levels: SubsystemLevels,
}

impl VerbosityConfig {
    /// Create a configuration from the number of `-v` flags given.
    ///
    /// Every subsystem is set to `level`; levels above 3 behave like 3.
    #[must_use]
    pub fn from_verbose_level(level: u8) -> Self {
        let mut config = Self::default();
        config.levels.raise_all(level.min(3));
        config
    }

    /// Apply a single subsystem token such as `"alias"` or `"resolve3"`.
    ///
    /// A bare name selects debug output (level 2).
    pub fn apply_flag(&mut self, token: &str) -> Result<(), String> {
        let (name, level) = parse_flag_token(token)?;
        let subsystem =
            Subsystem::from_name(name).ok_or_else(|| format!("unknown subsystem: {name}"))?;
        self.levels.set(subsystem, level);
        Ok(())
    }

    /// Apply a comma-separated list of subsystem tokens.
    pub fn apply_flags(&mut self, list: &str) -> Result<(), String> {
        list.split(',')
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .try_for_each(|token| self.apply_flag(token))
    }

    /// Renders the configuration as `EnvFilter` directives.
    ///
    /// The global default is `warn`; each subsystem gets its own target
    /// directive.
    #[must_use]
    pub fn filter_directives(&self) -> String {
        let mut directives = String::from("warn");
        for subsystem in Subsystem::ALL {
            directives.push(',');
            directives.push_str(subsystem.target());
            directives.push('=');
            directives.push_str(level_name(self.levels.get(subsystem)));
        }
        directives
    }
}

/// Splits `name[N]` into its name and level (default 2).
fn parse_flag_token(token: &str) -> Result<(&str, u8), String> {
    if token.is_empty() {
        return Err("empty subsystem token".to_string());
    }

    match token.find(|c: char| c.is_ascii_digit()) {
        Some(0) => Err(format!("missing subsystem name in: {token}")),
        Some(pos) => {
            let level = token[pos..]
                .parse::<u8>()
                .map_err(|_| format!("invalid level in: {token}"))?;
            Ok((&token[..pos], level))
        }
        None => Ok((token, 2)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbose_level_zero_is_warn_everywhere() {
        let config = VerbosityConfig::from_verbose_level(0);
        assert_eq!(config, VerbosityConfig::default());
        assert!(config.filter_directives().contains("lfs::resolve=warn"));
    }

    #[test]
    fn verbose_levels_saturate() {
        let config = VerbosityConfig::from_verbose_level(10);
        assert_eq!(config.levels.classify, 3);
        assert_eq!(config.levels.fetch_head, 3);
    }

    #[test]
    fn filter_directives_list_every_target() {
        let directives = VerbosityConfig::from_verbose_level(1).filter_directives();

        assert_eq!(
            directives,
            "warn,lfs::resolve=info,lfs::alias=info,lfs::classify=info,\
             lfs::access=info,lfs::fetch_head=info,lfs::config=info"
        );
    }

    #[test]
    fn apply_flag_sets_one_subsystem() {
        let mut config = VerbosityConfig::default();
        config.apply_flag("alias").unwrap();
        config.apply_flag("access3").unwrap();

        assert_eq!(config.levels.alias, 2);
        assert_eq!(config.levels.access, 3);
        assert_eq!(config.levels.resolve, 0);
    }

    #[test]
    fn apply_flags_accepts_lists() {
        let mut config = VerbosityConfig::default();
        config.apply_flags("resolve1, classify ,").unwrap();

        assert_eq!(config.levels.resolve, 1);
        assert_eq!(config.levels.classify, 2);
    }

    #[test]
    fn apply_flag_rejects_bad_tokens() {
        let mut config = VerbosityConfig::default();

        assert!(config.apply_flag("").is_err());
        assert!(config.apply_flag("copy").is_err());
        assert!(config.apply_flag("3").is_err());
        assert!(config.apply_flag("alias999").is_err());
        assert!(config.apply_flag("alias2x").is_err());
    }
}
