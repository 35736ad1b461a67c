//! crates/logging/src/levels.rs
//! Subsystem identifiers and their per-subsystem verbosity levels.

use std::fmt;

/// Diagnostic subsystems, one per tracing target.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Subsystem {
    /// Remote and operation precedence decisions.
    Resolve,
    /// insteadOf / pushInsteadOf rewriting.
    Alias,
    /// URL classification and normalisation.
    Classify,
    /// Access-mode lookups and upgrades.
    Access,
    /// FETCH_HEAD parsing.
    FetchHead,
    /// Configuration loading and URL-scoped lookups.
    Config,
}

impl Subsystem {
    /// Every subsystem, in display order.
    pub const ALL: [Self; 6] = [
        Self::Resolve,
        Self::Alias,
        Self::Classify,
        Self::Access,
        Self::FetchHead,
        Self::Config,
    ];

    /// Returns the tracing target events for this subsystem are emitted on.
    #[must_use]
    pub const fn target(self) -> &'static str {
        match self {
            Self::Resolve => "lfs::resolve",
            Self::Alias => "lfs::alias",
            Self::Classify => "lfs::classify",
            Self::Access => "lfs::access",
            Self::FetchHead => "lfs::fetch_head",
            Self::Config => "lfs::config",
        }
    }

    /// Returns the short name accepted on the command line.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Resolve => "resolve",
            Self::Alias => "alias",
            Self::Classify => "classify",
            Self::Access => "access",
            Self::FetchHead => "fetch_head",
            Self::Config => "config",
        }
    }

    /// Looks a subsystem up by its short name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|subsystem| subsystem.name() == name)
    }
}

impl fmt::Display for Subsystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Verbosity level for each subsystem.
///
/// `0` keeps only warnings and errors, `1` adds info, `2` debug, and `3` or
/// more trace.
#[derive(Clone, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SubsystemLevels {
    /// Resolver level.
    pub resolve: u8,
    /// Alias rewriter level.
    pub alias: u8,
    /// Classifier level.
    pub classify: u8,
    /// Access cache level.
    pub access: u8,
    /// FETCH_HEAD parser level.
    pub fetch_head: u8,
    /// Configuration level.
    pub config: u8,
}

impl SubsystemLevels {
    /// Set the level for a specific subsystem.
    pub fn set(&mut self, subsystem: Subsystem, level: u8) {
        *self.slot(subsystem) = level;
    }

    /// Get the level for a specific subsystem.
    #[must_use]
    pub const fn get(&self, subsystem: Subsystem) -> u8 {
        match subsystem {
            Subsystem::Resolve => self.resolve,
            Subsystem::Alias => self.alias,
            Subsystem::Classify => self.classify,
            Subsystem::Access => self.access,
            Subsystem::FetchHead => self.fetch_head,
            Subsystem::Config => self.config,
        }
    }

    /// Raise every subsystem to at least `level`.
    pub fn raise_all(&mut self, level: u8) {
        for subsystem in Subsystem::ALL {
            let slot = self.slot(subsystem);
            *slot = (*slot).max(level);
        }
    }

    fn slot(&mut self, subsystem: Subsystem) -> &mut u8 {
        match subsystem {
            Subsystem::Resolve => &mut self.resolve,
            Subsystem::Alias => &mut self.alias,
            Subsystem::Classify => &mut self.classify,
            Subsystem::Access => &mut self.access,
            Subsystem::FetchHead => &mut self.fetch_head,
            Subsystem::Config => &mut self.config,
        }
    }
}

/// Returns the `tracing` level name a numeric verbosity maps to.
#[must_use]
pub const fn level_name(level: u8) -> &'static str {
    match level {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}
