//! Assembles the configuration snapshot from command-line layers.
//!
//! Layers apply in order: the repository's effective configuration
//! (`--from-git`), each `--config` file, then each `-c KEY=VALUE`. Later
//! layers append values, so single-valued lookups see the last one.

use std::path::{Path, PathBuf};

use config::{ConfigError, GitConfig};

/// Sources named on the command line.
#[derive(Debug)]
pub(crate) struct ConfigLayers<'a> {
    pub(crate) from_git: bool,
    pub(crate) git_dir: Option<&'a Path>,
    pub(crate) files: &'a [PathBuf],
    pub(crate) settings: &'a [String],
}

impl ConfigLayers<'_> {
    /// Loads every layer into one [`GitConfig`].
    pub(crate) fn load(&self) -> Result<GitConfig, ConfigError> {
        let mut config = GitConfig::new();

        if self.from_git {
            let dir = self.git_dir.unwrap_or_else(|| Path::new("."));
            config.extend(GitConfig::load_from_git(dir)?);
        }
        for file in self.files {
            config.extend(GitConfig::from_list_file(file)?);
        }
        for setting in self.settings {
            config.extend(parse_setting(setting)?);
        }

        tracing::debug!(
            target: "lfs::config",
            entries = config.len(),
            files = self.files.len(),
            settings = self.settings.len(),
            "assembled configuration"
        );
        Ok(config)
    }
}

/// Parses one `-c` argument with the same rules as a `git config --list`
/// record, so `KEY` alone means `KEY=true`.
fn parse_setting(setting: &str) -> Result<GitConfig, ConfigError> {
    if setting.contains(['\n', '\r']) {
        return Err(ConfigError::Parse {
            record: 1,
            reason: "setting spans several lines",
        });
    }
    GitConfig::parse_list(setting)
}
