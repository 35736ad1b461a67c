//! Snapshotting configuration from the `git` executable.

use std::path::Path;
use std::process::Command;

use tracing::debug;

use crate::error::ConfigError;
use crate::store::GitConfig;

/// Program used when `GIT` is not set in the environment.
const DEFAULT_GIT_PROGRAM: &str = "git";

impl GitConfig {
    /// Captures the effective configuration of the repository at `dir` by
    /// running `git config --list -z`.
    ///
    /// The `GIT` environment variable overrides the program name. A
    /// repository with no configuration at all makes git exit with status 1
    /// and empty output; that case yields an empty configuration.
    pub fn load_from_git(dir: &Path) -> Result<Self, ConfigError> {
        let program = std::env::var_os("GIT").unwrap_or_else(|| DEFAULT_GIT_PROGRAM.into());
        let output = Command::new(&program)
            .arg("-C")
            .arg(dir)
            .args(["config", "--list", "-z"])
            .output()
            .map_err(ConfigError::GitSpawn)?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_owned();
            if output.status.code() == Some(1) && output.stdout.is_empty() && stderr.is_empty() {
                return Ok(Self::new());
            }
            return Err(ConfigError::GitStatus {
                status: output.status.to_string(),
                stderr,
            });
        }

        let config = Self::parse_list_z(&output.stdout)?;
        debug!(
            target: "lfs::config",
            dir = %dir.display(),
            entries = config.len(),
            "loaded git configuration"
        );
        Ok(config)
    }
}
