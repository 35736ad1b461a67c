//! crates/logging/src/tracing_bridge.rs
//! Subscriber setup mapping [`VerbosityConfig`] onto `tracing` filters.
//!
//! Events are written to stderr by a compact `fmt` layer. Filtering is done
//! by an [`EnvFilter`] built from the configuration's per-target
//! directives, with any `RUST_LOG` directives appended so they override the
//! generated ones.
//!
//! # Usage
//!
//! ```rust,ignore
//! use logging::{VerbosityConfig, init_tracing};
//!
//! init_tracing(VerbosityConfig::from_verbose_level(2));
//! tracing::debug!(target: "lfs::resolve", "resolving origin");
//! ```

use super::config::VerbosityConfig;
use tracing_subscriber::EnvFilter;

/// Environment variable holding extra filter directives.
pub const ENV_FILTER_VAR: &str = "RUST_LOG";

/// Builds the filter for `config`, appending `extra` directives when given.
///
/// Invalid extra directives are ignored by `EnvFilter` itself.
#[must_use]
pub fn build_filter(config: &VerbosityConfig, extra: Option<&str>) -> EnvFilter {
    let mut directives = config.filter_directives();
    if let Some(extra) = extra.map(str::trim).filter(|extra| !extra.is_empty()) {
        directives.push(',');
        directives.push_str(extra);
    }
    EnvFilter::new(directives)
}

/// Initialize tracing for the process.
///
/// Installs a stderr `fmt` layer filtered by [`build_filter`] with the
/// contents of `RUST_LOG`. A subscriber that is already installed is left
/// in place.
pub fn init_tracing(config: VerbosityConfig) {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    let extra = std::env::var(ENV_FILTER_VAR).ok();
    let filter = build_filter(&config, extra.as_deref());
    let layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .without_time();

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(layer)
        .try_init();
}
