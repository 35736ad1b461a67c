#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `logging` holds the diagnostic plumbing shared by the endpoint workspace:
//! the list of [`Subsystem`]s that emit events, a per-subsystem
//! [`VerbosityConfig`], and (with the `tracing` feature) subscriber
//! initialisation plus one convenience macro per subsystem target.
//!
//! # Design
//!
//! Library crates only ever emit events through the `tracing` facade on the
//! `lfs::*` targets. The binary decides what is shown by translating the
//! number of `-v` flags and any `--debug` subsystem tokens into
//! [`VerbosityConfig`], which renders itself as `EnvFilter` directives.
//!
//! # Invariants
//!
//! - Every [`Subsystem`] maps to exactly one target of the form `lfs::<name>`.
//! - Levels above 3 behave like 3 (trace).
//!
//! # Examples
//!
//! ```
//! use logging::{Subsystem, VerbosityConfig};
//!
//! let mut config = VerbosityConfig::from_verbose_level(1);
//! config.apply_flag("alias3").unwrap();
//!
//! assert_eq!(config.levels.get(Subsystem::Alias), 3);
//! assert!(config.filter_directives().contains("lfs::alias=trace"));
//! ```

mod config;
mod levels;
#[cfg(feature = "tracing")]
mod tracing_bridge;
#[cfg(feature = "tracing")]
mod tracing_macros;

pub use config::VerbosityConfig;
pub use levels::{Subsystem, SubsystemLevels, level_name};
#[cfg(feature = "tracing")]
pub use tracing_bridge::{ENV_FILTER_VAR, build_filter, init_tracing};
