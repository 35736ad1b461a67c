#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `cli` implements the `lfs-endpoint` command-line front-end. It assembles a
//! configuration snapshot from the repository, list files, and `-c` pairs,
//! then asks [`endpoint::EndpointFinder`] where transfers for a remote go,
//! how a raw URL classifies, or which access mode applies to a URL. It can
//! also pull the remote URL out of a `FETCH_HEAD` line.
//!
//! # Design
//!
//! The crate exposes [`run`] as the primary entry point. The function accepts
//! an iterator of arguments together with handles for standard output and
//! error, so tests drive it exactly like the binary does. A
//! [`clap`](https://docs.rs/clap/) command definition performs the parse;
//! the typed result is executed against a freshly built finder and rendered
//! either as `key=value` lines or, with `--json`, as JSON.
//!
//! # Invariants
//!
//! - `run` never panics; failures surface as non-zero exit codes with one
//!   diagnostic line on standard error.
//! - Results go to standard output only; diagnostics never do.
//!
//! # Errors
//!
//! | Exit code | Meaning |
//! |-----------|---------|
//! | `0` | success |
//! | `1` | usage or argument error |
//! | `2` | configuration could not be loaded |
//! | `3` | no endpoint configured, or the input could not be interpreted |
//!
//! # Examples
//!
//! ```
//! use cli::run;
//!
//! let mut stdout = Vec::new();
//! let mut stderr = Vec::new();
//! let exit_code = run(
//!     [
//!         "lfs-endpoint",
//!         "-c",
//!         "remote.origin.url=https://example.com/foo/bar",
//!         "resolve",
//!     ],
//!     &mut stdout,
//!     &mut stderr,
//! );
//!
//! assert_eq!(exit_code, 0);
//! assert!(String::from_utf8(stdout).unwrap().starts_with(
//!     "url=https://example.com/foo/bar.git/info/lfs\n"
//! ));
//! assert!(stderr.is_empty());
//! ```
//!
//! # See also
//!
//! - `src/bin/lfs-endpoint.rs` for the binary that wires [`run`] into `main`.

mod args;
mod command;
mod execute;
mod layers;
mod render;

#[cfg(test)]
mod tests;

use std::ffi::OsString;
use std::io::{self, Write};

use clap::error::ErrorKind;

use crate::args::parse_args;
use crate::command::PROGRAM_NAME;

/// Maximum exit code representable by a Unix process.
const MAX_EXIT_CODE: i32 = u8::MAX as i32;

/// Successful run.
pub const EXIT_OK: i32 = 0;
/// Invalid command line.
pub const EXIT_USAGE: i32 = 1;
/// Configuration could not be loaded.
pub const EXIT_CONFIG: i32 = 2;
/// Nothing configured, or the input could not be interpreted.
pub const EXIT_NO_ENDPOINT: i32 = 3;

/// A failed run: the exit code and the diagnostic to print.
#[derive(Debug)]
pub(crate) struct Failure {
    status: i32,
    message: String,
}

impl Failure {
    pub(crate) fn new(status: i32, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub(crate) fn io(error: io::Error) -> Self {
        Self::new(EXIT_USAGE, format!("failed to write output: {error}"))
    }
}

/// Runs the CLI using the provided argument iterator and output handles.
///
/// The function returns the process exit code that should be used by the
/// caller.
#[allow(clippy::module_name_repetitions)]
pub fn run<I, S, Out, Err>(arguments: I, stdout: &mut Out, stderr: &mut Err) -> i32
where
    I: IntoIterator<Item = S>,
    S: Into<OsString>,
    Out: Write,
    Err: Write,
{
    let parsed = match parse_args(arguments) {
        Ok(parsed) => parsed,
        Err(error) => return report_clap_error(&error, stdout, stderr),
    };

    match execute::execute(parsed, stdout) {
        Ok(status) => status,
        Err(failure) => {
            let _ = writeln!(stderr, "{PROGRAM_NAME}: error: {}", failure.message);
            failure.status
        }
    }
}

fn report_clap_error<Out: Write, Err: Write>(
    error: &clap::Error,
    stdout: &mut Out,
    stderr: &mut Err,
) -> i32 {
    let rendered = error.render().to_string();
    match error.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
            if stdout.write_all(rendered.as_bytes()).is_err() {
                return EXIT_USAGE;
            }
            EXIT_OK
        }
        _ => {
            let _ = stderr.write_all(rendered.as_bytes());
            EXIT_USAGE
        }
    }
}

/// Converts a numeric exit code into an [`std::process::ExitCode`].
#[must_use]
pub fn exit_code_from(status: i32) -> std::process::ExitCode {
    let clamped = status.clamp(0, MAX_EXIT_CODE);
    std::process::ExitCode::from(u8::try_from(clamped).unwrap_or(u8::MAX))
}
