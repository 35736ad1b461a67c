//! Typed view of the parsed command line.

use std::ffi::OsString;
use std::path::PathBuf;

use clap::error::ErrorKind;
use endpoint::Operation;

use crate::command::{PROGRAM_NAME, clap_command};

/// Parsed command produced by [`parse_args`].
#[derive(Debug)]
pub(crate) struct ParsedArgs {
    pub(crate) verbosity: u8,
    pub(crate) debug: Vec<String>,
    pub(crate) config_files: Vec<PathBuf>,
    pub(crate) settings: Vec<String>,
    pub(crate) git_dir: Option<PathBuf>,
    pub(crate) from_git: bool,
    pub(crate) json: bool,
    pub(crate) action: Action,
}

/// The subcommand to run.
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum Action {
    /// `resolve`.
    Resolve { operation: Operation, remote: String },
    /// `parse`.
    Parse {
        operation: Operation,
        clone: bool,
        url: String,
    },
    /// `access`.
    Access { set: Option<String>, url: String },
    /// `fetch-head`.
    FetchHead { line: Option<String> },
}

/// Parses command-line arguments into a [`ParsedArgs`] structure.
pub(crate) fn parse_args<I, S>(arguments: I) -> Result<ParsedArgs, clap::Error>
where
    I: IntoIterator<Item = S>,
    S: Into<OsString>,
{
    let mut args: Vec<OsString> = arguments.into_iter().map(Into::into).collect();

    if args.is_empty() {
        args.push(OsString::from(PROGRAM_NAME));
    }

    let mut matches = clap_command().try_get_matches_from(args)?;

    let verbosity = matches.get_count("verbose");
    let from_git = matches.get_flag("from-git");
    let json = matches.get_flag("json");
    let debug = matches
        .remove_many::<String>("debug")
        .map(|values| values.collect())
        .unwrap_or_default();
    let config_files = matches
        .remove_many::<PathBuf>("config")
        .map(|values| values.collect())
        .unwrap_or_default();
    let settings = matches
        .remove_many::<String>("set")
        .map(|values| values.collect())
        .unwrap_or_default();
    let git_dir = matches.remove_one::<PathBuf>("git-dir");

    let Some((name, mut sub)) = matches.remove_subcommand() else {
        return Err(clap_command().error(ErrorKind::MissingSubcommand, "a command is required"));
    };
    let action = match name.as_str() {
        "resolve" => Action::Resolve {
            operation: take_operation(&mut sub),
            remote: sub.remove_one::<String>("remote").unwrap_or_default(),
        },
        "parse" => Action::Parse {
            operation: take_operation(&mut sub),
            clone: sub.get_flag("clone"),
            url: sub.remove_one::<String>("url").unwrap_or_default(),
        },
        "access" => Action::Access {
            set: sub.remove_one::<String>("mode"),
            url: sub.remove_one::<String>("url").unwrap_or_default(),
        },
        "fetch-head" => Action::FetchHead {
            line: sub.remove_one::<String>("line"),
        },
        other => {
            return Err(clap_command().error(
                ErrorKind::InvalidSubcommand,
                format!("unrecognized command '{other}'"),
            ));
        }
    };

    Ok(ParsedArgs {
        verbosity,
        debug,
        config_files,
        settings,
        git_dir,
        from_git,
        json,
        action,
    })
}

fn take_operation(matches: &mut clap::ArgMatches) -> Operation {
    matches
        .remove_one::<Operation>("operation")
        .unwrap_or(Operation::Download)
}
