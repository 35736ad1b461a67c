//! The `clap` command definition.

use std::path::PathBuf;

use clap::{Arg, ArgAction, Command, value_parser};
use endpoint::Operation;

/// Program name used in usage output and diagnostics.
pub(crate) const PROGRAM_NAME: &str = "lfs-endpoint";

/// Builds the `clap` command used for parsing.
pub(crate) fn clap_command() -> Command {
    Command::new(PROGRAM_NAME)
        .version(env!("CARGO_PKG_VERSION"))
        .about("Resolve large-file transfer endpoints from git configuration.")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Increase diagnostic output; repeat for more detail.")
                .action(ArgAction::Count)
                .global(true),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("FILE")
                .help("Read configuration in `git config --list` format from FILE.")
                .value_parser(value_parser!(PathBuf))
                .action(ArgAction::Append)
                .global(true),
        )
        .arg(
            Arg::new("set")
                .short('c')
                .value_name("KEY=VALUE")
                .help("Set a configuration value; a bare KEY means true.")
                .action(ArgAction::Append)
                .global(true),
        )
        .arg(
            Arg::new("git-dir")
                .long("git-dir")
                .value_name("DIR")
                .help("Repository directory for --from-git and FETCH_HEAD lookups.")
                .value_parser(value_parser!(PathBuf))
                .global(true),
        )
        .arg(
            Arg::new("from-git")
                .long("from-git")
                .help("Load the effective configuration by running `git config --list -z`.")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .help("Render results as JSON.")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .arg(
            Arg::new("debug")
                .long("debug")
                .value_name("SUBSYSTEM[N],...")
                .help("Raise logging for individual subsystems (resolve, alias, classify, access, fetch_head, config).")
                .action(ArgAction::Append)
                .global(true),
        )
        .subcommand(
            Command::new("resolve")
                .about("Resolve the endpoint for a remote.")
                .arg(operation_arg())
                .arg(
                    Arg::new("remote")
                        .long("remote")
                        .value_name("NAME")
                        .help("Remote to resolve; defaults to origin."),
                ),
        )
        .subcommand(
            Command::new("parse")
                .about("Classify a raw URL.")
                .arg(operation_arg())
                .arg(
                    Arg::new("clone")
                        .long("clone")
                        .help("Treat URL as a git clone URL and append the transfer suffix.")
                        .action(ArgAction::SetTrue),
                )
                .arg(Arg::new("url").value_name("URL").required(true)),
        )
        .subcommand(
            Command::new("access")
                .about("Show the access mode for a URL.")
                .arg(
                    Arg::new("mode")
                        .long("set")
                        .value_name("MODE")
                        .help("Record MODE for URL before reporting it."),
                )
                .arg(Arg::new("url").value_name("URL").required(true)),
        )
        .subcommand(
            Command::new("fetch-head")
                .about("Extract the remote URL from a FETCH_HEAD line.")
                .long_about(
                    "Extract the remote URL from a FETCH_HEAD line. Without LINE, the first \
                     line of FETCH_HEAD in --git-dir is used.",
                )
                .arg(Arg::new("line").value_name("LINE")),
        )
}

fn operation_arg() -> Arg {
    Arg::new("operation")
        .long("operation")
        .value_name("OP")
        .help("Transfer direction: download or upload.")
        .value_parser(parse_operation)
        .default_value("download")
}

fn parse_operation(value: &str) -> Result<Operation, endpoint::ParseOperationError> {
    value.parse()
}
