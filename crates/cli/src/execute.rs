//! Runs a parsed command against the assembled configuration.

use std::io::Write;

use endpoint::{AccessMode, EndpointFinder, Operation, extract_remote_url, remote_url_from_fetch_head};
use logging::VerbosityConfig;

use crate::args::{Action, ParsedArgs};
use crate::layers::ConfigLayers;
use crate::render::{self, Format};
use crate::{EXIT_CONFIG, EXIT_NO_ENDPOINT, EXIT_OK, EXIT_USAGE, Failure};

pub(crate) fn execute<Out: Write>(parsed: ParsedArgs, stdout: &mut Out) -> Result<i32, Failure> {
    let ParsedArgs {
        verbosity,
        debug,
        config_files,
        settings,
        git_dir,
        from_git,
        json,
        action,
    } = parsed;

    let mut verbosity_config = VerbosityConfig::from_verbose_level(verbosity);
    for list in &debug {
        verbosity_config
            .apply_flags(list)
            .map_err(|message| Failure::new(EXIT_USAGE, format!("--debug: {message}")))?;
    }
    logging::init_tracing(verbosity_config);

    let format = output_format(json)?;

    // FETCH_HEAD lines need no configuration.
    if let Action::FetchHead { line: Some(line) } = &action {
        let url = extract_remote_url(line)
            .map_err(|error| Failure::new(EXIT_NO_ENDPOINT, error.to_string()))?;
        render::write_remote_url(stdout, format, url).map_err(Failure::io)?;
        return Ok(EXIT_OK);
    }

    let config = ConfigLayers {
        from_git,
        git_dir: git_dir.as_deref(),
        files: &config_files,
        settings: &settings,
    }
    .load()
    .map_err(|error| Failure::new(EXIT_CONFIG, error.to_string()))?;

    let mut finder = EndpointFinder::new(config);
    if let Some(dir) = git_dir {
        finder = finder.with_git_dir(dir);
    }

    match action {
        Action::Resolve { operation, remote } => resolve(&finder, operation, &remote, format, stdout),
        Action::Parse {
            operation,
            clone,
            url,
        } => parse(&finder, operation, clone, &url, format, stdout),
        Action::Access { set, url } => access(&finder, set.as_deref(), &url, format, stdout),
        Action::FetchHead { line: _ } => {
            let dir = finder.git_dir().ok_or_else(|| {
                Failure::new(EXIT_USAGE, "fetch-head needs a LINE or --git-dir")
            })?;
            let url = remote_url_from_fetch_head(dir)
                .map_err(|error| Failure::new(EXIT_NO_ENDPOINT, error.to_string()))?;
            render::write_remote_url(stdout, format, &url).map_err(Failure::io)?;
            Ok(EXIT_OK)
        }
    }
}

fn output_format(json: bool) -> Result<Format, Failure> {
    if !json {
        return Ok(Format::Text);
    }
    #[cfg(feature = "serde")]
    {
        Ok(Format::Json)
    }
    #[cfg(not(feature = "serde"))]
    {
        Err(Failure::new(
            EXIT_USAGE,
            "--json is unavailable: built without the serde feature",
        ))
    }
}

fn resolve<Out: Write>(
    finder: &EndpointFinder,
    operation: Operation,
    remote: &str,
    format: Format,
    stdout: &mut Out,
) -> Result<i32, Failure> {
    let endpoint = finder
        .try_endpoint(operation, remote)
        .map_err(|error| Failure::new(EXIT_NO_ENDPOINT, error.to_string()))?;
    if endpoint.is_empty() {
        let remote = if remote.is_empty() {
            endpoint::DEFAULT_REMOTE
        } else {
            remote
        };
        return Err(Failure::new(
            EXIT_NO_ENDPOINT,
            format!("no {operation} endpoint configured for remote '{remote}'"),
        ));
    }

    let access = finder.access_for(endpoint.url());
    render::write_endpoint(stdout, format, &endpoint, Some(&access)).map_err(Failure::io)?;
    Ok(EXIT_OK)
}

fn parse<Out: Write>(
    finder: &EndpointFinder,
    operation: Operation,
    clone: bool,
    url: &str,
    format: Format,
    stdout: &mut Out,
) -> Result<i32, Failure> {
    let result = if clone {
        finder.try_new_endpoint_from_clone_url(operation, url)
    } else {
        finder.try_new_endpoint(operation, url)
    };
    let endpoint = result.map_err(|error| Failure::new(EXIT_NO_ENDPOINT, error.to_string()))?;
    if endpoint.is_empty() {
        return Err(Failure::new(EXIT_NO_ENDPOINT, "empty URL"));
    }

    render::write_endpoint(stdout, format, &endpoint, None).map_err(Failure::io)?;
    Ok(EXIT_OK)
}

fn access<Out: Write>(
    finder: &EndpointFinder,
    set: Option<&str>,
    url: &str,
    format: Format,
    stdout: &mut Out,
) -> Result<i32, Failure> {
    if let Some(mode) = set {
        finder.set_access(finder.access_for(url).upgrade(AccessMode::parse(mode)));
    }

    let access = finder.access_for(url);
    render::write_access(stdout, format, &access).map_err(Failure::io)?;
    Ok(EXIT_OK)
}
