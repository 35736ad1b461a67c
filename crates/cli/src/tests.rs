use std::ffi::OsString;

use super::*;

fn run_with_args<I, S>(args: I) -> (i32, String, String)
where
    I: IntoIterator<Item = S>,
    S: Into<OsString>,
{
    let mut stdout = Vec::new();
    let mut stderr = Vec::new();
    let code = run(args, &mut stdout, &mut stderr);
    (
        code,
        String::from_utf8(stdout).expect("stdout is UTF-8"),
        String::from_utf8(stderr).expect("stderr is UTF-8"),
    )
}

#[test]
fn help_goes_to_stdout() {
    let (code, stdout, stderr) = run_with_args(["lfs-endpoint", "--help"]);

    assert_eq!(code, EXIT_OK);
    assert!(stdout.contains("resolve"));
    assert!(stdout.contains("fetch-head"));
    assert!(stderr.is_empty());
}

#[test]
fn version_goes_to_stdout() {
    let (code, stdout, stderr) = run_with_args(["lfs-endpoint", "--version"]);

    assert_eq!(code, EXIT_OK);
    assert!(stdout.contains(env!("CARGO_PKG_VERSION")));
    assert!(stderr.is_empty());
}

#[test]
fn missing_command_is_usage_error() {
    let (code, stdout, stderr) = run_with_args(["lfs-endpoint"]);

    assert_eq!(code, EXIT_USAGE);
    assert!(stdout.is_empty());
    assert!(!stderr.is_empty());
}

#[test]
fn unknown_operation_is_usage_error() {
    let (code, _, stderr) = run_with_args(["lfs-endpoint", "resolve", "--operation", "push"]);

    assert_eq!(code, EXIT_USAGE);
    assert!(stderr.contains("push"));
}

#[test]
fn resolve_prints_endpoint_and_access() {
    let (code, stdout, stderr) = run_with_args([
        "lfs-endpoint",
        "-c",
        "remote.origin.url=git@example.com:foo/bar.git",
        "-c",
        "lfs.https://example.com/foo/bar.git/info/lfs.access=basic",
        "resolve",
    ]);

    assert_eq!(code, EXIT_OK, "{stderr}");
    assert_eq!(
        stdout,
        "url=https://example.com/foo/bar.git/info/lfs\n\
         operation=download\n\
         original_url=ssh://git@example.com/foo/bar.git\n\
         ssh.user_and_host=git@example.com\n\
         ssh.path=foo/bar.git\n\
         access=basic\n"
    );
}

#[test]
fn resolve_uses_push_url_for_uploads() {
    let (code, stdout, _) = run_with_args([
        "lfs-endpoint",
        "-c",
        "remote.origin.url=https://example.com/repo",
        "-c",
        "remote.origin.pushurl=https://push.example.com/repo",
        "resolve",
        "--operation",
        "upload",
    ]);

    assert_eq!(code, EXIT_OK);
    assert!(stdout.starts_with("url=https://push.example.com/repo.git/info/lfs\noperation=upload\n"));
}

#[test]
fn global_options_may_follow_the_command() {
    let (code, stdout, _) = run_with_args([
        "lfs-endpoint",
        "resolve",
        "--remote",
        "upstream",
        "-c",
        "remote.upstream.lfsurl=https://lfs.example.com/up",
    ]);

    assert_eq!(code, EXIT_OK);
    assert!(stdout.starts_with("url=https://lfs.example.com/up\n"));
}

#[test]
fn resolve_without_configuration_reports_no_endpoint() {
    let (code, stdout, stderr) = run_with_args(["lfs-endpoint", "resolve"]);

    assert_eq!(code, EXIT_NO_ENDPOINT);
    assert!(stdout.is_empty());
    assert_eq!(
        stderr,
        "lfs-endpoint: error: no download endpoint configured for remote 'origin'\n"
    );
}

#[test]
fn parse_clone_url_adds_suffix() {
    let (code, stdout, _) = run_with_args(["lfs-endpoint", "parse", "--clone", "https://foo/bar/"]);

    assert_eq!(code, EXIT_OK);
    assert_eq!(stdout, "url=https://foo/bar.git/info/lfs\noriginal_url=https://foo/bar/\n");
}

#[test]
fn parse_applies_aliases() {
    let (code, stdout, _) = run_with_args([
        "lfs-endpoint",
        "-c",
        "url.https://github.com/.insteadof=gh:",
        "parse",
        "gh:git-lfs/git-lfs.git",
    ]);

    assert_eq!(code, EXIT_OK);
    assert!(stdout.starts_with("url=https://github.com/git-lfs/git-lfs.git\n"));
}

#[test]
fn access_set_is_normalised() {
    let (code, stdout, _) = run_with_args([
        "lfs-endpoint",
        "access",
        "--set",
        "PRIVATE",
        "https://user@example.com/repo",
    ]);

    assert_eq!(code, EXIT_OK);
    assert_eq!(stdout, "url=https://example.com/repo\nmode=basic\nprivate=true\n");
}

#[test]
fn access_reads_configuration() {
    let (code, stdout, _) = run_with_args([
        "lfs-endpoint",
        "-c",
        "lfs.https://example.com.access=negotiate",
        "access",
        "https://example.com",
    ]);

    assert_eq!(code, EXIT_OK);
    assert!(stdout.contains("mode=negotiate\n"));
}

#[test]
fn fetch_head_line_extraction() {
    let (code, stdout, _) = run_with_args([
        "lfs-endpoint",
        "fetch-head",
        "14d0e09d4643d7547267c1cbf9972ac1c4db0b2d\tnot-for-merge\tbranch 'master' of https://example.com/repo",
    ]);

    assert_eq!(code, EXIT_OK);
    assert_eq!(stdout, "https://example.com/repo\n");
}

#[test]
fn malformed_fetch_head_line_fails() {
    let (code, stdout, stderr) = run_with_args(["lfs-endpoint", "fetch-head", "text without url"]);

    assert_eq!(code, EXIT_NO_ENDPOINT);
    assert!(stdout.is_empty());
    assert!(stderr.contains("failed to extract remote URL"));
}

#[test]
fn fetch_head_without_line_needs_git_dir() {
    let (code, _, stderr) = run_with_args(["lfs-endpoint", "fetch-head"]);

    assert_eq!(code, EXIT_USAGE);
    assert!(stderr.contains("--git-dir"));
}

#[test]
fn fetch_head_reads_git_dir() {
    let dir = tempfile::tempdir().expect("tempdir");
    std::fs::write(
        dir.path().join("FETCH_HEAD"),
        "cb2ad9f68531e6afe76326d46acf566acf8af4f9\t\ttag 'v1' of ssh://example.com/repo\n",
    )
    .expect("write FETCH_HEAD");

    let (code, stdout, _) = run_with_args([
        OsString::from("lfs-endpoint"),
        OsString::from("--git-dir"),
        dir.path().as_os_str().to_owned(),
        OsString::from("fetch-head"),
    ]);

    assert_eq!(code, EXIT_OK);
    assert_eq!(stdout, "ssh://example.com/repo\n");
}

#[test]
fn unreadable_config_file_is_config_error() {
    let dir = tempfile::tempdir().expect("tempdir");

    let (code, _, stderr) = run_with_args([
        OsString::from("lfs-endpoint"),
        OsString::from("--config"),
        dir.path().join("absent").into_os_string(),
        OsString::from("resolve"),
    ]);

    assert_eq!(code, EXIT_CONFIG);
    assert!(stderr.starts_with("lfs-endpoint: error: failed to read"));
}

#[test]
fn malformed_setting_is_config_error() {
    let (code, _, _) = run_with_args(["lfs-endpoint", "-c", "nosection=value", "resolve"]);
    assert_eq!(code, EXIT_CONFIG);
}

#[test]
fn unknown_debug_subsystem_is_usage_error() {
    let (code, _, stderr) = run_with_args(["lfs-endpoint", "--debug", "bogus", "resolve"]);

    assert_eq!(code, EXIT_USAGE);
    assert!(stderr.contains("unknown subsystem: bogus"));
}

#[cfg(feature = "serde")]
#[test]
fn json_output_for_resolve() {
    let (code, stdout, _) = run_with_args([
        "lfs-endpoint",
        "--json",
        "-c",
        "lfs.url=https://lfs.example.com",
        "resolve",
    ]);

    assert_eq!(code, EXIT_OK);
    let value: serde_json::Value = serde_json::from_str(&stdout).expect("valid JSON");
    assert_eq!(value["endpoint"]["url"], "https://lfs.example.com");
    assert_eq!(value["endpoint"]["operation"], "download");
    assert_eq!(value["access"]["mode"], "none");
}

#[test]
fn exit_codes_are_clamped() {
    assert_eq!(exit_code_from(0), std::process::ExitCode::SUCCESS);
    assert_eq!(exit_code_from(-4), std::process::ExitCode::from(0));
    assert_eq!(exit_code_from(1_000), std::process::ExitCode::from(255));
}
