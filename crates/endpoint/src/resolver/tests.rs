use config::GitConfig;

use super::*;
use crate::AccessMode;

fn finder(pairs: &[(&str, &str)]) -> EndpointFinder {
    EndpointFinder::new(GitConfig::from_pairs(pairs.iter().copied()))
}

const FETCH_HEAD_LINE: &str =
    "14d0e09d4643d7547267c1cbf9972ac1c4db0b2d\t\tbranch 'main' of https://fetched.example.com/repo\n";

#[test]
fn empty_remote_means_origin() {
    let finder = finder(&[("remote.origin.lfsurl", "abc")]);

    assert_eq!(finder.endpoint(Operation::Download, "").url(), "abc");
    assert_eq!(finder.endpoint(Operation::Download, "origin").url(), "abc");
}

#[test]
fn global_url_beats_remote_lfsurl() {
    let finder = finder(&[("lfs.url", "abc"), ("remote.origin.lfsurl", "def")]);

    assert_eq!(finder.endpoint(Operation::Download, "").url(), "abc");
}

#[test]
fn global_url_serves_uploads_without_push_url() {
    let finder = finder(&[("lfs.url", "https://lfs.example.com/repo")]);

    let upload = finder.endpoint(Operation::Upload, "");
    assert_eq!(upload.url(), "https://lfs.example.com/repo");
    assert_eq!(upload.operation(), Some(Operation::Upload));
}

#[test]
fn push_urls_are_ignored_for_downloads() {
    let finder = finder(&[
        ("lfs.pushurl", "https://push.example.com"),
        ("remote.origin.lfspushurl", "https://lfspush.example.com"),
        ("remote.origin.pushurl", "https://gitpush.example.com/repo"),
        ("remote.origin.url", "https://example.com/repo"),
    ]);

    assert_eq!(
        finder.endpoint(Operation::Download, "").url(),
        "https://example.com/repo.git/info/lfs"
    );
    assert_eq!(
        finder.endpoint(Operation::Upload, "").url(),
        "https://push.example.com"
    );
}

#[test]
fn lfsurl_serves_uploads_before_git_push_url() {
    let finder = finder(&[
        ("remote.origin.lfsurl", "https://lfs.example.com/repo"),
        ("remote.origin.pushurl", "https://gitpush.example.com/repo"),
    ]);

    assert_eq!(
        finder.endpoint(Operation::Upload, "").url(),
        "https://lfs.example.com/repo"
    );
}

#[test]
fn missing_operation_resolves_like_download_and_stays_unset() {
    let finder = finder(&[
        ("remote.origin.url", "https://example.com/repo"),
        ("remote.origin.pushurl", "https://push.example.com/repo"),
    ]);

    let endpoint = finder.endpoint(None, "");
    assert_eq!(endpoint.url(), "https://example.com/repo.git/info/lfs");
    assert_eq!(endpoint.operation(), None);
}

#[test]
fn unknown_remote_falls_back_to_origin() {
    let finder = finder(&[("remote.origin.url", "https://example.com/repo")]);

    assert_eq!(
        finder.endpoint(Operation::Download, "missing").url(),
        "https://example.com/repo.git/info/lfs"
    );
    assert!(finder.remote_endpoint(Operation::Download, "missing").is_empty());
}

#[test]
fn remote_name_that_is_a_url_resolves_itself() {
    let finder = finder(&[("remote.origin.url", "https://origin.example.com/repo")]);

    let endpoint = finder.endpoint(Operation::Download, "git@example.com:team/repo.git");
    assert_eq!(endpoint.url(), "https://example.com/team/repo.git/info/lfs");
    assert_eq!(endpoint.ssh_metadata().path(), "team/repo.git");
}

#[test]
fn nothing_configured_is_empty() {
    let finder = finder(&[]);
    let endpoint = finder.endpoint(Operation::Upload, "");

    assert!(endpoint.is_empty());
    assert!(endpoint.ssh_metadata().is_empty());
    assert_eq!(endpoint.operation(), Some(Operation::Upload));
}

#[test]
fn empty_values_are_skipped() {
    let finder = finder(&[
        ("lfs.url", ""),
        ("remote.origin.url", "https://example.com/repo"),
    ]);

    assert_eq!(
        finder.endpoint(Operation::Download, "").url(),
        "https://example.com/repo.git/info/lfs"
    );
}

#[test]
fn clone_url_naming_a_file_is_not_a_local_repository() {
    let dir = tempfile::tempdir().expect("tempdir");
    let notes = dir.path().join("notes.txt");
    std::fs::write(&notes, "not a repository\n").expect("write");
    let raw = notes.to_str().expect("utf8");

    let finder = finder(&[("remote.origin.url", raw)]);
    let endpoint = finder.endpoint(Operation::Download, "origin");

    assert!(!endpoint.url().starts_with("file://"), "{}", endpoint.url());
    assert_eq!(endpoint.url(), format!("{raw}.git/info/lfs"));
}

#[test]
fn without_config_resolves_nothing_but_still_classifies() {
    let finder = EndpointFinder::without_config();

    assert!(finder.endpoint(Operation::Download, "").is_empty());
    assert_eq!(finder.git_protocol(), "https");
    assert_eq!(
        finder.new_endpoint_from_clone_url(Operation::Upload, "https://foo/bar/").url(),
        "https://foo/bar.git/info/lfs"
    );
    assert_eq!(
        finder.access_for("https://example.com").mode(),
        &AccessMode::None
    );
}

#[test]
fn fetch_head_is_last_resort_for_origin() {
    let dir = tempfile::tempdir().expect("tempdir");
    std::fs::write(dir.path().join("FETCH_HEAD"), FETCH_HEAD_LINE).expect("write");
    let finder = finder(&[]).with_git_dir(dir.path());

    assert_eq!(finder.git_dir(), Some(dir.path()));
    assert_eq!(
        finder.endpoint(Operation::Download, "").url(),
        "https://fetched.example.com/repo.git/info/lfs"
    );
    assert_eq!(
        finder.endpoint(Operation::Download, "other").url(),
        "https://fetched.example.com/repo.git/info/lfs"
    );
    assert!(finder.remote_endpoint(Operation::Download, "other").is_empty());
}

#[test]
fn fetch_head_loses_to_configured_url() {
    let dir = tempfile::tempdir().expect("tempdir");
    std::fs::write(dir.path().join("FETCH_HEAD"), FETCH_HEAD_LINE).expect("write");
    let finder = finder(&[("remote.origin.url", "https://example.com/repo")])
        .with_git_dir(dir.path());

    assert_eq!(
        finder.endpoint(Operation::Download, "").url(),
        "https://example.com/repo.git/info/lfs"
    );
}

#[test]
fn malformed_fetch_head_is_ignored() {
    let dir = tempfile::tempdir().expect("tempdir");
    std::fs::write(dir.path().join("FETCH_HEAD"), "garbage\n").expect("write");
    let finder = finder(&[]).with_git_dir(dir.path());

    assert!(finder.endpoint(Operation::Download, "").is_empty());
}

#[test]
fn fetch_head_needs_git_dir() {
    let finder = finder(&[]);
    assert!(finder.endpoint(Operation::Download, "").is_empty());
}

#[test]
fn verbatim_override_has_no_original_url() {
    let finder = finder(&[("remote.origin.lfsurl", "https://lfs.example.com/foo/bar")]);
    let endpoint = finder.endpoint(Operation::Download, "");

    assert_eq!(endpoint.url(), "https://lfs.example.com/foo/bar");
    assert_eq!(endpoint.original_url(), "");
}

#[test]
fn rewritten_override_keeps_original_url() {
    let finder = finder(&[("lfs.url", "git@example.com:foo/bar.git")]);
    let endpoint = finder.endpoint(Operation::Download, "");

    assert_eq!(endpoint.url(), "https://example.com/foo/bar.git");
    assert_eq!(endpoint.original_url(), "ssh://git@example.com/foo/bar.git");
}

#[test]
fn aliases_apply_to_overrides() {
    let finder = finder(&[
        ("url.https://example.com/.insteadof", "ex:"),
        ("remote.origin.lfsurl", "ex:lfs/repo"),
    ]);

    let endpoint = finder.endpoint(Operation::Download, "");
    assert_eq!(endpoint.url(), "https://example.com/lfs/repo");
    assert_eq!(endpoint.original_url(), "https://example.com/lfs/repo");
}

#[test]
fn new_endpoint_does_not_record_operation() {
    let finder = finder(&[]);

    assert_eq!(
        finder
            .new_endpoint(Operation::Upload, "https://example.com/repo")
            .operation(),
        None
    );
    assert_eq!(
        finder
            .new_endpoint_from_clone_url(Operation::Upload, "https://example.com/repo")
            .operation(),
        None
    );
}

#[test]
fn clone_url_suffix_is_skipped_for_helpers_files_and_unknown() {
    let finder = finder(&[]);

    for raw in ["remote::repo", "file:///srv/repo", "ssh://host:port/repo"] {
        let endpoint = finder.new_endpoint_from_clone_url(Operation::Download, raw);
        assert!(!endpoint.url().ends_with("/info/lfs"), "{raw}: {}", endpoint.url());
    }
}

#[test]
fn clone_url_already_suffixed_is_unchanged() {
    let finder = finder(&[]);

    assert_eq!(
        finder
            .new_endpoint_from_clone_url(Operation::Download, "https://foo/bar.git/info/lfs")
            .url(),
        "https://foo/bar.git/info/lfs"
    );
}

#[test]
fn git_remote_url_prefers_push_url_for_push() {
    let finder = finder(&[
        ("remote.origin.url", "https://example.com/repo"),
        ("remote.origin.pushurl", "https://push.example.com/repo"),
    ]);

    assert_eq!(
        finder.git_remote_url("origin", true).as_deref(),
        Some("https://push.example.com/repo")
    );
    assert_eq!(
        finder.git_remote_url("origin", false).as_deref(),
        Some("https://example.com/repo")
    );
    assert_eq!(
        finder.git_remote_url("https://direct.example.com/r", false).as_deref(),
        Some("https://direct.example.com/r")
    );
    assert_eq!(finder.git_remote_url("upstream", false), None);
}

#[test]
fn replace_url_alias_respects_operation() {
    let finder = finder(&[
        ("url.https://example.com/.insteadof", "ex:"),
        ("url.ssh://example.com/.pushinsteadof", "ex:"),
    ]);

    assert_eq!(
        finder.replace_url_alias(Operation::Download, "ex:repo"),
        "https://example.com/repo"
    );
    assert_eq!(
        finder.replace_url_alias(Operation::Upload, "ex:repo"),
        "ssh://example.com/repo"
    );
    assert_eq!(finder.aliases().rules().len(), 2);
}

#[test]
fn finder_is_shareable_between_threads() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<EndpointFinder>();
}
