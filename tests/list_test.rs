//! Integration tests for `linux-build list`

mod common;

use common::{mixed_index, serve_index, stable_index, stderr, stdout, TestProject};

#[tokio::test]
async fn test_list_limit_shows_first_versions_in_index_order() {
    let (_server, url) = serve_index(stable_index()).await;
    let project = TestProject::new();

    let output = project.run_with_index(&url, &["list", "--limit", "2"]);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(stdout(&output), "stable:\n6.6.7\n6.6.6\n");
}

#[tokio::test]
async fn test_list_groups_monikers_in_first_seen_order() {
    let (_server, url) = serve_index(mixed_index()).await;
    let project = TestProject::new();

    let output = project.run_with_index(&url, &["list"]);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(
        stdout(&output),
        "mainline:\n6.7-rc5\n\nstable:\n6.6.7\n6.6.6\n\nlongterm:\n6.1.68\n5.15.143\n"
    );
}

#[tokio::test]
async fn test_list_single_moniker_has_no_header() {
    let (_server, url) = serve_index(mixed_index()).await;
    let project = TestProject::new();

    let output = project.run_with_index(&url, &["list", "-n", "1", "longterm"]);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(stdout(&output), "6.1.68\n");
}

#[tokio::test]
async fn test_list_reads_index_url_from_settings() {
    let (_server, url) = serve_index(stable_index()).await;
    let project = TestProject::new();
    project.write_settings(&format!("[releases]\nurl = \"{url}\"\n"));

    let output = project.run(&["list", "stable", "--limit", "1"]);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(stdout(&output), "6.6.7\n");
}

#[test]
fn test_list_reports_unreachable_index() {
    let project = TestProject::new();

    let output = project.run_with_index("http://127.0.0.1:9/releases.json", &["list"]);

    assert!(!output.status.success());
    assert!(stderr(&output).contains("Failed to list releases"));
}
