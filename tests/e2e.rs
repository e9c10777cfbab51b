use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::process::Command;
use tempfile::tempdir;

const OVERFLOW_FILE: &str = "ohc_overflow_hashes.txt";

fn uploader() -> Command {
    let mut cmd = Command::cargo_bin("ohc-uploader").unwrap();
    cmd.env_remove("OHC_API_KEY").env_remove("OHC_API_URL");
    cmd
}

#[test]
fn placeholder_key_is_a_misconfiguration() {
    let tmp = tempdir().unwrap();
    uploader()
        .current_dir(tmp.path())
        .assert()
        .code(2)
        .stderr(predicate::str::contains("API key"));
}

#[test]
fn list_mode_also_requires_a_configured_key() {
    let tmp = tempdir().unwrap();
    uploader()
        .arg("--list")
        .current_dir(tmp.path())
        .assert()
        .code(2);
}

#[test]
fn empty_directory_is_a_successful_noop() {
    let tmp = tempdir().unwrap();
    uploader()
        .env("OHC_API_KEY", "sk_live_e2e_0000")
        .current_dir(tmp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("No hashes found"));
    assert!(!tmp.path().join(OVERFLOW_FILE).exists());
}

#[test]
fn unreachable_endpoint_is_a_network_failure() {
    let tmp = tempdir().unwrap();
    fs::write(
        tmp.path().join("capture.hc22000"),
        "WPA*02*aaaa*bbbb*cccc\n",
    )
    .unwrap();
    uploader()
        .env("OHC_API_KEY", "sk_live_e2e_0000")
        .env("OHC_API_URL", "http://127.0.0.1:1/v2")
        .current_dir(tmp.path())
        .assert()
        .code(4);
    // Overflow is only written for the over-cap case, never on failure.
    assert!(!tmp.path().join(OVERFLOW_FILE).exists());
}

#[test]
fn list_mode_unreachable_endpoint_is_a_network_failure() {
    let tmp = tempdir().unwrap();
    uploader()
        .arg("-l")
        .env("OHC_API_KEY", "sk_live_e2e_0000")
        .env("OHC_API_URL", "http://127.0.0.1:1/v2")
        .current_dir(tmp.path())
        .assert()
        .code(4);
}

#[test]
fn comment_only_files_count_as_empty() {
    let tmp = tempdir().unwrap();
    fs::write(tmp.path().join("a.hc22000"), "# nothing here\n\n").unwrap();
    uploader()
        .env("OHC_API_KEY", "sk_live_e2e_0000")
        .current_dir(tmp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("No hashes found"));
}
