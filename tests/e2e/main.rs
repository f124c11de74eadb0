//! CLI-surface smoke tests. These exercise the binary's argument handling
//! only; nothing here launches a browser.

use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn help_lists_the_process_flags() {
    Command::cargo_bin("credprobe")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--url"))
        .stdout(predicate::str::contains("--headless"));
}

#[test]
fn version_prints_the_crate_version() {
    Command::cargo_bin("credprobe")
        .unwrap()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn unknown_flags_are_rejected() {
    Command::cargo_bin("credprobe")
        .unwrap()
        .arg("--definitely-not-a-flag")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unexpected argument"));
}
