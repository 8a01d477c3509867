use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn test_cli_help() {
    let mut cmd = Command::cargo_bin("trove").unwrap();
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Inventory service for archaeological artifacts"));
}

#[test]
fn test_cli_serve_help() {
    let mut cmd = Command::cargo_bin("trove").unwrap();
    cmd.arg("serve").arg("--help").assert().success().stdout(predicate::str::contains("port"));
}

#[test]
fn test_cli_list_help() {
    let mut cmd = Command::cargo_bin("trove").unwrap();
    cmd.arg("list").arg("--help").assert().success().stdout(predicate::str::contains("limit"));
}

#[test]
fn test_serve_requires_credentials() {
    let mut cmd = Command::cargo_bin("trove").unwrap();
    cmd.env_remove("TROVE_USERNAME")
        .env_remove("TROVE_PASSWORD")
        .arg("serve")
        .assert()
        .failure()
        .stderr(predicate::str::contains("TROVE_USERNAME"));
}
