//! Smoke tests to verify command wiring

use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn test_top_level_help() {
    let mut cmd = Command::cargo_bin("blogsql").unwrap();
    cmd.arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("serve"))
        .stdout(predicate::str::contains("init-db"));
}

#[test]
fn test_serve_help() {
    let mut cmd = Command::cargo_bin("blogsql").unwrap();
    cmd.arg("serve").arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("--cors-permissive"))
        .stdout(predicate::str::contains("--skip-init"))
        .stdout(predicate::str::contains("DATABASE_URL"));
}

#[test]
fn test_init_db_help() {
    let mut cmd = Command::cargo_bin("blogsql").unwrap();
    cmd.arg("init-db").arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("--db-name"));
}

#[test]
fn test_unknown_command_fails() {
    let mut cmd = Command::cargo_bin("blogsql").unwrap();
    cmd.arg("migrate");

    cmd.assert().failure();
}

#[test]
fn test_invalid_port_rejected() {
    let mut cmd = Command::cargo_bin("blogsql").unwrap();
    cmd.arg("serve").arg("--port").arg("not-a-port");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("--port"));
}
