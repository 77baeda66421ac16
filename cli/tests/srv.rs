//! # cardchat Srv Integration Tests
//!
//! File: cli/tests/srv.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Integration tests for `cardchat srv`. Routes are covered by the router
//! tests in `server_logic.rs`; here only argument handling is checked, since
//! a successful start blocks until a signal arrives.
//!

mod common;
use common::*;
use predicates::prelude::*;
use tempfile::tempdir;

#[test]
fn test_srv_missing_static_dir_fails() {
    let dir = tempdir().unwrap();
    isolated_cmd(dir.path())
        .args(["srv", "--static-dir", "does-not-exist"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Static directory not found"));
}

#[test]
fn test_srv_invalid_backend_fails() {
    let dir = tempdir().unwrap();
    isolated_cmd(dir.path())
        .args(["srv", "--backend", "not-a-url"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid server settings"));
}

#[test]
fn test_srv_invalid_port_rejected() {
    cardchat_cmd()
        .args(["srv", "--port", "99999"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value"));
}

#[test]
#[ignore] // Blocks until the server is stopped.
fn test_srv_prints_banner() {
    let dir = tempdir().unwrap();
    isolated_cmd(dir.path())
        .args(["srv", "--port", "0"])
        .timeout(std::time::Duration::from_secs(2))
        .assert()
        .stdout(predicate::str::contains("Chat page:"));
}
