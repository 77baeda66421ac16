//! # cardchat CLI Integration Test Common Helpers
//!
//! File: cli/tests/common.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Shared helpers for the integration tests in `cli/tests/`. Each test file
//! declares `mod common;` and runs the compiled `cardchat` binary through
//! `assert_cmd`.
//!
//! Commands that read configuration are isolated from the developer's own
//! `.cardchat.toml` and user config by running inside a temporary directory.
//!

#![allow(dead_code)]

pub use assert_cmd::Command;
use std::path::Path;

/// # Get cardchat Command (`cardchat_cmd`)
///
/// ## Panics
/// Panics if the `cardchat` binary cannot be found via `Command::cargo_bin`.
pub fn cardchat_cmd() -> Command {
    Command::cargo_bin("cardchat").expect("Failed to find cardchat binary for testing")
}

/// # Isolated cardchat Command (`isolated_cmd`)
///
/// Like `cardchat_cmd`, but runs in `dir` with the user config directory and
/// the `CARDCHAT_URL` variable pointed away from the real environment.
pub fn isolated_cmd(dir: &Path) -> Command {
    let mut cmd = cardchat_cmd();
    cmd.current_dir(dir)
        .env("XDG_CONFIG_HOME", dir.join("config"))
        .env("HOME", dir)
        .env_remove("CARDCHAT_URL")
        .env_remove("RUST_LOG");
    cmd
}
