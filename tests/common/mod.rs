//! Shared helpers for integration tests.

#![allow(dead_code)]

use std::path::PathBuf;
use std::process::{Command, Output};

use tempfile::TempDir;

/// A minimal valid JSON configuration document.
pub const VALID_CONFIG: &str = r#"{
    "appId": "com.acme.notes",
    "appName": "Acme Notes",
    "webDir": "dist"
}"#;

/// Runs the `huskpack` binary with the given arguments.
///
/// # Panics
///
/// Panics if the binary cannot be spawned.
pub fn run_huskpack(args: &[&str]) -> Output {
    let bin = env!("CARGO_BIN_EXE_huskpack");
    Command::new(bin)
        .args(args)
        .output()
        .expect("failed to spawn huskpack")
}

/// Writes `contents` to `name` inside a fresh temp dir.
///
/// The `TempDir` must be kept alive for as long as the path is used.
///
/// # Panics
///
/// Panics on I/O failure.
pub fn write_config(name: &str, contents: &str) -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join(name);
    std::fs::write(&path, contents).expect("write config");
    (dir, path)
}
