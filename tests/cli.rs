//! Integration tests for CLI commands

#![allow(deprecated)]

use assert_cmd::{assert::OutputAssertExt, cargo::CommandCargoExt};
use predicates::prelude::*;
use std::process::Command;
use tempfile::TempDir;

#[test]
fn test_help_lists_subcommands() {
    let mut cmd = Command::cargo_bin("fact-agent").unwrap();
    cmd.arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("serve"))
        .stdout(predicate::str::contains("tool-server"))
        .stdout(predicate::str::contains("chat"))
        .stdout(predicate::str::contains("ask"));
}

#[test]
fn test_serve_command_help() {
    let mut cmd = Command::cargo_bin("fact-agent").unwrap();
    cmd.arg("serve").arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("orchestration endpoint"))
        .stdout(predicate::str::contains("--port"));
}

#[test]
fn test_ask_requires_prompt() {
    let mut cmd = Command::cargo_bin("fact-agent").unwrap();
    cmd.arg("ask");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("<PROMPT>"));
}

#[test]
fn test_invalid_config_is_reported() {
    let tmp = TempDir::new().unwrap();
    let config = tmp.path().join("config.toml");
    std::fs::write(&config, "[server]\nport = \"not a number\"\n").unwrap();

    let mut cmd = Command::cargo_bin("fact-agent").unwrap();
    cmd.arg("--config").arg(&config).arg("tools");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse config"));
}

#[test]
fn test_tools_against_unreachable_server_fails() {
    let tmp = TempDir::new().unwrap();
    let config = tmp.path().join("config.toml");
    std::fs::write(
        &config,
        "[tools]\ndiscovery_url = \"http://127.0.0.1:9/.well-known/mcp/tools\"\ntimeout_secs = 2\n",
    )
    .unwrap();

    let mut cmd = Command::cargo_bin("fact-agent").unwrap();
    cmd.arg("--config").arg(&config).arg("tools");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Failed to list tools"));
}
