//! Integration tests for the `tikly` CLI binary.
//!
//! Argument parsing, help output, completions, config commands and error
//! exit codes, all without a live device.
#![allow(clippy::unwrap_used)]

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;

// ── Helpers ─────────────────────────────────────────────────────────

/// Build a command for the `tikly` binary with env isolation.
///
/// Clears `TIKLY_*` / `MIKROTIK_*` variables and points config directories
/// at a throwaway path so tests never touch the user's real configuration.
fn tikly_cmd(home: &std::path::Path) -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("tikly");
    cmd.env("HOME", home)
        .env("XDG_CONFIG_HOME", home.join(".config"))
        .env_remove("TIKLY_PROFILE")
        .env_remove("TIKLY_OUTPUT")
        .env_remove("MIKROTIK_HOST")
        .env_remove("MIKROTIK_USER")
        .env_remove("MIKROTIK_PASSWORD")
        .env_remove("MIKROTIK_TLS")
        .env_remove("MIKROTIK_CA_CERTIFICATE")
        .env_remove("MIKROTIK_INSECURE")
        .env_remove("RUST_LOG");
    cmd
}

fn combined_output(output: &std::process::Output) -> String {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    format!("{stdout}{stderr}")
}

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn test_no_args_shows_help() {
    let home = tempfile::tempdir().unwrap();
    let output = tikly_cmd(home.path()).output().unwrap();
    assert_eq!(output.status.code(), Some(2));
    assert!(combined_output(&output).contains("Usage"));
}

#[test]
fn test_help_lists_resources() {
    let home = tempfile::tempdir().unwrap();
    tikly_cmd(home.path()).arg("--help").assert().success().stdout(
        predicate::str::contains("firewall-filter")
            .and(predicate::str::contains("bridge"))
            .and(predicate::str::contains("scheduler"))
            .and(predicate::str::contains("ipsec-peer")),
    );
}

#[test]
fn test_resource_verbs_exist() {
    let home = tempfile::tempdir().unwrap();
    tikly_cmd(home.path())
        .args(["bridge", "--help"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("list")
                .and(predicate::str::contains("get"))
                .and(predicate::str::contains("add"))
                .and(predicate::str::contains("update"))
                .and(predicate::str::contains("delete")),
        );
}

#[test]
fn test_completions_bash() {
    let home = tempfile::tempdir().unwrap();
    tikly_cmd(home.path())
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("tikly"));
}

#[test]
fn test_invalid_output_format() {
    let home = tempfile::tempdir().unwrap();
    tikly_cmd(home.path())
        .args(["--output", "xml", "tftp", "list"])
        .assert()
        .code(2);
}

// ── Config ──────────────────────────────────────────────────────────

#[test]
fn test_config_show_without_file_renders_defaults() {
    let home = tempfile::tempdir().unwrap();
    tikly_cmd(home.path())
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[defaults]"));
}

#[test]
fn test_config_path_points_into_config_dir() {
    let home = tempfile::tempdir().unwrap();
    tikly_cmd(home.path())
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("config.toml"));
}

#[test]
fn test_config_use_unknown_profile_fails() {
    let home = tempfile::tempdir().unwrap();
    tikly_cmd(home.path())
        .args(["config", "use", "nope"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("nope"));
}

// ── Device commands without a device ────────────────────────────────

#[test]
fn test_list_without_device_is_usage_error() {
    let home = tempfile::tempdir().unwrap();
    let output = tikly_cmd(home.path())
        .args(["firewall-filter", "list"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
    assert!(combined_output(&output).contains("No device configured"));
}

#[test]
fn test_unknown_profile_is_usage_error() {
    let home = tempfile::tempdir().unwrap();
    tikly_cmd(home.path())
        .args(["--profile", "ghost", "bridge", "list"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("ghost"));
}

#[test]
fn test_refused_connection_exits_with_connection_code() {
    // Bind then drop a listener so the port is known to be closed.
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let home = tempfile::tempdir().unwrap();
    tikly_cmd(home.path())
        .args([
            "--host",
            &format!("127.0.0.1:{port}"),
            "--user",
            "admin",
            "--password",
            "",
            "--timeout",
            "5",
            "tftp",
            "list",
        ])
        .assert()
        .code(7);
}

#[test]
fn test_delete_without_terminal_requires_yes() {
    let home = tempfile::tempdir().unwrap();
    tikly_cmd(home.path())
        .args([
            "--host", "127.0.0.1:1", "--user", "admin", "--password", "", "bridge", "delete",
            "br0",
        ])
        .write_stdin("")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("--yes"));
}
