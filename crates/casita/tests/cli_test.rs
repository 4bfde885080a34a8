//! Integration tests for the `casita` binary.
//!
//! All tests run in mock mode (the default), so no hub is required.
//! Mock-mode operations carry simulated delays, so each invocation takes
//! a second or two of wall time.
#![allow(clippy::unwrap_used)]

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;

// ── Helpers ─────────────────────────────────────────────────────────

/// Build a [`Command`] for the `casita` binary with env isolation.
///
/// Points config directories at a nonexistent path and clears `CASITA_*`
/// env vars so tests never touch the user's real configuration.
fn casita_cmd() -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("casita");
    cmd.env("HOME", "/tmp/casita-cli-test-nonexistent")
        .env("XDG_CONFIG_HOME", "/tmp/casita-cli-test-nonexistent")
        .env_remove("CASITA_MOCK")
        .env_remove("CASITA_API_URL")
        .env_remove("CASITA_OUTPUT")
        .env_remove("CASITA_TIMEOUT");
    cmd
}

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn no_args_shows_help() {
    let output = casita_cmd().output().unwrap();
    assert_eq!(output.status.code(), Some(2), "Expected exit code 2");
    let text = String::from_utf8_lossy(&output.stderr);
    assert!(text.contains("Usage"), "Expected 'Usage' in output:\n{text}");
}

#[test]
fn help_lists_command_tree() {
    casita_cmd().arg("--help").assert().success().stdout(
        predicate::str::contains("smart-home")
            .and(predicate::str::contains("devices"))
            .and(predicate::str::contains("groups"))
            .and(predicate::str::contains("modes"))
            .and(predicate::str::contains("rules"))
            .and(predicate::str::contains("dashboard")),
    );
}

#[test]
fn version_flag() {
    casita_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("casita"));
}

// ── Mock-mode data commands ─────────────────────────────────────────

#[test]
fn devices_list_shows_fixture_devices() {
    casita_cmd()
        .args(["devices", "list"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Living Room AC")
                .and(predicate::str::contains("Smart Thermostat")),
        );
}

#[test]
fn devices_list_json_is_parseable() {
    let output = casita_cmd()
        .args(["--output", "json", "devices", "list"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let devices: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(devices.as_array().unwrap().len(), 6);
    assert_eq!(devices[0]["name"], "Living Room AC");
}

#[test]
fn devices_list_filters_by_group() {
    casita_cmd()
        .args(["--output", "plain", "devices", "list", "--group", "bedroom"])
        .assert()
        .success()
        .stdout(predicate::str::diff("2\n"));
}

#[test]
fn devices_get_unknown_id_fails_with_not_found() {
    let output = casita_cmd().args(["devices", "get", "999"]).output().unwrap();
    assert_eq!(output.status.code(), Some(4));
    let text = String::from_utf8_lossy(&output.stderr);
    assert!(text.contains("not found"), "stderr was:\n{text}");
}

#[test]
fn toggling_an_offline_device_is_rejected() {
    // Fixture device 4 (Garden Sprinkler) is offline.
    let output = casita_cmd()
        .args(["devices", "toggle", "4"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(5));
    let text = String::from_utf8_lossy(&output.stderr);
    assert!(text.contains("offline"), "stderr was:\n{text}");
}

#[test]
fn groups_list_shows_rooms() {
    casita_cmd()
        .args(["groups", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Living Room").and(predicate::str::contains("Security")));
}

#[test]
fn groups_create_mints_a_new_group() {
    casita_cmd()
        .args(["groups", "create", "--name", "Office"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Office").and(predicate::str::contains("(none)")))
        .stderr(predicate::str::contains("created"));
}

#[test]
fn group_deletion_requires_confirmation() {
    // Non-interactive without --yes: refuse.
    let output = casita_cmd()
        .args(["groups", "delete", "bedroom"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));

    casita_cmd()
        .args(["--yes", "groups", "delete", "bedroom"])
        .assert()
        .success()
        .stderr(predicate::str::contains("removed"));
}

#[test]
fn modes_list_marks_the_default() {
    casita_cmd()
        .args(["--output", "plain", "modes", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("comfort"));
}

#[test]
fn removing_the_default_mode_fails() {
    let output = casita_cmd()
        .args(["modes", "remove", "comfort"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
    let text = String::from_utf8_lossy(&output.stderr);
    assert!(text.contains("default mode"), "stderr was:\n{text}");
}

#[test]
fn dashboard_summarizes_the_home() {
    casita_cmd()
        .arg("dashboard")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("6 total")
                .and(predicate::str::contains("Comfort"))
                .and(predicate::str::contains("Rooms")),
        );
}

#[test]
fn device_removal_requires_confirmation() {
    // Non-interactive without --yes: refuse.
    let output = casita_cmd()
        .args(["devices", "remove", "1"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));

    // With --yes it goes through.
    casita_cmd()
        .args(["--yes", "devices", "remove", "1"])
        .assert()
        .success()
        .stderr(predicate::str::contains("removed"));
}
