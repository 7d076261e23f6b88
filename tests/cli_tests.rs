//! Integration tests for the thoughtgrid binary's non-interactive commands.

use assert_cmd::{cargo::cargo_bin_cmd, Command};
use predicates::prelude::*;
use std::fs;
use tempfile::tempdir;

fn thoughtgrid() -> Command {
    cargo_bin_cmd!("thoughtgrid")
}

#[test]
fn help_lists_commands() {
    thoughtgrid()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage: thoughtgrid"))
        .stdout(predicate::str::contains("grid"))
        .stdout(predicate::str::contains("widths"))
        .stdout(predicate::str::contains("config"))
        .stdout(predicate::str::contains("tui"));
}

#[test]
fn grid_prints_a_leap_february() {
    let dir = tempdir().unwrap();
    thoughtgrid()
        .args(["grid", "--month", "2024-02", "--today", "2024-02-14"])
        .arg("--config")
        .arg(dir.path().join("settings.yml"))
        .assert()
        .success()
        .stdout(predicate::str::starts_with("February 2024\n"))
        .stdout(predicate::str::contains("(28)"))
        .stdout(predicate::str::contains("[14]"))
        .stdout(predicate::str::contains("29"))
        .stdout(predicate::str::contains("weeks: 5"))
        .stdout(predicate::str::contains("mobile: 530px"))
        .stdout(predicate::str::contains("fluid: clamp(530px, 90vw, 600px)"));
}

#[test]
fn grid_rejects_a_bad_month() {
    let dir = tempdir().unwrap();
    thoughtgrid()
        .args(["grid", "--month", "2024-13"])
        .arg("--config")
        .arg(dir.path().join("settings.yml"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid month"));
}

#[test]
fn widths_for_a_week_count() {
    let dir = tempdir().unwrap();
    thoughtgrid()
        .args(["widths", "--weeks", "6"])
        .arg("--config")
        .arg(dir.path().join("settings.yml"))
        .assert()
        .success()
        .stdout(predicate::str::contains("weeks: 6"))
        .stdout(predicate::str::contains("tablet: 980px"))
        .stdout(predicate::str::contains("large desktop: 1620px"));
}

#[test]
fn widths_for_a_month_use_its_week_count() {
    let dir = tempdir().unwrap();
    thoughtgrid()
        .args(["widths", "--month", "2026-02"])
        .arg("--config")
        .arg(dir.path().join("settings.yml"))
        .assert()
        .success()
        .stdout(predicate::str::contains("weeks: 4"))
        .stdout(predicate::str::contains("mobile: 480px"));
}

#[test]
fn widths_needs_exactly_one_source() {
    thoughtgrid().arg("widths").assert().failure();
    thoughtgrid()
        .args(["widths", "--weeks", "5", "--month", "2024-02"])
        .assert()
        .failure();
}

#[test]
fn widths_honour_settings_overrides() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("settings.yml");
    fs::write(&path, "widths:\n  mobile:\n    base: 300\n    unit: 10\n").unwrap();
    thoughtgrid()
        .args(["widths", "--weeks", "5"])
        .arg("--config")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("mobile: 350px"))
        .stdout(predicate::str::contains("tablet: 900px"));
}

#[test]
fn config_init_writes_defaults_once() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("nested/settings.yml");

    thoughtgrid()
        .args(["config", "--init", "--config"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote default settings"))
        .stdout(predicate::str::contains("picker_year_span: 10"));
    assert!(path.exists());

    thoughtgrid()
        .args(["config", "--init", "--config"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("already exist"));
}

#[test]
fn config_without_file_shows_defaults() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("settings.yml");
    thoughtgrid()
        .args(["config", "--config"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("not created, defaults shown"))
        .stdout(predicate::str::contains("explicit"));
    assert!(!path.exists());
}

#[test]
fn malformed_settings_fail_loudly() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("settings.yml");
    fs::write(&path, "history_limit: [").unwrap();
    thoughtgrid()
        .args(["grid", "--config"])
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("parsing settings file"));
}
