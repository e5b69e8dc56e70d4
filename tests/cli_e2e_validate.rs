//! End-to-end tests for the `validate` command
//!
//! These tests invoke the actual CLI binary and validate its behavior
//! from a user's perspective.

use assert_cmd::cargo::cargo_bin_cmd;
use assert_fs::prelude::*;
use predicates::prelude::*;

/// Test that --help flag shows help information
#[test]
#[cfg_attr(not(feature = "integration-tests"), ignore)]
fn test_validate_help() {
    let mut cmd = cargo_bin_cmd!("stagesync");

    cmd.arg("validate")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Validate the .stagesync.yaml configuration",
        ));
}

/// Test that validation without a config file reports the built-in policy
#[test]
#[cfg_attr(not(feature = "integration-tests"), ignore)]
fn test_validate_builtin_defaults() {
    let temp = assert_fs::TempDir::new().unwrap();

    let mut cmd = cargo_bin_cmd!("stagesync");

    cmd.current_dir(temp.path())
        .arg("validate")
        .arg("--color")
        .arg("never")
        .assert()
        .success()
        .stdout(predicate::str::contains("built-in defaults"))
        .stdout(predicate::str::contains("staging root: owl-bot-staging"))
        .stdout(predicate::str::contains("versions: v2"));
}

/// Test that a valid config file is accepted and summarized
#[test]
#[cfg_attr(not(feature = "integration-tests"), ignore)]
fn test_validate_valid_config() {
    let temp = assert_fs::TempDir::new().unwrap();
    let config_file = temp.child(".stagesync.yaml");
    config_file
        .write_str("versions: [v1, v2]\nstaging_root: custom-staging\n")
        .unwrap();

    let mut cmd = cargo_bin_cmd!("stagesync");

    cmd.arg("validate")
        .arg("--config")
        .arg(config_file.path())
        .arg("--color")
        .arg("never")
        .assert()
        .success()
        .stdout(predicate::str::contains("Configuration loaded successfully"))
        .stdout(predicate::str::contains("versions: v1, v2"))
        .stdout(predicate::str::contains("staging root: custom-staging"));
}

/// Test that an invalid config file fails with a hint
#[test]
#[cfg_attr(not(feature = "integration-tests"), ignore)]
fn test_validate_invalid_config() {
    let temp = assert_fs::TempDir::new().unwrap();
    let config_file = temp.child(".stagesync.yaml");
    config_file.write_str("staging_directory: wrong-name").unwrap();

    let mut cmd = cargo_bin_cmd!("stagesync");

    cmd.arg("validate")
        .arg("--config")
        .arg(config_file.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Configuration parsing error"))
        .stderr(predicate::str::contains("hint:"));
}

/// Test that a missing explicit config file fails
#[test]
#[cfg_attr(not(feature = "integration-tests"), ignore)]
fn test_validate_missing_config() {
    let mut cmd = cargo_bin_cmd!("stagesync");

    cmd.arg("validate")
        .arg("--config")
        .arg("/nonexistent/.stagesync.yaml")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Configuration file not found"));
}
