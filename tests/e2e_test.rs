/// End-to-end tests for the command-line surface
///
/// No test reaches GitHub: runs that get past argument handling point the
/// client at a closed local port.
use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// Nothing listens on the discard port, so every request is refused
const UNREACHABLE_API: &str = "http://127.0.0.1:9";

#[cfg(test)]
mod exit_code_tests {
    use super::*;

    #[test]
    fn test_exit_code_help() {
        cargo_bin_cmd!("component-history")
            .arg("--help")
            .assert()
            .code(0);
    }

    #[test]
    fn test_exit_code_version() {
        cargo_bin_cmd!("component-history")
            .arg("--version")
            .assert()
            .code(0);
    }

    #[test]
    fn test_exit_code_invalid_argument() {
        cargo_bin_cmd!("component-history")
            .args(["--token", "t", "--invalid-option"])
            .assert()
            .code(2);
    }

    #[test]
    fn test_exit_code_invalid_format() {
        cargo_bin_cmd!("component-history")
            .args(["--token", "t", "-f", "csv"])
            .assert()
            .code(2);
    }

    #[test]
    fn test_exit_code_missing_token() {
        cargo_bin_cmd!("component-history")
            .env_remove("GITHUB_TOKEN")
            .assert()
            .code(2)
            .stderr(predicate::str::contains("--token"));
    }

    #[test]
    fn test_exit_code_malformed_selection() {
        cargo_bin_cmd!("component-history")
            .args(["--token", "t", "--select", "IMAGE_VERSION"])
            .assert()
            .code(2)
            .stderr(predicate::str::contains("Expected DIM=VALUE"));
    }

    #[test]
    fn test_exit_code_no_persist_conflicts_with_state_file() {
        cargo_bin_cmd!("component-history")
            .args(["--token", "t", "--no-persist", "--state-file", "state.json"])
            .assert()
            .code(2);
    }

    #[test]
    fn test_exit_code_application_error_unreachable_api() {
        let temp_dir = TempDir::new().unwrap();
        cargo_bin_cmd!("component-history")
            .current_dir(temp_dir.path())
            .args(["--token", "t", "--no-persist", "--api-url", UNREACHABLE_API])
            .assert()
            .code(1)
            .stderr(predicate::str::contains("An error occurred"));
    }

    #[test]
    fn test_exit_code_application_error_invalid_path_parameter() {
        let temp_dir = TempDir::new().unwrap();
        cargo_bin_cmd!("component-history")
            .current_dir(temp_dir.path())
            .args(["--token", "t", "--no-persist", "--app-version", "../4.1"])
            .assert()
            .code(1)
            .stderr(predicate::str::contains("path separators"));
    }
}

#[test]
fn test_e2e_token_from_environment() {
    let temp_dir = TempDir::new().unwrap();
    // Gets past argument parsing and fails on the network instead
    cargo_bin_cmd!("component-history")
        .current_dir(temp_dir.path())
        .env("GITHUB_TOKEN", "from-env")
        .args(["--no-persist", "--api-url", UNREACHABLE_API])
        .assert()
        .code(1);
}

#[test]
fn test_e2e_selection_is_persisted_before_failed_run() {
    let temp_dir = TempDir::new().unwrap();
    let state_file = temp_dir.path().join("state.json");

    cargo_bin_cmd!("component-history")
        .current_dir(temp_dir.path())
        .args(["--token", "t", "--api-url", UNREACHABLE_API])
        .arg("--state-file")
        .arg(&state_file)
        .args([
            "--select",
            "IMAGE_VERSION=4.1.2",
            "--select",
            "IMAGE_VERSION=4.1.3",
        ])
        .assert()
        .code(1);

    let content = fs::read_to_string(&state_file).unwrap();
    let state: serde_json::Value = serde_json::from_str(&content).unwrap();
    assert_eq!(
        state["filterValues"]["IMAGE_VERSION"],
        serde_json::json!(["4.1.2", "4.1.3"])
    );
    assert_eq!(state["filterValues"]["IMAGE_REF_NAME"], serde_json::json!([]));
}

#[test]
fn test_e2e_clear_resets_persisted_dimension() {
    let temp_dir = TempDir::new().unwrap();
    let state_file = temp_dir.path().join("state.json");
    fs::write(
        &state_file,
        r#"{"filterValues":{"IMAGE_VERSION":["4.1.2"],"IMAGE_REF_NAME":["debian-12"]}}"#,
    )
    .unwrap();

    cargo_bin_cmd!("component-history")
        .current_dir(temp_dir.path())
        .args(["--token", "t", "--api-url", UNREACHABLE_API])
        .arg("--state-file")
        .arg(&state_file)
        .args(["--clear", "IMAGE_VERSION"])
        .assert()
        .code(1);

    let state: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&state_file).unwrap()).unwrap();
    assert_eq!(state["filterValues"]["IMAGE_VERSION"], serde_json::json!([]));
    assert_eq!(
        state["filterValues"]["IMAGE_REF_NAME"],
        serde_json::json!(["debian-12"])
    );
}

#[test]
fn test_e2e_unknown_dimension_is_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let state_file = temp_dir.path().join("state.json");

    cargo_bin_cmd!("component-history")
        .current_dir(temp_dir.path())
        .args(["--token", "t", "--api-url", UNREACHABLE_API])
        .arg("--state-file")
        .arg(&state_file)
        .args(["--select", "php=php-8.1.2-0"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("not a filter dimension"));

    assert!(!state_file.exists());
}
