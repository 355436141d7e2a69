#![allow(clippy::unwrap_used, clippy::expect_used)]

//! CLI smoke tests for the users-server binary.

use std::process::{Command, Stdio};

use tempfile::TempDir;

fn run_users_server(args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_users-server"))
        .args(args)
        .env_remove("RUST_LOG")
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .expect("Failed to execute users-server")
}

#[test]
fn test_cli_help_command() {
    let output = run_users_server(&["--help"]);

    assert!(output.status.success(), "Help command should succeed");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("users-server"), "Should contain binary name");
    assert!(stdout.contains("Usage:"), "Should contain usage information");
    assert!(stdout.contains("run"), "Should contain 'run' subcommand");
    assert!(stdout.contains("check"), "Should contain 'check' subcommand");
    assert!(stdout.contains("--config"), "Should mention config option");
    assert!(stdout.contains("--mock"), "Should mention mock option");
}

#[test]
fn test_print_config_applies_cli_overrides() {
    let output = run_users_server(&["--print-config", "--port", "18099", "--mock"]);

    assert!(output.status.success());
    let config: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(config["server"]["bind_addr"], "127.0.0.1:18099");
    assert_eq!(config["database"]["dsn"], "sqlite::memory:");
    assert_eq!(config["users"]["birthday_format"], "[month]/[day]/[year]");
}

#[test]
fn test_missing_config_file_fails() {
    let output = run_users_server(&["--config", "/definitely/not/here.yaml", "check"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("config file does not exist"));
}

#[test]
fn test_check_accepts_valid_yaml() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("users.yaml");
    std::fs::write(
        &path,
        "server:\n  bind_addr: \"127.0.0.1:0\"\nusers:\n  country_codes: [\"JPN\", \"UK\"]\n",
    )
    .unwrap();

    let output = run_users_server(&["--config", path.to_str().unwrap(), "check"]);

    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Configuration is valid"));
}

#[test]
fn test_check_rejects_bad_birthday_format() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("users.yaml");
    std::fs::write(&path, "users:\n  birthday_format: \"[month/[day]\"\n").unwrap();

    let output = run_users_server(&["--config", path.to_str().unwrap(), "check"]);

    assert!(!output.status.success());
}
