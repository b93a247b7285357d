//! CLI integration tests for the `malloy` command-line client.
//!
//! These tests cover help output, argument parsing, local validation and
//! context management. Nothing here needs a running Publisher; commands
//! that would reach the network point at an unreachable address.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Get a command for the malloy binary, isolated from the user's config.
fn malloy(config_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("malloy").unwrap();
    cmd.env("MALLOY_CONFIG_DIR", config_dir.path())
        .env_remove("MALLOY_SERVER_URL")
        .env_remove("MALLOY_API_KEY");
    cmd
}

// ─────────────────────────────────────────────────────────────────────────────
// Help and Version Tests
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_help_displays() {
    let dir = TempDir::new().unwrap();
    malloy(&dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Malloy Publisher"));
}

#[test]
fn test_version_displays() {
    let dir = TempDir::new().unwrap();
    malloy(&dir)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("malloy"));
}

#[test]
fn test_help_lists_subcommands() {
    let dir = TempDir::new().unwrap();
    malloy(&dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("projects"))
        .stdout(predicate::str::contains("packages"))
        .stdout(predicate::str::contains("models"))
        .stdout(predicate::str::contains("query"))
        .stdout(predicate::str::contains("databases"))
        .stdout(predicate::str::contains("schedules"))
        .stdout(predicate::str::contains("connections"))
        .stdout(predicate::str::contains("config"));
}

// ─────────────────────────────────────────────────────────────────────────────
// Global Flag Tests
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_global_flags_accepted() {
    let dir = TempDir::new().unwrap();
    malloy(&dir)
        .args([
            "--verbose",
            "--json",
            "--server",
            "http://localhost:9999",
            "--api-key",
            "secret",
            "--context",
            "prod",
            "--help",
        ])
        .assert()
        .success();
}

#[test]
fn test_unknown_subcommand_rejected() {
    let dir = TempDir::new().unwrap();
    malloy(&dir).arg("dashboards").assert().failure();
}

#[test]
fn test_query_help_lists_flags() {
    let dir = TempDir::new().unwrap();
    malloy(&dir)
        .args(["query", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--query-name"))
        .stdout(predicate::str::contains("--source"))
        .stdout(predicate::str::contains("--version-id"));
}

#[test]
fn test_models_requires_package() {
    let dir = TempDir::new().unwrap();
    malloy(&dir)
        .args(["models", "list", "home"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("PACKAGE"));
}

// ─────────────────────────────────────────────────────────────────────────────
// Local Validation Tests
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_query_rejects_query_and_query_name() {
    let dir = TempDir::new().unwrap();
    malloy(&dir)
        .args([
            "--server",
            "http://127.0.0.1:1",
            "query",
            "home",
            "faa",
            "flights.malloy",
            "--query",
            "run: flights -> { aggregate: c is count() }",
            "--source",
            "flights",
            "--query-name",
            "by_carrier",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("both query and query_name"));
}

#[test]
fn test_query_name_requires_source() {
    let dir = TempDir::new().unwrap();
    malloy(&dir)
        .args([
            "--server",
            "http://127.0.0.1:1",
            "query",
            "home",
            "faa",
            "flights.malloy",
            "--query-name",
            "by_carrier",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("source_name is required"));
}

#[test]
fn test_unreachable_server_fails() {
    let dir = TempDir::new().unwrap();
    malloy(&dir)
        .args(["--server", "http://127.0.0.1:1", "projects", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("HTTP error"));
}

#[test]
fn test_unknown_context_fails() {
    let dir = TempDir::new().unwrap();
    malloy(&dir)
        .args(["--context", "staging", "projects", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("context 'staging' not found"));
}

// ─────────────────────────────────────────────────────────────────────────────
// Context Management Tests
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_no_contexts_configured() {
    let dir = TempDir::new().unwrap();
    malloy(&dir)
        .args(["config", "get-contexts"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No contexts configured"));
}

#[test]
fn test_set_context_requires_server() {
    let dir = TempDir::new().unwrap();
    malloy(&dir)
        .args(["config", "set-context", "local"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--server is required"));
}

#[test]
fn test_context_lifecycle() {
    let dir = TempDir::new().unwrap();

    malloy(&dir)
        .args([
            "config",
            "set-context",
            "local",
            "--server",
            "http://localhost:4000",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Context \"local\" created"));

    malloy(&dir)
        .args([
            "config",
            "set-context",
            "prod",
            "--server",
            "https://publisher.example.com",
            "--key-env",
            "PROD_PUBLISHER_KEY",
        ])
        .assert()
        .success();

    malloy(&dir)
        .args(["config", "current-context"])
        .assert()
        .success()
        .stdout(predicate::str::contains("local"));

    malloy(&dir)
        .args(["config", "use-context", "prod"])
        .assert()
        .success();

    malloy(&dir)
        .args(["config", "get-contexts"])
        .assert()
        .success()
        .stdout(predicate::str::contains("* prod"))
        .stdout(predicate::str::contains("(api key)"));

    malloy(&dir)
        .args(["config", "delete-context", "prod"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No current context"));

    assert!(dir.path().join("client.yaml").exists());
}

#[test]
fn test_use_unknown_context_fails() {
    let dir = TempDir::new().unwrap();
    malloy(&dir)
        .args(["config", "use-context", "missing"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("missing"));
}

#[test]
fn test_config_path_under_config_dir() {
    let dir = TempDir::new().unwrap();
    malloy(&dir)
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("client.yaml"));
}
