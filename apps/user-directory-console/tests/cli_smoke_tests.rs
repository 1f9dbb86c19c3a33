#![allow(clippy::unwrap_used, clippy::expect_used)]

//! CLI smoke tests for the user-directory binary

use std::process::{Command, Stdio};

use httpmock::Method::{DELETE, GET, POST};
use httpmock::MockServer;
use serde_json::json;
use tempfile::TempDir;
use tokio::io::AsyncWriteExt;

/// Helper to run the user-directory binary with given arguments
fn run_user_directory(args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_user-directory"))
        .args(args)
        .env_remove("RUST_LOG")
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .expect("Failed to execute user-directory")
}

/// Write a config pointing at `base_url` and return its directory guard and path.
fn write_config(base_url: &str) -> (TempDir, String) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_path = temp_dir.path().join("config.yaml");
    let content = format!(
        "logging:\n  level: warn\ndirectory:\n  base_url: \"{base_url}\"\n  allow_insecure_http: true\n  request_timeout_ms: 5000\n"
    );
    std::fs::write(&config_path, content).expect("Failed to write config");
    let path = config_path.to_string_lossy().into_owned();
    (temp_dir, path)
}

/// Run the console against `base_url`, feeding `script` on stdin.
async fn run_console(base_url: &str, script: &str) -> std::process::Output {
    let (_dir, path) = write_config(base_url);
    let mut child = tokio::process::Command::new(env!("CARGO_BIN_EXE_user-directory"))
        .args(["--config", &path, "run"])
        .env_remove("RUST_LOG")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .spawn()
        .expect("Failed to spawn user-directory");

    let mut stdin = child.stdin.take().unwrap();
    stdin.write_all(script.as_bytes()).await.unwrap();
    drop(stdin);

    tokio::time::timeout(std::time::Duration::from_secs(30), child.wait_with_output())
        .await
        .expect("console did not exit")
        .unwrap()
}

#[test]
fn test_cli_help_command() {
    let output = run_user_directory(&["--help"]);

    assert!(output.status.success(), "Help command should succeed");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Usage:"), "Should contain usage information");
    assert!(stdout.contains("run"), "Should contain 'run' subcommand");
    assert!(stdout.contains("check"), "Should contain 'check' subcommand");
    assert!(stdout.contains("--config"), "Should mention config option");
    assert!(stdout.contains("--base-url"), "Should mention base URL option");
}

#[test]
fn test_cli_missing_config_file() {
    let output = run_user_directory(&["--config", "/definitely/not/here.yaml", "check"]);

    assert!(!output.status.success(), "Missing config should fail");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("config file does not exist"));
}

#[test]
fn test_cli_check_valid_config() {
    let (_dir, path) = write_config("http://127.0.0.1:9");
    let output = run_user_directory(&["--config", &path, "check"]);

    assert!(output.status.success(), "Check should succeed");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Configuration is valid"));
    assert!(stdout.contains("http://127.0.0.1:9"));
}

#[test]
fn test_cli_check_rejects_bad_base_url() {
    let output = run_user_directory(&["--base-url", "not a url", "check"]);

    assert!(!output.status.success(), "Bad base URL should fail");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("invalid base_url"));
}

#[test]
fn test_cli_check_rejects_unknown_key() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("config.yaml");
    std::fs::write(&config_path, "directory:\n  bogus: 1\n").unwrap();

    let output = run_user_directory(&["--config", config_path.to_str().unwrap(), "check"]);
    assert!(!output.status.success(), "Unknown keys should fail");
}

#[test]
fn test_cli_print_config() {
    let output = run_user_directory(&["--base-url", "https://users.example.test", "--print-config"]);

    assert!(output.status.success(), "Print config should succeed");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Effective configuration:"));
    assert!(stdout.contains("https://users.example.test"));
    assert!(stdout.contains("request_timeout_ms"));
}

#[tokio::test]
async fn test_console_add_and_delete_session() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/users");
            then.status(200).json_body(json!([
                {"id": 1, "name": "Jane Doe", "email": "jane@x.com"}
            ]));
        })
        .await;
    let create = server
        .mock_async(|when, then| {
            when.method(POST).path("/users").json_body(json!({
                "id": 2, "name": "Sam Lee", "email": "s@x.com", "department": "Sales"
            }));
            then.status(201).json_body(json!({"id": 11}));
        })
        .await;
    let remove = server
        .mock_async(|when, then| {
            when.method(DELETE).path("/users/1");
            then.status(200).json_body(json!({}));
        })
        .await;

    let script = "add\nset first Sam\nset last Lee\nset email s@x.com\nset department Sales\nsubmit\ndelete 1\ny\nlist\nquit\n";
    let output = run_console(&server.base_url(), script).await;

    assert!(output.status.success(), "Console should exit cleanly");
    create.assert_async().await;
    remove.assert_async().await;

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Jane"), "Seeded user should be listed");
    assert!(stdout.contains("Add User"));
    assert!(stdout.contains("Are you sure you want to delete this user?"));
    let last_table = stdout.rsplit("ID  ").next().unwrap();
    assert!(last_table.contains("Sam"));
    assert!(!last_table.contains("Jane"));
}

#[tokio::test]
async fn test_console_reports_load_failure_and_validation() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/users");
            then.status(500);
        })
        .await;

    let script = "add\nset first Sam\nsubmit\nedit 99\nquit\n";
    let output = run_console(&server.base_url(), script).await;

    assert!(output.status.success(), "Console should keep running after errors");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("! Failed to load user data."));
    assert!(stdout.contains("! Please fill in all fields."));
    assert!(stdout.contains("! User not found!"));
}

#[tokio::test]
async fn test_console_declined_delete_keeps_user() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/users");
            then.status(200).json_body(json!([
                {"id": 1, "name": "Jane Doe", "email": "jane@x.com"}
            ]));
        })
        .await;
    let remove = server
        .mock_async(|when, then| {
            when.method(DELETE).path("/users/1");
            then.status(200);
        })
        .await;

    let output = run_console(&server.base_url(), "delete 1\nn\nquit\n").await;

    assert!(output.status.success());
    remove.assert_calls_async(0).await;
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Delete cancelled."));
}
