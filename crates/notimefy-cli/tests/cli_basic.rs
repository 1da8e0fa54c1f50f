//! Basic CLI E2E tests.
//!
//! Tests run the built binary with HOME and XDG_DATA_HOME pointed at a
//! temporary directory so no real config or state is touched.

use std::path::Path;
use std::process::Command;

use mockito::{Matcher, Server};
use tempfile::TempDir;

/// Run the CLI with an isolated home and return (stdout, stderr, exit code).
fn run_cli(home: &Path, args: &[&str]) -> (String, String, i32) {
    let output = Command::new(env!("CARGO_BIN_EXE_notimefy"))
        .args(args)
        .env("HOME", home)
        .env("XDG_DATA_HOME", home.join("data"))
        .env("XDG_CONFIG_HOME", home.join("config"))
        .env_remove("NOTIMEFY_ENV")
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

fn write_config(dir: &Path, url: &str, thresholds: &str) -> String {
    let path = dir.join("notimefy.toml");
    std::fs::write(
        &path,
        format!(
            "thresholds = {thresholds}\n\n[kimai]\nurl = \"{url}\"\nusername = \"jdoe\"\ntoken = \"s3cret\"\ntimeout_secs = 5\n"
        ),
    )
    .unwrap();
    path.to_string_lossy().to_string()
}

#[test]
fn test_help_lists_flags() {
    let home = TempDir::new().unwrap();
    let (stdout, _, code) = run_cli(home.path(), &["--help"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("--config"));
    assert!(stdout.contains("--reset-first"));
}

#[test]
fn test_missing_config_is_fatal() {
    let home = TempDir::new().unwrap();
    let missing = home.path().join("nope.toml");
    let (_, stderr, code) = run_cli(home.path(), &["--config", missing.to_str().unwrap()]);
    assert_eq!(code, 1);
    assert!(stderr.contains("error:"));
    assert!(stderr.contains("nope.toml"));
}

#[test]
fn test_invalid_config_is_fatal() {
    let home = TempDir::new().unwrap();
    let path = home.path().join("notimefy.toml");
    std::fs::write(&path, "thresholds = [10]\n[kimai]\nurl = \"https://k.example\"\n").unwrap();
    let (_, stderr, code) = run_cli(home.path(), &["--config", path.to_str().unwrap()]);
    assert_eq!(code, 1);
    assert!(stderr.contains("kimai.username"));
}

#[test]
fn test_status_without_state() {
    let home = TempDir::new().unwrap();
    let config = write_config(home.path(), "https://kimai.example.com/api", "[10, 20]");
    let (stdout, _, code) = run_cli(home.path(), &["status", "--config", &config]);
    assert_eq!(code, 0);
    assert!(stdout.contains("kimai.example.com"));
    assert!(stdout.contains("No tracker state"));
}

#[cfg(target_os = "linux")]
#[test]
fn test_reset_removes_state_file() {
    let home = TempDir::new().unwrap();
    let config = write_config(home.path(), "https://kimai.example.com/api", "[10, 20]");
    let state_dir = home.path().join("data").join("notimefy");
    std::fs::create_dir_all(&state_dir).unwrap();
    let state_file = state_dir.join("kimai.example.com");
    std::fs::write(&state_file, r#"{"Month":"2024-05","RemainingThresholds":[20]}"#).unwrap();

    let (stdout, _, code) = run_cli(home.path(), &["status", "--config", &config]);
    assert_eq!(code, 0);
    assert!(stdout.contains("2024-05"));

    let (_, _, code) = run_cli(home.path(), &["reset", "--config", &config]);
    assert_eq!(code, 0);
    assert!(!state_file.exists());
}

#[test]
fn test_check_prints_surpassed_threshold_once() {
    let mut server = Server::new();
    let _p1 = server
        .mock("GET", "/timesheets")
        .match_query(Matcher::UrlEncoded("page".into(), "1".into()))
        .match_header("X-AUTH-USER", "jdoe")
        .match_header("X-AUTH-TOKEN", "s3cret")
        .with_body(r#"[{"duration": 600}, {"duration": 50}]"#)
        .create();
    let _p2 = server
        .mock("GET", "/timesheets")
        .match_query(Matcher::UrlEncoded("page".into(), "2".into()))
        .with_body("[]")
        .create();

    let home = TempDir::new().unwrap();
    let config = write_config(home.path(), &server.url(), "[10, 20]");

    let (stdout, stderr, code) = run_cli(home.path(), &["--config", &config, "--reset-first"]);
    assert_eq!(code, 0, "stderr: {stderr}");
    assert_eq!(stdout.trim(), "Surpassed 10 hours (currently: 10)");

    let (stdout, _, code) = run_cli(home.path(), &["check", "--config", &config]);
    assert_eq!(code, 0);
    assert!(stdout.trim().is_empty());
}

#[test]
fn test_check_fails_when_kimai_unreachable() {
    let home = TempDir::new().unwrap();
    let config = write_config(home.path(), "http://127.0.0.1:9", "[10]");
    let (_, stderr, code) = run_cli(home.path(), &["--config", &config]);
    assert_eq!(code, 1);
    assert!(stderr.contains("error:"));
}
