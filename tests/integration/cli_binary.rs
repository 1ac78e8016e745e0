//! Integration tests driving the appcfg binary.

use super::test_utils::full_workspace;
use std::path::Path;
use std::process::{Command, Output};

fn run_in(dir: &Path, args: &[&str], env: &[(&str, &str)]) -> Output {
    let bin = env!("CARGO_BIN_EXE_appcfg");
    let mut command = Command::new(bin);
    command.env_clear().current_dir(dir).args(args);
    for (name, value) in env {
        command.env(name, value);
    }
    command.output().unwrap()
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).trim_end().to_string()
}

#[test]
fn test_show_value_from_files() {
    let temp_dir = full_workspace();
    let output = run_in(temp_dir.path(), &["show", "database.host"], &[]);

    assert!(
        output.status.success(),
        "appcfg show should succeed: stderr={:?}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert_eq!(stdout(&output), "dev.example.com");
}

#[test]
fn test_config_flag_overrides_env_var() {
    let temp_dir = full_workspace();
    let output = run_in(
        temp_dir.path(),
        &["--config", "api.timeout", "60", "show", "api.timeout"],
        &[("APP_API_TIMEOUT", "45")],
    );

    assert!(output.status.success());
    assert_eq!(stdout(&output), "60");
}

#[test]
fn test_env_var_overrides_files() {
    let temp_dir = full_workspace();
    let output = run_in(
        temp_dir.path(),
        &["show", "database.host"],
        &[("APP_DATABASE_HOST", "env.example.com")],
    );

    assert!(output.status.success());
    assert_eq!(stdout(&output), "env.example.com");
}

#[test]
fn test_root_flag_and_json_output() {
    let temp_dir = full_workspace();
    let root = temp_dir.path().to_string_lossy().to_string();
    let elsewhere = tempfile::TempDir::new().unwrap();
    let output = run_in(
        elsewhere.path(),
        &["--root", root.as_str(), "show", "database", "--format", "json"],
        &[],
    );

    assert!(output.status.success());
    let parsed: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(parsed["password"], "secret_password");
    assert_eq!(parsed["port"], "5432");
}

#[test]
fn test_sections_command() {
    let temp_dir = full_workspace();
    let output = run_in(temp_dir.path(), &["sections"], &[]);

    assert!(output.status.success());
    assert_eq!(stdout(&output), "database\napi\nlogging");
}

#[test]
fn test_missing_key_exits_nonzero() {
    let temp_dir = full_workspace();
    let output = run_in(temp_dir.path(), &["show", "cache.ttl"], &[]);

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("cache.ttl"));
}

#[test]
fn test_malformed_config_exits_nonzero() {
    let temp_dir = full_workspace();
    super::test_utils::write(temp_dir.path(), "secret.ini", "password = hunter2\n");
    let output = run_in(temp_dir.path(), &["sections"], &[]);

    assert!(!output.status.success());
    assert!(stdout(&output).is_empty());
}

#[test]
fn test_default_run_logs_to_stderr() {
    let temp_dir = full_workspace();
    let output = run_in(
        temp_dir.path(),
        &["--env", "dev", "--config", "logging.color", "false"],
        &[],
    );

    assert!(output.status.success());
    assert!(stdout(&output).is_empty(), "logs must not reach stdout");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Starting application in dev environment"),
        "stderr should carry the startup message; got: {}",
        stderr
    );
}

#[test]
fn test_invalid_log_level_falls_back_with_warning() {
    let temp_dir = full_workspace();
    let output = run_in(
        temp_dir.path(),
        &[
            "--config",
            "logging.level",
            "chatty",
            "--config",
            "logging.color",
            "false",
        ],
        &[],
    );

    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Invalid log level: chatty"), "got: {}", stderr);
    assert!(stderr.contains("Application finished"));
}

#[test]
fn test_unknown_log_format_falls_back_to_text() {
    let temp_dir = full_workspace();
    let output = run_in(
        temp_dir.path(),
        &[
            "--config",
            "logging.format",
            "%(asctime)s - %(name)s - %(levelname)s - %(message)s",
            "--config",
            "logging.color",
            "false",
        ],
        &[],
    );

    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Invalid log format"), "got: {}", stderr);
    assert!(stderr.contains("defaulting to text"), "got: {}", stderr);
    assert!(stderr.contains("Application finished"));
}

#[test]
fn test_quoted_value_is_shown_verbatim() {
    let temp_dir = full_workspace();
    super::test_utils::write(temp_dir.path(), "secret.ini", "[api]\ngreeting = \"hello\"\n");
    let output = run_in(temp_dir.path(), &["show", "api.greeting"], &[]);

    assert!(output.status.success());
    assert_eq!(stdout(&output), "\"hello\"");
}
