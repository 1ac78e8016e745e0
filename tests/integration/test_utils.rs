//! Shared fixtures for integration tests

use std::fs;
use std::path::Path;
use tempfile::TempDir;

pub const BASE_CONFIG: &str = r#"
[database]
host = localhost
port = 5432
username = default_user

[api]
url = https://api.example.com
timeout = 30
"#;

pub const DEV_CONFIG: &str = r#"
[database]
host = dev.example.com
username = dev_user

[logging]
level = DEBUG
"#;

pub const SECRET_CONFIG: &str = r#"
[database]
password = secret_password

[api]
key = secret_api_key
"#;

/// Write `(file name, contents)` pairs into a fresh temporary directory.
pub fn workspace_with(files: &[(&str, &str)]) -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    for (name, content) in files {
        write(temp_dir.path(), name, content);
    }
    temp_dir
}

pub fn write(dir: &Path, name: &str, content: &str) {
    fs::write(dir.join(name), content).unwrap();
}

/// Base, dev and secret files.
pub fn full_workspace() -> TempDir {
    workspace_with(&[
        ("config.ini", BASE_CONFIG),
        ("config.dev.ini", DEV_CONFIG),
        ("secret.ini", SECRET_CONFIG),
    ])
}
