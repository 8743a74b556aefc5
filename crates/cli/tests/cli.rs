//! Command-line behavior that needs no storage service
//!
//! Every run gets its own config directory so the user's aliases are never
//! read or touched.

use std::path::Path;
use std::process::{Command, Output};

fn run(args: &[&str], config_dir: &Path) -> Output {
    Command::new(env!("CARGO_BIN_EXE_s3mgr"))
        .args(args)
        .env("S3MGR_CONFIG_DIR", config_dir)
        .env_remove("S3MGR_ACCESS_KEY")
        .env_remove("S3MGR_SECRET_KEY")
        .output()
        .expect("failed to run s3mgr")
}

#[test]
fn help_lists_commands() {
    let dir = tempfile::tempdir().unwrap();
    let output = run(&["--help"], dir.path());
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    for command in ["ls", "mb", "rb", "mkdir", "put", "archive", "restore"] {
        assert!(stdout.contains(command), "missing {command} in help");
    }
}

#[test]
fn incomplete_path_is_a_usage_error() {
    let dir = tempfile::tempdir().unwrap();
    let output = run(&["ls", "onlyalias"], dir.path());
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn unknown_alias_is_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let output = run(&["ls", "missing/bucket"], dir.path());
    assert_eq!(output.status.code(), Some(5));
    assert!(String::from_utf8_lossy(&output.stderr).contains("missing"));
}

#[test]
fn alias_set_list_remove() {
    let dir = tempfile::tempdir().unwrap();

    let output = run(
        &[
            "alias",
            "set",
            "local",
            "--endpoint",
            "http://localhost:9000",
            "--access-key",
            "accesskey",
            "--secret-key",
            "secretkey",
            "--region",
            "ireland",
        ],
        dir.path(),
    );
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    assert!(dir.path().join("config.toml").exists());

    let output = run(&["alias", "list", "--json"], dir.path());
    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let aliases = json["aliases"].as_array().unwrap();
    assert_eq!(aliases.len(), 1);
    assert_eq!(aliases[0]["name"], "local");
    assert_eq!(aliases[0]["region"], "eu-west-1");
    assert_eq!(aliases[0]["credentials"], "static");
    assert!(aliases[0].get("secret_key").is_none());

    let output = run(&["alias", "remove", "local"], dir.path());
    assert!(output.status.success());

    let output = run(&["alias", "remove", "local"], dir.path());
    assert_eq!(output.status.code(), Some(5));
}

#[test]
fn alias_set_rejects_bad_endpoint() {
    let dir = tempfile::tempdir().unwrap();
    let output = run(
        &["alias", "set", "bad", "--endpoint", "not a url"],
        dir.path(),
    );
    assert_eq!(output.status.code(), Some(2));
}
