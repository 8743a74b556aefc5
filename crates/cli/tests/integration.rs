//! Integration tests against a live S3-compatible server
//!
//! Run with:
//! ```bash
//! docker run -d -p 9000:9000 -e MINIO_ROOT_USER=accesskey \
//!     -e MINIO_ROOT_PASSWORD=secretkey minio/minio server /data
//!
//! TEST_S3_ENDPOINT=http://localhost:9000 \
//! TEST_S3_ACCESS_KEY=accesskey \
//! TEST_S3_SECRET_KEY=secretkey \
//!     cargo test --features integration
//! ```

#![cfg(feature = "integration")]

use std::path::Path;
use std::process::{Command, Output};
use std::time::{SystemTime, UNIX_EPOCH};

use tempfile::TempDir;

fn run(args: &[&str], config_dir: &Path) -> Output {
    Command::new(env!("CARGO_BIN_EXE_s3mgr"))
        .args(args)
        .env("S3MGR_CONFIG_DIR", config_dir)
        .output()
        .expect("failed to run s3mgr")
}

fn run_json(args: &[&str], config_dir: &Path) -> serde_json::Value {
    let mut args = args.to_vec();
    args.push("--json");
    let output = run(&args, config_dir);
    assert!(
        output.status.success(),
        "s3mgr {args:?} failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("invalid JSON output")
}

/// Configure the `test` alias and create a fresh bucket
fn setup(name: &str) -> Option<(TempDir, String)> {
    let endpoint = std::env::var("TEST_S3_ENDPOINT").ok()?;
    let access_key = std::env::var("TEST_S3_ACCESS_KEY").ok()?;
    let secret_key = std::env::var("TEST_S3_SECRET_KEY").ok()?;

    let config_dir = tempfile::tempdir().ok()?;
    let output = run(
        &[
            "alias",
            "set",
            "test",
            "--endpoint",
            &endpoint,
            "--access-key",
            &access_key,
            "--secret-key",
            &secret_key,
            "--bucket-lookup",
            "path",
        ],
        config_dir.path(),
    );
    assert!(output.status.success());

    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos())
        .unwrap_or_default();
    let bucket = format!("s3mgr-{name}-{nanos}");

    let output = run(&["mb", &format!("test/{bucket}")], config_dir.path());
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    Some((config_dir, bucket))
}

fn teardown(config_dir: &Path, bucket: &str) {
    run(&["rb", &format!("test/{bucket}"), "--force"], config_dir);
}

fn upload(config_dir: &Path, bucket: &str, key: &str, body: &[u8]) {
    let file = tempfile::NamedTempFile::new().unwrap();
    std::fs::write(file.path(), body).unwrap();
    let target = format!("test/{bucket}/{key}");
    let output = run(&["put", &file.path().to_string_lossy(), &target], config_dir);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
}

#[test]
fn test_folder_view_listing() {
    let Some((dir, bucket)) = setup("ls") else {
        eprintln!("Skipping: TEST_S3_* not set");
        return;
    };

    upload(dir.path(), &bucket, "photos/a.jpg", b"a");
    upload(dir.path(), &bucket, "photos/2021/b.jpg", b"bb");
    upload(dir.path(), &bucket, "photos/2021/deep/c.jpg", b"ccc");
    upload(dir.path(), &bucket, "readme.txt", b"hello");

    let json = run_json(&["ls", &format!("test/{bucket}/photos")], dir.path());
    let files: Vec<&str> = json["files"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|f| f["key"].as_str())
        .collect();
    assert_eq!(files, vec!["photos/a.jpg"]);
    assert_eq!(json["dirs"], serde_json::json!(["photos/2021/"]));

    let json = run_json(&["ls", &format!("test/{bucket}/photos"), "-r"], dir.path());
    assert_eq!(json["files"].as_array().unwrap().len(), 3);
    assert_eq!(json["dirs"], serde_json::json!([]));

    teardown(dir.path(), &bucket);
}

#[test]
fn test_mkdir_shows_up_as_folder() {
    let Some((dir, bucket)) = setup("mkdir") else {
        eprintln!("Skipping: TEST_S3_* not set");
        return;
    };

    let output = run(&["mkdir", &format!("test/{bucket}/reports")], dir.path());
    assert!(output.status.success());

    let json = run_json(&["ls", &format!("test/{bucket}")], dir.path());
    assert_eq!(json["dirs"], serde_json::json!(["reports/"]));

    teardown(dir.path(), &bucket);
}

#[test]
fn test_put_stat_rm() {
    let Some((dir, bucket)) = setup("put") else {
        eprintln!("Skipping: TEST_S3_* not set");
        return;
    };

    upload(dir.path(), &bucket, "docs/notes.txt", b"some notes");

    let json = run_json(&["stat", &format!("test/{bucket}/docs/notes.txt")], dir.path());
    assert_eq!(json["size_bytes"], 10);
    assert_eq!(json["restore_status"]["state"], "not_archived");

    let output = run(&["rm", &format!("test/{bucket}/docs/notes.txt")], dir.path());
    assert!(output.status.success());

    let output = run(&["stat", &format!("test/{bucket}/docs/notes.txt")], dir.path());
    assert_eq!(output.status.code(), Some(5));

    teardown(dir.path(), &bucket);
}

#[test]
fn test_rb_requires_force_when_not_empty() {
    let Some((dir, bucket)) = setup("rb") else {
        eprintln!("Skipping: TEST_S3_* not set");
        return;
    };

    upload(dir.path(), &bucket, "keep.txt", b"x");

    let output = run(&["rb", &format!("test/{bucket}")], dir.path());
    assert_eq!(output.status.code(), Some(6));

    let output = run(&["rb", &format!("test/{bucket}"), "--force"], dir.path());
    assert!(output.status.success());
}
