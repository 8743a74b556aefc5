//! put command - Upload a local file
//!
//! Uploads are single-request and encrypted at rest, with AES256 unless a
//! KMS key is given.

use std::path::{Path, PathBuf};

use clap::Args;
use s3mgr_core::object::upload_file;
use s3mgr_core::{Acl, Encryption, RemotePath, StorageClass, UploadOptions};
use serde::Serialize;

use crate::commands::{get_client, parse_remote, report};
use crate::exit_code::ExitCode;
use crate::output::{Formatter, OutputConfig, Spinner};

/// Upload a file
#[derive(Args, Debug)]
pub struct PutArgs {
    /// Local file to upload
    pub file: PathBuf,

    /// Destination (alias/bucket/key, or a folder ending in '/')
    pub target: String,

    /// Content type; guessed from the file extension when omitted
    #[arg(long)]
    pub content_type: Option<String>,

    /// Storage class (e.g., STANDARD, STANDARD_IA, GLACIER)
    #[arg(long, default_value = "STANDARD")]
    pub storage_class: StorageClass,

    /// Encrypt with this KMS key instead of AES256
    #[arg(long)]
    pub kms_key_id: Option<String>,

    /// Make the object publicly readable
    #[arg(long)]
    pub public: bool,
}

#[derive(Debug, Serialize)]
struct PutOutput {
    status: &'static str,
    bucket: String,
    key: String,
    size_bytes: u64,
    size_human: String,
    storage_class: String,
}

/// Execute the put command
pub async fn execute(args: PutArgs, output_config: OutputConfig) -> ExitCode {
    let formatter = Formatter::new(output_config);

    let target = match parse_remote(&args.target, &formatter) {
        Ok(p) => p,
        Err(code) => return code,
    };

    let Some(key) = destination_key(&target, &args.file) else {
        formatter.error(&format!("Cannot derive an object name from '{}'", args.file.display()));
        return ExitCode::UsageError;
    };

    let options = UploadOptions {
        content_type: args
            .content_type
            .or_else(|| mime_guess::from_path(&args.file).first().map(|m| m.to_string())),
        storage_class: args.storage_class,
        encryption: args
            .kms_key_id
            .map(|key_id| Encryption::Kms { key_id })
            .unwrap_or_default(),
        acl: Acl::for_object(args.public),
    };

    let client = match get_client(&target.alias, &formatter).await {
        Ok(c) => c,
        Err(code) => return code,
    };

    let spinner = Spinner::start(formatter.config(), &format!("Uploading {}", args.file.display()));
    let result = upload_file(&client, &target.bucket, &key, &args.file, &options).await;
    spinner.finish();

    match result {
        Ok(size) => {
            let size_human = humansize::format_size(size, humansize::BINARY);
            if formatter.is_json() {
                formatter.json(&PutOutput {
                    status: "success",
                    bucket: target.bucket,
                    key,
                    size_bytes: size,
                    size_human,
                    storage_class: args.storage_class.to_string(),
                });
            } else {
                formatter.success(&format!(
                    "{} -> {}/{}/{key} ({size_human})",
                    args.file.display(),
                    target.alias,
                    target.bucket
                ));
            }
            ExitCode::Success
        }
        Err(e) => report(&formatter, "Failed to upload file", &e),
    }
}

/// Object key for an upload; folder targets take the local file name
fn destination_key(target: &RemotePath, file: &Path) -> Option<String> {
    if !target.is_dir() {
        return Some(target.key.clone());
    }

    let name = file.file_name()?.to_str()?;
    Some(target.join(name).key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct TestCli {
        #[command(flatten)]
        args: PutArgs,
    }

    #[test]
    fn test_put_args_defaults() {
        let cli = TestCli::try_parse_from(["put", "report.pdf", "aws/docs/"]).unwrap();
        assert_eq!(cli.args.storage_class, StorageClass::Standard);
        assert!(cli.args.kms_key_id.is_none());
        assert!(!cli.args.public);
    }

    #[test]
    fn test_put_args_storage_class() {
        let cli = TestCli::try_parse_from([
            "put",
            "a.bin",
            "aws/docs/a.bin",
            "--storage-class",
            "standard-ia",
        ])
        .unwrap();
        assert_eq!(cli.args.storage_class, StorageClass::StandardIa);
    }

    #[test]
    fn test_destination_key_explicit() {
        let target = RemotePath::new("aws", "docs", "2024/report.pdf");
        let key = destination_key(&target, Path::new("/tmp/local.pdf"));
        assert_eq!(key.as_deref(), Some("2024/report.pdf"));
    }

    #[test]
    fn test_destination_key_folder_target() {
        let target = RemotePath::new("aws", "docs", "2024/");
        let key = destination_key(&target, Path::new("/tmp/local.pdf"));
        assert_eq!(key.as_deref(), Some("2024/local.pdf"));

        let root = RemotePath::new("aws", "docs", "");
        let key = destination_key(&root, Path::new("local.pdf"));
        assert_eq!(key.as_deref(), Some("local.pdf"));
    }
}
