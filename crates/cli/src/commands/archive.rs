//! archive command - Move an object into archival storage

use clap::Args;
use s3mgr_core::object::archive_object;
use s3mgr_core::StorageClass;
use serde::Serialize;

use crate::commands::{get_client, parse_remote, report};
use crate::exit_code::ExitCode;
use crate::output::{Formatter, OutputConfig};

/// Archive an object
#[derive(Args, Debug)]
pub struct ArchiveArgs {
    /// Object path (alias/bucket/key)
    pub path: String,

    /// Archival class: GLACIER or DEEP_ARCHIVE
    #[arg(long, default_value = "GLACIER")]
    pub storage_class: StorageClass,
}

#[derive(Debug, Serialize)]
struct ArchiveOutput {
    status: &'static str,
    bucket: String,
    key: String,
    storage_class: String,
}

/// Execute the archive command
pub async fn execute(args: ArchiveArgs, output_config: OutputConfig) -> ExitCode {
    let formatter = Formatter::new(output_config);

    let path = match parse_remote(&args.path, &formatter) {
        Ok(p) => p,
        Err(code) => return code,
    };

    let key = match path.require_key() {
        Ok(k) => k.to_string(),
        Err(e) => return report(&formatter, "Cannot archive", &e),
    };

    let client = match get_client(&path.alias, &formatter).await {
        Ok(c) => c,
        Err(code) => return code,
    };

    match archive_object(&client, &path.bucket, &key, args.storage_class).await {
        Ok(()) => {
            if formatter.is_json() {
                formatter.json(&ArchiveOutput {
                    status: "success",
                    bucket: path.bucket,
                    key,
                    storage_class: args.storage_class.to_string(),
                });
            } else {
                formatter.success(&format!("'{path}' moved to {}.", args.storage_class));
            }
            ExitCode::Success
        }
        Err(e) => report(&formatter, "Failed to archive object", &e),
    }
}
