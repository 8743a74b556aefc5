//! rb command - Remove bucket

use clap::Args;
use s3mgr_core::bucket::delete_bucket;
use serde::Serialize;

use crate::commands::{get_client, parse_remote, report};
use crate::exit_code::ExitCode;
use crate::output::{Formatter, OutputConfig, Spinner};

/// Remove a bucket
#[derive(Args, Debug)]
pub struct RbArgs {
    /// Target path (alias/bucket)
    pub target: String,

    /// Delete every object in the bucket first
    #[arg(long)]
    pub force: bool,
}

#[derive(Debug, Serialize)]
struct RbOutput {
    status: &'static str,
    bucket: String,
}

/// Execute the rb command
pub async fn execute(args: RbArgs, output_config: OutputConfig) -> ExitCode {
    let formatter = Formatter::new(output_config);

    let path = match parse_remote(&args.target, &formatter) {
        Ok(p) => p,
        Err(code) => return code,
    };

    if !path.key.is_empty() {
        formatter.error("Bucket path should not contain a key. Use format: alias/bucket");
        return ExitCode::UsageError;
    }

    let client = match get_client(&path.alias, &formatter).await {
        Ok(c) => c,
        Err(code) => return code,
    };

    let spinner = Spinner::start(formatter.config(), &format!("Removing {path}"));
    let result = delete_bucket(&client, &path.bucket, args.force).await;
    spinner.finish();

    match result {
        Ok(()) => {
            if formatter.is_json() {
                formatter.json(&RbOutput {
                    status: "success",
                    bucket: path.bucket,
                });
            } else {
                formatter.success(&format!("Bucket '{path}' removed successfully."));
            }
            ExitCode::Success
        }
        Err(e) => {
            let code = report(&formatter, "Failed to remove bucket", &e);
            if e.code() == Some("BucketNotEmpty") && !args.force {
                formatter.warning("Use --force to delete its objects first.");
            }
            code
        }
    }
}
