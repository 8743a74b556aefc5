//! empty command - Delete every object in a bucket, keeping the bucket

use clap::Args;
use s3mgr_core::bucket::empty_bucket;
use serde::Serialize;

use crate::commands::{get_client, parse_remote, report};
use crate::exit_code::ExitCode;
use crate::output::{Formatter, OutputConfig, Spinner};

/// Empty a bucket
#[derive(Args, Debug)]
pub struct EmptyArgs {
    /// Target path (alias/bucket)
    pub target: String,
}

#[derive(Debug, Serialize)]
struct EmptyOutput {
    status: &'static str,
    bucket: String,
    removed: usize,
}

/// Execute the empty command
pub async fn execute(args: EmptyArgs, output_config: OutputConfig) -> ExitCode {
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

    let spinner = Spinner::start(formatter.config(), &format!("Emptying {path}"));
    let result = empty_bucket(&client, &path.bucket).await;
    spinner.finish();

    match result {
        Ok(removed) => {
            if formatter.is_json() {
                formatter.json(&EmptyOutput {
                    status: "success",
                    bucket: path.bucket,
                    removed,
                });
            } else {
                formatter.success(&format!("Removed {removed} object(s) from '{path}'."));
            }
            ExitCode::Success
        }
        Err(e) => report(&formatter, "Failed to empty bucket", &e),
    }
}
