//! restore command - Request a temporary copy of an archived object
//!
//! Restores are asynchronous on the service side; use `stat` to follow
//! their progress.

use clap::Args;
use s3mgr_core::object::restore_object;
use s3mgr_core::{RestoreOptions, RestoreTier};
use serde::Serialize;

use crate::commands::{get_client, parse_remote, report};
use crate::exit_code::ExitCode;
use crate::output::{Formatter, OutputConfig};

/// Restore an archived object
#[derive(Args, Debug)]
pub struct RestoreArgs {
    /// Object path (alias/bucket/key)
    pub path: String,

    /// Days the restored copy stays available
    #[arg(long, default_value_t = 1)]
    pub days: i32,

    /// Retrieval tier: expedited, standard or bulk
    #[arg(long, default_value = "standard")]
    pub tier: RestoreTier,
}

#[derive(Debug, Serialize)]
struct RestoreOutput {
    status: &'static str,
    bucket: String,
    key: String,
    days: i32,
    tier: String,
}

/// Execute the restore command
pub async fn execute(args: RestoreArgs, output_config: OutputConfig) -> ExitCode {
    let formatter = Formatter::new(output_config);

    let path = match parse_remote(&args.path, &formatter) {
        Ok(p) => p,
        Err(code) => return code,
    };

    let key = match path.require_key() {
        Ok(k) => k.to_string(),
        Err(e) => return report(&formatter, "Cannot restore", &e),
    };

    let client = match get_client(&path.alias, &formatter).await {
        Ok(c) => c,
        Err(code) => return code,
    };

    let options = RestoreOptions {
        days: args.days,
        tier: args.tier,
    };

    match restore_object(&client, &path.bucket, &key, &options).await {
        Ok(()) => {
            if formatter.is_json() {
                formatter.json(&RestoreOutput {
                    status: "requested",
                    bucket: path.bucket,
                    key,
                    days: options.days,
                    tier: options.tier.to_string(),
                });
            } else {
                formatter.success(&format!(
                    "Restore of '{path}' requested ({} tier, {} day(s)).",
                    options.tier, options.days
                ));
            }
            ExitCode::Success
        }
        Err(e) if e.code() == Some("RestoreAlreadyInProgress") => {
            formatter.warning(&format!("A restore of '{path}' is already in progress."));
            ExitCode::Conflict
        }
        Err(e) => report(&formatter, "Failed to restore object", &e),
    }
}
