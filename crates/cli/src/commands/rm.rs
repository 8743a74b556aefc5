//! rm command - Remove objects
//!
//! Deletes one or more objects by their full key. Folders are not walked;
//! remove a folder marker by passing its key with the trailing `/`.

use std::collections::HashMap;
use std::future::Future;

use clap::Args;
use s3mgr_core::object::delete_file;
use s3mgr_s3::S3Client;
use serde::Serialize;

use crate::commands::{get_client, parse_remote, report};
use crate::exit_code::ExitCode;
use crate::output::{Formatter, OutputConfig};

/// Remove objects
#[derive(Args, Debug)]
pub struct RmArgs {
    /// Object paths to remove (alias/bucket/key)
    #[arg(required = true)]
    pub paths: Vec<String>,

    /// Continue with the remaining paths after a failure
    #[arg(long)]
    pub keep_going: bool,
}

#[derive(Debug, Serialize)]
struct RmOutput {
    deleted: Vec<String>,
    failed: Vec<String>,
}

/// One client per alias, built on first use
struct Clients<C> {
    by_alias: HashMap<String, C>,
}

impl<C> Clients<C> {
    fn new() -> Self {
        Self {
            by_alias: HashMap::new(),
        }
    }

    async fn get_or_connect<F, Fut>(&mut self, alias: &str, connect: F) -> Result<&C, ExitCode>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<C, ExitCode>>,
    {
        if !self.by_alias.contains_key(alias) {
            let client = connect().await?;
            self.by_alias.insert(alias.to_string(), client);
        }
        self.by_alias.get(alias).ok_or(ExitCode::GeneralError)
    }
}

/// Execute the rm command
pub async fn execute(args: RmArgs, output_config: OutputConfig) -> ExitCode {
    let formatter = Formatter::new(output_config);
    let mut clients = Clients::new();
    let mut output = RmOutput {
        deleted: Vec::new(),
        failed: Vec::new(),
    };
    let mut exit = ExitCode::Success;

    for raw in &args.paths {
        let code = remove_one(raw, &formatter, &mut clients, &mut output.deleted).await;
        if code != ExitCode::Success {
            output.failed.push(raw.clone());
            exit = code;
            if !args.keep_going {
                break;
            }
        }
    }

    if formatter.is_json() {
        formatter.json(&output);
    }

    exit
}

async fn remove_one(
    raw: &str,
    formatter: &Formatter,
    clients: &mut Clients<S3Client>,
    deleted: &mut Vec<String>,
) -> ExitCode {
    let path = match parse_remote(raw, formatter) {
        Ok(p) => p,
        Err(code) => return code,
    };

    let key = match path.require_key() {
        Ok(k) => k,
        Err(e) => return report(formatter, "Cannot remove", &e),
    };

    let client = match clients
        .get_or_connect(&path.alias, || get_client(&path.alias, formatter))
        .await
    {
        Ok(c) => c,
        Err(code) => return code,
    };

    match delete_file(client, &path.bucket, key).await {
        Ok(()) => {
            if !formatter.is_json() {
                formatter.success(&format!("Removed '{path}'."));
            }
            deleted.push(path.to_full_path());
            ExitCode::Success
        }
        Err(e) => report(formatter, &format!("Failed to remove '{path}'"), &e),
    }
}
