//! mkdir command - Create a folder marker
//!
//! Buckets have no real folders; an empty object whose key ends in `/`
//! makes the folder show up in listings before anything is uploaded into it.

use clap::Args;
use s3mgr_core::object::create_folder;
use s3mgr_core::Acl;
use serde::Serialize;

use crate::commands::{get_client, parse_remote, report};
use crate::exit_code::ExitCode;
use crate::output::{Formatter, OutputConfig};

/// Create a folder
#[derive(Args, Debug)]
pub struct MkdirArgs {
    /// Folder path (alias/bucket/folder)
    pub path: String,

    /// Make the folder marker publicly readable
    #[arg(long)]
    pub public: bool,
}

#[derive(Debug, Serialize)]
struct MkdirOutput {
    status: &'static str,
    bucket: String,
    key: String,
}

/// Execute the mkdir command
pub async fn execute(args: MkdirArgs, output_config: OutputConfig) -> ExitCode {
    let formatter = Formatter::new(output_config);

    let path = match parse_remote(&args.path, &formatter) {
        Ok(p) => p,
        Err(code) => return code,
    };

    let client = match get_client(&path.alias, &formatter).await {
        Ok(c) => c,
        Err(code) => return code,
    };

    match create_folder(&client, &path.bucket, &path.key, Acl::for_object(args.public)).await {
        Ok(key) => {
            if formatter.is_json() {
                formatter.json(&MkdirOutput {
                    status: "success",
                    bucket: path.bucket,
                    key,
                });
            } else {
                formatter.success(&format!("Folder '{}/{}/{key}' created.", path.alias, path.bucket));
            }
            ExitCode::Success
        }
        Err(e) => report(&formatter, "Failed to create folder", &e),
    }
}
