//! mb command - Make bucket
//!
//! Creates a new bucket on the specified storage service.

use clap::Args;
use s3mgr_core::bucket::create_bucket;
use s3mgr_core::{Acl, Alias, CreateBucketOptions};
use serde::Serialize;

use crate::commands::{connect, get_alias, parse_remote, report};
use crate::exit_code::ExitCode;
use crate::output::{Formatter, OutputConfig};

/// Create a bucket
#[derive(Args, Debug)]
pub struct MbArgs {
    /// Target path (alias/bucket)
    pub target: String,

    /// Ignore error if bucket already exists
    #[arg(short = 'p', long)]
    pub ignore_existing: bool,

    /// Region code or friendly name (overrides alias default)
    #[arg(long)]
    pub region: Option<String>,

    /// Canned ACL: private, public-read or public-read-write
    #[arg(long, default_value = "private")]
    pub acl: Acl,
}

#[derive(Debug, Serialize)]
struct MbOutput {
    status: &'static str,
    bucket: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
}

/// Execute the mb command
pub async fn execute(args: MbArgs, output_config: OutputConfig) -> ExitCode {
    let formatter = Formatter::new(output_config);

    let path = match parse_remote(&args.target, &formatter) {
        Ok(p) => p,
        Err(code) => return code,
    };

    if !path.key.is_empty() {
        formatter.error("Bucket path should not contain a key. Use format: alias/bucket");
        return ExitCode::UsageError;
    }

    let alias = match get_alias(&path.alias, &formatter) {
        Ok(a) => a,
        Err(code) => return code,
    };

    let alias = bucket_alias(alias, args.region.as_deref());
    let client = match connect(&alias, &formatter).await {
        Ok(c) => c,
        Err(code) => return code,
    };

    let options = CreateBucketOptions {
        region: Some(alias.region.clone()),
        acl: args.acl,
    };

    match create_bucket(&client, &path.bucket, &options).await {
        Ok(()) => {
            if formatter.is_json() {
                formatter.json(&MbOutput {
                    status: "success",
                    bucket: path.bucket,
                    message: None,
                });
            } else {
                formatter.success(&format!("Bucket '{path}' created successfully."));
            }
            ExitCode::Success
        }
        Err(e) if args.ignore_existing && already_owned(e.code()) => {
            if formatter.is_json() {
                formatter.json(&MbOutput {
                    status: "success",
                    bucket: path.bucket,
                    message: Some("Bucket already exists".to_string()),
                });
            } else {
                formatter.println(&format!("Bucket '{path}' already exists."));
            }
            ExitCode::Success
        }
        Err(e) => report(&formatter, "Failed to create bucket", &e),
    }
}

/// The alias to create the bucket through; `--region` moves the client too
fn bucket_alias(alias: Alias, region: Option<&str>) -> Alias {
    match region {
        Some(region) => alias.with_region(region),
        None => alias,
    }
}

fn already_owned(code: Option<&str>) -> bool {
    matches!(code, Some("BucketAlreadyOwnedByYou"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct TestCli {
        #[command(flatten)]
        args: MbArgs,
    }

    #[test]
    fn test_mb_args() {
        let cli = TestCli::try_parse_from(["mb", "aws/new-bucket", "--acl", "public-read", "-p"])
            .unwrap();
        assert_eq!(cli.args.acl, Acl::PublicRead);
        assert!(cli.args.ignore_existing);
        assert!(cli.args.region.is_none());
    }

    #[test]
    fn test_mb_rejects_unknown_acl() {
        assert!(TestCli::try_parse_from(["mb", "aws/b", "--acl", "everyone"]).is_err());
    }

    #[test]
    fn test_region_flag_moves_the_client() {
        let alias = Alias::new("aws").with_region("us-west-2");

        let target = bucket_alias(alias.clone(), Some("frankfurt"));
        assert_eq!(target.region, "eu-central-1");
        assert_eq!(target.name, "aws");

        let target = bucket_alias(alias, None);
        assert_eq!(target.region, "us-west-2");
    }

    #[test]
    fn test_already_owned() {
        assert!(already_owned(Some("BucketAlreadyOwnedByYou")));
        // owned by someone else is still an error
        assert!(!already_owned(Some("BucketAlreadyExists")));
        assert!(!already_owned(None));
    }
}
