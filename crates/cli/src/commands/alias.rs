//! Alias management commands
//!
//! Aliases name a storage endpoint plus the credentials used to reach it.
//! Leaving out the keys makes the alias use the SDK's ambient credential chain.

use clap::Subcommand;
use s3mgr_core::{Alias, AliasManager, BucketLookup, Error, RetryConfig};
use serde::Serialize;

use crate::commands::report;
use crate::exit_code::ExitCode;
use crate::output::{Formatter, OutputConfig};

/// Alias subcommands for managing storage service connections
#[derive(Subcommand, Debug)]
pub enum AliasCommands {
    /// Add or update an alias
    Set(SetArgs),

    /// List all configured aliases
    List,

    /// Remove an alias
    Remove(RemoveArgs),
}

/// Arguments for the `alias set` command
#[derive(clap::Args, Debug)]
pub struct SetArgs {
    /// Alias name (e.g., "aws", "local", "backup")
    pub name: String,

    /// S3 endpoint URL; omit to use AWS
    #[arg(long)]
    pub endpoint: Option<String>,

    /// Access key ID; omit to use the ambient credential chain
    #[arg(long, env = "S3MGR_ACCESS_KEY", requires = "secret_key")]
    pub access_key: Option<String>,

    /// Secret access key
    #[arg(long, env = "S3MGR_SECRET_KEY", requires = "access_key", hide_env_values = true)]
    pub secret_key: Option<String>,

    /// Region code or friendly name (e.g., "eu-west-1", "frankfurt")
    #[arg(long, default_value = "us-east-1")]
    pub region: String,

    /// Bucket lookup style: auto, path, or dns
    #[arg(long, default_value = "auto")]
    pub bucket_lookup: BucketLookup,

    /// Maximum attempts per request, including the first
    #[arg(long)]
    pub max_attempts: Option<u32>,
}

/// Arguments for the `alias remove` command
#[derive(clap::Args, Debug)]
pub struct RemoveArgs {
    /// Name of the alias to remove
    pub name: String,
}

/// JSON output for alias list
#[derive(Serialize)]
struct AliasListOutput {
    aliases: Vec<AliasInfo>,
}

/// Alias information for output (without secrets)
#[derive(Serialize)]
struct AliasInfo {
    name: String,
    endpoint: String,
    region: String,
    bucket_lookup: BucketLookup,
    credentials: &'static str,
}

impl From<&Alias> for AliasInfo {
    fn from(alias: &Alias) -> Self {
        Self {
            name: alias.name.clone(),
            endpoint: alias.endpoint.clone().unwrap_or_else(|| "aws".to_string()),
            region: alias.region.clone(),
            bucket_lookup: alias.bucket_lookup,
            credentials: if alias.static_credentials().is_some() {
                "static"
            } else {
                "environment"
            },
        }
    }
}

/// JSON output for alias set/remove operations
#[derive(Serialize)]
struct AliasOperationOutput {
    status: &'static str,
    alias: String,
}

/// Execute an alias subcommand
pub async fn execute(cmd: AliasCommands, output_config: OutputConfig) -> ExitCode {
    let formatter = Formatter::new(output_config);

    let manager = match AliasManager::new() {
        Ok(am) => am,
        Err(e) => return report(&formatter, "Failed to load aliases", &e),
    };

    match cmd {
        AliasCommands::Set(args) => execute_set(args, &manager, &formatter),
        AliasCommands::List => execute_list(&manager, &formatter),
        AliasCommands::Remove(args) => execute_remove(args, &manager, &formatter),
    }
}

fn build_alias(args: SetArgs) -> Alias {
    let mut alias = Alias::new(args.name).with_region(&args.region);
    alias.endpoint = args.endpoint;
    alias.access_key = args.access_key;
    alias.secret_key = args.secret_key;
    alias.bucket_lookup = args.bucket_lookup;
    alias.retry = args.max_attempts.map(|max_attempts| RetryConfig {
        max_attempts,
        ..Default::default()
    });
    alias
}

fn execute_set(args: SetArgs, manager: &AliasManager, formatter: &Formatter) -> ExitCode {
    let alias = build_alias(args);
    let name = alias.name.clone();

    match manager.set(alias) {
        Ok(()) => {
            if formatter.is_json() {
                formatter.json(&AliasOperationOutput {
                    status: "success",
                    alias: name,
                });
            } else {
                formatter.success(&format!("Alias '{name}' configured successfully."));
            }
            ExitCode::Success
        }
        Err(e) => report(formatter, "Failed to save alias", &e),
    }
}

fn execute_list(manager: &AliasManager, formatter: &Formatter) -> ExitCode {
    let aliases = match manager.list() {
        Ok(aliases) => aliases,
        Err(e) => return report(formatter, "Failed to list aliases", &e),
    };

    let infos: Vec<AliasInfo> = aliases.iter().map(AliasInfo::from).collect();

    if formatter.is_json() {
        formatter.json(&AliasListOutput { aliases: infos });
    } else if infos.is_empty() {
        formatter.println("No aliases configured.");
    } else {
        let rows = infos
            .into_iter()
            .map(|i| vec![i.name, i.endpoint, i.region, i.bucket_lookup.to_string(), i.credentials.into()])
            .collect();
        formatter.table(&["Name", "Endpoint", "Region", "Lookup", "Credentials"], rows);
    }

    ExitCode::Success
}

fn execute_remove(args: RemoveArgs, manager: &AliasManager, formatter: &Formatter) -> ExitCode {
    match manager.remove(&args.name) {
        Ok(_) => {
            if formatter.is_json() {
                formatter.json(&AliasOperationOutput {
                    status: "success",
                    alias: args.name,
                });
            } else {
                formatter.success(&format!("Alias '{}' removed successfully.", args.name));
            }
            ExitCode::Success
        }
        Err(Error::AliasNotFound(_)) => {
            formatter.error(&format!("Alias '{}' not found", args.name));
            ExitCode::NotFound
        }
        Err(e) => report(formatter, "Failed to remove alias", &e),
    }
}
