//! CLI command definitions and execution
//!
//! Each subcommand lives in its own module with an `Args` struct and an
//! `execute` function returning an exit code.

use clap::{Parser, Subcommand};
use s3mgr_core::{Alias, AliasManager, ColorMode, ConfigManager, Error, OutputFormat, RemotePath};
use s3mgr_s3::S3Client;

use crate::exit_code::ExitCode;
use crate::output::{Formatter, OutputConfig};

mod alias;
mod archive;
mod empty;
mod ls;
mod mb;
mod mkdir;
mod put;
mod rb;
mod restore;
mod rm;
mod stat;

/// s3mgr - bucket and object lifecycle tooling
///
/// Manage buckets, folders, uploads and archival storage on AWS S3
/// and other S3-compatible services.
#[derive(Parser, Debug)]
#[command(name = "s3mgr")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format: human-readable or JSON
    #[arg(long, global = true, default_value = "false")]
    pub json: bool,

    /// Disable colored output
    #[arg(long, global = true, default_value = "false")]
    pub no_color: bool,

    /// Disable progress spinners
    #[arg(long, global = true, default_value = "false")]
    pub no_progress: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true, default_value = "false")]
    pub quiet: bool,

    /// Enable debug logging
    #[arg(long, global = true, default_value = "false")]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage storage endpoint aliases
    #[command(subcommand)]
    Alias(alias::AliasCommands),

    /// List the files and folders under a path
    Ls(ls::LsArgs),

    /// Create a bucket
    Mb(mb::MbArgs),

    /// Remove a bucket
    Rb(rb::RbArgs),

    /// Delete every object in a bucket
    Empty(empty::EmptyArgs),

    /// Create a folder
    Mkdir(mkdir::MkdirArgs),

    /// Upload a local file
    Put(put::PutArgs),

    /// Remove objects
    Rm(rm::RmArgs),

    /// Move objects into archival storage
    Archive(archive::ArchiveArgs),

    /// Restore archived objects for reading
    Restore(restore::RestoreArgs),

    /// Show object metadata and restore status
    Stat(stat::StatArgs),
}

/// Execute the CLI command and return an exit code
pub async fn execute(cli: Cli) -> ExitCode {
    let output_config = output_config(&cli);

    match cli.command {
        Commands::Alias(cmd) => alias::execute(cmd, output_config).await,
        Commands::Ls(args) => ls::execute(args, output_config).await,
        Commands::Mb(args) => mb::execute(args, output_config).await,
        Commands::Rb(args) => rb::execute(args, output_config).await,
        Commands::Empty(args) => empty::execute(args, output_config).await,
        Commands::Mkdir(args) => mkdir::execute(args, output_config).await,
        Commands::Put(args) => put::execute(args, output_config).await,
        Commands::Rm(args) => rm::execute(args, output_config).await,
        Commands::Archive(args) => archive::execute(args, output_config).await,
        Commands::Restore(args) => restore::execute(args, output_config).await,
        Commands::Stat(args) => stat::execute(args, output_config).await,
    }
}

/// Merge command-line flags with the defaults from the config file
fn output_config(cli: &Cli) -> OutputConfig {
    let defaults = ConfigManager::new()
        .and_then(|manager| manager.load())
        .map(|config| config.defaults)
        .unwrap_or_else(|e| {
            tracing::debug!(error = %e, "using built-in output defaults");
            Default::default()
        });

    let no_color = cli.no_color || defaults.color == ColorMode::Never;
    if !no_color && defaults.color == ColorMode::Always {
        console::set_colors_enabled(true);
        console::set_colors_enabled_stderr(true);
    }

    OutputConfig {
        json: cli.json || defaults.output == OutputFormat::Json,
        no_color,
        no_progress: cli.no_progress || !defaults.progress,
        quiet: cli.quiet,
    }
}

/// Parse an `alias/bucket[/key]` argument, reporting usage errors
pub(crate) fn parse_remote(path: &str, formatter: &Formatter) -> Result<RemotePath, ExitCode> {
    s3mgr_core::parse_path(path).map_err(|e| {
        formatter.error(&e.to_string());
        ExitCode::from(&e)
    })
}

/// Look up a configured alias by name
pub(crate) fn get_alias(alias_name: &str, formatter: &Formatter) -> Result<Alias, ExitCode> {
    let alias_manager = AliasManager::new().map_err(|e| report(formatter, "Failed to load aliases", &e))?;

    match alias_manager.get(alias_name) {
        Ok(a) => Ok(a),
        Err(Error::AliasNotFound(_)) => {
            formatter.error(&format!("Alias '{alias_name}' not found"));
            Err(ExitCode::NotFound)
        }
        Err(e) => Err(report(formatter, "Failed to get alias", &e)),
    }
}

/// Build a client for an alias
pub(crate) async fn connect(alias: &Alias, formatter: &Formatter) -> Result<S3Client, ExitCode> {
    S3Client::new(alias)
        .await
        .map_err(|e| report(formatter, "Failed to create S3 client", &e))
}

/// Look up an alias and build a client for it
pub(crate) async fn get_client(alias_name: &str, formatter: &Formatter) -> Result<S3Client, ExitCode> {
    let alias = get_alias(alias_name, formatter)?;
    connect(&alias, formatter).await
}

/// Print an error with context and pick the matching exit code
pub(crate) fn report(formatter: &Formatter, context: &str, err: &Error) -> ExitCode {
    formatter.error(&format!("{context}: {err}"));
    ExitCode::from(err)
}
