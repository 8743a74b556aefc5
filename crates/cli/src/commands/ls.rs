//! ls command - Browse a bucket like a folder tree
//!
//! Shows the files directly under a path and its immediate sub-folders, or
//! with `--recursive` every file below the path.

use clap::Args;
use s3mgr_core::{list_contents, ListRequest, Listing, ObjectInfo};
use serde::Serialize;

use crate::commands::{get_client, parse_remote, report};
use crate::exit_code::ExitCode;
use crate::output::{Formatter, OutputConfig};

/// List files and folders
#[derive(Args, Debug)]
pub struct LsArgs {
    /// Remote path (alias/bucket[/folder])
    pub path: String,

    /// List every file below the path instead of one folder level
    #[arg(short, long)]
    pub recursive: bool,

    /// Summarize output (show totals)
    #[arg(long)]
    pub summarize: bool,
}

/// Output structure for ls command (JSON format)
#[derive(Debug, Serialize)]
struct LsOutput<'a> {
    bucket: &'a str,
    prefix: &'a str,
    files: &'a [ObjectInfo],
    dirs: &'a [String],
    #[serde(skip_serializing_if = "Option::is_none")]
    summary: Option<Summary>,
}

#[derive(Debug, Serialize)]
struct Summary {
    total_files: usize,
    total_dirs: usize,
    total_size_bytes: i64,
    total_size_human: String,
}

impl Summary {
    fn of(listing: &Listing) -> Self {
        let total = listing.total_size();
        Self {
            total_files: listing.files.len(),
            total_dirs: listing.dirs.len(),
            total_size_bytes: total,
            total_size_human: humansize::format_size(total.max(0) as u64, humansize::BINARY),
        }
    }
}

/// Execute the ls command
pub async fn execute(args: LsArgs, output_config: OutputConfig) -> ExitCode {
    let formatter = Formatter::new(output_config);

    let path = match parse_remote(&args.path, &formatter) {
        Ok(p) => p,
        Err(code) => return code,
    };

    let client = match get_client(&path.alias, &formatter).await {
        Ok(c) => c,
        Err(code) => return code,
    };

    let request = ListRequest::new(&path.bucket)
        .path(&path.key)
        .include_subdirectories(args.recursive);

    let listing = match list_contents(&client, &request).await {
        Ok(listing) => listing,
        Err(e) => return report(&formatter, "Failed to list objects", &e),
    };

    let summary = args.summarize.then(|| Summary::of(&listing));

    if formatter.is_json() {
        formatter.json(&LsOutput {
            bucket: &request.bucket,
            prefix: &request.path,
            files: &listing.files,
            dirs: &listing.dirs,
            summary,
        });
        return ExitCode::Success;
    }

    if listing.is_empty() {
        formatter.println(&format!("No objects under {path}"));
    } else {
        formatter.table(&["Modified", "Size", "Class", "Name"], rows(&listing, &request.path));
    }

    if let Some(summary) = summary {
        formatter.println(&format!(
            "\nTotal: {} files, {} folders, {}",
            summary.total_files, summary.total_dirs, summary.total_size_human
        ));
    }

    ExitCode::Success
}

/// Table rows: folders first, then files, names relative to the prefix
fn rows(listing: &Listing, prefix: &str) -> Vec<Vec<String>> {
    let relative = |key: &str| key.strip_prefix(prefix).unwrap_or(key).to_string();

    let dirs = listing.dirs.iter().map(|dir| {
        vec![
            String::new(),
            "DIR".to_string(),
            String::new(),
            relative(dir),
        ]
    });

    let files = listing.files.iter().map(|file| {
        vec![
            file.last_modified
                .map(|t| t.strftime("%Y-%m-%d %H:%M:%S").to_string())
                .unwrap_or_default(),
            file.size_human.clone(),
            file.storage_class.clone().unwrap_or_default(),
            relative(&file.key),
        ]
    });

    dirs.chain(files).collect()
}
