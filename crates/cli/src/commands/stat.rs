//! stat command - Show object metadata
//!
//! Displays size, storage class and, for archived objects, where a restore
//! request stands.

use clap::Args;
use s3mgr_core::object::object_status;
use s3mgr_core::{ObjectInfo, StorageClass};
use serde::Serialize;

use crate::commands::{get_client, parse_remote, report};
use crate::exit_code::ExitCode;
use crate::output::{Formatter, OutputConfig};

/// Show object metadata
#[derive(Args, Debug)]
pub struct StatArgs {
    /// Object path (alias/bucket/key)
    pub path: String,
}

#[derive(Debug, Serialize)]
struct StatOutput {
    #[serde(flatten)]
    info: ObjectInfo,
    restore_status: RestoreStatus,
}

/// Where an object stands with respect to archival and restore
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "state")]
enum RestoreStatus {
    /// Readable without a restore
    NotArchived,
    /// Archived with no restore requested
    Archived,
    /// A restore request is still running
    InProgress,
    /// A restored copy is readable until the expiry date
    Restored {
        #[serde(skip_serializing_if = "Option::is_none")]
        expiry: Option<String>,
    },
}

impl RestoreStatus {
    /// Derive the status from the storage class and the `x-amz-restore` header
    fn of(info: &ObjectInfo) -> Self {
        if let Some(header) = info.restore.as_deref() {
            return Self::from_header(header);
        }

        let archived = info
            .storage_class
            .as_deref()
            .and_then(|class| class.parse::<StorageClass>().ok())
            .is_some_and(|class| class.is_archival());

        if archived {
            Self::Archived
        } else {
            Self::NotArchived
        }
    }

    // ongoing-request="false", expiry-date="Fri, 21 Dec 2012 00:00:00 GMT"
    fn from_header(header: &str) -> Self {
        if header.contains("ongoing-request=\"true\"") {
            return Self::InProgress;
        }

        let expiry = header
            .split_once("expiry-date=\"")
            .and_then(|(_, rest)| rest.split_once('"'))
            .map(|(date, _)| date.to_string());

        Self::Restored { expiry }
    }

    fn describe(&self) -> String {
        match self {
            Self::NotArchived => "not archived".to_string(),
            Self::Archived => "archived, restore required".to_string(),
            Self::InProgress => "restore in progress".to_string(),
            Self::Restored { expiry: Some(date) } => format!("restored until {date}"),
            Self::Restored { expiry: None } => "restored".to_string(),
        }
    }
}

/// Execute the stat command
pub async fn execute(args: StatArgs, output_config: OutputConfig) -> ExitCode {
    let formatter = Formatter::new(output_config);

    let path = match parse_remote(&args.path, &formatter) {
        Ok(p) => p,
        Err(code) => return code,
    };

    let key = match path.require_key() {
        Ok(k) => k,
        Err(e) => return report(&formatter, "Cannot stat", &e),
    };

    let client = match get_client(&path.alias, &formatter).await {
        Ok(c) => c,
        Err(code) => return code,
    };

    let info = match object_status(&client, &path.bucket, key).await {
        Ok(info) => info,
        Err(e) => return report(&formatter, "Failed to get object metadata", &e),
    };

    let restore_status = RestoreStatus::of(&info);

    if formatter.is_json() {
        formatter.json(&StatOutput { info, restore_status });
        return ExitCode::Success;
    }

    let mut rows = vec![
        vec!["Name".to_string(), path.to_full_path()],
        vec![
            "Size".to_string(),
            format!("{} ({} bytes)", info.size_human, info.size_bytes),
        ],
    ];
    if let Some(modified) = info.last_modified {
        rows.push(vec!["Modified".to_string(), modified.to_string()]);
    }
    if let Some(etag) = &info.etag {
        rows.push(vec!["ETag".to_string(), etag.clone()]);
    }
    if let Some(content_type) = &info.content_type {
        rows.push(vec!["Type".to_string(), content_type.clone()]);
    }
    if let Some(class) = &info.storage_class {
        rows.push(vec!["Class".to_string(), class.clone()]);
    }
    rows.push(vec!["Restore".to_string(), restore_status.describe()]);

    formatter.table(&["Field", "Value"], rows);
    ExitCode::Success
}
