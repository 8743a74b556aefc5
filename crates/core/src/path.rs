//! Path parsing and key helpers
//!
//! Remote locations are written as `alias/bucket[/key]`. The key part is kept
//! verbatim; folder semantics come only from a trailing `/`.

use crate::error::{Error, Result};

/// A parsed remote path pointing to an S3 location
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemotePath {
    /// Alias name
    pub alias: String,
    /// Bucket name
    pub bucket: String,
    /// Object key or folder prefix (empty for bucket root)
    pub key: String,
}

impl RemotePath {
    /// Create a new RemotePath
    pub fn new(
        alias: impl Into<String>,
        bucket: impl Into<String>,
        key: impl Into<String>,
    ) -> Self {
        Self {
            alias: alias.into(),
            bucket: bucket.into(),
            key: key.into(),
        }
    }

    /// Whether the path names a folder (bucket root or trailing `/`)
    pub fn is_dir(&self) -> bool {
        self.key.is_empty() || self.key.ends_with('/')
    }

    /// Return the key, failing when the path only names a bucket
    pub fn require_key(&self) -> Result<&str> {
        if self.key.is_empty() {
            Err(Error::InvalidPath(format!(
                "'{self}' names a bucket. Use format: alias/bucket/key"
            )))
        } else {
            Ok(&self.key)
        }
    }

    /// Get the full path as a string (alias/bucket/key)
    pub fn to_full_path(&self) -> String {
        if self.key.is_empty() {
            format!("{}/{}", self.alias, self.bucket)
        } else {
            format!("{}/{}/{}", self.alias, self.bucket, self.key)
        }
    }

    /// Join a child component onto this path's folder
    pub fn join(&self, child: &str) -> Self {
        Self {
            alias: self.alias.clone(),
            bucket: self.bucket.clone(),
            key: format!("{}{child}", normalize_prefix(&self.key)),
        }
    }
}

impl std::fmt::Display for RemotePath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_full_path())
    }
}

/// Parse `alias/bucket[/key]` into a RemotePath
pub fn parse_path(path: &str) -> Result<RemotePath> {
    if path.is_empty() {
        return Err(Error::InvalidPath("Path cannot be empty".into()));
    }

    let parts: Vec<&str> = path.splitn(3, '/').collect();

    let (alias, bucket, key) = match parts.as_slice() {
        [alias] => {
            return Err(Error::InvalidPath(format!(
                "Path '{alias}' is incomplete. Use format: alias/bucket[/key]"
            )));
        }
        [alias, bucket] => (*alias, *bucket, ""),
        [alias, bucket, key] => (*alias, *bucket, *key),
        _ => unreachable!(),
    };

    if !is_valid_alias_name(alias) {
        return Err(Error::InvalidPath(format!(
            "Invalid alias name '{alias}'. Use letters, digits, '_' or '-'"
        )));
    }

    if bucket.is_empty() {
        return Err(Error::InvalidPath("Bucket name cannot be empty".into()));
    }

    Ok(RemotePath::new(alias, bucket, key))
}

/// Append a trailing `/` to a non-empty prefix that lacks one
pub fn normalize_prefix(path: &str) -> String {
    if path.is_empty() || path.ends_with('/') {
        path.to_string()
    } else {
        format!("{path}/")
    }
}

/// Check if a string is a valid alias name
pub fn is_valid_alias_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}
