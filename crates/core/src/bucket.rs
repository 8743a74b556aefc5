//! Bucket lifecycle operations
//!
//! Create, empty and delete buckets through any [`ObjectStore`].

use crate::error::{Error, Result};
use crate::region::{resolve_region, DEFAULT_REGION};
use crate::traits::{ListOptions, ObjectStore};
use crate::types::Acl;

/// Maximum keys per delete request (S3 limit)
pub const DELETE_BATCH_SIZE: usize = 1000;

/// Options for bucket creation
#[derive(Debug, Clone, Default)]
pub struct CreateBucketOptions {
    /// Region code or friendly name; `None` sends no location constraint
    pub region: Option<String>,

    /// Canned ACL for the new bucket
    pub acl: Acl,
}

/// Create a bucket
pub async fn create_bucket(
    store: &dyn ObjectStore,
    bucket: &str,
    options: &CreateBucketOptions,
) -> Result<()> {
    validate_bucket_name(bucket)?;

    // us-east-1 is the implicit location and rejects an explicit constraint
    let region = options
        .region
        .as_deref()
        .map(resolve_region)
        .filter(|r| r != DEFAULT_REGION);

    tracing::debug!(bucket, region = ?region, acl = %options.acl, "creating bucket");
    store.create_bucket(bucket, region, options.acl).await
}

/// Delete a bucket, emptying it first when `force` is set
pub async fn delete_bucket(store: &dyn ObjectStore, bucket: &str, force: bool) -> Result<()> {
    if force {
        let removed = empty_bucket(store, bucket).await?;
        tracing::debug!(bucket, removed, "bucket emptied before delete");
    }

    store.delete_bucket(bucket).await
}

/// Delete every object in a bucket, returning how many were removed
///
/// Each listed page is deleted before the next one is requested.
pub async fn empty_bucket(store: &dyn ObjectStore, bucket: &str) -> Result<usize> {
    let mut removed = 0;
    let mut continuation_token: Option<String> = None;

    loop {
        let options = ListOptions {
            max_keys: Some(DELETE_BATCH_SIZE as i32),
            continuation_token: continuation_token.take(),
            ..Default::default()
        };

        let page = store.list_objects(bucket, options).await?;
        let keys: Vec<String> = page.items.into_iter().map(|item| item.key).collect();

        for chunk in keys.chunks(DELETE_BATCH_SIZE) {
            let deleted = store.delete_objects(bucket, chunk.to_vec()).await?;
            if deleted.len() < chunk.len() {
                tracing::warn!(
                    bucket,
                    requested = chunk.len(),
                    deleted = deleted.len(),
                    "some objects were not deleted"
                );
            }
            removed += deleted.len();
        }

        match page.continuation_token {
            Some(token) if page.truncated => continuation_token = Some(token),
            _ => break,
        }
    }

    Ok(removed)
}

/// Check a bucket name against the S3 naming rules
pub fn validate_bucket_name(bucket: &str) -> Result<()> {
    if bucket.len() < 3 || bucket.len() > 63 {
        return Err(Error::InvalidArgument(
            "Bucket name must be between 3 and 63 characters".into(),
        ));
    }

    if !bucket
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '.')
    {
        return Err(Error::InvalidArgument(format!(
            "Bucket name '{bucket}' may only contain lowercase letters, digits, '-' and '.'"
        )));
    }

    let edge_ok = |c: Option<char>| c.is_some_and(|c| c.is_ascii_alphanumeric());
    if !edge_ok(bucket.chars().next()) || !edge_ok(bucket.chars().last()) {
        return Err(Error::InvalidArgument(format!(
            "Bucket name '{bucket}' must start and end with a letter or digit"
        )));
    }

    Ok(())
}
