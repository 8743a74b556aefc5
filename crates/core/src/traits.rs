//! ObjectStore trait definition
//!
//! This trait defines the interface for S3-compatible storage operations.
//! Everything in this crate is written against it, so the SDK adapter can be
//! swapped for a mock in tests.

use async_trait::async_trait;
use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::types::{Acl, Encryption, RestoreTier, StorageClass};

/// Metadata for a stored object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectInfo {
    /// Full object key
    pub key: String,

    /// Size in bytes
    pub size_bytes: i64,

    /// Human-readable size
    pub size_human: String,

    /// Last modified timestamp
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_modified: Option<Timestamp>,

    /// ETag (usually MD5 for single-part uploads)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub etag: Option<String>,

    /// Storage class as reported by the provider
    #[serde(skip_serializing_if = "Option::is_none")]
    pub storage_class: Option<String>,

    /// Content type
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,

    /// Restore status of an archived object (the raw `x-amz-restore` value)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub restore: Option<String>,
}

impl ObjectInfo {
    /// Create a new ObjectInfo with only a key and a size
    pub fn new(key: impl Into<String>, size: i64) -> Self {
        Self {
            key: key.into(),
            size_bytes: size,
            size_human: humansize::format_size(size.max(0) as u64, humansize::BINARY),
            last_modified: None,
            etag: None,
            storage_class: None,
            content_type: None,
            restore: None,
        }
    }

    /// Whether the key is a folder marker (ends with `/`)
    pub fn is_folder_marker(&self) -> bool {
        self.key.ends_with('/')
    }
}

/// One page of a listing
#[derive(Debug, Clone, Default)]
pub struct ListPage {
    /// Listed objects, in the order returned by the provider
    pub items: Vec<ObjectInfo>,

    /// Whether more items are available
    pub truncated: bool,

    /// Continuation token for the next page
    pub continuation_token: Option<String>,
}

/// Options for list operations
#[derive(Debug, Clone, Default)]
pub struct ListOptions {
    /// Prefix to filter by
    pub prefix: Option<String>,

    /// Maximum number of keys to return per request
    pub max_keys: Option<i32>,

    /// Continuation token for pagination
    pub continuation_token: Option<String>,
}

/// Parameters for writing an object
#[derive(Debug, Clone, Default)]
pub struct PutOptions {
    pub content_type: Option<String>,
    pub storage_class: Option<StorageClass>,
    pub encryption: Option<Encryption>,
    pub acl: Acl,
}

/// Trait for S3-compatible storage operations
///
/// This trait is implemented by the S3 adapter and can be mocked for testing.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// List a single page of objects in a bucket
    async fn list_objects(&self, bucket: &str, options: ListOptions) -> Result<ListPage>;

    /// Get object metadata
    async fn head_object(&self, bucket: &str, key: &str) -> Result<ObjectInfo>;

    /// Create a bucket, with a location constraint when `region` is given
    async fn create_bucket(&self, bucket: &str, region: Option<String>, acl: Acl) -> Result<()>;

    /// Delete an empty bucket
    async fn delete_bucket(&self, bucket: &str) -> Result<()>;

    /// Write an object
    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        data: Vec<u8>,
        options: PutOptions,
    ) -> Result<()>;

    /// Delete up to 1000 objects, returning the keys actually deleted
    async fn delete_objects(&self, bucket: &str, keys: Vec<String>) -> Result<Vec<String>>;

    /// Copy an object onto itself with a new storage class
    async fn copy_in_place(&self, bucket: &str, key: &str, class: StorageClass) -> Result<()>;

    /// Request a temporary restore of an archived object
    async fn restore_object(
        &self,
        bucket: &str,
        key: &str,
        days: i32,
        tier: RestoreTier,
    ) -> Result<()>;
}
