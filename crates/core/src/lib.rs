//! s3mgr-core: Core library for the s3mgr object-storage tool
//!
//! This crate provides:
//! - Prefix-tree listing, a folder view over flat object keys
//! - Bucket and object lifecycle helpers (folders, uploads, archival, restore)
//! - Configuration and alias management
//! - The ObjectStore trait the SDK adapter implements
//!
//! Nothing here depends on a specific S3 SDK; every operation takes the store
//! it talks to as an argument.

pub mod alias;
pub mod bucket;
pub mod config;
pub mod error;
pub mod listing;
pub mod object;
pub mod path;
pub mod region;
pub mod traits;
pub mod types;

pub use alias::{Alias, AliasManager, BucketLookup, RetryConfig, TimeoutConfig};
pub use bucket::CreateBucketOptions;
pub use config::{ColorMode, Config, ConfigManager, OutputFormat};
pub use error::{Error, Result};
pub use listing::{list_contents, ListRequest, Listing};
pub use object::{RestoreOptions, UploadOptions};
pub use path::{parse_path, RemotePath};
pub use traits::{ListOptions, ListPage, ObjectInfo, ObjectStore, PutOptions};
pub use types::{Acl, Encryption, RestoreTier, StorageClass};
