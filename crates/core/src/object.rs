//! Object lifecycle operations
//!
//! Folder markers, uploads, deletes and storage-class transitions, including
//! moving objects into archival storage and restoring them back out.

use std::path::Path;

use crate::error::{Error, Result};
use crate::path::normalize_prefix;
use crate::traits::{ObjectInfo, ObjectStore, PutOptions};
use crate::types::{Acl, Encryption, RestoreTier, StorageClass};

/// Upload parameters
#[derive(Debug, Clone, Default)]
pub struct UploadOptions {
    /// MIME type; the provider default applies when unset
    pub content_type: Option<String>,

    /// Storage class, `STANDARD` by default
    pub storage_class: StorageClass,

    /// Server-side encryption, AES256 by default
    pub encryption: Encryption,

    /// Object ACL
    pub acl: Acl,
}

/// Restore parameters for archived objects
#[derive(Debug, Clone, Copy)]
pub struct RestoreOptions {
    /// How long the restored copy stays available
    pub days: i32,

    /// Retrieval speed
    pub tier: RestoreTier,
}

impl Default for RestoreOptions {
    fn default() -> Self {
        Self {
            days: 1,
            tier: RestoreTier::default(),
        }
    }
}

/// Create an empty folder marker, returning the marker key
pub async fn create_folder(
    store: &dyn ObjectStore,
    bucket: &str,
    folder: &str,
    acl: Acl,
) -> Result<String> {
    if folder.trim_matches('/').is_empty() {
        return Err(Error::InvalidArgument("Folder name cannot be empty".into()));
    }

    let key = normalize_prefix(folder);
    let options = PutOptions {
        acl,
        ..Default::default()
    };

    tracing::debug!(bucket, key = %key, "creating folder marker");
    store.put_object(bucket, &key, Vec::new(), options).await?;
    Ok(key)
}

/// Upload a local file, returning its size in bytes
pub async fn upload_file(
    store: &dyn ObjectStore,
    bucket: &str,
    key: &str,
    file: &Path,
    options: &UploadOptions,
) -> Result<u64> {
    if key.is_empty() || key.ends_with('/') {
        return Err(Error::InvalidArgument(format!(
            "'{key}' is not a valid object key"
        )));
    }

    if let Encryption::Kms { key_id } = &options.encryption {
        if key_id.trim().is_empty() {
            return Err(Error::InvalidArgument(
                "KMS encryption requires a key id".into(),
            ));
        }
    }

    let data = tokio::fs::read(file).await?;
    let size = data.len() as u64;

    let put = PutOptions {
        content_type: options.content_type.clone(),
        storage_class: Some(options.storage_class),
        encryption: Some(options.encryption.clone()),
        acl: options.acl,
    };

    tracing::debug!(
        bucket,
        key,
        size,
        storage_class = %options.storage_class,
        encryption = options.encryption.algorithm(),
        "uploading file"
    );
    store.put_object(bucket, key, data, put).await?;
    Ok(size)
}

/// Delete a single object by its full key
pub async fn delete_file(store: &dyn ObjectStore, bucket: &str, key: &str) -> Result<()> {
    tracing::debug!(bucket, key, "deleting object");
    store.delete_objects(bucket, vec![key.to_string()]).await?;
    Ok(())
}

/// Move an object between storage classes by copying it onto itself
pub async fn change_storage_class(
    store: &dyn ObjectStore,
    bucket: &str,
    key: &str,
    class: StorageClass,
) -> Result<()> {
    tracing::debug!(bucket, key, class = %class, "changing storage class");
    store.copy_in_place(bucket, key, class).await
}

/// Move an object into archival storage
pub async fn archive_object(
    store: &dyn ObjectStore,
    bucket: &str,
    key: &str,
    class: StorageClass,
) -> Result<()> {
    if !class.is_archival() {
        return Err(Error::InvalidArgument(format!(
            "{class} is not an archival storage class. Use GLACIER or DEEP_ARCHIVE"
        )));
    }

    change_storage_class(store, bucket, key, class).await
}

/// Request a temporary restore of an archived object
pub async fn restore_object(
    store: &dyn ObjectStore,
    bucket: &str,
    key: &str,
    options: &RestoreOptions,
) -> Result<()> {
    if options.days < 1 {
        return Err(Error::InvalidArgument(
            "Restore duration must be at least one day".into(),
        ));
    }

    tracing::debug!(bucket, key, days = options.days, tier = %options.tier, "requesting restore");
    store
        .restore_object(bucket, key, options.days, options.tier)
        .await
}

/// Look up an object's size, storage class and restore status
pub async fn object_status(store: &dyn ObjectStore, bucket: &str, key: &str) -> Result<ObjectInfo> {
    store.head_object(bucket, key).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::MockObjectStore;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[tokio::test]
    async fn test_create_folder_appends_separator() {
        let mut store = MockObjectStore::new();
        store
            .expect_put_object()
            .withf(|bucket, key, data, options| {
                bucket == "bucket"
                    && key == "reports/2024/"
                    && data.is_empty()
                    && options.acl == Acl::Private
            })
            .times(1)
            .returning(|_, _, _, _| Ok(()));

        let key = create_folder(&store, "bucket", "reports/2024", Acl::Private)
            .await
            .unwrap();
        assert_eq!(key, "reports/2024/");
    }

    #[tokio::test]
    async fn test_create_folder_keeps_existing_separator() {
        let mut store = MockObjectStore::new();
        store
            .expect_put_object()
            .withf(|_, key, _, options| key == "public/" && options.acl == Acl::PublicRead)
            .times(1)
            .returning(|_, _, _, _| Ok(()));

        create_folder(&store, "bucket", "public/", Acl::PublicRead)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_create_folder_rejects_empty_name() {
        let store = MockObjectStore::new();
        assert!(create_folder(&store, "bucket", "/", Acl::Private).await.is_err());
        assert!(create_folder(&store, "bucket", "", Acl::Private).await.is_err());
    }

    #[tokio::test]
    async fn test_upload_file_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"hello world").unwrap();

        let mut store = MockObjectStore::new();
        store
            .expect_put_object()
            .withf(|bucket, key, data, options| {
                bucket == "bucket"
                    && key == "docs/hello.txt"
                    && data.as_slice() == b"hello world"
                    && options.storage_class == Some(StorageClass::Standard)
                    && options.encryption == Some(Encryption::Aes256)
                    && options.acl == Acl::Private
                    && options.content_type.as_deref() == Some("text/plain")
            })
            .times(1)
            .returning(|_, _, _, _| Ok(()));

        let options = UploadOptions {
            content_type: Some("text/plain".into()),
            ..Default::default()
        };
        let size = upload_file(&store, "bucket", "docs/hello.txt", file.path(), &options)
            .await
            .unwrap();
        assert_eq!(size, 11);
    }

    #[tokio::test]
    async fn test_upload_file_with_kms() {
        let file = NamedTempFile::new().unwrap();

        let mut store = MockObjectStore::new();
        store
            .expect_put_object()
            .withf(|_, _, _, options| {
                options
                    .encryption
                    .as_ref()
                    .and_then(|e| e.kms_key_id())
                    == Some("alias/backups")
                    && options.storage_class == Some(StorageClass::StandardIa)
            })
            .times(1)
            .returning(|_, _, _, _| Ok(()));

        let options = UploadOptions {
            storage_class: StorageClass::StandardIa,
            encryption: Encryption::Kms {
                key_id: "alias/backups".into(),
            },
            ..Default::default()
        };
        upload_file(&store, "bucket", "empty.bin", file.path(), &options)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_upload_file_rejects_blank_kms_key() {
        let file = NamedTempFile::new().unwrap();
        let store = MockObjectStore::new();

        let options = UploadOptions {
            encryption: Encryption::Kms { key_id: " ".into() },
            ..Default::default()
        };
        let result = upload_file(&store, "bucket", "a.bin", file.path(), &options).await;
        assert!(matches!(result, Err(Error::InvalidArgument(_))));
    }

    #[tokio::test]
    async fn test_upload_missing_file_is_io_error() {
        let store = MockObjectStore::new();
        let result = upload_file(
            &store,
            "bucket",
            "a.bin",
            Path::new("/definitely/not/here.bin"),
            &UploadOptions::default(),
        )
        .await;
        assert!(matches!(result, Err(Error::Io(_))));
    }

    #[tokio::test]
    async fn test_delete_file_sends_single_key() {
        let mut store = MockObjectStore::new();
        store
            .expect_delete_objects()
            .withf(|bucket, keys| bucket == "bucket" && keys == &vec!["a/b.txt".to_string()])
            .times(1)
            .returning(|_, keys| Ok(keys));

        delete_file(&store, "bucket", "a/b.txt").await.unwrap();
    }

    #[tokio::test]
    async fn test_archive_object() {
        let mut store = MockObjectStore::new();
        store
            .expect_copy_in_place()
            .withf(|bucket, key, class| {
                bucket == "bucket" && key == "old.log" && *class == StorageClass::DeepArchive
            })
            .times(1)
            .returning(|_, _, _| Ok(()));

        archive_object(&store, "bucket", "old.log", StorageClass::DeepArchive)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_archive_object_rejects_non_archival_class() {
        let store = MockObjectStore::new();
        let result = archive_object(&store, "bucket", "old.log", StorageClass::StandardIa).await;
        assert!(matches!(result, Err(Error::InvalidArgument(_))));
    }

    #[tokio::test]
    async fn test_restore_object() {
        let mut store = MockObjectStore::new();
        store
            .expect_restore_object()
            .withf(|_, key, days, tier| key == "old.log" && *days == 7 && *tier == RestoreTier::Bulk)
            .times(1)
            .returning(|_, _, _, _| Ok(()));

        let options = RestoreOptions {
            days: 7,
            tier: RestoreTier::Bulk,
        };
        restore_object(&store, "bucket", "old.log", &options)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_restore_object_surfaces_provider_error() {
        let mut store = MockObjectStore::new();
        store.expect_restore_object().returning(|_, _, _, _| {
            Err(Error::service(
                "RestoreAlreadyInProgress",
                "Object restore is already in progress",
            ))
        });

        let err = restore_object(&store, "bucket", "old.log", &RestoreOptions::default())
            .await
            .unwrap_err();
        assert_eq!(err.code(), Some("RestoreAlreadyInProgress"));
    }

    #[tokio::test]
    async fn test_restore_object_rejects_zero_days() {
        let store = MockObjectStore::new();
        let options = RestoreOptions {
            days: 0,
            ..Default::default()
        };
        assert!(restore_object(&store, "bucket", "k", &options).await.is_err());
    }
}
