//! S3 client implementation
//!
//! Wraps aws-sdk-s3 and implements the ObjectStore trait from s3mgr-core.

use std::time::Duration;

use async_trait::async_trait;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::types::{
    BucketCannedAcl, BucketLocationConstraint, CreateBucketConfiguration, Delete,
    GlacierJobParameters, MetadataDirective, ObjectCannedAcl, ObjectIdentifier, RestoreRequest,
    ServerSideEncryption, Tier,
};

use s3mgr_core::{
    Acl, Alias, Error, ListOptions, ListPage, ObjectInfo, ObjectStore, PutOptions, RestoreTier,
    Result, StorageClass,
};

use crate::error::map_sdk_error;

/// S3 client wrapper
pub struct S3Client {
    inner: aws_sdk_s3::Client,
}

impl S3Client {
    /// Create a new S3 client from an alias configuration
    pub async fn new(alias: &Alias) -> Result<Self> {
        let retry = alias.retry_config();
        let timeout = alias.timeout_config();

        let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .region(aws_config::Region::new(alias.region.clone()))
            .retry_config(
                aws_config::retry::RetryConfig::standard()
                    .with_max_attempts(retry.max_attempts.max(1))
                    .with_initial_backoff(Duration::from_millis(retry.initial_backoff_ms)),
            )
            .timeout_config(
                aws_config::timeout::TimeoutConfig::builder()
                    .connect_timeout(Duration::from_millis(timeout.connect_ms))
                    .read_timeout(Duration::from_millis(timeout.read_ms))
                    .build(),
            );

        // Without static keys the default provider chain applies
        if let Some((access_key, secret_key)) = alias.static_credentials() {
            let credentials = aws_credential_types::Credentials::new(
                access_key,
                secret_key,
                None, // session token
                None, // expiry
                "s3mgr-static-credentials",
            );
            loader = loader.credentials_provider(credentials);
        }

        if let Some(endpoint) = &alias.endpoint {
            loader = loader.endpoint_url(endpoint);
        }

        let config = loader.load().await;

        let s3_config = aws_sdk_s3::config::Builder::from(&config)
            .force_path_style(alias.force_path_style())
            .build();

        tracing::debug!(
            alias = %alias.name,
            region = %alias.region,
            endpoint = alias.endpoint.as_deref().unwrap_or("aws"),
            "s3 client ready"
        );

        Ok(Self {
            inner: aws_sdk_s3::Client::from_conf(s3_config),
        })
    }

    /// Wrap an already configured aws-sdk-s3 client
    pub fn from_client(inner: aws_sdk_s3::Client) -> Self {
        Self { inner }
    }

    /// Get the underlying aws-sdk-s3 client
    pub fn inner(&self) -> &aws_sdk_s3::Client {
        &self.inner
    }
}

fn timestamp(value: Option<&aws_smithy_types::DateTime>) -> Option<jiff::Timestamp> {
    value.and_then(|t| jiff::Timestamp::from_second(t.secs()).ok())
}

/// `x-amz-copy-source` value: the key is percent-encoded segment by segment
fn copy_source(bucket: &str, key: &str) -> String {
    let key = key
        .split('/')
        .map(urlencoding::encode)
        .collect::<Vec<_>>()
        .join("/");
    format!("{bucket}/{key}")
}

fn trim_etag(etag: Option<&str>) -> Option<String> {
    etag.map(|e| e.trim_matches('"').to_string())
}

#[async_trait]
impl ObjectStore for S3Client {
    async fn list_objects(&self, bucket: &str, options: ListOptions) -> Result<ListPage> {
        let mut request = self.inner.list_objects_v2().bucket(bucket);

        if let Some(prefix) = options.prefix {
            request = request.prefix(prefix);
        }

        if let Some(max) = options.max_keys {
            request = request.max_keys(max);
        }

        if let Some(token) = options.continuation_token {
            request = request.continuation_token(token);
        }

        let response = request.send().await.map_err(map_sdk_error)?;

        let items = response
            .contents()
            .iter()
            .map(|object| {
                let mut info =
                    ObjectInfo::new(object.key().unwrap_or_default(), object.size().unwrap_or(0));
                info.last_modified = timestamp(object.last_modified());
                info.etag = trim_etag(object.e_tag());
                info.storage_class = object.storage_class().map(|sc| sc.as_str().to_string());
                info
            })
            .collect();

        Ok(ListPage {
            items,
            truncated: response.is_truncated().unwrap_or(false),
            continuation_token: response.next_continuation_token().map(|s| s.to_string()),
        })
    }

    async fn head_object(&self, bucket: &str, key: &str) -> Result<ObjectInfo> {
        let response = self
            .inner
            .head_object()
            .bucket(bucket)
            .key(key)
            .send()
            .await
            .map_err(map_sdk_error)?;

        let mut info = ObjectInfo::new(key, response.content_length().unwrap_or(0));
        info.last_modified = timestamp(response.last_modified());
        info.etag = trim_etag(response.e_tag());
        info.content_type = response.content_type().map(|ct| ct.to_string());
        // HEAD omits the header for STANDARD objects
        info.storage_class = Some(
            response
                .storage_class()
                .map(|sc| sc.as_str())
                .unwrap_or(StorageClass::Standard.as_str())
                .to_string(),
        );
        info.restore = response.restore().map(|r| r.to_string());

        Ok(info)
    }

    async fn create_bucket(&self, bucket: &str, region: Option<String>, acl: Acl) -> Result<()> {
        let mut request = self
            .inner
            .create_bucket()
            .bucket(bucket)
            .acl(BucketCannedAcl::from(acl.as_str()));

        if let Some(region) = region {
            let configuration = CreateBucketConfiguration::builder()
                .location_constraint(BucketLocationConstraint::from(region.as_str()))
                .build();
            request = request.create_bucket_configuration(configuration);
        }

        request.send().await.map_err(map_sdk_error)?;
        Ok(())
    }

    async fn delete_bucket(&self, bucket: &str) -> Result<()> {
        self.inner
            .delete_bucket()
            .bucket(bucket)
            .send()
            .await
            .map_err(map_sdk_error)?;

        Ok(())
    }

    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        data: Vec<u8>,
        options: PutOptions,
    ) -> Result<()> {
        let mut request = self
            .inner
            .put_object()
            .bucket(bucket)
            .key(key)
            .acl(ObjectCannedAcl::from(options.acl.as_str()))
            .body(ByteStream::from(data));

        if let Some(ct) = options.content_type {
            request = request.content_type(ct);
        }

        if let Some(class) = options.storage_class {
            request = request.storage_class(aws_sdk_s3::types::StorageClass::from(class.as_str()));
        }

        if let Some(encryption) = options.encryption {
            request =
                request.server_side_encryption(ServerSideEncryption::from(encryption.algorithm()));
            if let Some(key_id) = encryption.kms_key_id() {
                request = request.ssekms_key_id(key_id);
            }
        }

        request.send().await.map_err(map_sdk_error)?;
        Ok(())
    }

    async fn delete_objects(&self, bucket: &str, keys: Vec<String>) -> Result<Vec<String>> {
        if keys.is_empty() {
            return Ok(vec![]);
        }

        let objects = keys
            .iter()
            .map(|k| ObjectIdentifier::builder().key(k).build())
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| Error::General(e.to_string()))?;

        let delete = Delete::builder()
            .set_objects(Some(objects))
            .quiet(false)
            .build()
            .map_err(|e| Error::General(e.to_string()))?;

        let response = self
            .inner
            .delete_objects()
            .bucket(bucket)
            .delete(delete)
            .send()
            .await
            .map_err(map_sdk_error)?;

        let deleted: Vec<String> = response
            .deleted()
            .iter()
            .filter_map(|d| d.key().map(|k| k.to_string()))
            .collect();

        if let Some(first) = response.errors().first() {
            let error_keys: Vec<&str> = response.errors().iter().filter_map(|e| e.key()).collect();
            tracing::warn!(bucket, keys = ?error_keys, "failed to delete some objects");

            // Nothing went through, so report the provider's reason
            if deleted.is_empty() {
                return Err(Error::service(
                    first.code().unwrap_or("DeleteFailed"),
                    first.message().unwrap_or_default(),
                ));
            }
        }

        Ok(deleted)
    }

    async fn copy_in_place(&self, bucket: &str, key: &str, class: StorageClass) -> Result<()> {
        self.inner
            .copy_object()
            .copy_source(copy_source(bucket, key))
            .bucket(bucket)
            .key(key)
            .storage_class(aws_sdk_s3::types::StorageClass::from(class.as_str()))
            .metadata_directive(MetadataDirective::Copy)
            .send()
            .await
            .map_err(map_sdk_error)?;

        Ok(())
    }

    async fn restore_object(
        &self,
        bucket: &str,
        key: &str,
        days: i32,
        tier: RestoreTier,
    ) -> Result<()> {
        let job = GlacierJobParameters::builder()
            .tier(Tier::from(tier.as_str()))
            .build()
            .map_err(|e| Error::General(e.to_string()))?;

        let request = RestoreRequest::builder()
            .days(days)
            .glacier_job_parameters(job)
            .build();

        self.inner
            .restore_object()
            .bucket(bucket)
            .key(key)
            .restore_request(request)
            .send()
            .await
            .map_err(map_sdk_error)?;

        Ok(())
    }
}
