//! Object Storage Client
//!
//! S3-compatible (AWS, R2, MinIO) access through `rust-s3`, path-style.

use platform::config::StorageConfig;
use s3::creds::Credentials;
use s3::{Bucket, Region};

use crate::error::{StorageError, StorageResult};

/// Object storage operations
#[trait_variant::make(ObjectStorage: Send)]
pub trait LocalObjectStorage {
    async fn put_object(&self, key: &str, content: &[u8], content_type: &str)
    -> StorageResult<()>;

    async fn get_object(&self, key: &str) -> StorageResult<Vec<u8>>;

    /// Time-limited GET URL for `key`
    async fn presigned_get_url(&self, key: &str) -> StorageResult<String>;
}

/// S3-compatible storage bound to one bucket
#[derive(Debug, Clone)]
pub struct S3Storage {
    bucket: Box<Bucket>,
    presign_expiry_secs: u32,
}

impl S3Storage {
    pub fn new(config: &StorageConfig) -> StorageResult<Self> {
        let credentials = Credentials::new(
            Some(&config.access_key_id),
            Some(&config.secret_access_key),
            None,
            None,
            None,
        )
        .map_err(|e| StorageError::Config(format!("Invalid credentials: {}", e)))?;

        let region = Region::Custom {
            region: config.region.clone(),
            endpoint: config.endpoint.clone(),
        };

        let mut bucket = Bucket::new(&config.bucket, region, credentials)
            .map_err(|e| StorageError::Config(format!("Invalid bucket: {}", e)))?;
        bucket.set_path_style();

        tracing::info!(
            endpoint = %config.endpoint,
            bucket = %config.bucket,
            "Object storage configured"
        );

        Ok(Self {
            bucket,
            presign_expiry_secs: config.presign_expiry_secs,
        })
    }

    pub fn bucket_name(&self) -> String {
        self.bucket.name()
    }

    pub fn presign_expiry_secs(&self) -> u32 {
        self.presign_expiry_secs
    }
}

impl ObjectStorage for S3Storage {
    async fn put_object(
        &self,
        key: &str,
        content: &[u8],
        content_type: &str,
    ) -> StorageResult<()> {
        let response = self
            .bucket
            .put_object_with_content_type(key, content, content_type)
            .await
            .map_err(|e| StorageError::request(key, e))?;

        match response.status_code() {
            200..=299 => {
                tracing::debug!(key = %key, size = content.len(), "Object stored");
                Ok(())
            }
            status => Err(StorageError::request(key, format!("status {}", status))),
        }
    }

    async fn get_object(&self, key: &str) -> StorageResult<Vec<u8>> {
        let response = self
            .bucket
            .get_object(key)
            .await
            .map_err(|e| StorageError::request(key, e))?;

        match response.status_code() {
            200..=299 => Ok(response.bytes().to_vec()),
            404 => Err(StorageError::NotFound(key.to_string())),
            status => Err(StorageError::request(key, format!("status {}", status))),
        }
    }

    async fn presigned_get_url(&self, key: &str) -> StorageResult<String> {
        self.bucket
            .presign_get(key, self.presign_expiry_secs, None)
            .await
            .map_err(|e| StorageError::request(key, e))
    }
}
