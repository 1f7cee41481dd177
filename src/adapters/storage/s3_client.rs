use crate::config::toml_config::S3Settings;
use crate::domain::model::{BinaryImage, StorageKey};
use crate::domain::ports::ObjectStoreClient;
use crate::utils::error::{FredbetError, Result};
use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_s3::config::Region;
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client as S3Client;

const CONTENT_TYPE_JPEG: &str = "image/jpeg";

/// `ObjectStoreClient` backed by one S3 bucket.
#[derive(Debug, Clone)]
pub struct AmazonS3ClientWrapper {
    client: S3Client,
    bucket: String,
}

impl AmazonS3ClientWrapper {
    pub fn new(client: S3Client, bucket: String) -> Self {
        Self { client, bucket }
    }

    /// Builds the SDK client from the default credential chain plus the
    /// region, endpoint and addressing style given in the settings.
    pub async fn from_settings(settings: &S3Settings) -> Self {
        let shared = aws_config::load_defaults(BehaviorVersion::latest()).await;
        let mut builder = aws_sdk_s3::config::Builder::from(&shared)
            .region(Region::new(settings.region().to_string()))
            .force_path_style(settings.force_path_style.unwrap_or(false));
        if let Some(endpoint) = &settings.endpoint {
            builder = builder.endpoint_url(endpoint);
        }
        tracing::info!(
            "Storing images in S3 bucket '{}' ({})",
            settings.bucket,
            settings.region()
        );
        Self::new(S3Client::from_conf(builder.build()), settings.bucket.clone())
    }

    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    async fn get_object(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let resp = match self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
        {
            Ok(resp) => resp,
            Err(e) if e.as_service_error().is_some_and(|se| se.is_no_such_key()) => {
                return Ok(None)
            }
            Err(e) => {
                tracing::error!("Download of {} failed: {}", key, DisplayErrorContext(&e));
                return Err(FredbetError::object_read_write(key, e));
            }
        };

        let data = resp
            .body
            .collect()
            .await
            .map_err(|e| FredbetError::object_read_write(key, e))?;
        Ok(Some(data.into_bytes().to_vec()))
    }
}

#[async_trait]
impl ObjectStoreClient for AmazonS3ClientWrapper {
    async fn upload_image_file(&self, key: &str, bytes: &[u8]) -> Result<()> {
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .content_type(CONTENT_TYPE_JPEG)
            .body(ByteStream::from(bytes.to_vec()))
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Upload of {} failed: {}", key, DisplayErrorContext(&e));
                FredbetError::object_read_write(key, e)
            })?;
        tracing::debug!("Uploaded {} ({} bytes)", key, bytes.len());
        Ok(())
    }

    async fn download_file(&self, key: &str) -> Result<Vec<u8>> {
        self.get_object(key)
            .await?
            .ok_or_else(|| FredbetError::object_not_found(key))
    }

    async fn list_files(&self, suffix: &str) -> Result<Vec<String>> {
        let mut keys = Vec::new();
        let mut continuation_token: Option<String> = None;

        loop {
            let output = self
                .client
                .list_objects_v2()
                .bucket(&self.bucket)
                .set_continuation_token(continuation_token.take())
                .send()
                .await
                .map_err(|e| {
                    tracing::error!("Listing {} failed: {}", self.bucket, DisplayErrorContext(&e));
                    FredbetError::object_read_write(&self.bucket, e)
                })?;

            keys.extend(
                output
                    .contents()
                    .iter()
                    .filter_map(|object| object.key())
                    .filter(|key| key.ends_with(suffix))
                    .map(str::to_string),
            );

            match output.next_continuation_token() {
                Some(token) if output.is_truncated().unwrap_or(false) => {
                    continuation_token = Some(token.to_string());
                }
                _ => break,
            }
        }

        tracing::debug!("Listed {} objects ending in '{}'", keys.len(), suffix);
        Ok(keys)
    }

    async fn download_all_files(&self, keys: &[String]) -> Result<Vec<BinaryImage>> {
        let mut images = Vec::with_capacity(keys.len());
        for key in keys {
            let Some(bytes) = self.get_object(key).await? else {
                tracing::warn!("Object {} disappeared after listing, skipping", key);
                continue;
            };
            let image_key = StorageKey::parse(key)
                .map(|parsed| parsed.key().to_string())
                .unwrap_or_else(|| key.clone());
            images.push(BinaryImage::new(image_key, bytes));
        }
        Ok(images)
    }

    async fn remove_file(&self, key: &str) -> Result<()> {
        // S3 answers 204 for keys that do not exist.
        self.client
            .delete_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| FredbetError::object_read_write(key, e))?;
        Ok(())
    }
}
