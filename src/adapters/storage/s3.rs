use crate::domain::model::{BinaryImage, ImageKind, StorageKey, IMAGE_JPG_EXTENSION_WITH_DOT};
use crate::domain::ports::{ImageLocationStrategy, ObjectStoreClient};
use crate::utils::error::Result;
use async_trait::async_trait;

/// Gallery images in an object store bucket, keyed `<group>/<prefix><key>.jpg`.
#[derive(Debug, Clone)]
pub struct AwsS3ImageLocationStrategy<C: ObjectStoreClient> {
    client: C,
}

impl<C: ObjectStoreClient> AwsS3ImageLocationStrategy<C> {
    pub fn new(client: C) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &C {
        &self.client
    }
}

#[async_trait]
impl<C: ObjectStoreClient> ImageLocationStrategy for AwsS3ImageLocationStrategy<C> {
    async fn save_image(
        &self,
        image_key: &str,
        image_group: &str,
        image_binary: &[u8],
        thumb_image_binary: &[u8],
    ) -> Result<()> {
        tracing::debug!(
            "saving image in S3. imageKey={}, imageGroup={}",
            image_key,
            image_group
        );
        let image = StorageKey::image(image_group, image_key)?;
        let thumbnail = StorageKey::thumbnail(image_group, image_key)?;
        self.client
            .upload_image_file(&image.to_string(), image_binary)
            .await?;
        self.client
            .upload_image_file(&thumbnail.to_string(), thumb_image_binary)
            .await
    }

    async fn get_image_by_key(&self, image_key: &str, image_group: &str) -> Result<BinaryImage> {
        tracing::debug!(
            "loading image from S3. imageKey={}, imageGroup={}",
            image_key,
            image_group
        );
        let storage_key = StorageKey::image(image_group, image_key)?;
        let bytes = self.client.download_file(&storage_key.to_string()).await?;
        Ok(BinaryImage::new(image_key, bytes))
    }

    async fn get_thumbnail_by_key(
        &self,
        image_key: &str,
        image_group: &str,
    ) -> Result<BinaryImage> {
        tracing::debug!(
            "loading thumbnail from S3. imageKey={}, imageGroup={}",
            image_key,
            image_group
        );
        let storage_key = StorageKey::thumbnail(image_group, image_key)?;
        let bytes = self.client.download_file(&storage_key.to_string()).await?;
        Ok(BinaryImage::new(image_key, bytes))
    }

    async fn find_all_images(&self) -> Result<Vec<BinaryImage>> {
        tracing::debug!("loading all images from S3.");

        let image_keys: Vec<String> = self
            .client
            .list_files(IMAGE_JPG_EXTENSION_WITH_DOT)
            .await?
            .into_iter()
            .filter(|key| {
                StorageKey::parse(key).is_some_and(|parsed| parsed.kind() == ImageKind::Image)
            })
            .collect();

        let files = self.client.download_all_files(&image_keys).await?;
        if files.is_empty() {
            tracing::warn!("Could not find any images in S3.");
        }
        Ok(files)
    }

    async fn delete_image(&self, image_key: &str, image_group: &str) -> Result<()> {
        tracing::debug!(
            "deleting image and thumbnail for imageKey={}, imageGroup={}",
            image_key,
            image_group
        );
        let image = StorageKey::image(image_group, image_key)?;
        let thumbnail = StorageKey::thumbnail(image_group, image_key)?;
        self.client.remove_file(&image.to_string()).await?;
        self.client.remove_file(&thumbnail.to_string()).await
    }
}
