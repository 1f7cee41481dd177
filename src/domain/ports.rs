use crate::domain::model::BinaryImage;
use crate::utils::error::Result;
use async_trait::async_trait;

/// Where gallery images and their thumbnails live.
#[async_trait]
pub trait ImageLocationStrategy: Send + Sync {
    /// Stores image and thumbnail, replacing whatever was stored under the key.
    async fn save_image(
        &self,
        image_key: &str,
        image_group: &str,
        image_binary: &[u8],
        thumb_image_binary: &[u8],
    ) -> Result<()>;

    async fn get_image_by_key(&self, image_key: &str, image_group: &str) -> Result<BinaryImage>;

    async fn get_thumbnail_by_key(&self, image_key: &str, image_group: &str)
        -> Result<BinaryImage>;

    /// All full size images of every group. Thumbnails are never returned.
    async fn find_all_images(&self) -> Result<Vec<BinaryImage>>;

    /// Removes image and thumbnail. Missing blobs are not an error.
    async fn delete_image(&self, image_key: &str, image_group: &str) -> Result<()>;
}

/// Byte transfer against a flat object namespace.
#[async_trait]
pub trait ObjectStoreClient: Send + Sync {
    async fn upload_image_file(&self, key: &str, bytes: &[u8]) -> Result<()>;

    async fn download_file(&self, key: &str) -> Result<Vec<u8>>;

    /// Keys of all objects whose name ends with `suffix`.
    async fn list_files(&self, suffix: &str) -> Result<Vec<String>>;

    /// Objects that vanished after listing are left out of the result.
    async fn download_all_files(&self, keys: &[String]) -> Result<Vec<BinaryImage>>;

    async fn remove_file(&self, key: &str) -> Result<()>;
}

pub trait UserImportExportService: Send + Sync {
    /// JSON array of every user, or an empty string when there are none.
    fn export_all_users_to_json(&self) -> Result<String>;

    /// Imports users from a JSON array, returning how many were added.
    fn import_users(&self, json: &str) -> Result<usize>;
}
