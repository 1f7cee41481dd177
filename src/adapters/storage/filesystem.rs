use crate::domain::model::{BinaryImage, ImageKind, StorageKey};
use crate::domain::ports::ImageLocationStrategy;
use crate::utils::error::{FredbetError, Result};
use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

const DEFAULT_FOLDER_NAME: &str = "fredbet_images";

/// Stores gallery images below a base directory, one folder per image group.
#[derive(Debug, Clone)]
pub struct FilesystemImageLocationStrategy {
    base_path: PathBuf,
}

impl FilesystemImageLocationStrategy {
    /// Blank or missing paths fall back to a folder in the system temp dir.
    pub fn new(base_path: Option<&str>) -> Self {
        let base_path = match base_path.map(str::trim) {
            Some(path) if !path.is_empty() => PathBuf::from(path),
            _ => Self::default_base_path(),
        };
        tracing::info!("Storing images at location: {}", base_path.display());
        Self { base_path }
    }

    pub fn default_base_path() -> PathBuf {
        std::env::temp_dir().join(DEFAULT_FOLDER_NAME)
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    fn file_for(&self, storage_key: &StorageKey) -> PathBuf {
        self.base_path
            .join(storage_key.group())
            .join(storage_key.file_name())
    }

    async fn write_file(&self, path: &Path, bytes: &[u8]) -> Result<()> {
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| write_error(path, e))?;
        }
        tokio::fs::write(path, bytes)
            .await
            .map_err(|e| write_error(path, e))?;
        tracing::debug!("Written file: {}", path.display());
        Ok(())
    }

    async fn read_file(&self, path: &Path) -> Result<Vec<u8>> {
        tracing::debug!("try to read file: {}", path.display());
        tokio::fs::read(path).await.map_err(|e| {
            tracing::error!("Could not read file {}: {}", path.display(), e);
            FredbetError::file_read_write(path, e)
        })
    }

    async fn remove_file(&self, path: &Path) -> Result<()> {
        match tokio::fs::remove_file(path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!("Nothing to delete at {}", path.display());
                Ok(())
            }
            Err(e) => Err(FredbetError::file_read_write(path, e)),
        }
    }

    /// Image files below the base directory, thumbnails excluded, in path order.
    fn image_files(&self) -> Result<Vec<(String, PathBuf)>> {
        if !self.base_path.exists() {
            return Ok(Vec::new());
        }

        let mut files = Vec::new();
        for entry in WalkDir::new(&self.base_path).sort_by_file_name() {
            let entry = entry.map_err(|e| {
                let path = e
                    .path()
                    .map(Path::to_path_buf)
                    .unwrap_or_else(|| self.base_path.clone());
                let source = e
                    .into_io_error()
                    .unwrap_or_else(|| std::io::Error::other("filesystem loop detected"));
                tracing::error!("Walking {} failed: {}", path.display(), source);
                FredbetError::file_read_write(path, source)
            })?;

            if !entry.file_type().is_file() {
                continue;
            }

            let Some(file_name) = entry.file_name().to_str() else {
                continue;
            };
            if let Some((ImageKind::Image, key)) = ImageKind::parse_file_name(file_name) {
                files.push((key.to_string(), entry.into_path()));
            }
        }
        Ok(files)
    }
}

impl Default for FilesystemImageLocationStrategy {
    fn default() -> Self {
        Self::new(None)
    }
}

#[async_trait]
impl ImageLocationStrategy for FilesystemImageLocationStrategy {
    async fn save_image(
        &self,
        image_key: &str,
        image_group: &str,
        image_binary: &[u8],
        thumb_image_binary: &[u8],
    ) -> Result<()> {
        let image = StorageKey::image(image_group, image_key)?;
        let thumbnail = StorageKey::thumbnail(image_group, image_key)?;
        self.write_file(&self.file_for(&image), image_binary).await?;
        self.write_file(&self.file_for(&thumbnail), thumb_image_binary)
            .await
    }

    async fn get_image_by_key(&self, image_key: &str, image_group: &str) -> Result<BinaryImage> {
        let path = self.file_for(&StorageKey::image(image_group, image_key)?);
        let bytes = self.read_file(&path).await?;
        Ok(BinaryImage::new(image_key, bytes))
    }

    async fn get_thumbnail_by_key(
        &self,
        image_key: &str,
        image_group: &str,
    ) -> Result<BinaryImage> {
        let path = self.file_for(&StorageKey::thumbnail(image_group, image_key)?);
        let bytes = self.read_file(&path).await?;
        Ok(BinaryImage::new(image_key, bytes))
    }

    async fn find_all_images(&self) -> Result<Vec<BinaryImage>> {
        let base_path = self.base_path.clone();
        let this = self.clone();
        let files = tokio::task::spawn_blocking(move || this.image_files())
            .await
            .map_err(|e| FredbetError::file_read_write(base_path, std::io::Error::other(e)))??;

        let mut images = Vec::with_capacity(files.len());
        for (key, path) in files {
            let bytes = self.read_file(&path).await?;
            images.push(BinaryImage::new(key, bytes));
        }
        Ok(images)
    }

    async fn delete_image(&self, image_key: &str, image_group: &str) -> Result<()> {
        tracing::debug!(
            "deleting image and thumbnail for imageKey={}, imageGroup={}",
            image_key,
            image_group
        );
        let image = StorageKey::image(image_group, image_key)?;
        let thumbnail = StorageKey::thumbnail(image_group, image_key)?;
        self.remove_file(&self.file_for(&image)).await?;
        self.remove_file(&self.file_for(&thumbnail)).await
    }
}

fn write_error(path: &Path, e: std::io::Error) -> FredbetError {
    tracing::error!("Could not write file {}: {}", path.display(), e);
    FredbetError::file_read_write(path, e)
}
