use crate::adapters::storage::FilesystemImageLocationStrategy;
use crate::config::StorageConfig;
use crate::domain::ports::ImageLocationStrategy;
use crate::utils::error::Result;

/// Composes the configured image backend.
pub async fn build_strategy(config: &StorageConfig) -> Result<Box<dyn ImageLocationStrategy>> {
    match config {
        StorageConfig::Filesystem { base_path } => Ok(Box::new(
            FilesystemImageLocationStrategy::new(base_path.as_deref()),
        )),
        StorageConfig::S3(settings) => build_s3_strategy(settings).await,
    }
}

#[cfg(feature = "s3")]
async fn build_s3_strategy(
    settings: &crate::config::S3Settings,
) -> Result<Box<dyn ImageLocationStrategy>> {
    use crate::adapters::storage::{AmazonS3ClientWrapper, AwsS3ImageLocationStrategy};

    let client = AmazonS3ClientWrapper::from_settings(settings).await;
    Ok(Box::new(AwsS3ImageLocationStrategy::new(client)))
}

#[cfg(not(feature = "s3"))]
async fn build_s3_strategy(
    _settings: &crate::config::S3Settings,
) -> Result<Box<dyn ImageLocationStrategy>> {
    Err(crate::utils::error::FredbetError::ConfigError {
        message: "S3 image storage requires building with the `s3` feature".to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_filesystem_strategy_from_config() {
        let temp_dir = TempDir::new().unwrap();
        let config = StorageConfig::Filesystem {
            base_path: Some(temp_dir.path().to_str().unwrap().to_string()),
        };

        let strategy = build_strategy(&config).await.unwrap();
        strategy.save_image("k", "1", b"image", b"thumb").await.unwrap();

        assert_eq!(
            strategy.get_image_by_key("k", "1").await.unwrap().bytes(),
            b"image"
        );
    }

    #[cfg(not(feature = "s3"))]
    #[tokio::test]
    async fn test_s3_without_feature_is_config_error() {
        let config = StorageConfig::S3(crate::config::S3Settings {
            bucket: "fredbet-images".to_string(),
            region: None,
            endpoint: None,
            force_path_style: None,
        });

        assert!(matches!(
            build_strategy(&config).await,
            Err(crate::utils::error::FredbetError::ConfigError { .. })
        ));
    }
}
