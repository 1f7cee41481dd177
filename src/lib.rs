pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

#[cfg(feature = "s3")]
pub use adapters::storage::AmazonS3ClientWrapper;

pub use adapters::storage::{AwsS3ImageLocationStrategy, FilesystemImageLocationStrategy};
pub use adapters::users::JsonFileUserImportExportService;
pub use config::AppConfig;
pub use core::gallery::build_strategy;
pub use core::user_import_export::UserImportExportController;
pub use domain::model::{BinaryImage, StorageKey};
pub use domain::ports::{ImageLocationStrategy, ObjectStoreClient, UserImportExportService};
pub use utils::error::{FredbetError, Result};
