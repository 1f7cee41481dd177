pub mod gallery;
pub mod user_import_export;

pub use crate::domain::model::{BinaryImage, ImageKind, StorageKey, UserRecord};
pub use crate::domain::ports::{ImageLocationStrategy, ObjectStoreClient, UserImportExportService};
pub use crate::utils::error::Result;
