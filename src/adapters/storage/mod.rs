pub mod filesystem;
pub mod s3;
#[cfg(feature = "s3")]
pub mod s3_client;

pub use filesystem::FilesystemImageLocationStrategy;
pub use s3::AwsS3ImageLocationStrategy;
#[cfg(feature = "s3")]
pub use s3_client::AmazonS3ClientWrapper;
