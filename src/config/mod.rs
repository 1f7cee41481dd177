pub mod toml_config;

#[cfg(feature = "cli")]
use clap::{Parser, Subcommand};
#[cfg(feature = "cli")]
use std::path::PathBuf;

pub use toml_config::{AppConfig, S3Settings, StorageConfig, UsersConfig};

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "fredbet")]
#[command(about = "Image gallery storage and user import/export for fredbet")]
pub struct CliConfig {
    /// Path to TOML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Store images in this directory, overriding the configured backend
    #[arg(long)]
    pub storage_path: Option<String>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Manage gallery images
    #[command(subcommand)]
    Images(ImageCommand),
    /// Import or export user accounts as JSON
    #[command(subcommand)]
    Users(UserCommand),
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Subcommand)]
pub enum ImageCommand {
    Save {
        #[arg(long)]
        group: String,
        #[arg(long)]
        key: String,
        #[arg(long)]
        image: PathBuf,
        #[arg(long)]
        thumbnail: PathBuf,
    },
    Get {
        #[arg(long)]
        group: String,
        #[arg(long)]
        key: String,
        #[arg(short, long)]
        output: PathBuf,
    },
    Thumbnail {
        #[arg(long)]
        group: String,
        #[arg(long)]
        key: String,
        #[arg(short, long)]
        output: PathBuf,
    },
    /// List every full size image across all groups
    List,
    Delete {
        #[arg(long)]
        group: String,
        #[arg(long)]
        key: String,
    },
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Subcommand)]
pub enum UserCommand {
    /// Write all users to a JSON file (defaults to all_users.json)
    Export {
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    Import {
        #[arg(short, long)]
        file: PathBuf,
        /// Content type of the upload
        #[arg(long, default_value = "application/json")]
        content_type: String,
    },
}

#[cfg(feature = "cli")]
impl CliConfig {
    /// Loads the TOML file if one was given and applies command line overrides.
    pub fn app_config(&self) -> crate::utils::error::Result<AppConfig> {
        let mut config = match &self.config {
            Some(path) => AppConfig::from_file(path)?,
            None => AppConfig::default(),
        };
        if let Some(path) = &self.storage_path {
            config.storage = StorageConfig::Filesystem {
                base_path: Some(path.clone()),
            };
        }
        Ok(config)
    }
}
