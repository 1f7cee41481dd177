use crate::utils::error::{FredbetError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const DEFAULT_S3_REGION: &str = "eu-central-1";
const DEFAULT_USER_STORE: &str = "fredbet_users.json";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub users: UsersConfig,
}

/// Which image backend to compose, selected by `type`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum StorageConfig {
    Filesystem {
        base_path: Option<String>,
    },
    S3(S3Settings),
}

impl Default for StorageConfig {
    fn default() -> Self {
        StorageConfig::Filesystem { base_path: None }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct S3Settings {
    pub bucket: String,
    pub region: Option<String>,
    /// Custom endpoint for S3 compatible stores such as MinIO.
    pub endpoint: Option<String>,
    pub force_path_style: Option<bool>,
}

impl S3Settings {
    pub fn region(&self) -> &str {
        self.region.as_deref().unwrap_or(DEFAULT_S3_REGION)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UsersConfig {
    pub store_path: Option<String>,
}

impl UsersConfig {
    pub fn store_path(&self) -> PathBuf {
        match self.store_path.as_deref().map(str::trim) {
            Some(path) if !path.is_empty() => PathBuf::from(path),
            _ => std::env::temp_dir().join(DEFAULT_USER_STORE),
        }
    }
}

impl AppConfig {
    /// Loads the configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)
            .map_err(|e| FredbetError::file_read_write(path.as_ref(), e))?;
        Self::from_toml_str(&content)
    }

    /// Parses the configuration from a TOML string.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| FredbetError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` placeholders (e.g. `${S3_BUCKET}`) with environment values.
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| FredbetError::ConfigError {
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }
}

impl Validate for AppConfig {
    fn validate(&self) -> Result<()> {
        match &self.storage {
            StorageConfig::Filesystem {
                base_path: Some(path),
            } if !path.trim().is_empty() => {
                validation::validate_path("storage.base_path", path)?;
            }
            StorageConfig::Filesystem { .. } => {}
            StorageConfig::S3(s3) => {
                validation::validate_s3_bucket_name("storage.bucket", &s3.bucket)?;
                validation::validate_aws_region("storage.region", s3.region())?;
                if let Some(endpoint) = &s3.endpoint {
                    validation::validate_url("storage.endpoint", endpoint)?;
                }
            }
        }

        if let Some(path) = &self.users.store_path {
            validation::validate_path("users.store_path", path)?;
        }

        tracing::debug!("Configuration validation passed");
        Ok(())
    }
}
