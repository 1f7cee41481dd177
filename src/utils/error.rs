use std::path::Path;
use thiserror::Error;

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Error, Debug)]
pub enum FredbetError {
    /// Any local or remote I/O failure. `location` is a file path or an
    /// object key.
    #[error("Could not read/write {location}: {source}")]
    ReadWrite {
        location: String,
        not_found: bool,
        #[source]
        source: BoxError,
    },

    #[error("Invalid image {field} '{value}': {reason}")]
    InvalidImageKey {
        field: String,
        value: String,
        reason: String,
    },

    #[error("User import failed: {message}")]
    Import { message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for '{field}' ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

impl FredbetError {
    pub fn file_read_write(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Self::ReadWrite {
            location: path.as_ref().display().to_string(),
            not_found: source.kind() == std::io::ErrorKind::NotFound,
            source: Box::new(source),
        }
    }

    pub fn object_read_write(key: impl Into<String>, source: impl Into<BoxError>) -> Self {
        Self::ReadWrite {
            location: key.into(),
            not_found: false,
            source: source.into(),
        }
    }

    pub fn object_not_found(key: impl Into<String>) -> Self {
        Self::ReadWrite {
            location: key.into(),
            not_found: true,
            source: Box::new(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "object does not exist",
            )),
        }
    }

    /// True for read failures caused by a missing file or object.
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::ReadWrite { not_found, .. } => *not_found,
            Self::IoError(e) => e.kind() == std::io::ErrorKind::NotFound,
            _ => false,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::ReadWrite {
                location,
                not_found: true,
                ..
            } => format!("'{}' does not exist", location),
            Self::ReadWrite { location, .. } => format!("'{}' could not be accessed", location),
            Self::InvalidImageKey { field, value, .. } => {
                format!("'{}' is not a valid image {}", value, field)
            }
            Self::Import { message } => format!("The uploaded users could not be imported: {}", message),
            Self::ConfigError { message } => format!("Configuration problem: {}", message),
            Self::InvalidConfigValueError { field, reason, .. } => {
                format!("Configuration value '{}' is invalid: {}", field, reason)
            }
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, FredbetError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_read_write_display_contains_path() {
        let err = FredbetError::file_read_write(
            "/tmp/42/img_abc.jpg",
            std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        );
        assert!(err.to_string().contains("/tmp/42/img_abc.jpg"));
        assert!(err.is_not_found());
    }

    #[test]
    fn test_missing_object_is_not_found() {
        let err = FredbetError::object_not_found("42/img_abc.jpg");
        assert!(matches!(err, FredbetError::ReadWrite { .. }));
        assert!(err.is_not_found());
        assert!(err.user_friendly_message().contains("42/img_abc.jpg"));
    }

    #[test]
    fn test_object_transport_error_keeps_cause() {
        use std::error::Error as _;

        let cause = std::io::Error::new(std::io::ErrorKind::TimedOut, "timeout");
        let err = FredbetError::object_read_write("42/img_abc.jpg", cause);
        assert!(!err.is_not_found());
        let source = err.source().expect("cause is kept");
        assert_eq!(source.to_string(), "timeout");
    }
}
