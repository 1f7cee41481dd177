use crate::utils::error::{FredbetError, Result};
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(FredbetError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(FredbetError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(FredbetError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(FredbetError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(FredbetError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(FredbetError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_s3_bucket_name(field_name: &str, bucket_name: &str) -> Result<()> {
    let invalid = |reason: &str| FredbetError::InvalidConfigValueError {
        field: field_name.to_string(),
        value: bucket_name.to_string(),
        reason: reason.to_string(),
    };

    if bucket_name.len() < 3 || bucket_name.len() > 63 {
        return Err(invalid("S3 bucket name must be between 3 and 63 characters"));
    }

    if !bucket_name
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '.')
    {
        return Err(invalid(
            "S3 bucket name can only contain lowercase letters, numbers, hyphens, and dots",
        ));
    }

    if bucket_name.starts_with('-') || bucket_name.ends_with('-') {
        return Err(invalid("S3 bucket name cannot start or end with a hyphen"));
    }

    Ok(())
}

pub fn validate_aws_region(field_name: &str, region: &str) -> Result<()> {
    validate_non_empty_string(field_name, region)?;

    if !region
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
    {
        return Err(FredbetError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: region.to_string(),
            reason: "AWS region can only contain lowercase letters, numbers, and hyphens"
                .to_string(),
        });
    }

    Ok(())
}
