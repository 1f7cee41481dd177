use crate::utils::error::{FredbetError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

pub const IMAGE_PREFIX: &str = "img_";
pub const THUMBNAIL_PREFIX: &str = "thumb_";
pub const IMAGE_JPG_EXTENSION_WITH_DOT: &str = ".jpg";

/// An image loaded from storage, identified by its key within the group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinaryImage {
    key: String,
    bytes: Vec<u8>,
}

impl BinaryImage {
    pub fn new(key: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            key: key.into(),
            bytes,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageKind {
    Image,
    Thumbnail,
}

impl ImageKind {
    pub fn prefix(self) -> &'static str {
        match self {
            ImageKind::Image => IMAGE_PREFIX,
            ImageKind::Thumbnail => THUMBNAIL_PREFIX,
        }
    }

    /// Recovers kind and image key from a stored file name such as
    /// `thumb_abc.jpg`. Returns `None` for anything that is not one of ours.
    pub fn parse_file_name(file_name: &str) -> Option<(ImageKind, &str)> {
        let stem = file_name.strip_suffix(IMAGE_JPG_EXTENSION_WITH_DOT)?;
        [ImageKind::Image, ImageKind::Thumbnail]
            .into_iter()
            .find_map(|kind| stem.strip_prefix(kind.prefix()).map(|key| (kind, key)))
            .filter(|(_, key)| !key.is_empty())
    }
}

/// Location of one blob: `<group>/<prefix><key>.jpg`.
///
/// Group and key are validated on construction so that two different
/// `(group, key, kind)` triples can never produce the same key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StorageKey {
    group: String,
    key: String,
    kind: ImageKind,
}

impl StorageKey {
    pub fn new(group: &str, key: &str, kind: ImageKind) -> Result<Self> {
        validate_segment("group", group)?;
        validate_segment("key", key)?;
        Ok(Self {
            group: group.to_string(),
            key: key.to_string(),
            kind,
        })
    }

    pub fn image(group: &str, key: &str) -> Result<Self> {
        Self::new(group, key, ImageKind::Image)
    }

    pub fn thumbnail(group: &str, key: &str) -> Result<Self> {
        Self::new(group, key, ImageKind::Thumbnail)
    }

    /// Parses an object key of the form `<group>/<prefix><key>.jpg`.
    pub fn parse(object_key: &str) -> Option<Self> {
        let (group, file_name) = object_key.rsplit_once('/')?;
        let (kind, key) = ImageKind::parse_file_name(file_name)?;
        Self::new(group, key, kind).ok()
    }

    pub fn group(&self) -> &str {
        &self.group
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn kind(&self) -> ImageKind {
        self.kind
    }

    pub fn file_name(&self) -> String {
        format!(
            "{}{}{}",
            self.kind.prefix(),
            self.key,
            IMAGE_JPG_EXTENSION_WITH_DOT
        )
    }
}

impl fmt::Display for StorageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.group, self.file_name())
    }
}

fn validate_segment(field: &str, value: &str) -> Result<()> {
    let reason = if value.is_empty() {
        Some("must not be empty")
    } else if value == "." || value == ".." {
        Some("must not be a relative path component")
    } else if value.contains(['/', '\\', '\0']) {
        Some("must not contain path separators or null bytes")
    } else {
        None
    };

    match reason {
        Some(reason) => Err(FredbetError::InvalidImageKey {
            field: field.to_string(),
            value: value.to_string(),
            reason: reason.to_string(),
        }),
        None => Ok(()),
    }
}

/// A user account as exchanged by the JSON import/export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    pub username: String,
    pub password: String,
    #[serde(default)]
    pub roles: Vec<String>,
    #[serde(default)]
    pub child: bool,
}
