//! Image references and validated uploads.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Largest accepted upload, in bytes.
pub const MAX_IMAGE_BYTES: usize = 500_000;

/// Reference to a stored image: a path relative to the service root for
/// uploads, or an absolute URL for user avatars.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImageRef(String);

impl ImageRef {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }
}

impl AsRef<str> for ImageRef {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for ImageRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Accepted image encodings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageKind {
    Png,
    Jpeg,
}

impl ImageKind {
    /// Resolve a MIME type such as `image/png`.
    pub fn from_mime(mime: &str) -> Option<Self> {
        match mime.trim().to_ascii_lowercase().as_str() {
            "image/png" => Some(Self::Png),
            "image/jpeg" => Some(Self::Jpeg),
            "image/jpg" => Some(Self::Jpeg),
            _ => None,
        }
    }

    /// File extension used when storing the image.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpeg => "jpeg",
        }
    }
}

/// Validation errors raised by [`ImageUpload::try_new`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageValidationError {
    UnsupportedType,
    Empty,
    TooLarge { max: usize },
}

impl fmt::Display for ImageValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnsupportedType => write!(f, "image must be a png or jpeg file"),
            Self::Empty => write!(f, "image must not be empty"),
            Self::TooLarge { max } => write!(f, "image must be at most {max} bytes"),
        }
    }
}

impl std::error::Error for ImageValidationError {}

/// Image bytes accepted for storage.
#[derive(Clone, PartialEq, Eq)]
pub struct ImageUpload {
    kind: ImageKind,
    bytes: Vec<u8>,
}

impl ImageUpload {
    pub fn try_new(mime: &str, bytes: Vec<u8>) -> Result<Self, ImageValidationError> {
        let kind = ImageKind::from_mime(mime).ok_or(ImageValidationError::UnsupportedType)?;
        if bytes.is_empty() {
            return Err(ImageValidationError::Empty);
        }
        if bytes.len() > MAX_IMAGE_BYTES {
            return Err(ImageValidationError::TooLarge {
                max: MAX_IMAGE_BYTES,
            });
        }
        Ok(Self { kind, bytes })
    }

    pub fn kind(&self) -> ImageKind {
        self.kind
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }
}

impl fmt::Debug for ImageUpload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImageUpload")
            .field("kind", &self.kind)
            .field("len", &self.bytes.len())
            .finish()
    }
}
