//! Encoded images and upload validation.
//!
//! Images travel through the crate as raw bytes plus a MIME type. They are
//! base64-encoded only at the edges: for the designer's wire format and for
//! `data:` URLs rendered into `<img src>`.

#[cfg(test)]
#[path = "image_test.rs"]
mod image_test;

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;

use crate::error::ErrorCode;

/// Largest accepted upload, in bytes (5 MB).
pub const MAX_UPLOAD_BYTES: u64 = 5 * 1024 * 1024;

/// Banner copy for any refused upload, oversized or not an image.
pub const TOO_LARGE_MESSAGE: &str = "Image size too large. Please upload an image under 5MB.";

// =============================================================================
// ENCODED IMAGE
// =============================================================================

/// An image held as bytes with its MIME type.
#[derive(Clone, PartialEq, Eq)]
pub struct EncodedImage {
    mime_type: String,
    bytes: Vec<u8>,
}

impl EncodedImage {
    #[must_use]
    pub fn new(mime_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self { mime_type: mime_type.into(), bytes }
    }

    /// Decode a base64 payload as returned by the designer.
    ///
    /// # Errors
    ///
    /// Returns the decoder error if `data` is not valid standard base64.
    pub fn from_base64(mime_type: impl Into<String>, data: &str) -> Result<Self, base64::DecodeError> {
        let bytes = BASE64_STANDARD.decode(data.trim())?;
        Ok(Self::new(mime_type, bytes))
    }

    /// Wrap a picked file's bytes.
    ///
    /// When the picker reported no MIME type, the type is taken from the
    /// file's signature. An unrecognised file keeps the empty type and is
    /// refused by [`validate_image`].
    #[must_use]
    pub fn from_upload(declared_type: &str, bytes: Vec<u8>) -> Self {
        let mime_type = if declared_type.is_empty() {
            sniff_mime_type(&bytes).unwrap_or_default()
        } else {
            declared_type
        };
        Self::new(mime_type, bytes)
    }

    #[must_use]
    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    #[must_use]
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Standard base64 of the raw bytes, without any `data:` prefix.
    #[must_use]
    pub fn to_base64(&self) -> String {
        BASE64_STANDARD.encode(&self.bytes)
    }

    /// Render as a `data:` URL suitable for an `<img src>` attribute.
    #[must_use]
    pub fn to_data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.to_base64())
    }
}

// Image payloads are large; keep them out of logs and test failure output.
impl std::fmt::Debug for EncodedImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EncodedImage")
            .field("mime_type", &self.mime_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// Identify an image format from its leading bytes.
///
/// Covers the formats the designer accepts: JPEG, PNG, WebP and GIF.
#[must_use]
pub fn sniff_mime_type(bytes: &[u8]) -> Option<&'static str> {
    match bytes {
        [0xFF, 0xD8, 0xFF, ..] => Some("image/jpeg"),
        [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, ..] => Some("image/png"),
        [b'G', b'I', b'F', b'8', b'7' | b'9', b'a', ..] => Some("image/gif"),
        [b'R', b'I', b'F', b'F', _, _, _, _, b'W', b'E', b'B', b'P', ..] => Some("image/webp"),
        _ => None,
    }
}

// =============================================================================
// UPLOAD VALIDATION
// =============================================================================

/// Reasons an uploaded file is refused.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UploadError {
    /// The file exceeds [`MAX_UPLOAD_BYTES`].
    #[error("upload too large: {size} bytes (limit {MAX_UPLOAD_BYTES})")]
    TooLarge { size: u64 },

    /// The file is not an `image/*` type, or its type could not be told.
    #[error("unsupported upload type: {mime_type:?}")]
    Unsupported { mime_type: String },
}

impl UploadError {
    /// Copy shown in the error banner.
    #[must_use]
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::TooLarge { .. } | Self::Unsupported { .. } => TOO_LARGE_MESSAGE,
        }
    }
}

impl ErrorCode for UploadError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::TooLarge { .. } => "E_UPLOAD_TOO_LARGE",
            Self::Unsupported { .. } => "E_UPLOAD_UNSUPPORTED",
        }
    }
}

/// Check a file's metadata before its bytes are read.
///
/// Size is checked first, so an oversized file of any type reports
/// [`UploadError::TooLarge`]. An empty MIME type is let through: some
/// platforms do not report one for files picked through `accept="image/*"`.
///
/// # Errors
///
/// Returns the first rule the file breaks.
pub fn validate_upload(size: u64, mime_type: &str) -> Result<(), UploadError> {
    if size > MAX_UPLOAD_BYTES {
        return Err(UploadError::TooLarge { size });
    }
    if !mime_type.is_empty() && !mime_type.starts_with("image/") {
        return Err(UploadError::Unsupported { mime_type: mime_type.to_owned() });
    }
    Ok(())
}

/// Validate an already-read image.
///
/// Same rules as [`validate_upload`], except the MIME type must now be
/// known: the designer cannot take an untyped image.
///
/// # Errors
///
/// Returns the first rule the image breaks.
pub fn validate_image(image: &EncodedImage) -> Result<(), UploadError> {
    validate_upload(image.len() as u64, image.mime_type())?;
    if image.mime_type().is_empty() {
        return Err(UploadError::Unsupported { mime_type: String::new() });
    }
    Ok(())
}
