//! Reading picked files into encoded images.
//!
//! The picker's metadata (size, MIME type) is checked before any bytes are
//! read, so an oversized file never gets loaded into memory.

#[cfg(test)]
#[path = "file_test.rs"]
mod file_test;

use luma::image::{UploadError, validate_upload};

/// Byte size reported by `File.size`, which the DOM exposes as a double.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn file_size_bytes(size: f64) -> u64 {
    if size.is_finite() && size > 0.0 { size as u64 } else { 0 }
}

/// Validate a picked file from its metadata alone.
///
/// # Errors
///
/// Returns the size or type violation.
pub fn check_metadata(size: f64, mime_type: &str) -> Result<(), UploadError> {
    validate_upload(file_size_bytes(size), mime_type)
}

/// Read a picked file's bytes.
///
/// A file the browser reports without a type is typed from its signature.
///
/// # Errors
///
/// Returns the browser's description of the read failure.
#[cfg(feature = "csr")]
pub async fn read_image(file: &web_sys::File) -> Result<luma::image::EncodedImage, String> {
    let buffer = wasm_bindgen_futures::JsFuture::from(file.array_buffer())
        .await
        .map_err(|e| format!("{e:?}"))?;
    let bytes = js_sys::Uint8Array::new(&buffer).to_vec();
    Ok(luma::image::EncodedImage::from_upload(&file.type_(), bytes))
}
