//! Garment upload: validation, transport encoding, and preview.

use crate::error::IngestError;
use image::ImageFormat;
use std::path::Path;

/// A user-supplied garment photo, validated and encoded for transport.
///
/// Immutable once created. A new upload replaces it entirely.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedGarment {
    bytes: Vec<u8>,
    mime_type: &'static str,
    encoded: String,
}

impl UploadedGarment {
    /// Accept raw image bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `bytes` is empty
    /// - `bytes` is longer than `max_bytes`
    /// - the format is not one the service accepts inline (PNG, JPEG, WebP)
    pub fn from_bytes(bytes: Vec<u8>, max_bytes: usize) -> Result<Self, IngestError> {
        if bytes.is_empty() {
            tracing::warn!("rejected empty upload");
            return Err(IngestError::Empty);
        }
        if bytes.len() > max_bytes {
            tracing::warn!(size = bytes.len(), limit = max_bytes, "rejected oversized upload");
            return Err(IngestError::TooLarge {
                size: bytes.len(),
                limit: max_bytes,
            });
        }

        let format = image::guess_format(&bytes).map_err(|_| IngestError::UnsupportedFormat)?;
        if !is_supported(format) {
            tracing::warn!(?format, "rejected unsupported image format");
            return Err(IngestError::UnsupportedFormat);
        }

        let encoded = base64::Engine::encode(&base64::engine::general_purpose::STANDARD, &bytes);
        tracing::debug!(size = bytes.len(), mime = format.to_mime_type(), "garment ingested");

        Ok(Self {
            bytes,
            mime_type: format.to_mime_type(),
            encoded,
        })
    }

    /// Read and accept an image file.
    pub fn from_path(path: &Path, max_bytes: usize) -> Result<Self, IngestError> {
        let bytes = std::fs::read(path)
            .map_err(|e| IngestError::Read(path.display().to_string(), e.to_string()))?;
        Self::from_bytes(bytes, max_bytes)
    }

    /// Raw bytes as uploaded.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Sniffed media type, declared on the wire.
    pub fn mime_type(&self) -> &str {
        self.mime_type
    }

    /// Base64 payload for embedding in a JSON request body.
    pub fn encoded(&self) -> &str {
        &self.encoded
    }

    /// Displayable `data:` URL for the original photo.
    pub fn preview_url(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.encoded)
    }
}

fn is_supported(format: ImageFormat) -> bool {
    matches!(format, ImageFormat::Png | ImageFormat::Jpeg | ImageFormat::WebP)
}
