//! Image intake: turning dropped or picked file bytes into an image source.
//!
//! Reading the file is the host's job. The core only checks that the bytes
//! look like an image and wraps them in a `data:` URI an image element can
//! reference.

use base64::Engine;
use serde::{Deserialize, Serialize};

use crate::{CardError, CardResult};

/// Supported image formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    /// PNG image.
    Png,
    /// JPEG image.
    Jpeg,
    /// GIF image.
    Gif,
    /// WebP image.
    WebP,
    /// SVG vector image.
    Svg,
}

impl ImageFormat {
    /// Sniff the format from the leading bytes of a file.
    #[must_use]
    pub fn detect(bytes: &[u8]) -> Option<Self> {
        if bytes.starts_with(b"\x89PNG\r\n\x1a\n") {
            Some(Self::Png)
        } else if bytes.starts_with(&[0xFF, 0xD8, 0xFF]) {
            Some(Self::Jpeg)
        } else if bytes.starts_with(b"GIF87a") || bytes.starts_with(b"GIF89a") {
            Some(Self::Gif)
        } else if bytes.len() >= 12 && &bytes[..4] == b"RIFF" && &bytes[8..12] == b"WEBP" {
            Some(Self::WebP)
        } else if looks_like_svg(bytes) {
            Some(Self::Svg)
        } else {
            None
        }
    }

    /// MIME type for `data:` URIs.
    #[must_use]
    pub const fn mime_type(self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Jpeg => "image/jpeg",
            Self::Gif => "image/gif",
            Self::WebP => "image/webp",
            Self::Svg => "image/svg+xml",
        }
    }
}

fn looks_like_svg(bytes: &[u8]) -> bool {
    let head = &bytes[..bytes.len().min(512)];
    let Ok(text) = std::str::from_utf8(head) else {
        return false;
    };
    let text = text.trim_start_matches('\u{feff}').trim_start();
    (text.starts_with("<?xml") || text.starts_with("<svg")) && text.contains("<svg")
}

/// Validated image bytes ready to become an image element source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImagePayload {
    /// Detected format.
    pub format: ImageFormat,
    /// `data:<mime>;base64,<...>` URI.
    pub data_uri: String,
}

impl ImagePayload {
    /// Validate `bytes` and encode them as a `data:` URI.
    ///
    /// # Errors
    ///
    /// Returns [`CardError::InvalidImage`] if the bytes are empty or not a
    /// recognised image format.
    pub fn from_bytes(bytes: &[u8]) -> CardResult<Self> {
        if bytes.is_empty() {
            return Err(CardError::InvalidImage("empty file".to_string()));
        }
        let format = ImageFormat::detect(bytes)
            .ok_or_else(|| CardError::InvalidImage("unrecognised image format".to_string()))?;
        let encoded = base64::engine::general_purpose::STANDARD.encode(bytes);
        Ok(Self {
            format,
            data_uri: format!("data:{};base64,{encoded}", format.mime_type()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG_HEADER: &[u8] = b"\x89PNG\r\n\x1a\n\0\0\0\rIHDR";

    #[test]
    fn test_detects_formats() {
        assert_eq!(ImageFormat::detect(PNG_HEADER), Some(ImageFormat::Png));
        assert_eq!(
            ImageFormat::detect(&[0xFF, 0xD8, 0xFF, 0xE0]),
            Some(ImageFormat::Jpeg)
        );
        assert_eq!(ImageFormat::detect(b"GIF89a...."), Some(ImageFormat::Gif));
        assert_eq!(
            ImageFormat::detect(b"RIFF\0\0\0\0WEBPVP8 "),
            Some(ImageFormat::WebP)
        );
        assert_eq!(
            ImageFormat::detect(b"  <svg xmlns=\"http://www.w3.org/2000/svg\"/>"),
            Some(ImageFormat::Svg)
        );
        assert_eq!(ImageFormat::detect(b"hello world"), None);
    }

    #[test]
    fn test_payload_is_data_uri() {
        let payload = ImagePayload::from_bytes(PNG_HEADER).expect("png");
        assert_eq!(payload.format, ImageFormat::Png);
        assert!(payload.data_uri.starts_with("data:image/png;base64,iVBORw0KGgo"));
    }

    #[test]
    fn test_rejects_garbage_and_empty() {
        assert!(matches!(
            ImagePayload::from_bytes(b"%PDF-1.7"),
            Err(CardError::InvalidImage(_))
        ));
        assert!(matches!(
            ImagePayload::from_bytes(&[]),
            Err(CardError::InvalidImage(_))
        ));
    }
}
