//! Inline recipe images submitted as `data:image/<type>;base64,<payload>` URIs.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use thiserror::Error;

/// An image decoded from a data URI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedImage {
    pub bytes: Vec<u8>,
    /// File extension derived from the MIME subtype, without a dot.
    pub extension: &'static str,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ImageDecodeError {
    #[error("image must be a base64 data URI")]
    NotDataUri,
    #[error("unsupported image type: {0}")]
    UnsupportedType(String),
    #[error("image payload is not valid base64")]
    InvalidBase64,
    #[error("image payload is empty")]
    Empty,
}

fn extension_for(subtype: &str) -> Option<&'static str> {
    match subtype.to_ascii_lowercase().as_str() {
        "png" => Some("png"),
        "jpeg" | "jpg" => Some("jpg"),
        "gif" => Some("gif"),
        "webp" => Some("webp"),
        _ => None,
    }
}

impl DecodedImage {
    pub fn from_data_uri(uri: &str) -> Result<Self, ImageDecodeError> {
        let rest = uri
            .trim()
            .strip_prefix("data:image/")
            .ok_or(ImageDecodeError::NotDataUri)?;
        let (header, payload) = rest.split_once(',').ok_or(ImageDecodeError::NotDataUri)?;
        let subtype = header
            .strip_suffix(";base64")
            .ok_or(ImageDecodeError::NotDataUri)?;
        let extension = extension_for(subtype)
            .ok_or_else(|| ImageDecodeError::UnsupportedType(subtype.to_owned()))?;
        let bytes = STANDARD
            .decode(payload.trim())
            .map_err(|_| ImageDecodeError::InvalidBase64)?;
        if bytes.is_empty() {
            return Err(ImageDecodeError::Empty);
        }
        Ok(Self { bytes, extension })
    }
}
