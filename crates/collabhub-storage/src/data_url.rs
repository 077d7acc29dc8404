//! Decoding of base64 `data:` URL payloads.
//!
//! Clients may upload content either as raw text or as a data URL such as
//! `data:image/png;base64,iVBORw0...`. Only the part after the first comma
//! is decoded; a payload without a comma is treated as bare base64.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use collabhub_core::error::{AppError, ErrorKind};
use collabhub_core::result::AppResult;

/// Scheme prefix identifying a data URL.
pub const DATA_URL_PREFIX: &str = "data:";

/// A decoded data URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataUrl {
    /// Media type from the header, if one was given.
    pub media_type: Option<String>,
    /// Decoded bytes.
    pub data: Vec<u8>,
}

/// Whether `payload` looks like a data URL.
pub fn is_data_url(payload: &str) -> bool {
    payload.starts_with(DATA_URL_PREFIX)
}

/// Decode a data URL (or bare base64) payload.
pub fn decode(payload: &str) -> AppResult<DataUrl> {
    let (header, body) = match payload.split_once(',') {
        Some((header, body)) => (Some(header), body),
        None => (None, payload),
    };

    let media_type = header
        .and_then(|h| h.strip_prefix(DATA_URL_PREFIX))
        .and_then(|h| h.split(';').next())
        .filter(|m| !m.is_empty())
        .map(str::to_string);

    let data = STANDARD.decode(body.trim()).map_err(|e| {
        AppError::with_source(ErrorKind::Validation, "Invalid base64 payload", e)
    })?;

    Ok(DataUrl { media_type, data })
}
