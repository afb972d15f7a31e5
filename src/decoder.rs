//! Base64 to PDF decoder

use crate::error::DecodeError;
use crate::payload::{
    has_pdf_extension, split_body, BinaryPayload, Decoded, DEFAULT_BASE_NAME, PDF_EXTENSION,
};
use base64::Engine;
use tracing::debug;

/// Decodes Base64 text (bare or with a data-URL marker) back to bytes
#[derive(Debug, Clone)]
pub struct Decoder {
    /// Base name used when no file name is suggested
    default_name: String,
}

impl Decoder {
    /// Create a new decoder
    pub fn new() -> Self {
        Self {
            default_name: DEFAULT_BASE_NAME.to_string(),
        }
    }

    /// Override the base name used for blank suggestions
    pub fn with_default_name(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        let trimmed = name.trim();
        if !trimmed.is_empty() {
            self.default_name = trimmed.to_string();
        }
        self
    }

    /// Decode `text` and derive the output file name from `suggested_name`
    pub fn decode(&self, text: &str, suggested_name: &str) -> Result<Decoded, DecodeError> {
        let payload = self.decode_payload(text)?;
        Ok(Decoded {
            payload,
            file_name: self.file_name(suggested_name),
        })
    }

    /// Decode `text` to bytes without deriving a file name
    pub fn decode_payload(&self, text: &str) -> Result<BinaryPayload, DecodeError> {
        // Emptiness is judged before any prefix is stripped
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(DecodeError::EmptyInput);
        }

        let body = split_body(trimmed);
        if body.len() != trimmed.len() {
            debug!(prefix = &trimmed[..trimmed.len() - body.len()], "stripped marker prefix");
        }

        let body = Self::filter_whitespace(body);
        let decoded = base64::engine::general_purpose::STANDARD
            .decode(body.as_bytes())
            .map_err(DecodeError::InvalidEncoding)?;

        debug!(chars = body.len(), bytes = decoded.len(), "decoded payload");
        Ok(BinaryPayload::new(decoded))
    }

    /// Derive the output file name using this decoder's default base name
    pub fn file_name(&self, suggested_name: &str) -> String {
        let trimmed = suggested_name.trim();
        let name = if trimmed.is_empty() {
            self.default_name.as_str()
        } else {
            trimmed
        };

        if has_pdf_extension(name) {
            name.to_string()
        } else {
            format!("{}{}", name, PDF_EXTENSION)
        }
    }

    /// Remove ASCII whitespace (space, tab, LF, FF, CR) so wrapped or
    /// spaced Base64 is accepted
    fn filter_whitespace(body: &str) -> String {
        body.chars().filter(|c| !c.is_ascii_whitespace()).collect()
    }
}

impl Default for Decoder {
    fn default() -> Self {
        Self::new()
    }
}

/// Decode Base64 text, with or without a marker prefix, and derive a `.pdf`
/// file name from `suggested_name`
pub fn decode(text: &str, suggested_name: &str) -> Result<Decoded, DecodeError> {
    Decoder::new().decode(text, suggested_name)
}

/// Trim `suggested_name`, fall back to `decoded_document` when blank, and
/// append `.pdf` unless it already ends with it (any case)
pub fn derive_file_name(suggested_name: &str) -> String {
    Decoder::new().file_name(suggested_name)
}
