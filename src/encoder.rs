//! PDF to Base64 encoder

use crate::payload::{EncodedText, MARKER_PREFIX};
use anyhow::Result;
use base64::Engine;
use tracing::debug;

/// Encodes raw bytes as Base64 text
#[derive(Debug, Clone)]
pub struct Encoder {
    /// Prepend `data:application/pdf;base64,` to the output
    include_prefix: bool,
}

impl Encoder {
    /// Create a new encoder that emits a data URL
    pub fn new() -> Self {
        Self { include_prefix: true }
    }

    /// Toggle the media-type marker prefix
    pub fn with_prefix(mut self, include_prefix: bool) -> Self {
        self.include_prefix = include_prefix;
        self
    }

    pub fn includes_prefix(&self) -> bool {
        self.include_prefix
    }

    /// Encode bytes to text. Never fails.
    pub fn encode(&self, data: &[u8]) -> EncodedText {
        let body = base64::engine::general_purpose::STANDARD.encode(data);
        debug!(
            bytes = data.len(),
            chars = body.len(),
            prefix = self.include_prefix,
            "encoded payload"
        );

        if self.include_prefix {
            let mut output = String::with_capacity(MARKER_PREFIX.len() + body.len());
            output.push_str(MARKER_PREFIX);
            output.push_str(&body);
            EncodedText::new(output)
        } else {
            EncodedText::new(body)
        }
    }

    /// Encode bytes directly to a writer
    pub fn encode_to_writer<W: std::io::Write>(&self, data: &[u8], mut writer: W) -> Result<()> {
        let encoded = self.encode(data);
        writer.write_all(encoded.as_str().as_bytes())?;
        Ok(())
    }

    /// Encode bytes to a file
    pub fn encode_to_file(&self, data: &[u8], path: &std::path::Path) -> Result<()> {
        let encoded = self.encode(data);
        std::fs::write(path, encoded.as_str())?;
        Ok(())
    }
}

impl Default for Encoder {
    fn default() -> Self {
        Self::new()
    }
}

/// Encode `payload` as Base64, optionally prefixed with the PDF data-URL marker
pub fn encode(payload: &[u8], include_prefix: bool) -> EncodedText {
    Encoder::new().with_prefix(include_prefix).encode(payload)
}
