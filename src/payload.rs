//! Payload data structures

use std::fmt;

// Wire format constants
pub const MARKER_PREFIX: &str = "data:application/pdf;base64,";
pub const SEPARATOR: char = ',';
pub const DEFAULT_BASE_NAME: &str = "decoded_document";
pub const PDF_EXTENSION: &str = ".pdf";
pub const PDF_MEDIA_TYPE: &str = "application/pdf";
pub const OCTET_STREAM_MEDIA_TYPE: &str = "application/octet-stream";
pub const PDF_MAGIC: &[u8] = b"%PDF-";

/// Raw file contents, never interpreted
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BinaryPayload {
    data: Vec<u8>,
}

impl BinaryPayload {
    /// Wrap the given bytes
    pub fn new(data: impl Into<Vec<u8>>) -> Self {
        Self { data: data.into() }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn into_vec(self) -> Vec<u8> {
        self.data
    }
}

impl From<Vec<u8>> for BinaryPayload {
    fn from(data: Vec<u8>) -> Self {
        Self { data }
    }
}

impl From<&[u8]> for BinaryPayload {
    fn from(data: &[u8]) -> Self {
        Self { data: data.to_vec() }
    }
}

impl AsRef<[u8]> for BinaryPayload {
    fn as_ref(&self) -> &[u8] {
        &self.data
    }
}

/// Base64 text, optionally carrying a media-type marker such as
/// `data:application/pdf;base64,`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EncodedText {
    text: String,
}

impl EncodedText {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn into_string(self) -> String {
        self.text
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Whether anything precedes the Base64 body
    pub fn has_marker(&self) -> bool {
        self.text.contains(SEPARATOR)
    }

    /// The Base64 body: everything after the last separator, or the whole
    /// text when there is none.
    ///
    /// The Base64 alphabet has no comma, so the last comma always ends the
    /// marker, however the marker itself is spelled.
    pub fn body(&self) -> &str {
        split_body(&self.text)
    }
}

impl fmt::Display for EncodedText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl From<String> for EncodedText {
    fn from(text: String) -> Self {
        Self { text }
    }
}

impl From<&str> for EncodedText {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

impl AsRef<str> for EncodedText {
    fn as_ref(&self) -> &str {
        &self.text
    }
}

/// Result of a successful decode
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decoded {
    /// The recovered bytes
    pub payload: BinaryPayload,
    /// File name to save the bytes under, always ending in `.pdf`
    pub file_name: String,
}

pub(crate) fn split_body(text: &str) -> &str {
    match text.rfind(SEPARATOR) {
        Some(pos) => &text[pos + SEPARATOR.len_utf8()..],
        None => text,
    }
}

/// Whether `name` ends with `.pdf`, ignoring case
pub fn has_pdf_extension(name: &str) -> bool {
    name.len() >= PDF_EXTENSION.len()
        && name.is_char_boundary(name.len() - PDF_EXTENSION.len())
        && name[name.len() - PDF_EXTENSION.len()..].eq_ignore_ascii_case(PDF_EXTENSION)
}

/// Declared media type of a file, the way a browser file picker reports it.
///
/// The extension wins. Files without a `.pdf` extension still count as PDF
/// when they start with the `%PDF-` header.
pub fn media_type_of(file_name: Option<&str>, bytes: &[u8]) -> &'static str {
    if let Some(name) = file_name {
        if has_pdf_extension(name) {
            return PDF_MEDIA_TYPE;
        }
    }
    if bytes.starts_with(PDF_MAGIC) {
        return PDF_MEDIA_TYPE;
    }
    OCTET_STREAM_MEDIA_TYPE
}

pub fn is_pdf(file_name: Option<&str>, bytes: &[u8]) -> bool {
    media_type_of(file_name, bytes) == PDF_MEDIA_TYPE
}
