//! # pdf-base64
//!
//! Convert PDF documents to Base64 text and back.
//!
//! The encoded form is either a bare Base64 body or a data URL:
//!
//! ```text
//! JVBERi0xLjQK...
//! data:application/pdf;base64,JVBERi0xLjQK...
//! ```
//!
//! ## Decoding Rules
//!
//! 1. Blank input (after trimming) is rejected as [`DecodeError::EmptyInput`]
//! 2. Everything up to and including the **last** `,` is discarded. The Base64
//!    alphabet has no comma, so any marker is removed whether or not it is
//!    spelled exactly `data:application/pdf;base64,`
//! 3. ASCII whitespace (space, tab, line breaks, form feed) in the body is
//!    ignored. Anything else outside the standard alphabet is
//!    [`DecodeError::InvalidEncoding`]
//!
//! The output name is the suggested name, trimmed, defaulting to
//! `decoded_document`, with `.pdf` appended unless it already ends with it.
//!
//! The encoder and decoder never look inside the bytes. Restricting input to
//! PDF files is a policy of [`Transfer`], which can be turned off.
//!
//! ```
//! use pdf_base64::{decode, encode};
//!
//! let text = encode(b"%PDF", true);
//! assert_eq!(text.as_str(), "data:application/pdf;base64,JVBERg==");
//!
//! let decoded = decode(text.as_str(), "report").unwrap();
//! assert_eq!(decoded.payload.as_bytes(), b"%PDF");
//! assert_eq!(decoded.file_name, "report.pdf");
//! ```

pub mod decoder;
pub mod encoder;
pub mod error;
pub mod payload;
pub mod transfer;

pub use decoder::{decode, derive_file_name, Decoder};
pub use encoder::{encode, Encoder};
pub use error::{DecodeError, TransferError};
pub use payload::{
    has_pdf_extension, is_pdf, media_type_of, BinaryPayload, Decoded, EncodedText,
    DEFAULT_BASE_NAME, MARKER_PREFIX, PDF_EXTENSION, PDF_MEDIA_TYPE, SEPARATOR,
};
pub use transfer::{
    MessageKind, Notifier, SilentNotifier, TracingNotifier, Transfer, TransferConfig,
};
