//! Error types

use std::path::PathBuf;
use thiserror::Error;

/// Errors returned by the decoder
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// Text was empty or whitespace only
    #[error("Please paste a Base64 string into the input area.")]
    EmptyInput,

    /// Body has characters outside the Base64 alphabet, or bad padding/length
    #[error("Invalid Base64 input: {0}")]
    InvalidEncoding(#[source] base64::DecodeError),
}

/// Errors returned by [`crate::transfer::Transfer`]
#[derive(Debug, Error)]
pub enum TransferError {
    #[error("An error occurred while reading or writing '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("The selected file is not a PDF: '{}' ({media_type})", path.display())]
    NotPdf {
        path: PathBuf,
        media_type: String,
    },

    #[error(transparent)]
    Decode(#[from] DecodeError),
}

impl TransferError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
