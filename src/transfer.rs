//! Transfer orchestration
//!
//! Reads input from a file or text source, runs the encoder or decoder, and
//! routes the result to a writer or an output directory. All state the
//! conversions need is carried by [`Transfer`] itself.

use crate::decoder::Decoder;
use crate::encoder::Encoder;
use crate::error::TransferError;
use crate::payload::{
    has_pdf_extension, media_type_of, Decoded, EncodedText, DEFAULT_BASE_NAME,
    OCTET_STREAM_MEDIA_TYPE, PDF_MAGIC, PDF_MEDIA_TYPE,
};
use std::fs;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use tracing::warn;

/// Kind of a user-facing status message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Success,
    Error,
    Info,
}

/// Receives status messages produced while converting
pub trait Notifier {
    fn notify(&self, kind: MessageKind, message: &str);
}

/// Sends status messages to `tracing`
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, kind: MessageKind, message: &str) {
        match kind {
            MessageKind::Success | MessageKind::Info => tracing::info!("{}", message),
            MessageKind::Error => tracing::warn!("{}", message),
        }
    }
}

/// Drops every message
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentNotifier;

impl Notifier for SilentNotifier {
    fn notify(&self, _kind: MessageKind, _message: &str) {}
}

/// Configuration for a [`Transfer`]
#[derive(Debug, Clone)]
pub struct TransferConfig {
    /// Emit `data:application/pdf;base64,` before the Base64 body
    pub include_prefix: bool,
    /// Refuse to encode files whose media type is not `application/pdf`
    pub require_pdf: bool,
    /// Directory decoded files are written to
    pub output_dir: PathBuf,
    /// Base name for decoded files when none is suggested
    pub default_name: String,
}

impl Default for TransferConfig {
    fn default() -> Self {
        Self {
            include_prefix: true,
            require_pdf: true,
            output_dir: PathBuf::from("."),
            default_name: DEFAULT_BASE_NAME.to_string(),
        }
    }
}

impl TransferConfig {
    pub fn with_prefix(mut self, include_prefix: bool) -> Self {
        self.include_prefix = include_prefix;
        self
    }

    pub fn with_require_pdf(mut self, require_pdf: bool) -> Self {
        self.require_pdf = require_pdf;
        self
    }

    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    pub fn with_default_name(mut self, name: impl Into<String>) -> Self {
        self.default_name = name.into();
        self
    }
}

/// Drives one conversion at a time between external sources and sinks
pub struct Transfer<N: Notifier = TracingNotifier> {
    config: TransferConfig,
    notifier: N,
}

impl Transfer<TracingNotifier> {
    /// Create a transfer that reports through `tracing`
    pub fn new(config: TransferConfig) -> Self {
        Self::with_notifier(config, TracingNotifier)
    }
}

impl<N: Notifier> Transfer<N> {
    pub fn with_notifier(config: TransferConfig, notifier: N) -> Self {
        Self { config, notifier }
    }

    pub fn config(&self) -> &TransferConfig {
        &self.config
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    fn encoder(&self) -> Encoder {
        Encoder::new().with_prefix(self.config.include_prefix)
    }

    fn decoder(&self) -> Decoder {
        Decoder::new().with_default_name(self.config.default_name.as_str())
    }

    /// Read a file and encode it.
    ///
    /// The media type is checked before the file is read in full: the
    /// extension first, then the leading bytes.
    pub fn encode_file(&self, path: &Path) -> Result<EncodedText, TransferError> {
        let name = path.file_name().map(|n| n.to_string_lossy());
        let media_type = match name.as_deref() {
            Some(name) if has_pdf_extension(name) => PDF_MEDIA_TYPE,
            _ if !self.config.require_pdf => OCTET_STREAM_MEDIA_TYPE,
            _ => {
                let header = Self::read_header(path).map_err(|e| {
                    self.io_failure(path, e, "An error occurred while reading the file.")
                })?;
                media_type_of(name.as_deref(), &header)
            }
        };
        self.check_media_type(path, media_type)?;
        self.notifier.notify(MessageKind::Info, "Encoding started...");

        let data = fs::read(path)
            .map_err(|e| self.io_failure(path, e, "An error occurred while reading the file."))?;
        Ok(self.encode_data(&data))
    }

    /// Encode bytes that are already in memory, given their declared media type
    pub fn encode_bytes(
        &self,
        data: &[u8],
        media_type: &str,
    ) -> Result<EncodedText, TransferError> {
        self.check_media_type(Path::new("<memory>"), media_type)?;
        self.notifier.notify(MessageKind::Info, "Encoding started...");
        Ok(self.encode_data(data))
    }

    fn read_header(path: &Path) -> std::io::Result<Vec<u8>> {
        let mut header = Vec::with_capacity(PDF_MAGIC.len());
        fs::File::open(path)?
            .take(PDF_MAGIC.len() as u64)
            .read_to_end(&mut header)?;
        Ok(header)
    }

    fn check_media_type(&self, path: &Path, media_type: &str) -> Result<(), TransferError> {
        if self.config.require_pdf && media_type != PDF_MEDIA_TYPE {
            self.notifier
                .notify(MessageKind::Error, "The selected file is not a PDF.");
            return Err(TransferError::NotPdf {
                path: path.to_path_buf(),
                media_type: media_type.to_string(),
            });
        }
        Ok(())
    }

    fn encode_data(&self, data: &[u8]) -> EncodedText {
        let encoded = self.encoder().encode(data);
        self.notifier
            .notify(MessageKind::Success, "PDF successfully encoded to Base64!");
        encoded
    }

    /// Write encoded text to `writer`.
    ///
    /// Returns `false` without writing when there is nothing to copy.
    pub fn copy_to<W: Write>(
        &self,
        text: &EncodedText,
        mut writer: W,
    ) -> Result<bool, TransferError> {
        if text.is_empty() {
            self.notifier.notify(
                MessageKind::Info,
                "Nothing to copy. Please encode a file first.",
            );
            return Ok(false);
        }

        writer
            .write_all(text.as_str().as_bytes())
            .and_then(|_| writer.flush())
            .map_err(|e| self.io_failure("<output>", e, "Failed to copy the encoded text."))?;
        Ok(true)
    }

    /// Decode `text` and save it in the output directory under the derived name.
    ///
    /// Nothing is written when decoding fails. An existing file with the same
    /// name is replaced.
    pub fn decode_to_dir(
        &self,
        text: &str,
        suggested_name: &str,
    ) -> Result<PathBuf, TransferError> {
        let decoded = self.decode(text, suggested_name)?;

        // Only the last component is used so the name cannot leave output_dir
        let file_name = Path::new(&decoded.file_name)
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| self.decoder().file_name("").into());
        let path = self.config.output_dir.join(file_name);

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                self.io_failure(parent, e, "An error occurred while saving the file.")
            })?;
        }
        if path.exists() {
            warn!(path = %path.display(), "replacing existing file");
            self.notifier.notify(
                MessageKind::Info,
                &format!("Overwriting existing file '{}'", path.display()),
            );
        }
        fs::write(&path, decoded.payload.as_bytes())
            .map_err(|e| self.io_failure(&path, e, "An error occurred while saving the file."))?;

        self.notifier.notify(
            MessageKind::Success,
            &format!("Saved '{}' ({} bytes)", path.display(), decoded.payload.len()),
        );
        Ok(path)
    }

    /// Decode `text` and write the bytes to `writer`
    pub fn decode_to_writer<W: Write>(
        &self,
        text: &str,
        suggested_name: &str,
        mut writer: W,
    ) -> Result<Decoded, TransferError> {
        let decoded = self.decode(text, suggested_name)?;
        writer
            .write_all(decoded.payload.as_bytes())
            .and_then(|_| writer.flush())
            .map_err(|e| {
                self.io_failure("<output>", e, "An error occurred while saving the file.")
            })?;
        Ok(decoded)
    }

    fn decode(&self, text: &str, suggested_name: &str) -> Result<Decoded, TransferError> {
        self.decoder().decode(text, suggested_name).map_err(|e| {
            self.notifier.notify(MessageKind::Error, &e.to_string());
            TransferError::from(e)
        })
    }

    /// Report an I/O failure to the notifier and wrap it
    fn io_failure(
        &self,
        path: impl Into<PathBuf>,
        source: std::io::Error,
        message: &str,
    ) -> TransferError {
        self.notifier.notify(MessageKind::Error, message);
        TransferError::io(path, source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DecodeError;
    use std::cell::RefCell;

    #[derive(Default)]
    struct Recorder {
        messages: RefCell<Vec<(MessageKind, String)>>,
    }

    impl Notifier for Recorder {
        fn notify(&self, kind: MessageKind, message: &str) {
            self.messages.borrow_mut().push((kind, message.to_string()));
        }
    }

    impl Recorder {
        fn last(&self) -> Option<(MessageKind, String)> {
            self.messages.borrow().last().cloned()
        }
    }

    fn transfer(config: TransferConfig) -> Transfer<Recorder> {
        Transfer::with_notifier(config, Recorder::default())
    }

    const SAMPLE_PDF: &[u8] = b"%PDF-1.4\n1 0 obj\n<< /Type /Catalog >>\nendobj\n%%EOF\n";

    #[test]
    fn test_encode_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sample.pdf");
        fs::write(&path, SAMPLE_PDF).unwrap();

        let t = transfer(TransferConfig::default());
        let encoded = t.encode_file(&path).unwrap();

        assert!(encoded.as_str().starts_with("data:application/pdf;base64,JVBERi0x"));
        let messages = t.notifier().messages.borrow();
        assert_eq!(messages[0], (MessageKind::Info, "Encoding started...".to_string()));
        assert_eq!(messages[1].0, MessageKind::Success);
    }

    #[test]
    fn test_encode_file_without_prefix() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sample.pdf");
        fs::write(&path, [0x25, 0x50, 0x44, 0x46]).unwrap();

        let t = transfer(TransferConfig::default().with_prefix(false));
        assert_eq!(t.encode_file(&path).unwrap().as_str(), "JVBERg==");
    }

    #[test]
    fn test_encode_file_missing() {
        let dir = tempfile::tempdir().unwrap();
        let t = transfer(TransferConfig::default());

        let err = t.encode_file(&dir.path().join("missing.pdf")).unwrap_err();
        assert!(matches!(err, TransferError::Io { .. }));
        assert_eq!(t.notifier().last().unwrap().0, MessageKind::Error);
    }

    #[test]
    fn test_encode_rejects_non_pdf() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        fs::write(&path, "just text").unwrap();

        let t = transfer(TransferConfig::default());
        let err = t.encode_file(&path).unwrap_err();
        assert!(matches!(err, TransferError::NotPdf { .. }));
        // Rejected before encoding is announced
        assert_eq!(
            *t.notifier().messages.borrow(),
            vec![(MessageKind::Error, "The selected file is not a PDF.".to_string())]
        );
    }

    #[test]
    fn test_encode_accepts_pdf_magic_without_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scan");
        fs::write(&path, SAMPLE_PDF).unwrap();

        let t = transfer(TransferConfig::default());
        assert!(t.encode_file(&path).is_ok());
    }

    #[test]
    fn test_encode_any_type_when_policy_disabled() {
        let t = transfer(TransferConfig::default().with_require_pdf(false).with_prefix(false));
        let encoded = t.encode_bytes(b"%PD", "text/plain").unwrap();
        assert_eq!(encoded.as_str(), "JVBE");
    }

    #[test]
    fn test_copy_to() {
        let t = transfer(TransferConfig::default());
        let mut out = Vec::new();
        assert!(t.copy_to(&EncodedText::new("JVBERg=="), &mut out).unwrap());
        assert_eq!(out, b"JVBERg==");
    }

    struct BrokenWriter;

    impl Write for BrokenWriter {
        fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
            Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_copy_to_write_failure_reported() {
        let t = transfer(TransferConfig::default());
        let err = t.copy_to(&EncodedText::new("JVBERg=="), BrokenWriter).unwrap_err();
        assert!(matches!(err, TransferError::Io { .. }));
        assert_eq!(t.notifier().last().unwrap().0, MessageKind::Error);
    }

    #[test]
    fn test_copy_to_nothing() {
        let t = transfer(TransferConfig::default());
        let mut out = Vec::new();
        assert!(!t.copy_to(&EncodedText::default(), &mut out).unwrap());
        assert!(out.is_empty());
        assert_eq!(t.notifier().last().unwrap().0, MessageKind::Info);
    }

    #[test]
    fn test_decode_to_dir() {
        let dir = tempfile::tempdir().unwrap();
        let t = transfer(TransferConfig::default().with_output_dir(dir.path()));

        let path = t
            .decode_to_dir("data:application/pdf;base64,JVBERg==", "report")
            .unwrap();
        assert_eq!(path, dir.path().join("report.pdf"));
        assert_eq!(fs::read(&path).unwrap(), vec![0x25, 0x50, 0x44, 0x46]);
        assert_eq!(t.notifier().last().unwrap().0, MessageKind::Success);
    }

    #[test]
    fn test_decode_to_dir_default_name() {
        let dir = tempfile::tempdir().unwrap();
        let t = transfer(
            TransferConfig::default()
                .with_output_dir(dir.path())
                .with_default_name("invoice"),
        );

        let path = t.decode_to_dir("JVBERg==", "  ").unwrap();
        assert_eq!(path, dir.path().join("invoice.pdf"));
    }

    #[test]
    fn test_decode_to_dir_stays_in_output_dir() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("out");
        let t = transfer(TransferConfig::default().with_output_dir(&out));

        let path = t.decode_to_dir("JVBERg==", "../escape").unwrap();
        assert_eq!(path, out.join("escape.pdf"));
        assert!(!dir.path().join("escape.pdf").exists());
    }

    #[test]
    fn test_decode_to_dir_unwritable_output_dir() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, b"not a directory").unwrap();

        let t = transfer(TransferConfig::default().with_output_dir(blocker.join("sub")));
        let err = t.decode_to_dir("JVBERg==", "a").unwrap_err();

        assert!(matches!(err, TransferError::Io { .. }));
        assert_eq!(
            t.notifier().last(),
            Some((MessageKind::Error, "An error occurred while saving the file.".to_string()))
        );
    }

    #[test]
    fn test_decode_to_dir_overwrite_reported() {
        let dir = tempfile::tempdir().unwrap();
        let existing = dir.path().join("report.pdf");
        fs::write(&existing, b"old contents").unwrap();

        let t = transfer(TransferConfig::default().with_output_dir(dir.path()));
        let path = t.decode_to_dir("JVBERg==", "report").unwrap();

        assert_eq!(path, existing);
        assert_eq!(fs::read(&path).unwrap(), vec![0x25, 0x50, 0x44, 0x46]);
        let messages = t.notifier().messages.borrow();
        assert!(messages
            .iter()
            .any(|(kind, msg)| *kind == MessageKind::Info && msg.starts_with("Overwriting")));
    }

    #[test]
    fn test_decode_failure_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let t = transfer(TransferConfig::default().with_output_dir(dir.path()));

        let err = t.decode_to_dir("not@@valid base64!!", "bad").unwrap_err();
        assert!(matches!(err, TransferError::Decode(DecodeError::InvalidEncoding(_))));
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
        assert_eq!(t.notifier().last().unwrap().0, MessageKind::Error);

        let err = t.decode_to_dir("   ", "bad").unwrap_err();
        assert!(matches!(err, TransferError::Decode(DecodeError::EmptyInput)));
        assert_eq!(
            t.notifier().last().unwrap().1,
            "Please paste a Base64 string into the input area."
        );
    }

    #[test]
    fn test_silent_notifier() {
        let config = TransferConfig::default().with_prefix(false);
        let t = Transfer::with_notifier(config, SilentNotifier);
        let encoded = t.encode_bytes(&[0x25, 0x50, 0x44, 0x46], PDF_MEDIA_TYPE).unwrap();
        assert_eq!(encoded.as_str(), "JVBERg==");
        assert!(t.config().require_pdf);
    }

    #[test]
    fn test_decode_to_writer() {
        let t = transfer(TransferConfig::default());
        let mut out = Vec::new();
        let decoded = t.decode_to_writer("JVBERg==", "x", &mut out).unwrap();
        assert_eq!(out, vec![0x25, 0x50, 0x44, 0x46]);
        assert_eq!(decoded.file_name, "x.pdf");
    }

    #[test]
    fn test_decode_to_writer_failure_reported() {
        let t = transfer(TransferConfig::default());
        let err = t.decode_to_writer("JVBERg==", "x", BrokenWriter).unwrap_err();
        assert!(matches!(err, TransferError::Io { .. }));
        assert_eq!(t.notifier().last().unwrap().0, MessageKind::Error);
    }

    #[test]
    fn test_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.pdf");
        fs::write(&input, SAMPLE_PDF).unwrap();

        let out_dir = dir.path().join("decoded");
        let t = transfer(TransferConfig::default().with_output_dir(&out_dir));
        let encoded = t.encode_file(&input).unwrap();
        let path = t.decode_to_dir(encoded.as_str(), "copy.PDF").unwrap();

        assert_eq!(path, out_dir.join("copy.PDF"));
        assert_eq!(fs::read(path).unwrap(), SAMPLE_PDF);
    }
}
