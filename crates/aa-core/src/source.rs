//! Providers of OCR text.
//!
//! The OCR engine itself lives outside this crate. Whatever produced the
//! text, a failed read is logged and classified as empty input, so callers
//! always get an [`Intent`] back.

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::classifier::IntentClassifier;
use crate::intent::Intent;

/// Default cap on how much text is handed to the classifier (1 MiB).
pub const DEFAULT_MAX_INPUT_BYTES: usize = 1024 * 1024;

/// Errors from reading OCR text.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("failed to read {}: {source}", .path.display())]
    File {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("input is not valid UTF-8")]
    NotUtf8,
}

/// Something that yields the text recognised in one screenshot.
pub trait TextSource {
    /// Human-readable origin, used in logs.
    fn describe(&self) -> String;

    fn read_text(&mut self) -> Result<String, SourceError>;
}

/// OCR text previously written to a file.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TextSource for FileSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    fn read_text(&mut self) -> Result<String, SourceError> {
        let bytes = fs::read(&self.path).map_err(|source| SourceError::File {
            path: self.path.clone(),
            source,
        })?;
        String::from_utf8(bytes).map_err(|_| SourceError::NotUtf8)
    }
}

/// OCR text arriving on a stream such as stdin.
#[derive(Debug)]
pub struct ReaderSource<R> {
    name: String,
    reader: R,
}

impl<R: Read> ReaderSource<R> {
    pub fn new(name: impl Into<String>, reader: R) -> Self {
        Self {
            name: name.into(),
            reader,
        }
    }
}

impl<R: Read> TextSource for ReaderSource<R> {
    fn describe(&self) -> String {
        self.name.clone()
    }

    fn read_text(&mut self) -> Result<String, SourceError> {
        let mut bytes = Vec::new();
        self.reader.read_to_end(&mut bytes)?;
        String::from_utf8(bytes).map_err(|_| SourceError::NotUtf8)
    }
}

/// Reads `source`, substituting empty text on failure and capping the length.
pub fn read_or_empty<S: TextSource + ?Sized>(source: &mut S, max_bytes: usize) -> String {
    match source.read_text() {
        Ok(text) => truncate_to_char_boundary(text, max_bytes),
        Err(e) => {
            tracing::warn!(source = %source.describe(), error = %e, "text source failed, classifying empty input");
            String::new()
        }
    }
}

/// Reads `source` and classifies whatever came back.
pub fn classify_source<S: TextSource + ?Sized>(
    source: &mut S,
    classifier: &IntentClassifier,
    max_bytes: usize,
) -> Intent {
    classifier.classify(&read_or_empty(source, max_bytes))
}

/// Cuts `text` to at most `max_bytes` without splitting a character.
fn truncate_to_char_boundary(mut text: String, max_bytes: usize) -> String {
    if text.len() > max_bytes {
        let mut cut = max_bytes;
        while !text.is_char_boundary(cut) {
            cut -= 1;
        }
        tracing::warn!(len = text.len(), max_bytes, "truncating oversized input");
        text.truncate(cut);
    }
    text
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    struct FailingSource;

    impl TextSource for FailingSource {
        fn describe(&self) -> String {
            "camera roll".to_string()
        }

        fn read_text(&mut self) -> Result<String, SourceError> {
            Err(SourceError::Io(io::Error::other("decoder crashed")))
        }
    }

    #[test]
    fn failing_source_classifies_as_none() {
        let classifier = IntentClassifier::default();
        assert_eq!(
            classify_source(&mut FailingSource, &classifier, DEFAULT_MAX_INPUT_BYTES),
            Intent::None
        );
    }

    #[test]
    fn missing_file_reads_as_empty() {
        let temp = tempfile::tempdir().unwrap();
        let mut source = FileSource::new(temp.path().join("missing.txt"));
        assert_eq!(read_or_empty(&mut source, DEFAULT_MAX_INPUT_BYTES), "");
    }

    #[test]
    fn file_source_reads_text() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("shot.txt");
        fs::write(&path, "123 Main Street").unwrap();

        let mut source = FileSource::new(&path);
        assert_eq!(source.read_text().unwrap(), "123 Main Street");
        assert_eq!(source.describe(), path.display().to_string());
    }

    #[test]
    fn invalid_utf8_is_an_error() {
        let mut source = ReaderSource::new("stdin", Cursor::new(vec![0xff, 0xfe]));
        assert!(matches!(source.read_text(), Err(SourceError::NotUtf8)));
    }

    #[test]
    fn truncates_on_char_boundary() {
        let mut source = ReaderSource::new("stdin", Cursor::new("aé€".as_bytes().to_vec()));
        assert_eq!(read_or_empty(&mut source, 2), "a");

        let mut source = ReaderSource::new("stdin", Cursor::new(b"hello".to_vec()));
        assert_eq!(read_or_empty(&mut source, 3), "hel");
    }
}
