//! Batch classification of a directory of OCR text files.

use std::path::{Path, PathBuf};

use rayon::prelude::*;
use serde::Serialize;
use thiserror::Error;

use crate::classifier::IntentClassifier;
use crate::intent::Intent;
use crate::source::{FileSource, read_or_empty};

/// Errors from scanning a directory.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Classification result for one file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScanEntry {
    pub path: PathBuf,
    pub intent: Intent,
}

/// Classifies every `*.{extension}` file directly inside `dir`.
///
/// A missing directory yields no entries. A file that cannot be read is
/// logged and classified as empty, so it still gets an [`Intent::None`]
/// entry. Entries are sorted by path.
pub fn scan_directory(
    dir: &Path,
    extension: &str,
    classifier: &IntentClassifier,
    max_bytes: usize,
) -> Result<Vec<ScanEntry>, ScanError> {
    if !dir.exists() {
        return Ok(Vec::new());
    }

    let mut paths: Vec<PathBuf> = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() && path.extension().is_some_and(|e| e == extension) {
            paths.push(path);
        }
    }
    tracing::debug!(dir = ?dir, files = paths.len(), "scanning OCR text files");

    let mut entries: Vec<ScanEntry> = paths
        .into_par_iter()
        .map(|path| {
            let mut source = FileSource::new(path);
            let text = read_or_empty(&mut source, max_bytes);
            ScanEntry {
                intent: classifier.classify(&text),
                path: source.path().to_path_buf(),
            }
        })
        .collect();

    entries.sort_by(|a, b| a.path.cmp(&b.path));
    Ok(entries)
}
