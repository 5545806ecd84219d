//! Archive validation and extraction.
//!
//! An upload is a ZIP whose internal layout is not trusted: entries are
//! flattened to their base filename and routed into `images/` or `videos/`
//! by extension, wherever they sat inside the archive. Extraction targets a
//! staging directory owned by the caller, so a failed or empty extraction
//! never leaves a partial dataset behind.

use crate::errors::IngestError;
use crate::types::{MediaFile, MediaKind};
use std::collections::HashSet;
use std::fs::File;
use std::io::{self, Cursor};
use std::path::Path;
use tracing::{debug, warn};
use zip::ZipArchive;

/// Derives the dataset name from the uploaded archive's filename.
pub fn dataset_name_for_archive(filename: &str) -> Result<String, IngestError> {
    let name = Path::new(filename)
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or_default()
        .trim()
        .to_string();

    if name.is_empty() || name.starts_with('.') || name.contains(['/', '\\']) {
        return Err(IngestError::InvalidArchive(format!(
            "`{filename}` does not yield a usable dataset name"
        )));
    }
    Ok(name)
}

/// Unpacks `bytes` into `staging`, returning the recognized media files.
///
/// Fails with [`IngestError::InvalidArchive`] when the bytes are not a
/// well-formed ZIP and with [`IngestError::EmptyDataset`] when no entry has
/// a recognized image or video extension.
pub fn extract_archive(bytes: &[u8], staging: &Path) -> Result<Vec<MediaFile>, IngestError> {
    let mut archive = ZipArchive::new(Cursor::new(bytes))
        .map_err(|e| IngestError::InvalidArchive(e.to_string()))?;

    for kind in [MediaKind::Image, MediaKind::Video] {
        std::fs::create_dir_all(staging.join(kind.dir_name()))?;
    }

    let mut files: Vec<MediaFile> = Vec::new();
    let mut seen: HashSet<String> = HashSet::new();

    for index in 0..archive.len() {
        let mut entry = archive
            .by_index(index)
            .map_err(|e| IngestError::InvalidArchive(e.to_string()))?;
        if entry.is_dir() {
            continue;
        }

        let entry_path = entry.name().to_string();
        // macOS resource forks carry media extensions but no media.
        if entry_path.contains("__MACOSX") {
            continue;
        }

        let Some(filename) = Path::new(&entry_path)
            .file_name()
            .and_then(|name| name.to_str())
            .map(str::to_string)
        else {
            continue;
        };
        if filename.starts_with('.') {
            continue;
        }

        let Some(kind) = MediaKind::from_path(&filename) else {
            debug!(entry = %entry_path, "skipping unrecognized file");
            continue;
        };

        // Flattening can collide; the first occurrence wins so document
        // keys stay unique.
        if !seen.insert(filename.to_ascii_lowercase()) {
            warn!(file = %filename, "duplicate filename in archive, keeping first occurrence");
            continue;
        }

        let dest = staging.join(kind.dir_name()).join(&filename);
        let mut out = File::create(&dest)?;
        io::copy(&mut entry, &mut out).map_err(|e| {
            IngestError::InvalidArchive(format!("failed to extract `{filename}`: {e}"))
        })?;

        files.push(MediaFile {
            name: filename,
            path: dest,
            kind,
        });
    }

    if files.is_empty() {
        return Err(IngestError::EmptyDataset);
    }

    debug!(files = files.len(), "archive extracted");
    Ok(files)
}
