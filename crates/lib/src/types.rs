//! Core data model: media files, technical attributes, per-file records and
//! the aggregate analysis document.

use crate::schema::{ImageSemantics, VideoSemantics};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// The two media kinds the pipeline understands. The kind decides the
/// dataset subdirectory, the prober logic and the classifier schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaKind {
    Image,
    Video,
}

const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "webp"];
const VIDEO_EXTENSIONS: &[&str] = &["mp4", "mov", "webm", "avi", "mkv"];

impl MediaKind {
    /// Routes a filename by its extension. `None` means the file is not a
    /// recognized media kind and should be skipped.
    pub fn from_path(filename: &str) -> Option<Self> {
        let ext = Path::new(filename).extension()?.to_str()?.to_ascii_lowercase();
        if IMAGE_EXTENSIONS.contains(&ext.as_str()) {
            Some(MediaKind::Image)
        } else if VIDEO_EXTENSIONS.contains(&ext.as_str()) {
            Some(MediaKind::Video)
        } else {
            None
        }
    }

    /// Parses the dataset subdirectory name used in URLs and on disk.
    pub fn from_dir_name(dir: &str) -> Option<Self> {
        match dir {
            "images" => Some(MediaKind::Image),
            "videos" => Some(MediaKind::Video),
            _ => None,
        }
    }

    /// The dataset subdirectory this kind is stored under.
    pub fn dir_name(&self) -> &'static str {
        match self {
            MediaKind::Image => "images",
            MediaKind::Video => "videos",
        }
    }
}

/// One extracted media file on disk.
#[derive(Debug, Clone)]
pub struct MediaFile {
    /// Flattened base filename, unique within the dataset.
    pub name: String,
    pub path: PathBuf,
    pub kind: MediaKind,
}

impl MediaFile {
    /// Points the file at its location under a new dataset root. Used after
    /// a staged extraction is installed into the store.
    pub fn rebase(&mut self, root: &Path) {
        self.path = root.join(self.kind.dir_name()).join(&self.name);
    }
}

/// A fully extracted dataset: its name, its directory and its file list.
#[derive(Debug, Clone)]
pub struct ExtractedDataset {
    pub name: String,
    pub root: PathBuf,
    pub files: Vec<MediaFile>,
}

/// Technical attributes of an image, read from its container header.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ImageTechnical {
    pub width: u32,
    pub height: u32,
    pub resolution: String,
    pub format: String,
}

/// Technical attributes of a video, read via `ffprobe`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VideoTechnical {
    pub width: u32,
    pub height: u32,
    pub resolution: String,
    pub format: String,
    pub duration_secs: f64,
    pub aspect_ratio: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video_bitrate_kbps: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audio_bitrate_kbps: Option<u64>,
}

/// Technical attributes of either kind.
///
/// Untagged: the record shape distinguishes images from videos by which
/// fields are present. The video variant is listed first so the richer
/// field set is matched before the image subset.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum Technical {
    Video(VideoTechnical),
    Image(ImageTechnical),
}

/// Semantic attributes of either kind, as validated classifier output.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum Semantic {
    Video(VideoSemantics),
    Image(ImageSemantics),
}

/// One file's entry in the analysis document.
///
/// The sections reflect provenance: `technical` from the prober, `semantic`
/// from the classifier, `error` whenever either side failed. A record with
/// an error and no semantic section is still a complete record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub technical: Option<Technical>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub semantic: Option<Semantic>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// The aggregate analysis document: a mapping from filename to record.
///
/// Serializes as the bare mapping. Every extracted file appears exactly
/// once, even when its analysis failed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalysisDocument {
    #[serde(flatten)]
    records: BTreeMap<String, MediaRecord>,
}

impl AnalysisDocument {
    pub fn insert(&mut self, filename: String, record: MediaRecord) {
        self.records.insert(filename, record);
    }

    pub fn get(&self, filename: &str) -> Option<&MediaRecord> {
        self.records.get(filename)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &MediaRecord)> {
        self.records.iter()
    }
}

/// One row of the store's dataset listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetSummary {
    pub name: String,
    pub has_analysis: bool,
    pub files: Vec<String>,
}
