//! Technical probing of extracted media files.
//!
//! Probing is a pure read of container metadata: image headers through the
//! `image` crate, video containers through `ffprobe`'s JSON output. Nothing
//! here decodes full media content.

use crate::errors::ProbeError;
use crate::types::{ImageTechnical, MediaFile, MediaKind, Technical, VideoTechnical};
use serde::Deserialize;
use std::path::Path;
use tokio::process::Command;
use tracing::debug;

/// Conventional aspect-ratio labels matched within [`RATIO_TOLERANCE`] of
/// the raw width/height ratio.
const STANDARD_RATIOS: &[(&str, f64)] = &[
    ("16:9", 16.0 / 9.0),
    ("9:16", 9.0 / 16.0),
    ("4:3", 4.0 / 3.0),
    ("3:4", 3.0 / 4.0),
    ("1:1", 1.0),
    ("21:9", 21.0 / 9.0),
    ("4:5", 4.0 / 5.0),
    ("5:4", 5.0 / 4.0),
    ("3:2", 3.0 / 2.0),
    ("2:3", 2.0 / 3.0),
];

const RATIO_TOLERANCE: f64 = 0.02;

/// Probes one media file for its technical attributes.
pub async fn probe_media(file: &MediaFile) -> Result<Technical, ProbeError> {
    match file.kind {
        MediaKind::Image => probe_image(&file.path).await.map(Technical::Image),
        MediaKind::Video => probe_video(&file.path).await.map(Technical::Video),
    }
}

async fn probe_image(path: &Path) -> Result<ImageTechnical, ProbeError> {
    let path = path.to_path_buf();
    tokio::task::spawn_blocking(move || {
        let reader = image::ImageReader::open(&path)?.with_guessed_format()?;
        let format = reader
            .format()
            .ok_or_else(|| ProbeError::Unreadable("unrecognized image format".to_string()))?;
        let (width, height) = reader
            .into_dimensions()
            .map_err(|e| ProbeError::Unreadable(e.to_string()))?;
        Ok(ImageTechnical {
            width,
            height,
            resolution: format!("{width}x{height}"),
            format: format_label(format),
        })
    })
    .await
    .map_err(|e| ProbeError::Unreadable(format!("probe task failed: {e}")))?
}

fn format_label(format: image::ImageFormat) -> String {
    format
        .extensions_str()
        .first()
        .map(|ext| ext.to_ascii_uppercase())
        .unwrap_or_else(|| format!("{format:?}").to_ascii_uppercase())
}

async fn probe_video(path: &Path) -> Result<VideoTechnical, ProbeError> {
    let output = Command::new("ffprobe")
        .args([
            "-v",
            "quiet",
            "-print_format",
            "json",
            "-show_format",
            "-show_streams",
        ])
        .arg(path)
        .output()
        .await
        .map_err(|e| ProbeError::Unreadable(format!("failed to run ffprobe: {e}")))?;

    if !output.status.success() {
        return Err(ProbeError::Unreadable(format!(
            "ffprobe exited with {}: {}",
            output.status,
            String::from_utf8_lossy(&output.stderr).trim()
        )));
    }

    let probe: FfprobeOutput = serde_json::from_slice(&output.stdout)
        .map_err(|e| ProbeError::Unreadable(format!("unparseable ffprobe output: {e}")))?;

    let video = probe
        .streams
        .iter()
        .find(|stream| stream.codec_type.as_deref() == Some("video"))
        .ok_or_else(|| ProbeError::Unreadable("no video stream found".to_string()))?;
    let (width, height) = match (video.width, video.height) {
        (Some(w), Some(h)) if w > 0 && h > 0 => (w, h),
        _ => {
            return Err(ProbeError::Unreadable(
                "video stream is missing pixel dimensions".to_string(),
            ))
        }
    };

    let duration_secs = probe
        .format
        .duration
        .as_deref()
        .or(video.duration.as_deref())
        .and_then(|d| d.parse::<f64>().ok())
        .ok_or_else(|| ProbeError::Unreadable("container reports no duration".to_string()))?;

    // Missing audio is normal for ads; omit the bitrate rather than fail.
    let audio_bitrate_kbps = probe
        .streams
        .iter()
        .find(|stream| stream.codec_type.as_deref() == Some("audio"))
        .and_then(|stream| parse_kbps(stream.bit_rate.as_deref()));

    debug!(path = %path.display(), width, height, duration_secs, "probed video");

    Ok(VideoTechnical {
        width,
        height,
        resolution: format!("{width}x{height}"),
        format: container_label(probe.format.format_name.as_deref(), path),
        duration_secs,
        aspect_ratio: aspect_ratio_label(width, height),
        video_bitrate_kbps: parse_kbps(video.bit_rate.as_deref()),
        audio_bitrate_kbps,
    })
}

/// Reduces a pixel ratio to a conventional label, falling back to the
/// gcd-reduced raw ratio when nothing standard is close enough.
pub fn aspect_ratio_label(width: u32, height: u32) -> String {
    let ratio = f64::from(width) / f64::from(height);
    for (label, value) in STANDARD_RATIOS {
        if (ratio - value).abs() <= RATIO_TOLERANCE {
            return (*label).to_string();
        }
    }
    let divisor = gcd(width, height);
    format!("{}:{}", width / divisor, height / divisor)
}

fn gcd(mut a: u32, mut b: u32) -> u32 {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a.max(1)
}

/// ffprobe reports container names like "mov,mp4,m4a,3gp,3g2,mj2"; prefer
/// the component matching the file extension.
fn container_label(format_name: Option<&str>, path: &Path) -> String {
    let ext = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);
    let components: Vec<&str> = format_name.unwrap_or_default().split(',').collect();
    components
        .iter()
        .find(|component| Some((**component).to_string()) == ext)
        .or_else(|| components.first())
        .map(|component| component.trim().to_string())
        .filter(|component| !component.is_empty())
        .unwrap_or_else(|| "unknown".to_string())
}

fn parse_kbps(bit_rate: Option<&str>) -> Option<u64> {
    bit_rate.and_then(|rate| rate.parse::<u64>().ok()).map(|bps| bps / 1000)
}

// ---- ffprobe JSON shapes ----

#[derive(Debug, Deserialize)]
struct FfprobeOutput {
    format: FfprobeFormat,
    #[serde(default)]
    streams: Vec<FfprobeStream>,
}

#[derive(Debug, Deserialize)]
struct FfprobeFormat {
    format_name: Option<String>,
    duration: Option<String>,
}

#[derive(Debug, Deserialize)]
struct FfprobeStream {
    codec_type: Option<String>,
    width: Option<u32>,
    height: Option<u32>,
    duration: Option<String>,
    bit_rate: Option<String>,
}
