//! Kind-specific semantic schemas and boundary validation.
//!
//! The classifier returns loosely-typed JSON from an external model. This
//! module maps that data into typed records and enforces the declared value
//! domains: enumerated fields are case-normalized and must match a declared
//! value, ratings must lie in 1..=5, emotional indices are clamped and
//! rounded to the 0.1 grid, and array fields are truncated to their declared
//! maximum lengths. Anything that cannot be normalized is a
//! [`SchemaViolation`], which the classifier client reports as a malformed
//! response so corrupt data never reaches the dataset store.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// A single schema violation in a classifier response.
#[derive(Debug, Error)]
#[error("{field}: {problem}")]
pub struct SchemaViolation {
    pub field: String,
    pub problem: String,
}

impl SchemaViolation {
    fn new(field: &str, problem: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            problem: problem.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetingType {
    FirstImpression,
    Retargeting,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verbosity {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PurchaseUrgency {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageType {
    Humor,
    Storytelling,
    Demonstration,
    EmotionalAppeal,
    ProblemSolution,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityLevel {
    Sedentary,
    Moderate,
    Dynamic,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MusicIntensity {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductVisibility {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IncomeLevel {
    Low,
    Middle,
    High,
    Mixed,
}

/// The ten thematic imagery scores, each on the {0.0, 0.1, .., 1.0} grid.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EmotionalIndices {
    pub fear_index: f64,
    pub comfort_index: f64,
    pub humor_index: f64,
    pub success_index: f64,
    pub love_index: f64,
    pub family_index: f64,
    pub adventure_index: f64,
    pub nostalgia_index: f64,
    pub health_index: f64,
    pub luxury_index: f64,
}

/// Validated semantic attributes for a video advertisement.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VideoSemantics {
    pub product_name: String,
    pub targeting_type: TargetingType,
    pub verbosity: Verbosity,
    pub hook_rating: u8,
    pub purchase_urgency: PurchaseUrgency,
    pub conversion_focused: bool,
    pub message_types: Vec<MessageType>,
    pub activity_level: ActivityLevel,
    pub music_intensity: MusicIntensity,
    pub product_visibility: ProductVisibility,
    pub target_age_range: String,
    pub target_income_level: IncomeLevel,
    pub target_geographic_area: String,
    pub target_interests: Vec<String>,
    pub visual_motifs: Vec<String>,
    #[serde(flatten)]
    pub emotional: EmotionalIndices,
    pub color_palette: Vec<String>,
    /// Scene-cut timestamps in plain seconds.
    pub scene_cuts: Vec<f64>,
}

/// Validated semantic attributes for an image advertisement.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ImageSemantics {
    pub product_name: String,
    pub targeting_type: TargetingType,
    pub visual_appeal_rating: u8,
    pub comprehension_rating: u8,
    pub purchase_urgency: PurchaseUrgency,
    pub conversion_focused: bool,
    pub message_types: Vec<MessageType>,
    pub target_age_range: String,
    pub target_income_level: IncomeLevel,
    pub target_geographic_area: String,
    pub target_interests: Vec<String>,
    pub visual_motifs: Vec<String>,
    #[serde(flatten)]
    pub emotional: EmotionalIndices,
    pub color_palette: Vec<String>,
}

// --- Raw (pre-validation) shapes of the model response ---

#[derive(Deserialize)]
struct RawEmotionalIndices {
    fear_index: f64,
    comfort_index: f64,
    humor_index: f64,
    success_index: f64,
    love_index: f64,
    family_index: f64,
    adventure_index: f64,
    nostalgia_index: f64,
    health_index: f64,
    luxury_index: f64,
}

#[derive(Deserialize)]
struct RawVideoSemantics {
    product_name: String,
    targeting_type: String,
    verbosity: String,
    hook_rating: f64,
    purchase_urgency: String,
    conversion_focused: bool,
    message_types: Vec<String>,
    activity_level: String,
    music_intensity: String,
    product_visibility: String,
    target_age_range: String,
    target_income_level: String,
    target_geographic_area: String,
    #[serde(default)]
    target_interests: Vec<String>,
    visual_motifs: Vec<String>,
    #[serde(flatten)]
    emotional: RawEmotionalIndices,
    color_palette: Vec<String>,
    #[serde(default)]
    scene_cuts: Vec<f64>,
}

#[derive(Deserialize)]
struct RawImageSemantics {
    product_name: String,
    targeting_type: String,
    visual_appeal_rating: f64,
    comprehension_rating: f64,
    purchase_urgency: String,
    conversion_focused: bool,
    message_types: Vec<String>,
    target_age_range: String,
    target_income_level: String,
    target_geographic_area: String,
    #[serde(default)]
    target_interests: Vec<String>,
    visual_motifs: Vec<String>,
    #[serde(flatten)]
    emotional: RawEmotionalIndices,
    color_palette: Vec<String>,
}

/// Validates a raw video response against the video schema.
pub fn validate_video(raw: Value) -> Result<VideoSemantics, SchemaViolation> {
    let raw: RawVideoSemantics = serde_json::from_value(raw)
        .map_err(|e| SchemaViolation::new("response", e.to_string()))?;

    Ok(VideoSemantics {
        product_name: raw.product_name.trim().to_string(),
        targeting_type: parse_enum("targeting_type", &raw.targeting_type)?,
        verbosity: parse_enum("verbosity", &raw.verbosity)?,
        hook_rating: parse_rating("hook_rating", raw.hook_rating)?,
        purchase_urgency: parse_enum("purchase_urgency", &raw.purchase_urgency)?,
        conversion_focused: raw.conversion_focused,
        message_types: parse_enum_list("message_types", &raw.message_types)?,
        activity_level: parse_enum("activity_level", &raw.activity_level)?,
        music_intensity: parse_enum("music_intensity", &raw.music_intensity)?,
        product_visibility: parse_enum("product_visibility", &raw.product_visibility)?,
        target_age_range: raw.target_age_range.trim().to_string(),
        target_income_level: parse_enum("target_income_level", &raw.target_income_level)?,
        target_geographic_area: raw.target_geographic_area.trim().to_string(),
        target_interests: truncated(raw.target_interests, 3),
        visual_motifs: parse_motifs(raw.visual_motifs)?,
        emotional: normalize_indices(raw.emotional)?,
        color_palette: parse_palette(raw.color_palette)?,
        scene_cuts: parse_scene_cuts(raw.scene_cuts)?,
    })
}

/// Validates a raw image response against the image schema.
pub fn validate_image(raw: Value) -> Result<ImageSemantics, SchemaViolation> {
    let raw: RawImageSemantics = serde_json::from_value(raw)
        .map_err(|e| SchemaViolation::new("response", e.to_string()))?;

    Ok(ImageSemantics {
        product_name: raw.product_name.trim().to_string(),
        targeting_type: parse_enum("targeting_type", &raw.targeting_type)?,
        visual_appeal_rating: parse_rating("visual_appeal_rating", raw.visual_appeal_rating)?,
        comprehension_rating: parse_rating("comprehension_rating", raw.comprehension_rating)?,
        purchase_urgency: parse_enum("purchase_urgency", &raw.purchase_urgency)?,
        conversion_focused: raw.conversion_focused,
        message_types: parse_enum_list("message_types", &raw.message_types)?,
        target_age_range: raw.target_age_range.trim().to_string(),
        target_income_level: parse_enum("target_income_level", &raw.target_income_level)?,
        target_geographic_area: raw.target_geographic_area.trim().to_string(),
        target_interests: truncated(raw.target_interests, 3),
        visual_motifs: parse_motifs(raw.visual_motifs)?,
        emotional: normalize_indices(raw.emotional)?,
        color_palette: parse_palette(raw.color_palette)?,
    })
}

fn parse_enum<T: serde::de::DeserializeOwned>(
    field: &str,
    raw: &str,
) -> Result<T, SchemaViolation> {
    let normalized = raw.trim().to_ascii_lowercase();
    serde_json::from_value(Value::String(normalized)).map_err(|_| {
        SchemaViolation::new(field, format!("`{raw}` is not one of the declared values"))
    })
}

fn parse_enum_list<T: serde::de::DeserializeOwned>(
    field: &str,
    raw: &[String],
) -> Result<Vec<T>, SchemaViolation> {
    raw.iter().map(|value| parse_enum(field, value)).collect()
}

fn parse_rating(field: &str, raw: f64) -> Result<u8, SchemaViolation> {
    if !raw.is_finite() || raw.fract() != 0.0 || !(1.0..=5.0).contains(&raw) {
        return Err(SchemaViolation::new(
            field,
            format!("`{raw}` is not an integer in 1..=5"),
        ));
    }
    Ok(raw as u8)
}

fn normalize_index(field: &str, raw: f64) -> Result<f64, SchemaViolation> {
    if !raw.is_finite() {
        return Err(SchemaViolation::new(field, "index is not a finite number"));
    }
    Ok((raw.clamp(0.0, 1.0) * 10.0).round() / 10.0)
}

fn normalize_indices(raw: RawEmotionalIndices) -> Result<EmotionalIndices, SchemaViolation> {
    Ok(EmotionalIndices {
        fear_index: normalize_index("fear_index", raw.fear_index)?,
        comfort_index: normalize_index("comfort_index", raw.comfort_index)?,
        humor_index: normalize_index("humor_index", raw.humor_index)?,
        success_index: normalize_index("success_index", raw.success_index)?,
        love_index: normalize_index("love_index", raw.love_index)?,
        family_index: normalize_index("family_index", raw.family_index)?,
        adventure_index: normalize_index("adventure_index", raw.adventure_index)?,
        nostalgia_index: normalize_index("nostalgia_index", raw.nostalgia_index)?,
        health_index: normalize_index("health_index", raw.health_index)?,
        luxury_index: normalize_index("luxury_index", raw.luxury_index)?,
    })
}

fn truncated(mut values: Vec<String>, max: usize) -> Vec<String> {
    values.truncate(max);
    values
}

/// Visual motifs are declared as 3 to 5 entries: over-long lists are
/// truncated, under-populated lists are a violation.
fn parse_motifs(raw: Vec<String>) -> Result<Vec<String>, SchemaViolation> {
    if raw.len() < 3 {
        return Err(SchemaViolation::new(
            "visual_motifs",
            format!("expected at least 3 motifs, got {}", raw.len()),
        ));
    }
    Ok(truncated(raw, 5))
}

fn parse_palette(raw: Vec<String>) -> Result<Vec<String>, SchemaViolation> {
    truncated(raw, 5)
        .into_iter()
        .map(|color| normalize_hex(&color))
        .collect()
}

fn normalize_hex(raw: &str) -> Result<String, SchemaViolation> {
    let color = raw.trim().to_ascii_lowercase();
    let digits = color.strip_prefix('#').unwrap_or(&color);
    if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(SchemaViolation::new(
            "color_palette",
            format!("`{raw}` is not a #rrggbb color"),
        ));
    }
    Ok(format!("#{digits}"))
}

fn parse_scene_cuts(raw: Vec<f64>) -> Result<Vec<f64>, SchemaViolation> {
    for cut in &raw {
        if !cut.is_finite() || *cut < 0.0 {
            return Err(SchemaViolation::new(
                "scene_cuts",
                format!("`{cut}` is not a non-negative number of seconds"),
            ));
        }
    }
    Ok(raw)
}
