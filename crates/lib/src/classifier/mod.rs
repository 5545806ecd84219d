//! Client for the external content-understanding capability.
//!
//! A [`Classifier`] is the transport: it takes a media payload plus a prompt
//! and returns the model's raw text. [`classify_file`] layers the
//! kind-specific prompt selection and schema validation on top, so callers
//! only ever see typed semantics or a typed failure.

pub mod gemini;
pub mod prompts;

use crate::errors::ClassifyError;
use crate::schema;
use crate::types::{MediaFile, MediaKind, Semantic};
use async_trait::async_trait;
use dyn_clone::DynClone;
use std::fmt::Debug;

/// One classification request: the media bytes and the prompt describing
/// the field schema the model must fill in.
#[derive(Debug, Clone)]
pub struct ClassifyRequest {
    pub mime_type: String,
    pub data: Vec<u8>,
    pub prompt: String,
}

/// A transport to a content-understanding model.
#[async_trait]
pub trait Classifier: Send + Sync + Debug + DynClone {
    /// Sends one media payload for analysis and returns the raw model text.
    async fn classify(&self, request: ClassifyRequest) -> Result<String, ClassifyError>;
}

dyn_clone::clone_trait_object!(Classifier);

/// Classifies one extracted file: selects the schema prompt for its kind,
/// invokes the transport and validates the response.
///
/// Schema violations (including unparseable replies) become
/// [`ClassifyError::MalformedResponse`]; they are never passed through.
pub async fn classify_file(
    classifier: &dyn Classifier,
    file: &MediaFile,
) -> Result<Semantic, ClassifyError> {
    let prompt = match file.kind {
        MediaKind::Image => prompts::IMAGE_ANALYSIS_PROMPT,
        MediaKind::Video => prompts::VIDEO_ANALYSIS_PROMPT,
    };
    let data = tokio::fs::read(&file.path).await?;
    let mime_type = mime_guess::from_path(&file.path)
        .first_or_octet_stream()
        .essence_str()
        .to_string();

    let raw = classifier
        .classify(ClassifyRequest {
            mime_type,
            data,
            prompt: prompt.to_string(),
        })
        .await?;

    let body = strip_code_fences(&raw);
    let value: serde_json::Value = serde_json::from_str(body).map_err(|e| {
        ClassifyError::MalformedResponse(format!("response is not valid JSON: {e}"))
    })?;

    let semantic = match file.kind {
        MediaKind::Image => Semantic::Image(
            schema::validate_image(value)
                .map_err(|violation| ClassifyError::MalformedResponse(violation.to_string()))?,
        ),
        MediaKind::Video => Semantic::Video(
            schema::validate_video(value)
                .map_err(|violation| ClassifyError::MalformedResponse(violation.to_string()))?,
        ),
    };
    Ok(semantic)
}

/// Models sometimes wrap JSON replies in markdown code fences despite the
/// response mime type.
fn strip_code_fences(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    rest.strip_suffix("```").unwrap_or(rest).trim()
}
