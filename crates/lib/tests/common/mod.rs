//! Shared helpers for the `adlens` integration tests: canned classifier
//! payloads, a Gemini-shaped response envelope and a mock classifier.

#![allow(unused)]

use adlens::classifier::{Classifier, ClassifyRequest};
use adlens::errors::ClassifyError;
use async_trait::async_trait;
use serde_json::{json, Value};
use std::time::Duration;

pub fn setup_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .compact()
        .try_init();
}

fn indices() -> Value {
    json!({
        "fear_index": 0.1,
        "comfort_index": 0.2,
        "humor_index": 0.0,
        "success_index": 0.7,
        "love_index": 0.0,
        "family_index": 0.3,
        "adventure_index": 0.5,
        "nostalgia_index": 0.0,
        "health_index": 0.4,
        "luxury_index": 0.6
    })
}

/// A fully valid image classifier payload.
pub fn image_payload() -> Value {
    let mut payload = json!({
        "product_name": "Glacier sparkling water",
        "targeting_type": "first_impression",
        "visual_appeal_rating": 4,
        "comprehension_rating": 5,
        "purchase_urgency": "medium",
        "conversion_focused": true,
        "message_types": ["demonstration"],
        "target_age_range": "25-35",
        "target_income_level": "middle",
        "target_geographic_area": "urban",
        "target_interests": ["fitness", "outdoors"],
        "visual_motifs": ["bottle", "ice", "mountain backdrop"],
        "color_palette": ["#0055aa", "#ffffff"]
    });
    merge_indices(&mut payload);
    payload
}

/// A fully valid video classifier payload.
pub fn video_payload() -> Value {
    let mut payload = json!({
        "product_name": "Glacier sparkling water",
        "targeting_type": "retargeting",
        "verbosity": "medium",
        "hook_rating": 3,
        "purchase_urgency": "high",
        "conversion_focused": true,
        "message_types": ["storytelling", "emotional_appeal"],
        "activity_level": "moderate",
        "music_intensity": "high",
        "product_visibility": "high",
        "target_age_range": "18-25",
        "target_income_level": "mixed",
        "target_geographic_area": "universal",
        "target_interests": ["sports"],
        "visual_motifs": ["splash", "close-up", "logo reveal"],
        "color_palette": ["#0055aa"],
        "scene_cuts": [0.0, 2.1, 4.8]
    });
    merge_indices(&mut payload);
    payload
}

fn merge_indices(payload: &mut Value) {
    for (key, value) in indices().as_object().unwrap() {
        payload[key.as_str()] = value.clone();
    }
}

/// Wraps a payload the way the Gemini API returns it.
pub fn gemini_reply(inner: &Value) -> Value {
    json!({
        "candidates": [
            {"content": {"parts": [{"text": inner.to_string()}]}}
        ]
    })
}

/// A classifier double that answers by mime type, optionally stalling on
/// video requests to provoke the orchestrator's timeout.
#[derive(Clone, Debug)]
pub struct MockClassifier {
    pub image_reply: String,
    pub video_reply: String,
    pub video_delay: Option<Duration>,
}

impl MockClassifier {
    pub fn new() -> Self {
        Self {
            image_reply: image_payload().to_string(),
            video_reply: video_payload().to_string(),
            video_delay: None,
        }
    }
}

#[async_trait]
impl Classifier for MockClassifier {
    async fn classify(&self, request: ClassifyRequest) -> Result<String, ClassifyError> {
        if request.mime_type.starts_with("video/") {
            if let Some(delay) = self.video_delay {
                tokio::time::sleep(delay).await;
            }
            Ok(self.video_reply.clone())
        } else {
            Ok(self.image_reply.clone())
        }
    }
}
