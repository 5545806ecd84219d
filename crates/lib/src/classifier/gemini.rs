use crate::classifier::{Classifier, ClassifyRequest};
use crate::errors::ClassifyError;
use async_trait::async_trait;
use base64::{engine::general_purpose, Engine as _};
use reqwest::Client as ReqwestClient;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use std::time::Duration;

// --- Gemini-specific request and response structures ---

#[derive(Serialize)]
struct GeminiRequest {
    contents: Vec<Content>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Serialize)]
#[serde(rename_all = "snake_case")]
enum Part {
    InlineData(InlineData),
    Text(String),
}

#[derive(Serialize)]
struct InlineData {
    mime_type: String,
    data: String,
}

#[derive(Serialize)]
struct GenerationConfig {
    response_mime_type: &'static str,
}

#[derive(Deserialize, Debug)]
struct GeminiResponse {
    candidates: Vec<Candidate>,
}

#[derive(Deserialize, Debug)]
struct Candidate {
    content: ContentResponse,
}

#[derive(Deserialize, Debug)]
struct ContentResponse {
    parts: Vec<PartResponse>,
}

#[derive(Deserialize, Debug)]
struct PartResponse {
    text: String,
}

// --- Gemini Classifier implementation ---

/// A classifier backed by the Google Gemini `generateContent` API.
///
/// The media bytes travel inline as base64 next to the schema prompt, and
/// the request asks for a JSON response body.
#[derive(Clone, Debug)]
pub struct GeminiClassifier {
    client: ReqwestClient,
    api_url: String,
    api_key: String,
}

impl GeminiClassifier {
    /// Creates a new `GeminiClassifier` with a transport-level timeout.
    pub fn new(
        api_url: String,
        api_key: String,
        timeout: Duration,
    ) -> Result<Self, ClassifyError> {
        let client = ReqwestClient::builder()
            .timeout(timeout)
            .build()
            .map_err(ClassifyError::ClientBuild)?;
        Ok(Self {
            client,
            api_url,
            api_key,
        })
    }
}

#[async_trait]
impl Classifier for GeminiClassifier {
    async fn classify(&self, request: ClassifyRequest) -> Result<String, ClassifyError> {
        let request_body = GeminiRequest {
            contents: vec![Content {
                parts: vec![
                    Part::InlineData(InlineData {
                        mime_type: request.mime_type,
                        data: general_purpose::STANDARD.encode(&request.data),
                    }),
                    Part::Text(request.prompt),
                ],
            }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json",
            },
        };

        let response = self
            .client
            .post(&self.api_url)
            .query(&[("key", &self.api_key)])
            .json(&request_body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ClassifyError::Timeout
                } else {
                    ClassifyError::Request(e)
                }
            })?;

        if !response.status().is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(ClassifyError::Rejected(error_text));
        }

        let gemini_response: GeminiResponse = response.json().await.map_err(|e| {
            ClassifyError::MalformedResponse(format!("undecodable response envelope: {e}"))
        })?;

        let raw_response = gemini_response
            .candidates
            .first()
            .and_then(|candidate| candidate.content.parts.first())
            .map(|part| part.text.clone())
            .unwrap_or_default();

        Ok(raw_response)
    }
}
