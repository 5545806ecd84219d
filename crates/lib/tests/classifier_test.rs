//! Classifier-client tests against a wiremock stand-in for the Gemini API.

mod common;

use adlens::classifier::{self, gemini::GeminiClassifier};
use adlens::errors::ClassifyError;
use adlens::types::{MediaFile, MediaKind, Semantic};
use common::{gemini_reply, image_payload, setup_tracing};
use serde_json::json;
use std::time::Duration;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const MODEL_PATH: &str = "/v1beta/models/mock:generateContent";

async fn mock_endpoint(template: ResponseTemplate) -> (MockServer, GeminiClassifier) {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(MODEL_PATH))
        .respond_with(template)
        .mount(&server)
        .await;
    let classifier = GeminiClassifier::new(
        format!("{}{MODEL_PATH}", server.uri()),
        "test-key".to_string(),
        Duration::from_secs(5),
    )
    .unwrap();
    (server, classifier)
}

fn image_file() -> (TempDir, MediaFile) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("banner.png");
    std::fs::write(&path, b"png bytes").unwrap();
    let file = MediaFile {
        name: "banner.png".to_string(),
        path,
        kind: MediaKind::Image,
    };
    (dir, file)
}

#[tokio::test]
async fn a_valid_reply_becomes_typed_semantics() {
    setup_tracing();

    let mut payload = image_payload();
    payload["luxury_index"] = json!(0.73);
    let (_server, classifier) =
        mock_endpoint(ResponseTemplate::new(200).set_body_json(gemini_reply(&payload))).await;

    let (_dir, file) = image_file();
    let semantic = classifier::classify_file(&classifier, &file).await.unwrap();
    match semantic {
        Semantic::Image(image) => {
            assert_eq!(image.visual_appeal_rating, 4);
            // 0.73 lands on the 0.1 grid.
            assert_eq!(image.emotional.luxury_index, 0.7);
        }
        other => panic!("expected image semantics, got {other:?}"),
    }
}

#[tokio::test]
async fn a_code_fenced_reply_is_still_parsed() {
    let fenced = format!("```json\n{}\n```", image_payload());
    let envelope = json!({
        "candidates": [{"content": {"parts": [{"text": fenced}]}}]
    });
    let (_server, classifier) =
        mock_endpoint(ResponseTemplate::new(200).set_body_json(envelope)).await;

    let (_dir, file) = image_file();
    let semantic = classifier::classify_file(&classifier, &file).await.unwrap();
    assert!(matches!(semantic, Semantic::Image(_)));
}

#[tokio::test]
async fn an_out_of_domain_enum_is_a_malformed_response() {
    let mut payload = image_payload();
    payload["purchase_urgency"] = json!("sometime next week");
    let (_server, classifier) =
        mock_endpoint(ResponseTemplate::new(200).set_body_json(gemini_reply(&payload))).await;

    let (_dir, file) = image_file();
    let err = classifier::classify_file(&classifier, &file).await.unwrap_err();
    match err {
        ClassifyError::MalformedResponse(message) => {
            assert!(message.contains("purchase_urgency"), "got: {message}");
        }
        other => panic!("expected a malformed response, got {other:?}"),
    }
}

#[tokio::test]
async fn non_json_text_is_a_malformed_response() {
    let envelope = json!({
        "candidates": [{"content": {"parts": [{"text": "I could not analyze this."}]}}]
    });
    let (_server, classifier) =
        mock_endpoint(ResponseTemplate::new(200).set_body_json(envelope)).await;

    let (_dir, file) = image_file();
    let err = classifier::classify_file(&classifier, &file).await.unwrap_err();
    assert!(matches!(err, ClassifyError::MalformedResponse(_)));
}

#[tokio::test]
async fn an_http_error_is_a_rejection() {
    let (_server, classifier) =
        mock_endpoint(ResponseTemplate::new(429).set_body_string("quota exhausted")).await;

    let (_dir, file) = image_file();
    let err = classifier::classify_file(&classifier, &file).await.unwrap_err();
    match err {
        ClassifyError::Rejected(body) => assert!(body.contains("quota")),
        other => panic!("expected a rejection, got {other:?}"),
    }
}
