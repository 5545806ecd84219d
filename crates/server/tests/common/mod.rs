//! # Common Test Utilities
//!
//! Centralizes the test harness and helpers for the `adlens-server`
//! integration tests:
//!
//! - `TestApp`: spawns the real server on a random port with a temporary
//!   dataset store and the classifier pointed at an `httpmock::MockServer`.
//! - Builders for in-memory ZIP archives, tiny real PNGs and canned
//!   classifier payloads shaped like Gemini responses.

#![allow(unused)]

use adlens_server::{config::{AppConfig, ClassifierConfig}, router::create_router, state::build_app_state};
use anyhow::Result;
use httpmock::MockServer;
use image::ImageFormat;
use reqwest::Client;
use serde_json::{json, Value};
use std::io::{Cursor, Write};
use tempfile::{tempdir, TempDir};
use tokio::{net::TcpListener, task::JoinHandle};
use zip::write::SimpleFileOptions;

pub const MODEL_PATH: &str = "/v1beta/models/mock:generateContent";

/// A harness for end-to-end testing of the Axum server.
pub struct TestApp {
    pub address: String,
    pub client: Client,
    pub mock_server: MockServer,
    pub data_dir: TempDir,
    _server_handle: JoinHandle<()>,
}

impl TestApp {
    /// Spawns the application server and returns a `TestApp` instance.
    pub async fn spawn() -> Result<Self> {
        let _ = tracing_subscriber_init();

        let mock_server = MockServer::start();
        let data_dir = tempdir()?;

        let config = AppConfig {
            port: 0,
            data_dir: data_dir.path().to_str().unwrap().to_string(),
            max_upload_bytes: 50 * 1024 * 1024,
            classifier: ClassifierConfig {
                provider: "gemini".to_string(),
                api_url: Some(mock_server.url(MODEL_PATH)),
                api_key: Some("test-key".to_string()),
                model_name: "mock".to_string(),
                timeout_secs: 5,
                concurrency: 4,
            },
        };

        let app_state = build_app_state(config).await?;
        let app = create_router(app_state);

        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let address = format!("http://{}", listener.local_addr()?);
        let server_handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Ok(Self {
            address,
            client: Client::new(),
            mock_server,
            data_dir,
            _server_handle: server_handle,
        })
    }

    /// Uploads archive bytes under the given filename and returns the
    /// response.
    pub async fn upload(&self, filename: &str, bytes: Vec<u8>) -> Result<reqwest::Response> {
        let part = reqwest::multipart::Part::bytes(bytes).file_name(filename.to_string());
        let form = reqwest::multipart::Form::new().part("file", part);
        Ok(self
            .client
            .post(format!("{}/datasets", self.address))
            .multipart(form)
            .send()
            .await?)
    }
}

fn tracing_subscriber_init() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .compact()
        .try_init();
}

/// Builds an in-memory ZIP archive from `(entry name, bytes)` pairs.
pub fn build_zip(entries: &[(&str, Vec<u8>)]) -> Vec<u8> {
    let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
    for (name, data) in entries {
        writer
            .start_file(*name, SimpleFileOptions::default())
            .unwrap();
        writer.write_all(data).unwrap();
    }
    writer.finish().unwrap().into_inner()
}

/// Encodes a real, decodable PNG of the given size.
pub fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let mut buffer = Cursor::new(Vec::new());
    image::DynamicImage::new_rgba8(width, height)
        .write_to(&mut buffer, ImageFormat::Png)
        .unwrap();
    buffer.into_inner()
}

fn indices() -> Value {
    json!({
        "fear_index": 0.0,
        "comfort_index": 0.3,
        "humor_index": 0.1,
        "success_index": 0.6,
        "love_index": 0.0,
        "family_index": 0.2,
        "adventure_index": 0.4,
        "nostalgia_index": 0.0,
        "health_index": 0.5,
        "luxury_index": 0.8
    })
}

/// A fully valid image classifier payload.
pub fn image_analysis_payload() -> Value {
    let mut payload = json!({
        "product_name": "Northwind luggage",
        "targeting_type": "first_impression",
        "visual_appeal_rating": 4,
        "comprehension_rating": 5,
        "purchase_urgency": "medium",
        "conversion_focused": true,
        "message_types": ["demonstration"],
        "target_age_range": "25-35",
        "target_income_level": "high",
        "target_geographic_area": "urban",
        "target_interests": ["travel"],
        "visual_motifs": ["suitcase", "airport", "sunrise"],
        "color_palette": ["#223344", "#eeddcc"]
    });
    for (key, value) in indices().as_object().unwrap() {
        payload[key.as_str()] = value.clone();
    }
    payload
}

/// Wraps a payload the way the Gemini API returns it.
pub fn gemini_reply(inner: &Value) -> Value {
    json!({
        "candidates": [
            {"content": {"parts": [{"text": inner.to_string()}]}}
        ]
    })
}
