//! # Application State
//!
//! The shared application state (`AppState`) and the logic for building it
//! at startup: the dataset store, the classifier client and the analysis
//! orchestrator, all constructed from the loaded configuration.

use crate::config::AppConfig;
use adlens::{
    analyze::{Analyzer, AnalyzerConfig},
    classifier::{gemini::GeminiClassifier, Classifier},
    store::DatasetStore,
};
use std::{sync::Arc, time::Duration};

/// The shared application state, accessible from all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// The application's configuration.
    pub config: Arc<AppConfig>,
    /// The dataset store: sole source of truth for persisted analyses.
    pub store: Arc<DatasetStore>,
    /// The analysis orchestrator with its classifier client.
    pub analyzer: Arc<Analyzer>,
}

/// Builds the shared application state from the configuration.
pub async fn build_app_state(config: AppConfig) -> anyhow::Result<AppState> {
    let classifier_config = &config.classifier;
    let classifier: Box<dyn Classifier> = match classifier_config.provider.as_str() {
        "gemini" => {
            let api_key = classifier_config.api_key.clone().ok_or_else(|| {
                anyhow::anyhow!("api_key is required for the gemini classifier")
            })?;
            // If api_url is not provided in config, construct it from the model name.
            let api_url = classifier_config.api_url.clone().unwrap_or_else(|| {
                format!(
                    "https://generativelanguage.googleapis.com/v1beta/models/{}:generateContent",
                    classifier_config.model_name
                )
            });
            Box::new(GeminiClassifier::new(
                api_url,
                api_key,
                Duration::from_secs(classifier_config.timeout_secs),
            )?)
        }
        other => {
            return Err(anyhow::anyhow!(
                "Unsupported classifier provider type '{other}'"
            ));
        }
    };

    let analyzer = Analyzer::with_config(
        classifier,
        AnalyzerConfig {
            concurrency: classifier_config.concurrency,
            classify_timeout: Duration::from_secs(classifier_config.timeout_secs),
        },
    );

    let store = DatasetStore::new(&config.data_dir).await?;
    tracing::info!(data_dir = %config.data_dir, "Initialized dataset store.");

    Ok(AppState {
        config: Arc::new(config),
        store: Arc::new(store),
        analyzer: Arc::new(analyzer),
    })
}
