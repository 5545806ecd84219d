//! # Application Configuration
//!
//! Defines the configuration structure for `adlens-server` and the logic for
//! loading it from an optional `config.yml` plus environment variables.
//! Top-level keys are overridden by plain environment variables (`PORT`,
//! `DATA_DIR`), nested keys by `ADLENS_...` variables (e.g.
//! `ADLENS_CLASSIFIER__API_KEY`), and `${VAR}` references inside the YAML
//! are substituted from the environment.

use config::{Config as ConfigBuilder, Environment, File, FileFormat};
use regex::Regex;
use serde::Deserialize;
use std::env;
use std::fs;
use tracing::info;

/// A custom error type for configuration issues.
#[derive(Debug)]
pub enum ConfigError {
    /// Indicates an error from the underlying `config` crate.
    General(String),
    /// Indicates a required configuration file was not found.
    NotFound(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::General(msg) => write!(f, "Configuration error: {msg}"),
            ConfigError::NotFound(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<config::ConfigError> for ConfigError {
    fn from(err: config::ConfigError) -> Self {
        ConfigError::General(err.to_string())
    }
}

/// The root configuration structure, mapping directly to `config.yml`.
#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    /// The port for the server to listen on. Loaded from `PORT` env var.
    #[serde(default = "default_port")]
    pub port: u16,
    /// Root directory of the dataset store. Loaded from `DATA_DIR` env var.
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
    /// Request body limit for archive uploads, in bytes.
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: usize,
    /// The external classifier the analysis pipeline calls.
    pub classifier: ClassifierConfig,
}

fn default_port() -> u16 {
    8080
}

fn default_data_dir() -> String {
    "data".to_string()
}

fn default_max_upload_bytes() -> usize {
    // Ad batches are a handful of short clips; 100 MiB is generous.
    100 * 1024 * 1024
}

/// Configuration for the content-understanding provider.
#[derive(Debug, Deserialize, Clone)]
pub struct ClassifierConfig {
    /// The type of provider. Currently only "gemini".
    pub provider: String,
    /// The API URL. Optional; derived from the model name when unset.
    #[serde(default)]
    pub api_url: Option<String>,
    #[serde(default)]
    pub api_key: Option<String>,
    pub model_name: String,
    /// Per-file bound on one classification call.
    pub timeout_secs: u64,
    /// How many files are analyzed concurrently per batch.
    pub concurrency: usize,
}

// Helper to read a file, substitute env vars, and return its content.
// Returns Ok(None) if the file does not exist, or an error if it fails to read.
fn read_and_substitute(path: &str) -> Result<Option<String>, ConfigError> {
    if !std::path::Path::new(path).exists() {
        return Ok(None);
    }

    let content = fs::read_to_string(path)
        .map_err(|e| ConfigError::General(format!("Failed to read config file '{path}': {e}")))?;

    let re = Regex::new(r"\$\{(?P<var>[A-Z0-9_]+)\}").unwrap();
    let expanded_content = re.replace_all(&content, |caps: &regex::Captures| {
        let var_name = &caps["var"];
        env::var(var_name).unwrap_or_else(|_| "".to_string())
    });

    Ok(Some(expanded_content.to_string()))
}

/// Loads the application configuration from a file and environment variables.
///
/// The `config.yml` next to the manifest is optional: with no file present,
/// the built-in defaults plus environment variables fully describe a
/// working server. An explicit `config_path_override` must exist.
pub fn get_config(config_path_override: Option<&str>) -> Result<AppConfig, ConfigError> {
    let base_path = env!("CARGO_MANIFEST_DIR");
    let mut builder = ConfigBuilder::builder()
        // Layer 1: programmatic defaults.
        .set_default("classifier.provider", "gemini")?
        .set_default("classifier.model_name", "gemini-2.5-flash")?
        .set_default("classifier.timeout_secs", 120_i64)?
        .set_default("classifier.concurrency", 5_i64)?;

    // Layer 2: optional YAML file with ${VAR} substitution.
    let main_config_path = config_path_override
        .map(str::to_string)
        .unwrap_or_else(|| format!("{base_path}/config.yml"));
    match read_and_substitute(&main_config_path)? {
        Some(content) => {
            info!("Loading configuration from '{main_config_path}'.");
            builder = builder.add_source(File::from_str(&content, FileFormat::Yaml));
        }
        None if config_path_override.is_some() => {
            return Err(ConfigError::NotFound(format!(
                "Config file not found at '{main_config_path}'."
            )));
        }
        None => {}
    }

    let settings = builder
        // Layer 3: environment variables for top-level keys like PORT.
        .add_source(Environment::default())
        // Layer 4: prefixed environment variables for deeper overrides.
        .add_source(
            Environment::with_prefix("ADLENS")
                .prefix_separator("_")
                .try_parsing(true)
                .separator("__"),
        )
        .build()?;

    let mut config: AppConfig = settings.try_deserialize()?;

    // After all layers, fall back to the conventional GEMINI_API_KEY
    // variable so a bare environment works without a config file.
    if config.classifier.api_key.is_none() {
        if let Ok(key) = env::var("GEMINI_API_KEY") {
            if !key.is_empty() {
                config.classifier.api_key = Some(key);
            }
        }
    }

    Ok(config)
}
