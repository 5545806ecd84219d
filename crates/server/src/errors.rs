use adlens::errors::{AnalyzeError, IngestError, StoreError};
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::error;

/// A custom error type for the server application.
///
/// This enum encapsulates the different kinds of errors that can occur
/// within the server, allowing them to be converted into appropriate HTTP
/// responses. Per-file probe and classifier failures never appear here:
/// they are recorded in the analysis document, not surfaced as HTTP errors.
pub enum AppError {
    /// Archive validation and extraction failures.
    Ingest(IngestError),
    /// Dataset store failures.
    Store(StoreError),
    /// Orchestrator-level failures.
    Analyze(AnalyzeError),
    /// Generic internal server errors.
    Internal(anyhow::Error),
}

impl From<IngestError> for AppError {
    fn from(err: IngestError) -> Self {
        AppError::Ingest(err)
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        AppError::Store(err)
    }
}

impl From<AnalyzeError> for AppError {
    fn from(err: AnalyzeError) -> Self {
        AppError::Analyze(err)
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status_code, error_message) = match self {
            AppError::Ingest(err) => match err {
                IngestError::InvalidArchive(_) | IngestError::EmptyDataset => {
                    (StatusCode::BAD_REQUEST, err.to_string())
                }
                IngestError::Io(e) => {
                    error!("Extraction I/O error: {e:?}");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "Archive extraction failed.".to_string(),
                    )
                }
            },
            AppError::Store(err) => match err {
                StoreError::DatasetNotFound(_) => (StatusCode::NOT_FOUND, err.to_string()),
                StoreError::DatasetAlreadyExists(_) => (StatusCode::CONFLICT, err.to_string()),
                StoreError::InvalidName(_) => (StatusCode::BAD_REQUEST, err.to_string()),
                StoreError::Io(_) | StoreError::Document(_) => {
                    error!("Dataset store error: {err:?}");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "Dataset store operation failed.".to_string(),
                    )
                }
            },
            AppError::Analyze(err) => match err {
                AnalyzeError::DatasetMissing(_) => (StatusCode::NOT_FOUND, err.to_string()),
            },
            AppError::Internal(err) => {
                error!("Internal server error: {err:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal server error occurred.".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status_code, body).into_response()
    }
}
