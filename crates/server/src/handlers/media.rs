//! Raw media byte-serving for playback and preview by the dashboard.

use crate::handlers::{AppError, AppState};
use adlens::errors::StoreError;
use adlens::types::MediaKind;
use axum::{
    extract::{Path, State},
    http::header,
    response::{IntoResponse, Response},
};

/// Handler for `GET /datasets/{name}/media/{kind}/{filename}`: streams the
/// stored file bytes with a guessed content type.
pub async fn serve_media_handler(
    State(app_state): State<AppState>,
    Path((name, kind, filename)): Path<(String, String, String)>,
) -> Result<Response, AppError> {
    let kind = MediaKind::from_dir_name(&kind)
        .ok_or_else(|| StoreError::InvalidName(kind.clone()))?;

    let path = app_state.store.media_path(&name, kind, &filename).await?;
    let bytes = tokio::fs::read(&path)
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("failed to read media file: {e}")))?;
    let mime = mime_guess::from_path(&path).first_or_octet_stream();

    Ok((
        [(header::CONTENT_TYPE, mime.essence_str().to_string())],
        bytes,
    )
        .into_response())
}
