//! Dataset lifecycle handlers: archive upload (the full analysis pipeline),
//! listing, analysis retrieval and deletion.

use crate::handlers::{wrap_response, ApiResponse, AppError, AppState};
use adlens::errors::IngestError;
use adlens::extract;
use adlens::types::{AnalysisDocument, DatasetSummary, ExtractedDataset};
use axum::{
    extract::{Path, State},
    Json,
};
use axum_extra::extract::Multipart;
use tracing::{info, warn};

/// Handler for `POST /datasets`: accepts a multipart archive upload and
/// runs the whole pipeline — stage, extract, install, analyze, persist —
/// returning the finished analysis document.
///
/// The document is committed in a single write after analysis completes;
/// aborting the request leaves either no dataset or a dataset without an
/// analysis document, never a partial one.
pub async fn upload_dataset_handler(
    State(app_state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<ApiResponse<AnalysisDocument>>, AppError> {
    let mut archive: Option<(String, Vec<u8>)> = None;

    while let Some(field) = multipart.next_field().await.map_err(anyhow::Error::from)? {
        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            "file" => {
                let filename = field.file_name().unwrap_or("upload.zip").to_string();
                let bytes = field.bytes().await.map_err(anyhow::Error::from)?.to_vec();
                archive = Some((filename, bytes));
            }
            other => warn!("Ignoring unknown multipart field: {other}"),
        }
    }

    let (filename, bytes) = archive.ok_or_else(|| {
        IngestError::InvalidArchive("multipart request is missing a `file` part".to_string())
    })?;
    if !filename.to_ascii_lowercase().ends_with(".zip") {
        return Err(IngestError::InvalidArchive(format!(
            "`{filename}` is not a .zip archive"
        ))
        .into());
    }

    let dataset_name = extract::dataset_name_for_archive(&filename)?;
    info!(
        dataset = %dataset_name,
        bytes = bytes.len(),
        "received archive upload"
    );

    // Extraction happens in a staging directory; only a fully successful
    // extraction is installed under the dataset's name.
    let staging = app_state.store.stage()?;
    let staging_path = staging.path().to_path_buf();
    let mut files = tokio::task::spawn_blocking(move || {
        extract::extract_archive(&bytes, &staging_path)
    })
    .await
    .map_err(|e| AppError::Internal(anyhow::anyhow!("extraction task failed: {e}")))??;

    let root = app_state.store.install(&dataset_name, staging).await?;
    for file in &mut files {
        file.rebase(&root);
    }
    let dataset = ExtractedDataset {
        name: dataset_name.clone(),
        root,
        files,
    };

    let document = app_state.analyzer.analyze(&dataset).await?;
    app_state.store.create(&dataset_name, &document).await?;

    info!(
        dataset = %dataset_name,
        records = document.len(),
        "dataset analyzed and persisted"
    );
    Ok(wrap_response(document))
}

/// Handler for `GET /datasets`: every known dataset with its analysis
/// status and file inventory.
pub async fn list_datasets_handler(
    State(app_state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<DatasetSummary>>>, AppError> {
    let summaries = app_state.store.list().await?;
    Ok(wrap_response(summaries))
}

/// Handler for `GET /datasets/{name}/analysis`: the persisted document.
pub async fn get_analysis_handler(
    State(app_state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<ApiResponse<AnalysisDocument>>, AppError> {
    let document = app_state.store.get(&name).await?;
    Ok(wrap_response(document))
}

/// Handler for `DELETE /datasets/{name}`: removes the dataset's directory
/// and document. Deleting an unknown dataset is reported as not found.
pub async fn delete_dataset_handler(
    State(app_state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<ApiResponse<String>>, AppError> {
    app_state.store.delete(&name).await?;
    Ok(wrap_response(format!("dataset `{name}` deleted")))
}
