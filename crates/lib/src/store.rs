//! The dataset store: sole owner of the on-disk dataset registry.
//!
//! Layout under the configured root is one directory per dataset holding
//! `images/`, `videos/` and `analysis.json`. Every mutation and every read
//! goes through this type; callers never scan the filesystem themselves.
//!
//! Publication is atomic at each step: extraction is staged in a temp
//! directory inside the root and installed with a rename, the analysis
//! document is written to a temp file and renamed into place, and deletion
//! removes the whole directory under the store's write lock so concurrent
//! readers observe a dataset either fully present or fully absent.

use crate::errors::StoreError;
use crate::types::{AnalysisDocument, DatasetSummary, MediaKind};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use tokio::fs;
use tokio::sync::RwLock;
use tracing::info;

const DOCUMENT_FILE: &str = "analysis.json";

pub struct DatasetStore {
    root: PathBuf,
    lock: RwLock<()>,
}

impl DatasetStore {
    /// Opens (creating if needed) a store rooted at `root`.
    pub async fn new(root: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let root = root.into();
        fs::create_dir_all(&root).await?;
        Ok(Self {
            root,
            lock: RwLock::new(()),
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Creates a staging directory inside the root, so installation is a
    /// same-filesystem rename. Dropping the handle discards the staging.
    pub fn stage(&self) -> Result<TempDir, StoreError> {
        let staging = tempfile::Builder::new()
            .prefix(".staging-")
            .tempdir_in(&self.root)?;
        Ok(staging)
    }

    /// Publishes a staged extraction as dataset `name`.
    pub async fn install(&self, name: &str, staged: TempDir) -> Result<PathBuf, StoreError> {
        let dir = self.dataset_dir(name)?;
        let _guard = self.lock.write().await;
        if fs::try_exists(&dir).await? {
            return Err(StoreError::DatasetAlreadyExists(name.to_string()));
        }
        let staged_path = staged.keep();
        fs::rename(&staged_path, &dir).await?;
        info!(dataset = %name, "dataset installed");
        Ok(dir)
    }

    /// Persists the analysis document for `name`, failing if one exists.
    pub async fn create(&self, name: &str, document: &AnalysisDocument) -> Result<(), StoreError> {
        let dir = self.dataset_dir(name)?;
        let _guard = self.lock.write().await;
        fs::create_dir_all(&dir).await?;

        let document_path = dir.join(DOCUMENT_FILE);
        if fs::try_exists(&document_path).await? {
            return Err(StoreError::DatasetAlreadyExists(name.to_string()));
        }

        let json = serde_json::to_vec_pretty(document)?;
        let tmp_path = dir.join(".analysis.json.tmp");
        fs::write(&tmp_path, &json).await?;
        fs::rename(&tmp_path, &document_path).await?;
        info!(dataset = %name, records = document.len(), "analysis document persisted");
        Ok(())
    }

    /// Returns the persisted analysis document for `name`.
    pub async fn get(&self, name: &str) -> Result<AnalysisDocument, StoreError> {
        let dir = self.dataset_dir(name)?;
        let _guard = self.lock.read().await;
        let bytes = match fs::read(dir.join(DOCUMENT_FILE)).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(StoreError::DatasetNotFound(name.to_string()))
            }
            Err(e) => return Err(e.into()),
        };
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// Lists every known dataset with its analysis status and file
    /// inventory. A dataset may exist with files but no completed analysis.
    pub async fn list(&self) -> Result<Vec<DatasetSummary>, StoreError> {
        let _guard = self.lock.read().await;
        let mut summaries = Vec::new();
        let mut entries = fs::read_dir(&self.root).await?;
        while let Some(entry) = entries.next_entry().await? {
            if !entry.file_type().await?.is_dir() {
                continue;
            }
            let Ok(name) = entry.file_name().into_string() else {
                continue;
            };
            // Staging directories are not datasets yet.
            if name.starts_with('.') {
                continue;
            }

            let dir = entry.path();
            let has_analysis = fs::try_exists(dir.join(DOCUMENT_FILE)).await?;
            let mut files = Vec::new();
            for kind in [MediaKind::Image, MediaKind::Video] {
                let media_dir = dir.join(kind.dir_name());
                let mut media_entries = match fs::read_dir(&media_dir).await {
                    Ok(entries) => entries,
                    Err(e) if e.kind() == ErrorKind::NotFound => continue,
                    Err(e) => return Err(e.into()),
                };
                while let Some(media_entry) = media_entries.next_entry().await? {
                    if let Ok(filename) = media_entry.file_name().into_string() {
                        files.push(filename);
                    }
                }
            }
            files.sort();

            summaries.push(DatasetSummary {
                name,
                has_analysis,
                files,
            });
        }
        summaries.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(summaries)
    }

    /// Removes dataset `name`: its media directory and its document, as one
    /// unit with respect to concurrent observers.
    pub async fn delete(&self, name: &str) -> Result<(), StoreError> {
        let dir = self.dataset_dir(name)?;
        let _guard = self.lock.write().await;
        match fs::remove_dir_all(&dir).await {
            Ok(()) => {
                info!(dataset = %name, "dataset deleted");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                Err(StoreError::DatasetNotFound(name.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Resolves a stored media file for byte-serving.
    pub async fn media_path(
        &self,
        name: &str,
        kind: MediaKind,
        filename: &str,
    ) -> Result<PathBuf, StoreError> {
        validate_component(filename)?;
        let path = self.dataset_dir(name)?.join(kind.dir_name()).join(filename);
        let _guard = self.lock.read().await;
        if !fs::try_exists(&path).await? {
            return Err(StoreError::DatasetNotFound(format!("{name}/{filename}")));
        }
        Ok(path)
    }

    fn dataset_dir(&self, name: &str) -> Result<PathBuf, StoreError> {
        validate_component(name)?;
        Ok(self.root.join(name))
    }
}

/// Dataset and file names are single path components; anything that could
/// traverse out of the root is rejected.
fn validate_component(name: &str) -> Result<(), StoreError> {
    if name.is_empty()
        || name.starts_with('.')
        || name.contains(['/', '\\'])
        || name.contains("..")
    {
        return Err(StoreError::InvalidName(name.to_string()));
    }
    Ok(())
}
