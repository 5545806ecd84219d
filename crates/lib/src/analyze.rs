//! The analysis orchestrator.
//!
//! Fans out over a dataset's file list on a bounded worker pool. For each
//! file its probe and its classification run concurrently; both outcomes are
//! awaited before the file's record is built, so a partial per-file record
//! never exists. Per-file failures are recorded on the record instead of
//! aborting the batch: the only operation-level failure is a dataset whose
//! file list cannot be enumerated.

use crate::classifier::{self, Classifier};
use crate::errors::{AnalyzeError, ClassifyError};
use crate::probe;
use crate::types::{AnalysisDocument, ExtractedDataset, MediaFile, MediaRecord};
use futures::{stream, StreamExt};
use std::time::Duration;
use tracing::{info, warn};

/// Tuning for the per-batch worker pool.
#[derive(Debug, Clone)]
pub struct AnalyzerConfig {
    /// How many files are probed/classified at once.
    pub concurrency: usize,
    /// Per-file bound on the classifier call; exceeding it yields a
    /// `ClassifierTimeout` for that file only.
    pub classify_timeout: Duration,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            concurrency: 5,
            classify_timeout: Duration::from_secs(120),
        }
    }
}

/// Builds analysis documents by merging prober and classifier output per
/// file.
#[derive(Debug)]
pub struct Analyzer {
    classifier: Box<dyn Classifier>,
    config: AnalyzerConfig,
}

impl Analyzer {
    pub fn new(classifier: Box<dyn Classifier>) -> Self {
        Self::with_config(classifier, AnalyzerConfig::default())
    }

    pub fn with_config(classifier: Box<dyn Classifier>, config: AnalyzerConfig) -> Self {
        Self { classifier, config }
    }

    /// Analyzes every file of an extracted dataset.
    ///
    /// The returned document has exactly one record per input file,
    /// regardless of how many individual probes or classifications failed.
    /// The document is built privately; committing it to a store is the
    /// caller's single final write.
    pub async fn analyze(
        &self,
        dataset: &ExtractedDataset,
    ) -> Result<AnalysisDocument, AnalyzeError> {
        if !dataset.root.is_dir() {
            return Err(AnalyzeError::DatasetMissing(dataset.name.clone()));
        }

        info!(
            dataset = %dataset.name,
            files = dataset.files.len(),
            "starting batch analysis"
        );

        let mut results = stream::iter(&dataset.files)
            .map(|file| async move { (file.name.clone(), self.analyze_file(file).await) })
            .buffer_unordered(self.config.concurrency.max(1))
            .boxed();

        let mut document = AnalysisDocument::default();
        while let Some((name, record)) = results.next().await {
            document.insert(name, record);
        }

        info!(
            dataset = %dataset.name,
            records = document.len(),
            "batch analysis complete"
        );
        Ok(document)
    }

    async fn analyze_file(&self, file: &MediaFile) -> MediaRecord {
        let probe = probe::probe_media(file);
        let classify = async {
            match tokio::time::timeout(
                self.config.classify_timeout,
                classifier::classify_file(self.classifier.as_ref(), file),
            )
            .await
            {
                Ok(result) => result,
                Err(_) => Err(ClassifyError::Timeout),
            }
        };

        // Both outcomes are awaited before the record exists at all.
        let (technical, semantic) = tokio::join!(probe, classify);

        if let Err(error) = &technical {
            warn!(file = %file.name, %error, "media probe failed");
        }
        if let Err(error) = &semantic {
            warn!(file = %file.name, %error, "classification failed");
        }

        let error = match (&technical, &semantic) {
            (Err(probe_err), Err(classify_err)) => Some(format!("{probe_err}; {classify_err}")),
            (Err(probe_err), Ok(_)) => Some(probe_err.to_string()),
            (Ok(_), Err(classify_err)) => Some(classify_err.to_string()),
            (Ok(_), Ok(_)) => None,
        };

        MediaRecord {
            technical: technical.ok(),
            semantic: semantic.ok(),
            error,
        }
    }
}
