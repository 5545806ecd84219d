//! # adlens
//!
//! This crate implements the ingestion-to-aggregation pipeline for batches of
//! advertisement media: archive extraction, per-file technical probing,
//! concurrent classification through an external generative model, and
//! persistence of one analysis document per dataset.

pub mod analyze;
pub mod classifier;
pub mod errors;
pub mod extract;
pub mod probe;
pub mod schema;
pub mod store;
pub mod types;

pub use analyze::{Analyzer, AnalyzerConfig};
pub use classifier::Classifier;
pub use errors::{AnalyzeError, ClassifyError, IngestError, ProbeError, StoreError};
pub use store::DatasetStore;
pub use types::{AnalysisDocument, DatasetSummary, ExtractedDataset, MediaFile, MediaKind};
