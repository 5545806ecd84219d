use thiserror::Error;

/// Errors raised while validating and unpacking an uploaded archive.
///
/// These surface immediately to the caller; a failed extraction never leaves
/// a partially created dataset behind.
#[derive(Error, Debug)]
pub enum IngestError {
    #[error("invalid archive: {0}")]
    InvalidArchive(String),

    #[error("archive contains no recognized image or video files")]
    EmptyDataset,

    #[error("extraction I/O failure: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised while reading a media file's container metadata.
#[derive(Error, Debug)]
pub enum ProbeError {
    #[error("unreadable media: {0}")]
    Unreadable(String),

    #[error("media probe I/O failure: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised by the classifier client.
///
/// Per-file by nature: the orchestrator records these on the affected file's
/// record instead of aborting the batch.
#[derive(Error, Debug)]
pub enum ClassifyError {
    #[error("failed to build HTTP client: {0}")]
    ClientBuild(reqwest::Error),

    #[error("failed to send request to the classifier: {0}")]
    Request(reqwest::Error),

    #[error("classifier call timed out")]
    Timeout,

    #[error("classifier rejected the request: {0}")]
    Rejected(String),

    #[error("classifier response failed schema validation: {0}")]
    MalformedResponse(String),

    #[error("failed to read media file: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised by the analysis orchestrator as a whole.
///
/// Individual media failures are data, not control flow; the only way the
/// operation itself fails is an unenumerable dataset.
#[derive(Error, Debug)]
pub enum AnalyzeError {
    #[error("dataset `{0}` is missing or unreadable")]
    DatasetMissing(String),
}

/// Errors raised by the dataset store.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("dataset `{0}` was not found")]
    DatasetNotFound(String),

    #[error("dataset `{0}` already exists")]
    DatasetAlreadyExists(String),

    #[error("invalid dataset or file name `{0}`")]
    InvalidName(String),

    #[error("dataset store I/O failure: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to serialize or parse an analysis document: {0}")]
    Document(#[from] serde_json::Error),
}
