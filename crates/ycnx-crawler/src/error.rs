//! Error types for the Crawler

use thiserror::Error;

/// Errors that abort a crawl run
///
/// Pipeline outcomes (absent documents, failed extractions, rejected inserts)
/// are not errors: they end the run through a [`StopReason`](crate::StopReason).
#[derive(Error, Debug)]
pub enum CrawlerError {
    /// Storage layer error
    #[error("Storage error: {0}")]
    Store(String),

    /// Snapshot file I/O failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Snapshot serialization failed
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
