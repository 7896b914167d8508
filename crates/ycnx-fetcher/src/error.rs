//! Error types for the Fetcher

use thiserror::Error;

/// Errors that can occur while setting up or converting documents
#[derive(Error, Debug)]
pub enum FetchError {
    /// HTTP client could not be built
    #[error("HTTP client error: {0}")]
    Client(String),

    /// Temporary file I/O failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The converter failed or could not be started
    #[error("Conversion error: {0}")]
    Conversion(String),
}
