//! YCNX Document Fetcher
//!
//! Resolves a period's notarization document, downloads it and converts the
//! first page to plain text.
//!
//! # Architecture
//!
//! ```text
//! period id → URL → HTTP GET → %PDF check → temp file → pdftotext (page 1) → text
//! ```
//!
//! Only the cover page is converted: it carries the summary statistics. Every
//! failure along the way is reported as [`FetchOutcome::Absent`] with the
//! reason attached.
//!
//! # Example Usage
//!
//! ```no_run
//! use std::time::Duration;
//! use ycnx_domain::traits::DocumentSource;
//! use ycnx_fetcher::{HttpDocumentSource, PdfToText, DEFAULT_BASE_URL};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let source = HttpDocumentSource::new(
//!     DEFAULT_BASE_URL,
//!     Duration::from_secs(20),
//!     PdfToText::default(),
//! )?;
//!
//! let outcome = source.fetch(1).await;
//! println!("{} found: {}", outcome.url(), outcome.is_found());
//! # Ok(())
//! # }
//! ```
//!
//! [`FetchOutcome::Absent`]: ycnx_domain::FetchOutcome::Absent

#![warn(missing_docs)]

mod error;
mod pdf;
mod source;

pub use error::FetchError;
pub use pdf::{PageTextExtractor, PdfToText, DEFAULT_PDFTOTEXT_BIN};
pub use source::{is_pdf, HttpDocumentSource, DEFAULT_BASE_URL, DEFAULT_FETCH_TIMEOUT_SECS, PDF_MAGIC};
