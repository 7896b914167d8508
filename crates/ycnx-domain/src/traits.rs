//! Trait definitions for external interactions
//!
//! These traits define the boundaries between the ingestion loop and its
//! collaborators. Implementations live in other crates.

use crate::{FetchOutcome, PeriodRecord, StoredRecord};
use std::future::Future;

/// Append-only store of period records keyed by period id
///
/// Implemented by the infrastructure layer (ycnx-store). There are no update
/// or delete operations: a stored record is immutable.
pub trait PeriodStore {
    /// Error type for store operations
    type Error;

    /// Check whether a record exists for the period
    fn exists(&self, period_id: u64) -> Result<bool, Self::Error>;

    /// Insert a record if its period is absent
    ///
    /// Returns false when the period already exists or the write fails;
    /// implementations log the cause instead of returning it.
    fn insert(&mut self, record: &PeriodRecord) -> bool;

    /// Every stored record, most recent period first
    fn list_all_descending(&self) -> Result<Vec<StoredRecord>, Self::Error>;
}

/// Trait for the text-understanding service
///
/// Implemented by the infrastructure layer (ycnx-llm)
pub trait LlmProvider {
    /// Error type for LLM operations
    type Error;

    /// Generate a JSON object with deterministic decoding
    fn generate_json(
        &self,
        system: &str,
        prompt: &str,
    ) -> impl Future<Output = Result<String, Self::Error>> + Send;
}

/// Trait for resolving and retrieving a period's source document
///
/// Implemented by the infrastructure layer (ycnx-fetcher). Never fails: every
/// failure is reported as [`FetchOutcome::Absent`].
pub trait DocumentSource {
    /// Probe the document for a period and return its first-page text
    fn fetch(&self, period_id: u64) -> impl Future<Output = FetchOutcome> + Send;
}

/// Trait for turning document text into a corrected record
///
/// Implemented by the application layer (ycnx-extractor)
pub trait RecordExtractor {
    /// Error type for extraction operations
    type Error;

    /// Extract a record for a period from its first-page text
    fn extract(
        &self,
        text: &str,
        period_id: u64,
        pdf_url: &str,
    ) -> impl Future<Output = Result<PeriodRecord, Self::Error>> + Send;
}
