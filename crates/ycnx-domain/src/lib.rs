//! YCNX Domain Layer
//!
//! Core model for the lottery-notarization ingestion pipeline. This crate has
//! no third-party dependencies and defines the records, value types and trait
//! interfaces that every other crate in the workspace builds on.
//!
//! ## Key Concepts
//!
//! - **Period**: one lottery drawing, identified by a small positive integer
//!   assigned in publication order
//! - **PeriodRecord**: the corrected statistics extracted for one period
//! - **FetchOutcome**: whether the source document for a period exists yet
//!
//! ## Architecture
//!
//! ```text
//! DocumentSource → RecordExtractor → PeriodStore
//! ```
//!
//! Infrastructure implementations live in the other crates; this crate only
//! names the seams between them.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod fetch;
pub mod record;
pub mod traits;

// Re-exports for convenience
pub use fetch::{AbsenceReason, FetchOutcome};
pub use record::{PeriodRecord, StoredRecord};
