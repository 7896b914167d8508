//! YCNX Crawler
//!
//! The ingestion loop: probes period ids in order, extracts and stores every
//! new period, and exports snapshots when anything was added.
//!
//! # Overview
//!
//! Period ids are assigned densely by the publisher, so the crawler needs no
//! catalog: it walks ids upward from the start period and the first missing
//! document marks the end of what is published.
//!
//! ```text
//! ┌─────────┐ stored  ┌──────┐
//! │  Skip   │◄────────┤ id   │
//! └────┬────┘         └──┬───┘
//!      │ id += 1         │ absent from store
//!      ▼                 ▼
//!    (next)           ┌───────┐ absent   ┌────────────────────┐
//!                     │ Probe ├─────────►│ Terminal: exhausted│
//!                     └───┬───┘          └────────────────────┘
//!                         │ text
//!                         ▼
//!                     ┌─────────┐ error  ┌──────────────────────────────┐
//!                     │ Extract ├───────►│ Terminal: extraction blocked │
//!                     └───┬─────┘        └──────────────────────────────┘
//!                         │ record
//!                         ▼
//!                     ┌────────┐ rejected ┌────────────────────────────┐
//!                     │ Insert ├─────────►│ Terminal: store rejected   │
//!                     └───┬────┘          └────────────────────────────┘
//!                         │ id += 1, pace
//!                         ▼
//!                       (next)
//! ```
//!
//! # Usage
//!
//! ```no_run
//! use ycnx_crawler::{Crawler, PacingPolicy, SnapshotWriter};
//! use ycnx_extractor::{Extractor, ExtractorConfig};
//! use ycnx_fetcher::{HttpDocumentSource, PdfToText, DEFAULT_BASE_URL};
//! use ycnx_llm::GroqProvider;
//! use ycnx_store::SqliteStore;
//! use std::time::Duration;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let source = HttpDocumentSource::new(DEFAULT_BASE_URL, Duration::from_secs(20), PdfToText::default())?;
//! let llm = GroqProvider::default_endpoint("llama-3.1-8b-instant", std::env::var("GROQ_API_KEY").unwrap_or_default())?;
//! let extractor = Extractor::new(llm, ExtractorConfig::default());
//! let store = SqliteStore::new("ycnx_data.db")?;
//!
//! let mut crawler = Crawler::new(source, extractor, store)
//!     .with_pacing(PacingPolicy::Fixed(Duration::from_secs(5)));
//! let writer = SnapshotWriter::new("history_data.json", "latest_data.json");
//!
//! let report = crawler.run_and_export(&writer).await?;
//! println!("{}", report.summary());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

pub mod config;
mod crawler;
mod error;
mod pacing;
mod report;
mod snapshot;

pub use config::{ConfigError, CrawlerConfig, LlmConfig, SourceConfig};
pub use crawler::{CrawlState, Crawler};
pub use error::CrawlerError;
pub use pacing::PacingPolicy;
pub use report::{RunReport, StopReason};
pub use snapshot::{to_pretty_json, SnapshotWriter};
