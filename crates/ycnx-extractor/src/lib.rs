//! YCNX Extractor
//!
//! Turns the first-page text of a notarization document into a corrected
//! [`PeriodRecord`](ycnx_domain::PeriodRecord).
//!
//! # Architecture
//!
//! ```text
//! Text → PromptBuilder → LLM (JSON mode) → parser → normalize → correct → PeriodRecord
//! ```
//!
//! The model reads the statistics well enough to place them, but not reliably
//! enough to trust the winner count. The correction pass reconciles the numbers
//! against two business rules:
//!
//! - **Full subscription**: the quota covers every registration, so everyone wins.
//! - **Quota exhausted**: registrations exceed the quota; a degenerate winner
//!   count (0 or 1) is replaced by the quota.
//!
//! # Example Usage
//!
//! ```
//! use ycnx_extractor::{Extractor, ExtractorConfig};
//! use ycnx_llm::MockProvider;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let llm = MockProvider::new(
//!     r#"{"batch_no": "YCCQPCH0000001", "draw_date": "2024-01-23",
//!         "total_applied": "500", "quota_total": "100",
//!         "total_won": "1", "total_lost": "499"}"#,
//! );
//! let extractor = Extractor::new(llm, ExtractorConfig::default());
//!
//! let record = extractor.extract_record("...page text...", 1, "https://example.invalid/1").await?;
//! assert_eq!(record.total_won, 100);
//! assert_eq!(record.total_lost, 400);
//! assert_eq!(record.win_rate, "20.00%");
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod config;
mod correction;
mod error;
mod extractor;
mod normalize;
mod parser;
mod prompt;
mod types;

#[cfg(test)]
mod tests;

pub use config::ExtractorConfig;
pub use correction::{correct, win_rate, Correction, Counts};
pub use error::ExtractorError;
pub use extractor::Extractor;
pub use normalize::{to_count, try_parse_count, NormalizeError};
pub use parser::parse_llm_response;
pub use prompt::{PromptBuilder, SYSTEM_INSTRUCTION};
pub use types::RawExtraction;
