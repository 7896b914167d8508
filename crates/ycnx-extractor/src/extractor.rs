//! Core Extractor implementation

use crate::config::ExtractorConfig;
use crate::correction::{correct, win_rate, Correction, Counts};
use crate::error::ExtractorError;
use crate::normalize::to_count;
use crate::parser::parse_llm_response;
use crate::prompt::{PromptBuilder, SYSTEM_INSTRUCTION};
use std::fmt::Display;
use tokio::time::timeout;
use tracing::{debug, info};
use ycnx_domain::record::{fallback_batch_no, period_name};
use ycnx_domain::traits::{LlmProvider, RecordExtractor};
use ycnx_domain::PeriodRecord;

/// The Extractor converts first-page document text into a corrected record
pub struct Extractor<L> {
    llm_provider: L,
    config: ExtractorConfig,
}

impl<L> Extractor<L>
where
    L: LlmProvider + Sync,
    L::Error: Display,
{
    /// Create a new Extractor
    pub fn new(llm_provider: L, config: ExtractorConfig) -> Self {
        Self { llm_provider, config }
    }

    /// Extract the record for `period_id` from its document text
    pub async fn extract_record(
        &self,
        text: &str,
        period_id: u64,
        pdf_url: &str,
    ) -> Result<PeriodRecord, ExtractorError> {
        let text_len = text.chars().count();
        if text_len > self.config.max_text_length {
            return Err(ExtractorError::TextTooLong(text_len, self.config.max_text_length));
        }

        info!("Extracting period {} ({} chars of text)", period_id, text_len);

        let prompt = PromptBuilder::new(text).build();
        let llm_response = self.call_llm(&prompt).await?;

        debug!("LLM response length: {} chars", llm_response.len());

        let raw = parse_llm_response(&llm_response)?;

        let extracted = Counts {
            applied: to_count(raw.total_applied.as_ref()),
            quota: to_count(raw.quota_total.as_ref()),
            won: to_count(raw.total_won.as_ref()),
            lost: to_count(raw.total_lost.as_ref()),
        };
        let (counts, correction) = correct(extracted);

        match correction {
            Correction::FullSubscription if extracted != counts => info!(
                "Period {}: full subscription, won {} -> {}, lost {} -> 0",
                period_id, extracted.won, counts.won, extracted.lost
            ),
            Correction::QuotaExhausted { won_forced: true } => info!(
                "Period {}: winner count {} misread, using quota {}",
                period_id, extracted.won, counts.won
            ),
            _ => {}
        }

        let batch_no = raw
            .batch_no
            .unwrap_or_else(|| fallback_batch_no(&self.config.batch_prefix, period_id));

        Ok(PeriodRecord {
            period_id,
            batch_no,
            period_name: period_name(period_id),
            draw_date: raw.draw_date,
            total_applied: counts.applied,
            quota_total: counts.quota,
            total_won: counts.won,
            total_lost: counts.lost,
            win_rate: win_rate(counts.won, counts.applied),
            pdf_url: pdf_url.to_string(),
        })
    }

    /// Call the LLM provider, bounded by the configured timeout if any
    async fn call_llm(&self, prompt: &str) -> Result<String, ExtractorError> {
        let call = self.llm_provider.generate_json(SYSTEM_INSTRUCTION, prompt);

        let result = match self.config.extraction_timeout() {
            Some(limit) => timeout(limit, call)
                .await
                .map_err(|_| ExtractorError::Timeout)?,
            None => call.await,
        };

        result.map_err(|e| ExtractorError::Llm(e.to_string()))
    }
}

impl<L> RecordExtractor for Extractor<L>
where
    L: LlmProvider + Sync,
    L::Error: Display,
{
    type Error = ExtractorError;

    async fn extract(
        &self,
        text: &str,
        period_id: u64,
        pdf_url: &str,
    ) -> Result<PeriodRecord, Self::Error> {
        self.extract_record(text, period_id, pdf_url).await
    }
}
