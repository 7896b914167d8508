//! The ingestion loop

use crate::error::CrawlerError;
use crate::pacing::PacingPolicy;
use crate::report::{RunReport, StopReason};
use crate::snapshot::SnapshotWriter;
use std::fmt::Display;
use ycnx_domain::traits::{DocumentSource, PeriodStore, RecordExtractor};
use ycnx_domain::FetchOutcome;

/// Cursor and counters of one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlState {
    /// Next period to consider
    pub current_id: u64,

    /// Periods stored so far, in order
    pub inserted: Vec<u64>,

    /// Periods passed over because they were already stored
    pub skipped: usize,
}

impl CrawlState {
    /// Start at a period
    pub fn new(start_period: u64) -> Self {
        Self {
            current_id: start_period,
            inserted: Vec::new(),
            skipped: 0,
        }
    }

    /// Whether anything was stored
    pub fn new_data_found(&self) -> bool {
        !self.inserted.is_empty()
    }

    fn skip(&mut self) {
        self.skipped += 1;
        self.current_id += 1;
    }

    fn record_insert(&mut self) {
        self.inserted.push(self.current_id);
        self.current_id += 1;
    }

    fn finish(self, stop: StopReason) -> RunReport {
        RunReport {
            stop,
            inserted: self.inserted,
            skipped: self.skipped,
        }
    }
}

/// Walks period ids upward, ingesting every period not yet stored
///
/// Stops at the first period without a document, the first extraction
/// failure, or the first rejected insert. A later run resumes at the same
/// place since stored periods are skipped.
pub struct Crawler<D, X, S> {
    source: D,
    extractor: X,
    store: S,
    pacing: PacingPolicy,
    start_period: u64,
}

impl<D, X, S> Crawler<D, X, S>
where
    D: DocumentSource,
    X: RecordExtractor,
    X::Error: Display,
    S: PeriodStore,
    S::Error: Display,
{
    /// Create a crawler starting at period 1 with the default pacing
    pub fn new(source: D, extractor: X, store: S) -> Self {
        Self {
            source,
            extractor,
            store,
            pacing: PacingPolicy::default(),
            start_period: 1,
        }
    }

    /// Replace the pacing policy
    pub fn with_pacing(mut self, pacing: PacingPolicy) -> Self {
        self.pacing = pacing;
        self
    }

    /// Start at a different period
    pub fn with_start_period(mut self, start_period: u64) -> Self {
        self.start_period = start_period;
        self
    }

    /// The underlying store
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Give back the store
    pub fn into_store(self) -> S {
        self.store
    }

    /// Run the ingestion loop until a terminal condition
    ///
    /// # Errors
    ///
    /// Only a failing existence check aborts the run. Absent documents,
    /// extraction failures and rejected inserts end it normally and are
    /// described by [`RunReport::stop`].
    pub async fn run(&mut self) -> Result<RunReport, CrawlerError> {
        let mut state = CrawlState::new(self.start_period);
        tracing::info!("Crawl started at period {}", state.current_id);

        let stop = loop {
            let period_id = state.current_id;

            if self
                .store
                .exists(period_id)
                .map_err(|e| CrawlerError::Store(e.to_string()))?
            {
                tracing::debug!("Period {} already stored, skipping", period_id);
                state.skip();
                continue;
            }

            let (text, url) = match self.source.fetch(period_id).await {
                FetchOutcome::Found { text, url } => (text, url),
                FetchOutcome::Absent { url, reason } => {
                    tracing::info!("No document for period {} ({}), stopping", period_id, reason);
                    break StopReason::Exhausted {
                        period_id,
                        url,
                        reason,
                    };
                }
            };

            let record = match self.extractor.extract(&text, period_id, &url).await {
                Ok(record) => record,
                Err(e) => {
                    tracing::warn!(
                        "Extraction failed for period {}, document may not be final yet: {}",
                        period_id,
                        e
                    );
                    break StopReason::ExtractionBlocked {
                        period_id,
                        error: e.to_string(),
                    };
                }
            };

            if !self.store.insert(&record) {
                break StopReason::StoreRejected { period_id };
            }

            tracing::info!(
                "Stored {} ({}): {} applied, {} won, win rate {}",
                record.period_name,
                record.batch_no,
                record.total_applied,
                record.total_won,
                record.win_rate
            );
            state.record_insert();
            self.pacing.pause().await;
        };

        Ok(state.finish(stop))
    }

    /// Run, then export snapshots if anything new was stored
    pub async fn run_and_export(&mut self, writer: &SnapshotWriter) -> Result<RunReport, CrawlerError> {
        let report = self.run().await?;

        if report.new_data_found() {
            let history = self
                .store
                .list_all_descending()
                .map_err(|e| CrawlerError::Store(e.to_string()))?;
            writer.write(&history)?;
            tracing::info!("Exported {} records", history.len());
        } else {
            tracing::info!("No new data, snapshots left untouched");
        }

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_transitions() {
        let mut state = CrawlState::new(3);
        assert!(!state.new_data_found());

        state.skip();
        state.record_insert();
        assert_eq!(state.current_id, 5);
        assert_eq!(state.inserted, vec![4]);
        assert!(state.new_data_found());

        let report = state.finish(StopReason::StoreRejected { period_id: 5 });
        assert_eq!(report.skipped, 1);
        assert_eq!(report.inserted, vec![4]);
    }
}
