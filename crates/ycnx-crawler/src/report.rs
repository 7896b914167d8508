//! Outcome of a crawl run

use ycnx_domain::AbsenceReason;

/// Why the ingestion loop stopped
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StopReason {
    /// No document yet for this period; nothing later exists either
    Exhausted {
        /// First period without a document
        period_id: u64,
        /// URL that was probed
        url: String,
        /// What the probe ran into
        reason: AbsenceReason,
    },

    /// The document exists but could not be turned into a record
    ExtractionBlocked {
        /// Period whose extraction failed
        period_id: u64,
        /// Extraction error, as text
        error: String,
    },

    /// The store refused the record
    StoreRejected {
        /// Period whose insert failed
        period_id: u64,
    },
}

impl StopReason {
    /// The period the loop stopped at
    pub fn period_id(&self) -> u64 {
        match self {
            StopReason::Exhausted { period_id, .. }
            | StopReason::ExtractionBlocked { period_id, .. }
            | StopReason::StoreRejected { period_id } => *period_id,
        }
    }
}

/// Summary of one crawl run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    /// Why the loop ended
    pub stop: StopReason,

    /// Periods stored during this run, in order
    pub inserted: Vec<u64>,

    /// Periods skipped because they were already stored
    pub skipped: usize,
}

impl RunReport {
    /// Whether this run stored anything
    pub fn new_data_found(&self) -> bool {
        !self.inserted.is_empty()
    }

    /// Generate a summary report of the run
    pub fn summary(&self) -> String {
        let stop = match &self.stop {
            StopReason::Exhausted { period_id, reason, .. } => {
                format!("no document for period {} ({})", period_id, reason)
            }
            StopReason::ExtractionBlocked { period_id, error } => {
                format!("extraction blocked at period {}: {}", period_id, error)
            }
            StopReason::StoreRejected { period_id } => {
                format!("store rejected period {}", period_id)
            }
        };

        let lines = [
            "Crawl Summary".to_string(),
            "=============".to_string(),
            format!("Stored: {}", self.inserted.len()),
            format!("Skipped (already stored): {}", self.skipped),
            format!("Stopped: {}", stop),
        ];
        lines.join("\n")
    }
}
