//! Lottery period records

/// Default prefix of the publisher's batch identifiers
pub const BATCH_PREFIX: &str = "YCCQPCH";

/// Width of the zero-padded period id used in batch numbers and document URLs
pub const PERIOD_ID_WIDTH: usize = 7;

/// Zero-pad a period id to [`PERIOD_ID_WIDTH`] digits
///
/// # Examples
///
/// ```
/// use ycnx_domain::record::padded_period_id;
///
/// assert_eq!(padded_period_id(7), "0000007");
/// ```
pub fn padded_period_id(period_id: u64) -> String {
    format!("{:0width$}", period_id, width = PERIOD_ID_WIDTH)
}

/// Human-readable label for a period
pub fn period_name(period_id: u64) -> String {
    format!("第{}期", period_id)
}

/// Batch identifier used when extraction does not supply one
///
/// # Examples
///
/// ```
/// use ycnx_domain::record::{fallback_batch_no, BATCH_PREFIX};
///
/// assert_eq!(fallback_batch_no(BATCH_PREFIX, 7), "YCCQPCH0000007");
/// ```
pub fn fallback_batch_no(prefix: &str, period_id: u64) -> String {
    format!("{}{}", prefix, padded_period_id(period_id))
}

/// Statistics for one lottery period, after correction
///
/// Records are created once, when extraction succeeds for a period that is not
/// stored yet, and are never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeriodRecord {
    /// Period identifier (1, 2, 3, ...)
    pub period_id: u64,

    /// Publisher's batch identifier (e.g. YCCQPCH0000001)
    pub batch_no: String,

    /// Display label (e.g. 第1期)
    pub period_name: String,

    /// Draw date as reported; not validated
    pub draw_date: Option<String>,

    /// Valid registrations
    pub total_applied: u64,

    /// Lottery slots available
    pub quota_total: u64,

    /// Winners
    pub total_won: u64,

    /// Registrations that did not win
    pub total_lost: u64,

    /// Derived percentage string (e.g. "18.50%")
    pub win_rate: String,

    /// Source document location
    pub pdf_url: String,
}

impl PeriodRecord {
    /// Whether winners and losers add up to the registrations
    ///
    /// Periods with no registrations are trivially consistent.
    pub fn is_balanced(&self) -> bool {
        self.total_applied == 0 || self.total_won + self.total_lost == self.total_applied
    }
}

/// A record as persisted, with the store's own bookkeeping columns
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredRecord {
    /// Internal auto-incrementing row id
    pub id: i64,

    /// The stored period record
    pub record: PeriodRecord,

    /// Creation timestamp assigned by the store
    pub updated_at: String,
}
