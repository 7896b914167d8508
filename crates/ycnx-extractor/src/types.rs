//! Types for extraction

use serde_json::Value;

/// Fields read from the model's JSON object, before normalization
///
/// Counts stay as raw JSON values: the model returns them as strings, numbers
/// or `null` depending on the document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawExtraction {
    /// Batch identifier, if the model found one
    pub batch_no: Option<String>,
    /// Draw date, if the model found one
    pub draw_date: Option<String>,
    /// Valid registrations
    pub total_applied: Option<Value>,
    /// Lottery slots available
    pub quota_total: Option<Value>,
    /// Winners
    pub total_won: Option<Value>,
    /// Non-winners
    pub total_lost: Option<Value>,
}
