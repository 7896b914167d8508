//! Document fetch outcomes

use std::fmt;

/// Why a period's document was reported absent
///
/// Every reason is treated the same by the ingestion loop; the distinction
/// only shows up in the logs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AbsenceReason {
    /// The source answered with a non-success status
    NotPublished(u16),

    /// The payload does not start with the `%PDF` signature
    NotPdf,

    /// The first page yielded no text
    EmptyText,

    /// The request itself failed (timeout, connection error)
    Transport(String),

    /// The local document-to-text conversion failed
    Conversion(String),
}

impl fmt::Display for AbsenceReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AbsenceReason::NotPublished(status) => write!(f, "not published (HTTP {})", status),
            AbsenceReason::NotPdf => write!(f, "payload is not a PDF"),
            AbsenceReason::EmptyText => write!(f, "first page has no text"),
            AbsenceReason::Transport(e) => write!(f, "request failed: {}", e),
            AbsenceReason::Conversion(e) => write!(f, "text conversion failed: {}", e),
        }
    }
}

/// Result of probing the document source for one period
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The document exists and its first page was converted to text
    Found {
        /// Plain text of the first page
        text: String,
        /// Resolved document URL
        url: String,
    },

    /// No usable document for this period
    Absent {
        /// Resolved document URL, kept for logging
        url: String,
        /// What went wrong
        reason: AbsenceReason,
    },
}

impl FetchOutcome {
    /// The resolved URL, whichever way the probe went
    pub fn url(&self) -> &str {
        match self {
            FetchOutcome::Found { url, .. } | FetchOutcome::Absent { url, .. } => url,
        }
    }

    /// Whether the document was found
    pub fn is_found(&self) -> bool {
        matches!(self, FetchOutcome::Found { .. })
    }
}
