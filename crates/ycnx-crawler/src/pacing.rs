//! Delay between ingested periods

use std::time::Duration;

/// How long to wait after each successfully stored period
///
/// Keeps the request rate to the publisher and the extraction service low.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PacingPolicy {
    /// Sleep for a fixed duration
    Fixed(Duration),

    /// No delay (tests, backfills against a local mirror)
    Disabled,
}

impl PacingPolicy {
    /// Build from whole seconds; 0 disables pacing
    pub fn from_secs(secs: u64) -> Self {
        if secs == 0 {
            PacingPolicy::Disabled
        } else {
            PacingPolicy::Fixed(Duration::from_secs(secs))
        }
    }

    /// The delay applied, if any
    pub fn delay(&self) -> Option<Duration> {
        match self {
            PacingPolicy::Fixed(delay) => Some(*delay),
            PacingPolicy::Disabled => None,
        }
    }

    /// Wait according to the policy
    pub async fn pause(&self) {
        if let Some(delay) = self.delay() {
            tokio::time::sleep(delay).await;
        }
    }
}

impl Default for PacingPolicy {
    fn default() -> Self {
        PacingPolicy::Fixed(Duration::from_secs(5))
    }
}
