//! HTTP document source

use crate::error::FetchError;
use crate::pdf::PageTextExtractor;
use std::time::Duration;
use tracing::{debug, info, warn};
use ycnx_domain::record::padded_period_id;
use ycnx_domain::traits::DocumentSource;
use ycnx_domain::{AbsenceReason, FetchOutcome};

/// Publisher endpoint prefix; the zero-padded period id is appended
pub const DEFAULT_BASE_URL: &str = "https://ycnx.singlewindow.gd.cn/api/ycnx-approval/draw-lots-notarization/view-publicly-file/YCCQPCH";

/// Default download timeout (seconds)
pub const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 20;

/// Signature every PDF payload starts with
pub const PDF_MAGIC: &[u8] = b"%PDF";

/// Whether a payload looks like a PDF
pub fn is_pdf(bytes: &[u8]) -> bool {
    bytes.starts_with(PDF_MAGIC)
}

/// Fetches notarization documents over HTTP
pub struct HttpDocumentSource<E> {
    base_url: String,
    client: reqwest::Client,
    converter: E,
}

impl<E: PageTextExtractor> HttpDocumentSource<E> {
    /// Create a new source
    ///
    /// `timeout` bounds each download, connection included.
    pub fn new(base_url: impl Into<String>, timeout: Duration, converter: E) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| FetchError::Client(e.to_string()))?;

        Ok(Self {
            base_url: base_url.into(),
            client,
            converter,
        })
    }

    /// Canonical document URL for a period
    pub fn document_url(&self, period_id: u64) -> String {
        format!("{}{}", self.base_url, padded_period_id(period_id))
    }

    async fn probe(&self, url: &str) -> Result<String, AbsenceReason> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| AbsenceReason::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AbsenceReason::NotPublished(status.as_u16()));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| AbsenceReason::Transport(e.to_string()))?;

        if !is_pdf(&bytes) {
            return Err(AbsenceReason::NotPdf);
        }

        let backend = self.converter.backend_name();
        debug!("Converting {} bytes with {}", bytes.len(), backend);
        let text = self
            .converter
            .first_page_text(&bytes)
            .await
            .map_err(|e| AbsenceReason::Conversion(format!("{}: {}", backend, e)))?;

        if text.trim().is_empty() {
            return Err(AbsenceReason::EmptyText);
        }

        Ok(text)
    }
}

impl<E: PageTextExtractor> DocumentSource for HttpDocumentSource<E> {
    async fn fetch(&self, period_id: u64) -> FetchOutcome {
        let url = self.document_url(period_id);
        info!("Probing {}", url);

        match self.probe(&url).await {
            Ok(text) => FetchOutcome::Found { text, url },
            Err(reason) => {
                match &reason {
                    AbsenceReason::Transport(_) | AbsenceReason::Conversion(_) => {
                        warn!("Period {} unavailable: {}", period_id, reason)
                    }
                    _ => info!("Period {} unavailable: {}", period_id, reason),
                }
                FetchOutcome::Absent { url, reason }
            }
        }
    }
}
