//! First-page text conversion

use crate::error::FetchError;
use std::future::Future;
use std::io::Write;
use std::path::PathBuf;
use tokio::process::Command;
use tracing::debug;

/// Default converter binary (poppler-utils)
pub const DEFAULT_PDFTOTEXT_BIN: &str = "pdftotext";

/// Trait for PDF text conversion backends
pub trait PageTextExtractor: Send + Sync {
    /// Extract the text of the first page from PDF bytes
    fn first_page_text(&self, pdf_bytes: &[u8])
        -> impl Future<Output = Result<String, FetchError>> + Send;

    /// Name of this backend (for diagnostics)
    fn backend_name(&self) -> &str;
}

/// Converts with the external `pdftotext` tool
///
/// The document is written to a named temporary file for the tool to read.
/// The file is removed when its handle drops, whichever way the conversion ends.
#[derive(Debug, Clone)]
pub struct PdfToText {
    binary: String,
    temp_dir: Option<PathBuf>,
}

impl PdfToText {
    /// Use a specific converter binary
    pub fn new(binary: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
            temp_dir: None,
        }
    }

    /// Place temporary copies in `dir` instead of the system temp directory
    pub fn with_temp_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.temp_dir = Some(dir.into());
        self
    }

    fn temp_copy(&self, pdf_bytes: &[u8]) -> Result<tempfile::NamedTempFile, FetchError> {
        let mut builder = tempfile::Builder::new();
        builder.prefix("ycnx-").suffix(".pdf");
        let mut file = match &self.temp_dir {
            Some(dir) => builder.tempfile_in(dir)?,
            None => builder.tempfile()?,
        };
        file.write_all(pdf_bytes)?;
        file.flush()?;
        Ok(file)
    }
}

impl Default for PdfToText {
    fn default() -> Self {
        Self::new(DEFAULT_PDFTOTEXT_BIN)
    }
}

impl PageTextExtractor for PdfToText {
    async fn first_page_text(&self, pdf_bytes: &[u8]) -> Result<String, FetchError> {
        let temp = self.temp_copy(pdf_bytes)?;
        debug!("Converting {} ({} bytes)", temp.path().display(), pdf_bytes.len());

        let output = Command::new(&self.binary)
            .args(["-f", "1", "-l", "1", "-enc", "UTF-8"])
            .arg(temp.path())
            .arg("-")
            .output()
            .await
            .map_err(|e| FetchError::Conversion(format!("Failed to run {}: {}", self.binary, e)))?;

        if !output.status.success() {
            return Err(FetchError::Conversion(format!(
                "{} exited with {}: {}",
                self.binary,
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    fn backend_name(&self) -> &str {
        &self.binary
    }
}
