//! YCNX Crawler - Main entry point

use anyhow::Context;
use tracing_subscriber::EnvFilter;
use ycnx_crawler::{Crawler, CrawlerConfig, SnapshotWriter};
use ycnx_extractor::Extractor;
use ycnx_fetcher::{HttpDocumentSource, PdfToText};
use ycnx_llm::GroqProvider;
use ycnx_store::SqliteStore;

#[tokio::main]
async fn main() {
    // Log to stderr; RUST_LOG overrides the default level
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    if let Err(e) = run().await {
        tracing::error!("Crawl failed: {:#}", e);
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let config = CrawlerConfig::from_env().context("Failed to load configuration")?;

    let store = SqliteStore::new(&config.database_path)
        .with_context(|| format!("Failed to open {}", config.database_path.display()))?;

    // A missing key is sent empty and rejected by the service
    let api_key = std::env::var(&config.llm.api_key_env).unwrap_or_default();
    let llm = GroqProvider::new(&config.llm.endpoint, &config.llm.model, api_key)?;
    let extractor = Extractor::new(llm, config.extractor.clone());

    let source = HttpDocumentSource::new(
        &config.source.base_url,
        config.source.fetch_timeout(),
        PdfToText::new(&config.source.pdftotext_bin),
    )?;

    tracing::info!(
        "Crawler starting (database: {}, model: {})",
        config.database_path.display(),
        config.llm.model
    );

    let mut crawler = Crawler::new(source, extractor, store)
        .with_pacing(config.pacing())
        .with_start_period(config.start_period);
    let writer = SnapshotWriter::new(&config.history_path, &config.latest_path);

    let report = crawler.run_and_export(&writer).await?;
    tracing::info!("{}", report.summary());

    Ok(())
}
