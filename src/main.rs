//! Google Trends scraper — binary entrypoint.
//! Reads the run input, fetches one feed (realtime or daily), writes the
//! normalized records and the `OUTPUT` summary to local storage, and exits.

use anyhow::Context;
use google_trends_scraper::config::input::{load_input_default, storage_dir};
use google_trends_scraper::storage::{FsDataset, FsKeyValueStore};
use google_trends_scraper::{run_once, HttpFetcher};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Compact logs by default; `TRENDS_LOG_FORMAT=json` switches to JSON lines.
/// `RUST_LOG` overrides the default filter.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("google_trends_scraper=info,ingest=info,warn"));

    let json = std::env::var("TRENDS_LOG_FORMAT")
        .ok()
        .is_some_and(|v| v.eq_ignore_ascii_case("json"));

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry.with(fmt::layer().json()).init();
    } else {
        registry.with(fmt::layer().compact()).init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env in local/dev; no-op when absent.
    let _ = dotenvy::dotenv();
    init_tracing();

    let input = load_input_default().context("loading run input")?;
    let root = storage_dir();
    let dataset = FsDataset::open_default(&root);
    let kv = FsKeyValueStore::open_default(&root);
    let fetcher = HttpFetcher::new()?;

    match run_once(input, &fetcher, &dataset, &kv).await {
        Ok(summary) => {
            tracing::info!(
                items = summary.item_count,
                storage = %root.display(),
                "Done."
            );
            Ok(())
        }
        Err(e) => {
            tracing::error!(error = %e, "run failed");
            Err(e.into())
        }
    }
}
