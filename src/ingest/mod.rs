// src/ingest/mod.rs
pub mod daily;
pub mod fetch;
pub mod parse;
pub mod realtime;
pub mod resolve;
pub mod types;

use chrono::{SecondsFormat, Utc};
use metrics::{counter, describe_counter, describe_histogram};
use once_cell::sync::OnceCell;
use urlencoding::encode;

use crate::config::{Mode, RunConfig, RunInput};
use crate::error::{Result, TrendsError};
use crate::ingest::fetch::TrendsFetcher;
use crate::ingest::types::{RunSummary, TrendRecord};
use crate::storage::{Dataset, KeyValueStore, OUTPUT_KEY};

pub const REALTIME_ENDPOINT: &str = "https://trends.google.com/trends/api/realtimetrends";
pub const DAILY_ENDPOINT: &str = "https://trends.google.com/trends/api/dailytrends";

/// One-time metrics registration.
fn ensure_metrics_described() {
    static ONCE: OnceCell<()> = OnceCell::new();
    ONCE.get_or_init(|| {
        describe_counter!("trends_runs_total", "Completed scrape runs.");
        describe_counter!("trends_items_total", "Records written to the dataset.");
        describe_counter!(
            "trends_fetch_errors_total",
            "Trends endpoint fetch failures."
        );
        describe_histogram!("trends_parse_ms", "Response parse time in milliseconds.");
    });
}

pub fn realtime_url(cfg: &RunConfig) -> String {
    format!(
        "{REALTIME_ENDPOINT}?hl={}&tz={}&cat={}&fi=0&fs=0&geo={}&ri={}&rs={}&sort=0",
        encode(&cfg.hl),
        encode(&cfg.tz.to_string()),
        encode(&cfg.category),
        encode(&cfg.geo),
        encode(&cfg.records_per_interval.to_string()),
        encode(&cfg.recent_seconds.to_string()),
    )
}

pub fn daily_url(cfg: &RunConfig) -> String {
    format!(
        "{DAILY_ENDPOINT}?hl={}&tz={}&geo={}&ns=15",
        encode(&cfg.hl),
        encode(&cfg.tz.to_string()),
        encode(&cfg.geo),
    )
}

pub fn endpoint_url(cfg: &RunConfig) -> String {
    match cfg.mode {
        Mode::Realtime => realtime_url(cfg),
        Mode::Daily => daily_url(cfg),
    }
}

/// Fetch, parse and normalize one feed, without writing anything.
pub async fn fetch_trends(
    cfg: &RunConfig,
    fetcher: &dyn TrendsFetcher,
) -> Result<(String, Vec<TrendRecord>)> {
    let url = endpoint_url(cfg);
    tracing::info!(target: "ingest", mode = %cfg.mode, fetcher = fetcher.name(), "fetching {} trends: {url}", cfg.mode);

    let body = fetcher.fetch_text(&url, &[]).await?;
    let json = parse::parse_body(&body)?;

    let items = match cfg.mode {
        Mode::Realtime => realtime::normalize_realtime(&json, cfg.include_raw),
        Mode::Daily => daily::normalize_daily(&json, cfg.include_raw),
    };
    tracing::info!(target: "ingest", mode = %cfg.mode, items = items.len(), "normalized");
    Ok((url, items))
}

/// Run one full pass: resolve config, fetch → parse → normalize, push the
/// records (skipped when empty) and always write the `OUTPUT` summary.
///
/// An invalid mode fails before any request is made.
pub async fn run_once(
    input: RunInput,
    fetcher: &dyn TrendsFetcher,
    dataset: &dyn Dataset,
    kv: &dyn KeyValueStore,
) -> Result<RunSummary> {
    ensure_metrics_described();
    let cfg = RunConfig::try_from(input)?;

    let (url, items) = fetch_trends(&cfg, fetcher).await?;

    if !items.is_empty() {
        dataset.push_data(&items).await?;
        counter!("trends_items_total").increment(items.len() as u64);
    }

    let fetched_at = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);
    let summary = RunSummary::new(&cfg, items.len(), fetched_at, url);
    let value = serde_json::to_value(&summary)
        .map_err(|e| TrendsError::storage("serializing run summary", e))?;
    kv.set_value(OUTPUT_KEY, &value).await?;

    counter!("trends_runs_total").increment(1);
    tracing::info!(target: "ingest", mode = %cfg.mode, items = summary.item_count, "done");
    Ok(summary)
}
