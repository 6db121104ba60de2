// src/ingest/types.rs
use serde::Serialize;
use serde_json::Value;

use crate::config::{Mode, RunConfig};

/// When an article was published, as the upstream feed expresses it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ArticleTime {
    /// Realtime feed: timestamp string, left as given (not always ISO).
    #[serde(rename = "time")]
    Absolute(Option<String>),
    /// Daily feed: relative string such as "3h ago".
    #[serde(rename = "timeAgo")]
    Relative(Option<String>),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArticleRecord {
    pub title: Option<String>,
    pub url: Option<String>,
    pub source: Option<String>,
    #[serde(flatten)]
    pub time: ArticleTime,
    pub snippet: Option<String>,
    pub image: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RealtimeTrend {
    pub title: Option<String>,
    pub share_url: Option<String>,
    pub image: Option<String>,
    pub entities: Vec<String>,
    /// `ranking.score` exactly as upstream sent it (usually a number).
    pub score: Option<Value>,
    pub articles_count: usize,
    pub articles: Vec<ArticleRecord>,
    /// Upstream story fragment. Diagnostic only; its shape is whatever
    /// Google returned and is not a stable schema.
    #[serde(rename = "_raw", skip_serializing_if = "Option::is_none")]
    pub raw: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyTrend {
    pub date: Option<String>,
    pub title: Option<String>,
    pub share_url: Option<String>,
    pub image: Option<String>,
    pub formatted_traffic: Option<String>,
    /// One entry per upstream related item; `None` where it had no query.
    pub related_queries: Vec<Option<String>>,
    pub articles_count: usize,
    pub articles: Vec<ArticleRecord>,
    /// Upstream search fragment. Diagnostic only, not a stable schema.
    #[serde(rename = "_raw", skip_serializing_if = "Option::is_none")]
    pub raw: Option<Value>,
}

/// One normalized dataset item, tagged by `type`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum TrendRecord {
    Realtime(RealtimeTrend),
    Daily(DailyTrend),
}

impl TrendRecord {
    pub fn mode(&self) -> Mode {
        match self {
            TrendRecord::Realtime(_) => Mode::Realtime,
            TrendRecord::Daily(_) => Mode::Daily,
        }
    }

    pub fn title(&self) -> Option<&str> {
        match self {
            TrendRecord::Realtime(r) => r.title.as_deref(),
            TrendRecord::Daily(d) => d.title.as_deref(),
        }
    }

    pub fn articles(&self) -> &[ArticleRecord] {
        match self {
            TrendRecord::Realtime(r) => &r.articles,
            TrendRecord::Daily(d) => &d.articles,
        }
    }

    pub fn articles_count(&self) -> usize {
        match self {
            TrendRecord::Realtime(r) => r.articles_count,
            TrendRecord::Daily(d) => d.articles_count,
        }
    }
}

/// Written once per run under the `OUTPUT` key.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunSummary {
    pub mode: Mode,
    pub geo: String,
    pub hl: String,
    pub tz: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub records_per_interval: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recent_seconds: Option<u32>,
    pub item_count: usize,
    /// RFC 3339, UTC, millisecond precision.
    pub fetched_at: String,
    pub endpoint: String,
}

impl RunSummary {
    /// Realtime tuning values are only reported for realtime runs.
    pub fn new(cfg: &RunConfig, item_count: usize, fetched_at: String, endpoint: String) -> Self {
        let realtime = cfg.mode == Mode::Realtime;
        Self {
            mode: cfg.mode,
            geo: cfg.geo.clone(),
            hl: cfg.hl.clone(),
            tz: cfg.tz,
            category: realtime.then(|| cfg.category.clone()),
            records_per_interval: realtime.then_some(cfg.records_per_interval),
            recent_seconds: realtime.then_some(cfg.recent_seconds),
            item_count,
            fetched_at,
            endpoint,
        }
    }
}
