// src/ingest/realtime.rs
//! `/trends/api/realtimetrends` → `TrendRecord::Realtime`.
//! Shape: `storySummaries.trendingStories[]`.

use serde_json::Value;

use crate::ingest::resolve::{self, Index, Key};
use crate::ingest::types::{ArticleRecord, ArticleTime, RealtimeTrend, TrendRecord};

pub fn normalize_realtime(json: &Value, include_raw: bool) -> Vec<TrendRecord> {
    resolve::items(json, &[Key("storySummaries"), Key("trendingStories")])
        .iter()
        .map(|s| TrendRecord::Realtime(normalize_story(s, include_raw)))
        .collect()
}

fn normalize_story(s: &Value, include_raw: bool) -> RealtimeTrend {
    let title = resolve::text(s, &[&[Key("title")], &[Key("entityNames"), Index(0)]]);
    let share_url = resolve::text(s, &[&[Key("shareUrl")]]);
    let image = resolve::text(
        s,
        &[
            &[Key("image"), Key("imageUrl")],
            &[Key("image"), Key("newsUrl")],
        ],
    );

    let articles: Vec<ArticleRecord> = resolve::items(s, &[Key("articles")])
        .iter()
        .map(article)
        .collect();

    // Entities as given: order preserved, no dedup.
    let entities = resolve::items(s, &[Key("entityNames")])
        .iter()
        .map(|e| resolve::as_text(e).unwrap_or_else(|| e.to_string()))
        .collect();

    // Not present in every region; kept as given.
    let score = resolve::value(s, &[Key("ranking"), Key("score")]);

    RealtimeTrend {
        title,
        share_url,
        image,
        entities,
        score,
        articles_count: articles.len(),
        articles,
        raw: include_raw.then(|| s.clone()),
    }
}

fn article(a: &Value) -> ArticleRecord {
    ArticleRecord {
        title: resolve::text(a, &[&[Key("title")]]),
        url: resolve::text(a, &[&[Key("url")]]),
        source: resolve::text(a, &[&[Key("source")]]),
        time: ArticleTime::Absolute(resolve::text(a, &[&[Key("time")]])),
        snippet: resolve::text(a, &[&[Key("snippet")]]),
        image: resolve::text(a, &[&[Key("image"), Key("imageUrl")]]),
    }
}
