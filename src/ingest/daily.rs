// src/ingest/daily.rs
//! `/trends/api/dailytrends` → `TrendRecord::Daily`.
//! Shape: `default.trendingSearchesDays[].trendingSearches[]`.

use serde_json::Value;

use crate::ingest::resolve::{self, Key};
use crate::ingest::types::{ArticleRecord, ArticleTime, DailyTrend, TrendRecord};

pub fn normalize_daily(json: &Value, include_raw: bool) -> Vec<TrendRecord> {
    let mut out = Vec::new();
    for day in resolve::items(json, &[Key("default"), Key("trendingSearchesDays")]) {
        let date = resolve::text(day, &[&[Key("date")], &[Key("formattedDate")]]);
        for s in resolve::items(day, &[Key("trendingSearches")]) {
            out.push(TrendRecord::Daily(normalize_search(s, &date, include_raw)));
        }
    }
    out
}

fn normalize_search(s: &Value, date: &Option<String>, include_raw: bool) -> DailyTrend {
    let image = resolve::text(
        s,
        &[
            &[Key("image"), Key("imageUrl")],
            &[Key("image"), Key("newsUrl")],
            &[Key("image"), Key("source")],
        ],
    );

    let related_queries = resolve::items(s, &[Key("relatedQueries")])
        .iter()
        .map(|rq| resolve::text(rq, &[&[Key("query")]]))
        .collect();

    let articles: Vec<ArticleRecord> = resolve::items(s, &[Key("articles")])
        .iter()
        .map(article)
        .collect();

    DailyTrend {
        date: date.clone(),
        title: resolve::text(s, &[&[Key("title"), Key("query")]]),
        share_url: resolve::text(s, &[&[Key("shareUrl")]]),
        image,
        formatted_traffic: resolve::text(s, &[&[Key("formattedTraffic")]]),
        related_queries,
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
        time: ArticleTime::Relative(resolve::text(a, &[&[Key("timeAgo")]])),
        snippet: resolve::text(a, &[&[Key("snippet")]]),
        image: resolve::text(a, &[&[Key("image"), Key("imageUrl")]]),
    }
}
