// src/ingest/parse.rs
use metrics::histogram;
use serde_json::Value;

use crate::error::Result;

/// Anti-XSSI prefix Google prepends to most Trends API responses.
pub const JSON_PREFIX: &str = ")]}',";

/// Remove exactly one leading [`JSON_PREFIX`]; anything else passes through.
pub fn strip_json_prefix(raw: &str) -> &str {
    raw.strip_prefix(JSON_PREFIX).unwrap_or(raw)
}

/// Strip the prefix and parse the remainder. Malformed JSON is fatal.
pub fn parse_body(raw: &str) -> Result<Value> {
    let t0 = std::time::Instant::now();
    let v = serde_json::from_str(strip_json_prefix(raw))?;
    histogram!("trends_parse_ms").record(t0.elapsed().as_secs_f64() * 1_000.0);
    Ok(v)
}
