// src/lib.rs
// Public library surface for the binary and integration tests.

pub mod config;
pub mod error;
pub mod ingest;
pub mod storage;

// ---- Re-exports for stable public API ----
pub use crate::config::{Mode, RunConfig, RunInput};
pub use crate::error::TrendsError;
pub use crate::ingest::fetch::{HttpFetcher, TrendsFetcher};
pub use crate::ingest::run_once;
pub use crate::ingest::types::{ArticleRecord, ArticleTime, RunSummary, TrendRecord};
