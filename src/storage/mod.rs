// src/storage/mod.rs
//! Output collaborators: an append-only dataset for records and a keyed
//! store for the run summary.

pub mod fs;
pub mod memory;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::Result;
use crate::ingest::types::TrendRecord;

/// Key the run summary is written under.
pub const OUTPUT_KEY: &str = "OUTPUT";

#[async_trait]
pub trait Dataset: Send + Sync {
    /// Append one batch; earlier items are never rewritten.
    async fn push_data(&self, items: &[TrendRecord]) -> Result<()>;
}

#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Overwrite `key` with `value`.
    async fn set_value(&self, key: &str, value: &Value) -> Result<()>;
}

pub use fs::{FsDataset, FsKeyValueStore};
pub use memory::{MemoryDataset, MemoryKeyValueStore};
