// src/storage/memory.rs
// In-memory sinks for tests and embedding.
use async_trait::async_trait;
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::Mutex;

use super::{Dataset, KeyValueStore};
use crate::error::Result;
use crate::ingest::types::TrendRecord;

#[derive(Default)]
pub struct MemoryDataset {
    /// One entry per `push_data` call.
    pub batches: Mutex<Vec<Vec<TrendRecord>>>,
}

impl MemoryDataset {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> Vec<TrendRecord> {
        self.batches
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .iter()
            .flatten()
            .cloned()
            .collect()
    }

    pub fn push_calls(&self) -> usize {
        self.batches.lock().unwrap_or_else(|p| p.into_inner()).len()
    }
}

#[async_trait]
impl Dataset for MemoryDataset {
    async fn push_data(&self, items: &[TrendRecord]) -> Result<()> {
        self.batches
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .push(items.to_vec());
        Ok(())
    }
}

#[derive(Default)]
pub struct MemoryKeyValueStore {
    pub values: Mutex<BTreeMap<String, Value>>,
}

impl MemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<Value> {
        self.values
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .get(key)
            .cloned()
    }
}

#[async_trait]
impl KeyValueStore for MemoryKeyValueStore {
    async fn set_value(&self, key: &str, value: &Value) -> Result<()> {
        self.values
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .insert(key.to_string(), value.clone());
        Ok(())
    }
}
