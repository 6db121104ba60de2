// src/storage/fs.rs
//! Local storage layout:
//!   <root>/datasets/default/000000001.json, 000000002.json, ...
//!   <root>/key_value_stores/default/<KEY>.json

use async_trait::async_trait;
use serde_json::Value;
use std::path::{Path, PathBuf};
use tokio::fs;

use super::{Dataset, KeyValueStore};
use crate::error::{Result, TrendsError};
use crate::ingest::types::TrendRecord;

const DEFAULT_NAME: &str = "default";

pub struct FsDataset {
    dir: PathBuf,
}

impl FsDataset {
    pub fn open_default(root: &Path) -> Self {
        Self {
            dir: root.join("datasets").join(DEFAULT_NAME),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Highest `NNNNNNNNN.json` already present, 0 for an empty dataset.
    async fn last_index(&self) -> Result<u64> {
        let mut max = 0u64;
        let mut entries = match fs::read_dir(&self.dir).await {
            Ok(e) => e,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(0),
            Err(e) => return Err(TrendsError::storage(self.dir.display().to_string(), e)),
        };
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| TrendsError::storage(self.dir.display().to_string(), e))?
        {
            let path = entry.path();
            if path.extension().and_then(|s| s.to_str()) != Some("json") {
                continue;
            }
            if let Some(n) = path
                .file_stem()
                .and_then(|s| s.to_str())
                .and_then(|s| s.parse::<u64>().ok())
            {
                max = max.max(n);
            }
        }
        Ok(max)
    }
}

#[async_trait]
impl Dataset for FsDataset {
    async fn push_data(&self, items: &[TrendRecord]) -> Result<()> {
        fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| TrendsError::storage(self.dir.display().to_string(), e))?;

        let bodies = items
            .iter()
            .map(serde_json::to_vec_pretty)
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| TrendsError::storage("serializing dataset item", e))?;

        // Stage as *.json.tmp, publish by rename once every write succeeded.
        let first = self.last_index().await? + 1;
        let mut staged: Vec<(PathBuf, PathBuf)> = Vec::with_capacity(bodies.len());
        for (n, body) in (first..).zip(bodies) {
            let path = self.dir.join(format!("{n:09}.json"));
            let tmp = path.with_extension("json.tmp");
            if let Err(e) = fs::write(&tmp, body).await {
                discard(&staged).await;
                return Err(TrendsError::storage(tmp.display().to_string(), e));
            }
            staged.push((tmp, path));
        }
        for (tmp, path) in &staged {
            fs::rename(tmp, path)
                .await
                .map_err(|e| TrendsError::storage(path.display().to_string(), e))?;
        }
        tracing::debug!(dir = %self.dir.display(), count = items.len(), "dataset items written");
        Ok(())
    }
}

async fn discard(staged: &[(PathBuf, PathBuf)]) {
    for (tmp, _) in staged {
        if let Err(e) = fs::remove_file(tmp).await {
            tracing::warn!(error = ?e, path = %tmp.display(), "could not remove staged dataset item");
        }
    }
}

pub struct FsKeyValueStore {
    dir: PathBuf,
}

impl FsKeyValueStore {
    pub fn open_default(root: &Path) -> Self {
        Self {
            dir: root.join("key_value_stores").join(DEFAULT_NAME),
        }
    }

    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

#[async_trait]
impl KeyValueStore for FsKeyValueStore {
    async fn set_value(&self, key: &str, value: &Value) -> Result<()> {
        if key.is_empty() || key.contains(['/', '\\']) || key.starts_with('.') {
            return Err(TrendsError::storage(
                format!("key {key:?}"),
                anyhow::anyhow!("invalid key-value store key"),
            ));
        }
        fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| TrendsError::storage(self.dir.display().to_string(), e))?;
        let path = self.path_for(key);
        let body = serde_json::to_vec_pretty(value)
            .map_err(|e| TrendsError::storage(format!("serializing {key}"), e))?;
        fs::write(&path, body)
            .await
            .map_err(|e| TrendsError::storage(path.display().to_string(), e))?;
        Ok(())
    }
}
