// src/error.rs
use thiserror::Error;

/// Fatal failures of a scrape run. Missing upstream fields are never an error;
/// the normalizers degrade them to null instead.
#[derive(Debug, Error)]
pub enum TrendsError {
    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("fetch failed for {url}: {source}")]
    Fetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("response is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("storage write failed ({what}): {source}")]
    Storage {
        what: String,
        #[source]
        source: anyhow::Error,
    },
}

impl TrendsError {
    pub fn storage(what: impl Into<String>, source: impl Into<anyhow::Error>) -> Self {
        Self::Storage {
            what: what.into(),
            source: source.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, TrendsError>;
