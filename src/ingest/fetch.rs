// src/ingest/fetch.rs
use async_trait::async_trait;
use metrics::counter;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, REFERER, USER_AGENT};
use reqwest::Client;
use std::time::Duration;

use crate::error::{Result, TrendsError};

pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
AppleWebKit/537.36 (KHTML, like Gecko) Chrome/119.0.0.0 Safari/537.36";
pub const DEFAULT_ACCEPT: &str = "*/*";
pub const DEFAULT_REFERER: &str = "https://trends.google.com/";
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Source of raw response bodies. One call = one GET, no retries.
#[async_trait]
pub trait TrendsFetcher: Send + Sync {
    /// `extra_headers` override the fixed headers with the same name.
    async fn fetch_text(&self, url: &str, extra_headers: &[(String, String)]) -> Result<String>;
    fn name(&self) -> &'static str;
}

#[derive(Clone)]
pub struct HttpFetcher {
    client: Client,
    headers: Vec<(String, String)>,
}

impl HttpFetcher {
    pub fn new() -> Result<Self> {
        // rustls offers `h2` via ALPN, so Google is reached over HTTP/2.
        let client = Client::builder()
            .use_rustls_tls()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| TrendsError::Configuration(format!("building http client: {e}")))?;
        Ok(Self {
            client,
            headers: Vec::new(),
        })
    }

    /// Headers sent on every request, applied before per-call overrides.
    pub fn with_headers(mut self, headers: Vec<(String, String)>) -> Self {
        self.headers = headers;
        self
    }

    fn header_map(&self, extra: &[(String, String)]) -> Result<HeaderMap> {
        let mut map = HeaderMap::new();
        map.insert(USER_AGENT, HeaderValue::from_static(DEFAULT_USER_AGENT));
        map.insert(ACCEPT, HeaderValue::from_static(DEFAULT_ACCEPT));
        map.insert(REFERER, HeaderValue::from_static(DEFAULT_REFERER));
        for (k, v) in self.headers.iter().chain(extra) {
            let name = HeaderName::from_bytes(k.as_bytes())
                .map_err(|e| TrendsError::Configuration(format!("header name {k:?}: {e}")))?;
            let value = HeaderValue::from_str(v)
                .map_err(|e| TrendsError::Configuration(format!("header {k} value: {e}")))?;
            map.insert(name, value);
        }
        Ok(map)
    }
}

#[async_trait]
impl TrendsFetcher for HttpFetcher {
    async fn fetch_text(&self, url: &str, extra_headers: &[(String, String)]) -> Result<String> {
        let headers = self.header_map(extra_headers)?;
        let fail = |e: reqwest::Error| {
            tracing::warn!(error = ?e, url, "trends http error");
            counter!("trends_fetch_errors_total").increment(1);
            TrendsError::Fetch {
                url: url.to_string(),
                source: e,
            }
        };

        let resp = self
            .client
            .get(url)
            .headers(headers)
            .send()
            .await
            .map_err(fail)?;
        let resp = resp.error_for_status().map_err(fail)?;
        resp.text().await.map_err(fail)
    }

    fn name(&self) -> &'static str {
        "http"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_timeout_is_thirty_seconds() {
        assert_eq!(REQUEST_TIMEOUT, Duration::from_secs(30));
    }

    #[test]
    fn fixed_headers_are_sent_unless_overridden() {
        let f = HttpFetcher::new()
            .unwrap()
            .with_headers(vec![("Accept".into(), "application/json".into())]);
        let map = f
            .header_map(&[("User-Agent".into(), "custom".into())])
            .unwrap();
        assert_eq!(map[USER_AGENT], "custom");
        assert_eq!(map[ACCEPT], "application/json");
        assert_eq!(map[REFERER], DEFAULT_REFERER);
    }
}
