//! Page fetching for cited URLs.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use std::time::Duration;
use tracing::debug;
use url::Url;

use crate::config::ProximityConfig;
use crate::error::{Error, Result};
use crate::llm::build_http_client;

/// Retrieves the body of a cited page.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetch `url` and return the response body.
    ///
    /// Anything other than HTTP 200 is an error.
    async fn fetch(&self, url: &str) -> Result<String>;
}

/// HTTP fetcher with a hard per-request timeout.
pub struct HttpPageFetcher {
    http: Client,
    timeout: Duration,
}

impl HttpPageFetcher {
    pub fn new(config: &ProximityConfig) -> Result<Self> {
        let timeout = Duration::from_secs(config.fetch_timeout_secs);
        let http = build_http_client(timeout, Some(&config.user_agent))?;
        Ok(Self { http, timeout })
    }
}

#[async_trait]
impl PageFetcher for HttpPageFetcher {
    async fn fetch(&self, url: &str) -> Result<String> {
        let parsed = Url::parse(url).map_err(|e| Error::fetch(url, e.to_string()))?;

        debug!(url = %parsed, "Fetching cited page");

        let response = self.http.get(parsed).send().await.map_err(|e| {
            if e.is_timeout() {
                Error::timeout(self.timeout.as_millis() as u64)
            } else {
                Error::fetch(url, e.to_string())
            }
        })?;

        if response.status() != StatusCode::OK {
            return Err(Error::http_status(url, response.status().as_u16()));
        }

        response.text().await.map_err(|e| {
            if e.is_timeout() {
                Error::timeout(self.timeout.as_millis() as u64)
            } else {
                Error::fetch(url, format!("Failed to read body: {}", e))
            }
        })
    }
}
