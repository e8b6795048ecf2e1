//! JSON-over-HTTP fetching for the repository API

use async_trait::async_trait;
use bdr_config::ApiConfig;
use reqwest::{header, Client};
use serde_json::Value;
use tracing::{debug, instrument, warn};

use crate::error::{BdrError, Result};

/// Performs one GET and decodes the body as JSON.
///
/// Implementations must not retry: a failed attempt is returned as-is.
#[async_trait]
pub trait JsonFetcher: Send + Sync {
    /// Fetch `url` and parse the response body as JSON
    async fn fetch_json(&self, url: &str) -> Result<Value>;
}

/// [`JsonFetcher`] backed by a pooled reqwest client
#[derive(Debug, Clone)]
pub struct HttpJsonFetcher {
    client: Client,
}

impl HttpJsonFetcher {
    /// Build a fetcher with the timeout and user agent from `config`
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/json"),
        );

        let client = Client::builder()
            .timeout(config.timeout())
            .user_agent(config.user_agent.as_str())
            .default_headers(headers)
            .build()
            .map_err(BdrError::Client)?;

        Ok(Self { client })
    }

    /// Wrap an existing client, keeping whatever timeout it was built with
    pub fn from_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl JsonFetcher for HttpJsonFetcher {
    #[instrument(skip(self))]
    async fn fetch_json(&self, url: &str) -> Result<Value> {
        let unreachable = |source: reqwest::Error| {
            warn!(error = %source, timeout = source.is_timeout(), "Repository request failed");
            BdrError::UpstreamUnreachable {
                url: url.to_string(),
                source,
            }
        };

        let response = self.client.get(url).send().await.map_err(unreachable)?;
        let status = response.status();
        debug!(status = %status, "Received response");

        if !status.is_success() {
            warn!(status = status.as_u16(), "Repository returned error status");
            // A failed body read still reports the status
            let body = response.text().await.unwrap_or_default();
            return Err(BdrError::upstream_http(status.as_u16(), url, &body));
        }

        let body = response.text().await.map_err(unreachable)?;

        serde_json::from_str(&body).map_err(|e| {
            warn!(error = %e, "Failed to parse response JSON");
            BdrError::MalformedResponse {
                url: url.to_string(),
                message: e.to_string(),
            }
        })
    }
}
