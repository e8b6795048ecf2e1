//! Repository client tying configuration to a fetcher

use bdr_config::ApiConfig;
use std::sync::Arc;

use crate::error::Result;
use crate::fetcher::{HttpJsonFetcher, JsonFetcher};
use crate::tools::{self, ItemSummary, SearchRequest, SearchResult};

/// Client for the Brown Digital Repository API
///
/// Cheap to clone; clones share the underlying HTTP connection pool.
///
/// # Example
/// ```no_run
/// # use bdr_mcp::{BdrClient, SearchRequest};
/// # use bdr_config::ApiConfig;
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = BdrClient::new(ApiConfig::default())?;
/// let result = client.search(&SearchRequest::new("primary_title:irish").rows(5)).await?;
/// for doc in result.docs {
///     println!("{}", doc.title);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct BdrClient {
    config: ApiConfig,
    fetcher: Arc<dyn JsonFetcher>,
}

impl BdrClient {
    /// Create a client backed by HTTP
    pub fn new(config: ApiConfig) -> Result<Self> {
        let fetcher = HttpJsonFetcher::new(&config)?;
        Ok(Self::with_fetcher(config, Arc::new(fetcher)))
    }

    /// Create a client with a custom fetcher
    pub fn with_fetcher(config: ApiConfig, fetcher: Arc<dyn JsonFetcher>) -> Self {
        Self { config, fetcher }
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    /// Search the repository
    pub async fn search(&self, request: &SearchRequest) -> Result<SearchResult> {
        tools::search(&self.config, self.fetcher.as_ref(), request).await
    }

    /// Look up a single item by PID
    pub async fn get_item(&self, pid: &str) -> Result<ItemSummary> {
        tools::get_item(&self.config, self.fetcher.as_ref(), pid).await
    }
}

impl std::fmt::Debug for BdrClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BdrClient")
            .field("base_url", &self.config.base_url)
            .finish_non_exhaustive()
    }
}
