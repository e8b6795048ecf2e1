//! Configuration types
//!
//! Every section deserializes with defaults so a partial TOML file only
//! needs to name the keys it changes.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Public API root of the Brown Digital Repository.
pub const DEFAULT_BASE_URL: &str = "https://repository.library.brown.edu/api";

/// Upstream request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Top-level configuration for the BDR MCP server.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BdrConfig {
    /// Upstream API settings.
    #[serde(default)]
    pub api: ApiConfig,

    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Upstream repository API configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL of the repository API, without the `/search/` or `/items/` suffix.
    pub base_url: String,

    /// Request timeout in seconds.
    pub timeout_secs: u64,

    /// User-Agent header sent with every request.
    pub user_agent: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            user_agent: default_user_agent(),
        }
    }
}

impl ApiConfig {
    /// Configuration pointing at a different base URL, other settings default.
    ///
    /// Mostly useful for tests running against a mock server.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Request timeout as a [`Duration`].
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Search endpoint, `{base}/search/`.
    pub fn search_endpoint(&self) -> String {
        format!("{}/search/", self.trimmed_base())
    }

    /// Item detail endpoint for a PID, `{base}/items/{pid}/`.
    ///
    /// The PID is inserted verbatim.
    pub fn item_endpoint(&self, pid: &str) -> String {
        format!("{}/items/{}/", self.trimmed_base(), pid)
    }

    fn trimmed_base(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }
}

fn default_user_agent() -> String {
    format!("bdr-mcp/{}", env!("CARGO_PKG_VERSION"))
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive, e.g. `info` or `bdr_mcp=debug`.
    pub level: String,

    /// Output format.
    pub format: LogFormat,

    /// Append logs to this file instead of stderr.
    pub file_path: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Text,
            file_path: None,
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Compact single-line text.
    Text,
    /// Multi-line human readable output.
    Pretty,
    /// Newline-delimited JSON.
    Json,
}

impl LogFormat {
    /// Parse a format name, case-insensitively.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "text" => Some(Self::Text),
            "pretty" => Some(Self::Pretty),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}
