//! Error types for the repository client and tools

use thiserror::Error;

/// Upstream response bodies are cut to this many characters in errors.
pub const BODY_SNIPPET_CHARS: usize = 512;

/// Errors that can occur when querying the repository API
#[derive(Debug, Error)]
pub enum BdrError {
    /// Upstream answered with a non-2xx status
    #[error("HTTP {status} from {url}: {body}")]
    UpstreamHttp {
        status: u16,
        url: String,
        body: String,
    },

    /// Request never produced a response (DNS, connect, timeout, reset)
    #[error("Repository API unreachable at {url}: {source}")]
    UpstreamUnreachable {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Response body was not JSON
    #[error("Malformed response from {url}: {message}")]
    MalformedResponse { url: String, message: String },

    /// Caller supplied an unusable argument
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// HTTP client could not be constructed
    #[error("HTTP client error: {0}")]
    Client(#[from] reqwest::Error),
}

impl BdrError {
    /// Build an [`BdrError::UpstreamHttp`], cutting the body down to a snippet.
    pub fn upstream_http(status: u16, url: impl Into<String>, body: &str) -> Self {
        BdrError::UpstreamHttp {
            status,
            url: url.into(),
            body: snippet(body),
        }
    }

    /// HTTP status for upstream status errors
    pub fn status(&self) -> Option<u16> {
        match self {
            BdrError::UpstreamHttp { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Short machine-readable name for the error kind
    pub fn kind(&self) -> &'static str {
        match self {
            BdrError::UpstreamHttp { .. } => "upstream_http",
            BdrError::UpstreamUnreachable { .. } => "upstream_unreachable",
            BdrError::MalformedResponse { .. } => "malformed_response",
            BdrError::InvalidArgument(_) => "invalid_argument",
            BdrError::Client(_) => "client",
        }
    }

    /// Whether a caller could reasonably try the same call again.
    ///
    /// Advisory only; nothing in this crate retries.
    pub fn is_retryable(&self) -> bool {
        match self {
            BdrError::UpstreamUnreachable { .. } => true,
            BdrError::UpstreamHttp { status, .. } => *status >= 500 || *status == 429,
            BdrError::MalformedResponse { .. }
            | BdrError::InvalidArgument(_)
            | BdrError::Client(_) => false,
        }
    }
}

fn snippet(body: &str) -> String {
    match body.char_indices().nth(BODY_SNIPPET_CHARS) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}

/// Result type for repository operations
pub type Result<T> = std::result::Result<T, BdrError>;
