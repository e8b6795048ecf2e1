//! MCP tools for the Brown Digital Repository
//!
//! Two read-only tools are exposed over the Model Context Protocol:
//! `search_bdr` runs a Solr query against the repository search API and
//! returns a compact, PID-preserving result envelope, and `get_bdr_item`
//! summarizes a single item by PID.

pub mod cli;
pub mod client;
pub mod error;
pub mod fetcher;
pub mod logging;
pub mod service;
pub mod tools;

pub use client::BdrClient;
pub use error::{BdrError, Result};
pub use fetcher::{HttpJsonFetcher, JsonFetcher};
pub use service::{BdrMcpService, GetBdrItemParams, OutputFormat, SearchBdrParams};
pub use tools::{DocSummary, ItemSummary, SearchRequest, SearchResult};
