//! Repository search
//!
//! Builds the Solr query URL, fetches one page, and reshapes the raw Solr
//! documents into [`DocSummary`] records whose titles carry the PID so a
//! follow-up `get_bdr_item` call can pick it up.

use bdr_config::ApiConfig;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Instant;
use tracing::{debug, instrument};

use super::{first_text, joined_text, non_null, scalar_text};
use crate::error::{BdrError, Result};
use crate::fetcher::JsonFetcher;

/// Fields always requested from Solr, in request order.
pub const DEFAULT_FIELDS: [&str; 5] = [
    "pid",
    "primary_title",
    "abstract",
    "ir_collection_name",
    "score",
];

/// Rows requested when the caller gives none.
pub const DEFAULT_ROWS: i64 = 10;

/// Display title for documents with neither a title nor a PID.
pub const NO_TITLE: &str = "(no title)";

/// Warning attached to searches that returned no documents.
pub const NO_RESULTS_WARNING: &str = "No results found for this query.";

/// Options for a single search call
#[derive(Debug, Clone, PartialEq)]
pub struct SearchRequest {
    /// Solr query, passed through unvalidated
    pub query: String,
    /// Page size; negative values are sent as-is
    pub rows: i64,
    /// Extra comma-separated fields to request
    pub fields: Option<String>,
    /// Solr sort clause, sent verbatim
    pub sort: Option<String>,
}

impl SearchRequest {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            rows: DEFAULT_ROWS,
            fields: None,
            sort: None,
        }
    }

    pub fn rows(mut self, rows: i64) -> Self {
        self.rows = rows;
        self
    }

    pub fn fields(mut self, fields: impl Into<String>) -> Self {
        self.fields = Some(fields.into());
        self
    }

    pub fn sort(mut self, sort: impl Into<String>) -> Self {
        self.sort = Some(sort.into());
        self
    }
}

/// Compact view of one Solr document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocSummary {
    pub pid: Option<String>,
    /// Display title, suffixed with `[pid]` when a PID is known
    pub title: String,
    /// Raw `abstract` value (string or array for multi-valued fields)
    #[serde(rename = "abstract")]
    pub abstract_text: Option<Value>,
    pub ir_collection_name: Option<Value>,
    pub score: Option<f64>,
}

/// Normalized search envelope returned to the caller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub query: String,
    pub request_url: String,
    pub num_found: u64,
    /// Always `docs.len()`
    pub returned: usize,
    pub docs: Vec<DocSummary>,
    pub warnings: Vec<String>,
    pub took_ms: f64,
}

impl SearchResult {
    /// Plain-text rendering, one block per document.
    pub fn render_text(&self) -> String {
        let mut out = String::new();

        if self.docs.is_empty() {
            out.push_str("No results found.");
        } else {
            out.push_str(&format!(
                "Found {} documents (showing {}).\n\n",
                self.num_found, self.returned
            ));
            let blocks: Vec<String> = self
                .docs
                .iter()
                .map(|doc| {
                    let abstract_text = doc
                        .abstract_text
                        .as_ref()
                        .and_then(joined_text)
                        .unwrap_or_default();
                    format!(
                        "PID: {}\nTitle: {}\nAbstract: {}\n---",
                        doc.pid.as_deref().unwrap_or("none"),
                        doc.title,
                        abstract_text
                    )
                })
                .collect();
            out.push_str(&blocks.join("\n"));
        }

        let extra: Vec<&String> = self
            .warnings
            .iter()
            .filter(|w| w.as_str() != NO_RESULTS_WARNING)
            .collect();
        if !extra.is_empty() {
            out.push_str("\n\nWarnings:");
            for warning in extra {
                out.push_str("\n- ");
                out.push_str(warning);
            }
        }

        out
    }
}

/// Default fields followed by any caller fields not already present.
///
/// Caller input is comma-split and trimmed; empty tokens are dropped.
pub fn effective_fields(fields: Option<&str>) -> Vec<String> {
    let mut out: Vec<String> = DEFAULT_FIELDS.iter().map(|f| f.to_string()).collect();

    let requested = fields
        .unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|f| !f.is_empty());

    for field in requested {
        if !out.iter().any(|f| f == field) {
            out.push(field.to_string());
        }
    }

    out
}

/// Full search URL with every parameter value percent-encoded
pub fn build_search_url(config: &ApiConfig, request: &SearchRequest) -> String {
    let rows = request.rows.to_string();
    let fl = effective_fields(request.fields.as_deref()).join(",");

    let mut params: Vec<(&str, &str)> = vec![
        ("q", request.query.as_str()),
        ("rows", rows.as_str()),
        ("fl", fl.as_str()),
    ];
    if let Some(sort) = request.sort.as_deref().filter(|s| !s.trim().is_empty()) {
        params.push(("sort", sort));
    }

    let query_string = params
        .iter()
        .map(|(key, value)| format!("{}={}", key, urlencoding::encode(value)))
        .collect::<Vec<_>>()
        .join("&");

    format!("{}?{}", config.search_endpoint(), query_string)
}

/// Title shown to the caller: `"<title> -- [<pid>]"`, `"[<pid>]"`, or `"(no title)"`
pub fn display_title(title: Option<&str>, pid: Option<&str>) -> String {
    match (title, pid) {
        (Some(title), Some(pid)) => format!("{title} -- [{pid}]"),
        (Some(title), None) => title.to_string(),
        (None, Some(pid)) => format!("[{pid}]"),
        (None, None) => NO_TITLE.to_string(),
    }
}

pub fn summarize_doc(doc: &Value) -> DocSummary {
    let pid = scalar_text(doc.get("pid")).or_else(|| scalar_text(doc.get("id")));
    let title = first_text(doc.get("primary_title")).or_else(|| first_text(doc.get("title_display")));

    DocSummary {
        title: display_title(title.as_deref(), pid.as_deref()),
        pid,
        abstract_text: non_null(doc.get("abstract")),
        ir_collection_name: non_null(doc.get("ir_collection_name")),
        score: doc.get("score").and_then(Value::as_f64),
    }
}

/// Advisory warnings for a fetched page
pub fn search_warnings(num_found: u64, rows: i64, returned: usize) -> Vec<String> {
    let mut warnings = Vec::new();

    // Negative rows fetch nothing, so compare against zero
    let fetched_limit = u64::try_from(rows).unwrap_or(0);
    if num_found > fetched_limit {
        warnings.push(format!(
            "Showing {returned} of {num_found} matching documents (rows={rows}); \
             increase rows or narrow the query to see more."
        ));
    }

    if returned == 0 {
        warnings.push(NO_RESULTS_WARNING.to_string());
    }

    warnings
}

/// Reshape a raw Solr response body. `took_ms` is left at zero.
pub fn normalize_search(query: &str, request_url: String, rows: i64, body: &Value) -> SearchResult {
    let response = body.get("response");

    let num_found = response
        .and_then(|r| r.get("numFound"))
        .and_then(|n| n.as_u64().or_else(|| n.as_f64().map(|f| f as u64)))
        .unwrap_or(0);

    let docs: Vec<DocSummary> = response
        .and_then(|r| r.get("docs"))
        .and_then(Value::as_array)
        .map(|docs| docs.iter().map(summarize_doc).collect())
        .unwrap_or_default();

    let returned = docs.len();

    SearchResult {
        query: query.to_string(),
        request_url,
        num_found,
        returned,
        warnings: search_warnings(num_found, rows, returned),
        docs,
        took_ms: 0.0,
    }
}

/// Run one search against the repository
#[instrument(skip_all, fields(query = %request.query, rows = request.rows))]
pub async fn search(
    config: &ApiConfig,
    fetcher: &dyn JsonFetcher,
    request: &SearchRequest,
) -> Result<SearchResult> {
    if request.query.trim().is_empty() {
        return Err(BdrError::InvalidArgument(
            "query cannot be empty".to_string(),
        ));
    }

    let start = Instant::now();
    let url = build_search_url(config, request);
    debug!(url = %url, "Searching repository");

    let body = fetcher.fetch_json(&url).await?;

    let mut result = normalize_search(&request.query, url, request.rows, &body);
    result.took_ms = start.elapsed().as_secs_f64() * 1000.0;

    debug!(
        num_found = result.num_found,
        returned = result.returned,
        took_ms = result.took_ms,
        "Search completed"
    );

    Ok(result)
}
