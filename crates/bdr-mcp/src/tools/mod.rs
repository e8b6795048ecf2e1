//! Repository operations exposed as tools
//!
//! Upstream JSON is treated as untrusted: every field read goes through the
//! helpers below and falls back to a default when absent or mistyped.

pub mod item;
pub mod search;

pub use item::{get_item, summarize_item, ItemSummary};
pub use search::{
    build_search_url, effective_fields, normalize_search, search, summarize_doc, DocSummary,
    SearchRequest, SearchResult, DEFAULT_FIELDS, DEFAULT_ROWS,
};

use serde_json::Value;

/// A non-empty string, or the first non-empty string of an array.
pub(crate) fn first_text(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Array(items) => items
            .iter()
            .filter_map(Value::as_str)
            .find(|s| !s.is_empty())
            .map(str::to_string),
        _ => None,
    }
}

/// Like [`first_text`], but numbers are accepted and rendered as text.
///
/// Identifiers come back as strings or numbers depending on the index.
pub(crate) fn scalar_text(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::Number(n) => Some(n.to_string()),
        Value::Array(items) => items.iter().find_map(|item| scalar_text(Some(item))),
        other => first_text(Some(other)),
    }
}

/// A non-empty string, or the non-empty strings of an array joined by spaces.
pub(crate) fn joined_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Array(items) => {
            let parts: Vec<&str> = items
                .iter()
                .filter_map(Value::as_str)
                .filter(|s| !s.is_empty())
                .collect();
            (!parts.is_empty()).then(|| parts.join(" "))
        }
        _ => None,
    }
}

pub(crate) fn non_null(value: Option<&Value>) -> Option<Value> {
    value.filter(|v| !v.is_null()).cloned()
}
