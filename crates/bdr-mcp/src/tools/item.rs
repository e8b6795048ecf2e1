//! Single-item lookup by PID

use bdr_config::ApiConfig;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, instrument};

use super::{first_text, joined_text};
use crate::error::{BdrError, Result};
use crate::fetcher::JsonFetcher;

const NO_TITLE: &str = "(no title)";
const NO_COLLECTIONS: &str = "none";

/// Flattened view of an item detail document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemSummary {
    pub title: String,
    pub description: String,
    pub collections: Vec<String>,
}

impl ItemSummary {
    /// Collection names joined with `", "`, or `"none"`
    pub fn collections_display(&self) -> String {
        if self.collections.is_empty() {
            NO_COLLECTIONS.to_string()
        } else {
            self.collections.join(", ")
        }
    }

    pub fn render_text(&self) -> String {
        format!(
            "Title: {}\nCollections: {}\nDescription: {}",
            self.title,
            self.collections_display(),
            self.description
        )
    }
}

pub fn summarize_item(data: &Value) -> ItemSummary {
    let title = first_text(data.get("primary_title")).unwrap_or_else(|| NO_TITLE.to_string());

    let description = data
        .get("abstract")
        .and_then(joined_text)
        .or_else(|| data.get("description").and_then(joined_text))
        .unwrap_or_default();

    // Entries without a name are skipped rather than rendered as blanks
    let collections = data
        .get("relations")
        .and_then(|r| r.get("isMemberOfCollection"))
        .and_then(Value::as_array)
        .map(|entries| {
            entries
                .iter()
                .filter_map(|entry| first_text(entry.get("name")))
                .collect()
        })
        .unwrap_or_default();

    ItemSummary {
        title,
        description,
        collections,
    }
}

/// Fetch and summarize the item named by `pid`
#[instrument(skip(config, fetcher))]
pub async fn get_item(config: &ApiConfig, fetcher: &dyn JsonFetcher, pid: &str) -> Result<ItemSummary> {
    if pid.trim().is_empty() {
        return Err(BdrError::InvalidArgument("pid cannot be empty".to_string()));
    }

    let url = config.item_endpoint(pid);
    debug!(url = %url, "Fetching item");

    let data = fetcher.fetch_json(&url).await?;
    Ok(summarize_item(&data))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::testing::StaticFetcher;
    use serde_json::json;

    #[test]
    fn test_summarize_full_item() {
        let data = json!({
            "primary_title": "Irish Famine Letters",
            "abstract": "Letters home.",
            "description": "ignored",
            "relations": {
                "isMemberOfCollection": [
                    {"name": "Hay Manuscripts", "pid": "bdr:1"},
                    {"pid": "bdr:2"},
                    {"name": "Irish Studies"}
                ]
            }
        });
        let item = summarize_item(&data);

        assert_eq!(item.title, "Irish Famine Letters");
        assert_eq!(item.description, "Letters home.");
        assert_eq!(item.collections, vec!["Hay Manuscripts", "Irish Studies"]);
        assert_eq!(item.collections_display(), "Hay Manuscripts, Irish Studies");
    }

    #[test]
    fn test_summarize_empty_item() {
        let item = summarize_item(&json!({}));

        assert_eq!(item.title, "(no title)");
        assert_eq!(item.description, "");
        assert!(item.collections.is_empty());
        assert_eq!(item.collections_display(), "none");
    }

    #[test]
    fn test_description_falls_back_when_abstract_blank() {
        let item = summarize_item(&json!({"abstract": "", "description": "A ledger."}));
        assert_eq!(item.description, "A ledger.");

        let item = summarize_item(&json!({"abstract": [], "description": ["Two", "parts"]}));
        assert_eq!(item.description, "Two parts");
    }

    #[test]
    fn test_whitespace_title_is_kept() {
        let item = summarize_item(&json!({"primary_title": " "}));
        assert_eq!(item.title, " ");
    }

    #[test]
    fn test_relations_without_collections() {
        let item = summarize_item(&json!({"relations": {"hasPart": []}}));
        assert_eq!(item.collections_display(), "none");
    }

    #[test]
    fn test_render_text() {
        let item = ItemSummary {
            title: "Map".to_string(),
            description: "Providence, 1823".to_string(),
            collections: vec![],
        };
        assert_eq!(
            item.render_text(),
            "Title: Map\nCollections: none\nDescription: Providence, 1823"
        );
    }

    #[tokio::test]
    async fn test_get_item_uses_pid_in_path() {
        let fetcher = StaticFetcher::new(json!({"primary_title": "Map"}));
        let config = ApiConfig::with_base_url("https://repo.example/api");

        let item = get_item(&config, &fetcher, "bdr:80246").await.unwrap();

        assert_eq!(item.title, "Map");
        assert_eq!(
            fetcher.requested_urls(),
            vec!["https://repo.example/api/items/bdr:80246/".to_string()]
        );
    }

    #[tokio::test]
    async fn test_get_item_rejects_blank_pid() {
        let fetcher = StaticFetcher::new(json!({}));
        let config = ApiConfig::default();

        let err = get_item(&config, &fetcher, "").await.unwrap_err();
        assert!(matches!(err, BdrError::InvalidArgument(_)));
        assert!(fetcher.requested_urls().is_empty());
    }
}
