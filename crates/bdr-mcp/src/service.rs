// rmcp-based MCP server exposing repository search and item lookup.
//
// Upstream failures come back as tool errors (`is_error: true`); only bad
// arguments are protocol errors.

use rmcp::{
    handler::server::{tool::ToolRouter, wrapper::Parameters, ServerHandler},
    model::*,
    tool, tool_handler, tool_router, ErrorData as McpError,
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::client::BdrClient;
use crate::error::BdrError;
use crate::tools::{SearchRequest, DEFAULT_ROWS};

const INSTRUCTIONS: &str = "Tools for the Brown Digital Repository (BDR). \
Use search_bdr with Solr syntax (e.g. primary_title:irish, \
rel_is_member_of_collection_ssim:\"bdr:123\") to find items; every result title ends \
with the item's PID in brackets. Pass that PID to get_bdr_item for title, description \
and collection membership. Only the first page of results is returned; read the \
warnings field for truncation notices.";

/// Output encoding for tool results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Json,
    Text,
}

/// Parameters for `search_bdr`
#[derive(Debug, Deserialize, JsonSchema)]
pub struct SearchBdrParams {
    /// Solr syntax query (e.g., primary_title:irish)
    pub query: String,
    /// Number of results to return (default 10)
    #[serde(default)]
    pub rows: Option<i64>,
    /// Comma-separated extra fields to return (e.g., genre,mods_id); pid, primary_title, abstract, ir_collection_name and score are always included
    #[serde(default)]
    pub fields: Option<String>,
    /// Solr sort clause (e.g., "score desc")
    #[serde(default)]
    pub sort: Option<String>,
    /// "json" (default) for the structured result, "text" for a plain summary
    #[serde(default)]
    pub format: Option<OutputFormat>,
}

/// Parameters for `get_bdr_item`
#[derive(Debug, Deserialize, JsonSchema)]
pub struct GetBdrItemParams {
    /// Persistent identifier of a BDR object (e.g., bdr:80246)
    pub pid: String,
    /// "text" (default) for a plain summary, "json" for the structured summary
    #[serde(default)]
    pub format: Option<OutputFormat>,
}

/// Convert a repository error into a tool result, or a protocol error for bad arguments
fn bdr_error_to_result(error: BdrError) -> Result<CallToolResult, McpError> {
    if let BdrError::InvalidArgument(message) = error {
        return Err(McpError::invalid_params(message, None));
    }

    warn!(kind = error.kind(), error = %error, "Tool call failed");

    let body = serde_json::json!({
        "error": error.kind(),
        "status": error.status(),
        "retryable": error.is_retryable(),
        "message": error.to_string(),
    });
    let text = serde_json::to_string_pretty(&body)
        .map_err(|e| McpError::internal_error(e.to_string(), None))?;

    Ok(CallToolResult::error(vec![Content::text(text)]))
}

fn json_content<T: Serialize>(value: &T) -> Result<CallToolResult, McpError> {
    let text = serde_json::to_string_pretty(value)
        .map_err(|e| McpError::internal_error(e.to_string(), None))?;
    Ok(CallToolResult::success(vec![Content::text(text)]))
}

/// BDR MCP service
#[derive(Clone)]
pub struct BdrMcpService {
    client: BdrClient,
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl BdrMcpService {
    pub fn new(client: BdrClient) -> Self {
        Self {
            client,
            tool_router: Self::tool_router(),
        }
    }

    /// Names of the tools this service registers
    pub fn tool_names(&self) -> Vec<String> {
        self.tool_router
            .list_all()
            .into_iter()
            .map(|tool| tool.name.to_string())
            .collect()
    }

    #[tool(description = "[READ] Search the Brown Digital Repository using Solr query syntax. Returns matching items with PIDs, titles, abstracts and collection names.")]
    async fn search_bdr(
        &self,
        Parameters(params): Parameters<SearchBdrParams>,
    ) -> Result<CallToolResult, McpError> {
        let request = SearchRequest {
            query: params.query,
            rows: params.rows.unwrap_or(DEFAULT_ROWS),
            fields: params.fields,
            sort: params.sort,
        };

        let result = match self.client.search(&request).await {
            Ok(result) => result,
            Err(e) => return bdr_error_to_result(e),
        };

        info!(
            query = %result.query,
            num_found = result.num_found,
            returned = result.returned,
            "search_bdr"
        );

        match params.format.unwrap_or(OutputFormat::Json) {
            OutputFormat::Json => json_content(&result),
            OutputFormat::Text => Ok(CallToolResult::success(vec![Content::text(
                result.render_text(),
            )])),
        }
    }

    #[tool(description = "[READ] Retrieve metadata for one Brown Digital Repository item by PID: title, collections and description.")]
    async fn get_bdr_item(
        &self,
        Parameters(params): Parameters<GetBdrItemParams>,
    ) -> Result<CallToolResult, McpError> {
        let item = match self.client.get_item(&params.pid).await {
            Ok(item) => item,
            Err(e) => return bdr_error_to_result(e),
        };

        info!(pid = %params.pid, "get_bdr_item");

        match params.format.unwrap_or(OutputFormat::Text) {
            OutputFormat::Json => json_content(&item),
            OutputFormat::Text => Ok(CallToolResult::success(vec![Content::text(
                item.render_text(),
            )])),
        }
    }
}

#[tool_handler]
impl ServerHandler for BdrMcpService {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: env!("CARGO_PKG_NAME").to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                title: Some("Brown Digital Repository".to_string()),
                icons: None,
                website_url: Some("https://repository.library.brown.edu".to_string()),
            },
            instructions: Some(INSTRUCTIONS.to_string()),
        }
    }
}
