//! MCP Server implementation for image search
//!
//! Exposes the search controller as MCP tools. The server keeps its own
//! HTML output region, so the rendered cards of the latest search can be
//! fetched separately from the structured outcome.

use anyhow::Result;
use rmcp::{
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::{CallToolResult, Content, ServerCapabilities, ServerInfo},
    tool, tool_handler, tool_router, ErrorData as McpError,
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::config::Config;
use crate::controller::SearchController;
use crate::providers::{self, ImageProvider};
use crate::render::HtmlRenderer;
use crate::types::PAGE_SIZE;

/// The main Image Search MCP Server
#[derive(Clone)]
pub struct ImageSearchMcpServer {
    controller: Arc<SearchController>,
    view: Arc<HtmlRenderer>,
    tool_router: ToolRouter<Self>,
}

// ============================================================================
// Parameter Types
// ============================================================================

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct ImageSearchParams {
    /// The search keyword
    #[schemars(description = "Keyword to search images for (surrounding whitespace is ignored)")]
    pub query: String,
}

fn to_json<T: Serialize>(data: &T) -> Result<CallToolResult, McpError> {
    let json = serde_json::to_string_pretty(data)
        .map_err(|e| McpError::internal_error(e.to_string(), None))?;
    Ok(CallToolResult::success(vec![Content::text(json)]))
}

// ============================================================================
// Tool Router Implementation
// ============================================================================

#[tool_router]
impl ImageSearchMcpServer {
    pub fn new(config: &Config) -> Result<Self> {
        let provider = providers::from_config(config)?;
        Ok(Self::with_provider(provider))
    }

    pub fn with_provider(provider: Arc<dyn ImageProvider>) -> Self {
        tracing::info!("Using {} provider", provider.name());
        if !provider.is_available() {
            tracing::warn!(
                "Provider '{}' is not available (check its API credential)",
                provider.name()
            );
        }

        let view = Arc::new(HtmlRenderer::new());
        let controller = Arc::new(SearchController::new(provider, view.clone()));

        Self {
            controller,
            view,
            tool_router: Self::tool_router(),
        }
    }

    #[tool(description = "Search for photos by keyword. Returns up to 12 images with photographer, caption, and (when the provider has them) likes and downloads, or an error message.")]
    async fn search_images(
        &self,
        Parameters(params): Parameters<ImageSearchParams>,
    ) -> Result<CallToolResult, McpError> {
        let outcome = self.controller.submit_search(&params.query).await;
        to_json(&outcome)
    }

    #[tool(description = "Get the HTML cards (or status message) currently shown for the latest search.")]
    async fn get_rendered_view(&self) -> Result<CallToolResult, McpError> {
        Ok(CallToolResult::success(vec![Content::text(self.view.contents())]))
    }

    #[tool(description = "Get the active image provider and whether it is configured.")]
    async fn get_config(&self) -> Result<CallToolResult, McpError> {
        #[derive(Serialize)]
        struct ConfigStatus {
            provider: String,
            available: bool,
            per_page: u32,
        }

        let provider = self.controller.provider();
        let status = ConfigStatus {
            provider: provider.name().to_string(),
            available: provider.is_available(),
            per_page: PAGE_SIZE,
        };

        to_json(&status)
    }
}

// ============================================================================
// Server Handler Implementation
// ============================================================================

#[tool_handler]
impl rmcp::ServerHandler for ImageSearchMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "Image Search MCP Server - searches Pixabay or Unsplash for photos by \
                 keyword and returns normalized image cards. The provider and its API \
                 credential are configured at startup."
                    .into(),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}
