//! MCP server handler implementation.
//!
//! The MCP client plays the platform: it dispatches install, activate and
//! fetch events to the offline cache manager by calling tools.
use std::sync::Arc;

use crate::tools::{
    CacheGetParams, CachePurgeParams, SwFetchParams, cache, sw_activate::activate_impl, sw_fetch::fetch_impl,
    sw_install::install_impl, sw_status::status_impl,
};

use precache_core::OfflineCacheManager;
use rmcp::{
    ErrorData as McpError, ServerHandler,
    handler::server::{
        tool::{ToolCallContext, ToolRouter},
        wrapper::Parameters,
    },
    model::{
        CallToolRequestParam, CallToolResult, Implementation, ListToolsResult, PaginatedRequestParam, ProtocolVersion,
        ServerCapabilities, ServerInfo,
    },
    service::{RequestContext, RoleServer},
    tool, tool_router,
};
use url::Url;

/// The main MCP server handler for precache.
#[derive(Clone)]
pub struct PrecacheServer {
    manager: Arc<OfflineCacheManager>,
    origin: Url,
    tool_router: ToolRouter<Self>,
}

/// Tool router implementation using the #[tool_router] macro.
///
/// This macro generates the routing logic that maps tool names to handler methods.
#[tool_router]
impl PrecacheServer {
    /// Create a new server handler around a manager.
    pub fn new(manager: Arc<OfflineCacheManager>, origin: Url) -> Self {
        Self { manager, origin, tool_router: Self::tool_router() }
    }

    #[tool(description = "Run the install phase: fetch every manifest URL into the current cache generation. \
                          Fails as a whole if any URL cannot be fetched.")]
    async fn sw_install(&self) -> Result<CallToolResult, McpError> {
        install_impl(&self.manager).await
    }

    #[tool(description = "Run the activate phase: delete every cache generation except the current one.")]
    async fn sw_activate(&self) -> Result<CallToolResult, McpError> {
        activate_impl(&self.manager).await
    }

    #[tool(description = "Intercept a request the way a controlled page would issue it. \
                          Answers from cache, then network, then the offline page for failed document requests.")]
    async fn sw_fetch(&self, params: Parameters<SwFetchParams>) -> Result<CallToolResult, McpError> {
        fetch_impl(&self.manager, &self.origin, params.0).await
    }

    #[tool(description = "Report lifecycle state, current generation, manifest and known caches.")]
    async fn sw_status(&self) -> Result<CallToolResult, McpError> {
        status_impl(&self.manager).await
    }

    #[tool(description = "Read a cached response by URL without touching the network.")]
    async fn cache_get(&self, params: Parameters<CacheGetParams>) -> Result<CallToolResult, McpError> {
        cache::get_impl(&self.manager, &self.origin, params.0).await
    }

    #[tool(description = "Delete one named cache and all of its entries.")]
    async fn cache_purge(&self, params: Parameters<CachePurgeParams>) -> Result<CallToolResult, McpError> {
        cache::purge_impl(&self.manager, params.0).await
    }
}

impl ServerHandler for PrecacheServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            server_info: Implementation {
                name: "precache".into(),
                version: env!("CARGO_PKG_VERSION").into(),
                ..Default::default()
            },
            protocol_version: ProtocolVersion::LATEST,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }

    async fn list_tools(
        &self, _request: Option<PaginatedRequestParam>, _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, rmcp::model::ErrorData> {
        Ok(ListToolsResult { meta: None, tools: self.tool_router.list_all(), next_cursor: None })
    }

    async fn call_tool(
        &self, request: CallToolRequestParam, context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, rmcp::model::ErrorData> {
        self.tool_router
            .call(ToolCallContext::new(self, request, context))
            .await
    }
}
