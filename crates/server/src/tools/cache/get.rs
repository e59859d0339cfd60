//! cache_get tool implementation.
//!
//! Looks up a cached response without ever touching the network.

use precache_client::resolve;
use precache_core::{Error, OfflineCacheManager, Request};
use rmcp::{ErrorData as McpError, model::CallToolResult};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::ToolError;
use crate::tools::json_result;

/// Parameters for the cache_get tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CacheGetParams {
    /// Absolute URL or site-relative path.
    pub url: String,

    /// Cache to read (default: the current generation).
    #[serde(default)]
    pub cache_name: Option<String>,
}

/// Output from the cache_get tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CacheGetOutput {
    pub cache_name: String,
    pub url: String,
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
    pub body_bytes: usize,
}

pub async fn get_impl(
    manager: &OfflineCacheManager, origin: &Url, params: CacheGetParams,
) -> Result<CallToolResult, McpError> {
    let url = resolve(origin, &params.url).map_err(|e| ToolError::InvalidInput(e.to_string()))?;
    let cache_name = params.cache_name.unwrap_or_else(|| manager.generation().to_string());

    let response = manager
        .db()
        .match_request(&cache_name, &Request::get(url.clone()))
        .await?
        .ok_or_else(|| Error::CacheMiss(format!("{url} not in {cache_name}")))?;

    let output = CacheGetOutput {
        cache_name,
        url: url.to_string(),
        status: response.status,
        body: String::from_utf8_lossy(&response.body).to_string(),
        body_bytes: response.body.len(),
        headers: response.headers,
    };
    json_result(&output)
}
