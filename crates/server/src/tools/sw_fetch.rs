//! sw_fetch tool implementation.
//!
//! Hands one request to the manager's fetch handler, as a controlled page
//! would, and reports which path answered it.

use precache_client::resolve;
use precache_core::{OfflineCacheManager, Request, RequestMode, ResponseSource};
use rmcp::{ErrorData as McpError, model::CallToolResult};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use url::Url;

use super::json_result;
use crate::error::ToolError;

/// Input parameters for the sw_fetch tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct SwFetchParams {
    /// Absolute URL, or a site-relative path such as `/styles/main.css`.
    pub url: String,

    /// HTTP method (default: GET).
    #[serde(default = "default_method")]
    pub method: String,

    /// Optional Accept header.
    #[serde(default)]
    pub accept: Option<String>,

    /// Request mode; `navigate` marks a document request (default: same-origin).
    #[serde(default)]
    pub mode: RequestMode,
}

fn default_method() -> String {
    "GET".into()
}

/// Output structure for the sw_fetch tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct SwFetchOutput {
    /// Requested URL after resolution.
    pub url: String,
    /// Which path produced the response.
    pub source: ResponseSource,
    pub status: u16,
    /// URL the response was obtained from.
    pub response_url: String,
    pub headers: Vec<(String, String)>,
    /// Body decoded as UTF-8 (lossy).
    pub body: String,
    pub body_bytes: usize,
}

pub async fn fetch_impl(
    manager: &OfflineCacheManager, origin: &Url, params: SwFetchParams,
) -> Result<CallToolResult, McpError> {
    if params.url.trim().is_empty() {
        return Err(ToolError::InvalidInput("url cannot be empty".into()).into());
    }
    if params.method.trim().is_empty() {
        return Err(ToolError::InvalidInput("method cannot be empty".into()).into());
    }

    let url = resolve(origin, &params.url).map_err(|e| ToolError::InvalidInput(e.to_string()))?;
    let request = Request { method: params.method.to_ascii_uppercase(), url, accept: params.accept, mode: params.mode };

    let outcome = manager.handle_fetch(&request).await?;
    tracing::debug!(url = %request.url, source = %outcome.source, "fetch answered");

    let response = outcome.response;
    let output = SwFetchOutput {
        url: request.url.to_string(),
        source: outcome.source,
        status: response.status,
        response_url: response.url,
        body: String::from_utf8_lossy(&response.body).to_string(),
        body_bytes: response.body.len(),
        headers: response.headers,
    };
    json_result(&output)
}
