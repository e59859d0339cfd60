//! MCP tool implementations.
//!
//! Each lifecycle event of the offline cache manager is one tool; the cache
//! tools inspect or prune the store directly.

pub mod cache;
pub mod sw_activate;
pub mod sw_fetch;
pub mod sw_install;
pub mod sw_status;

pub use cache::{CacheGetParams, CachePurgeParams};
pub use sw_fetch::SwFetchParams;

use rmcp::{
    ErrorData as McpError,
    model::{CallToolResult, Content},
};
use serde::Serialize;

use crate::error::ToolError;

/// Wrap a serializable output as pretty JSON text content.
pub(crate) fn json_result<T: Serialize>(output: &T) -> Result<CallToolResult, McpError> {
    let json = serde_json::to_string_pretty(output)
        .map_err(|e| ToolError::OutputFailed(format!("Failed to serialize output: {e}")))?;
    Ok(CallToolResult::success(vec![Content::text(json)]))
}
