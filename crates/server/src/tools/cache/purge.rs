//! cache_purge tool implementation.
//!
//! Deletes one named cache and everything in it.

use precache_core::OfflineCacheManager;
use rmcp::{ErrorData as McpError, model::CallToolResult};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::ToolError;
use crate::tools::json_result;

/// Parameters for the cache_purge tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CachePurgeParams {
    /// Name of the cache to delete.
    pub cache_name: String,
}

/// Output from the cache_purge tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CachePurgeOutput {
    /// False when no cache had that name.
    pub deleted: bool,
}

pub async fn purge_impl(manager: &OfflineCacheManager, params: CachePurgeParams) -> Result<CallToolResult, McpError> {
    if params.cache_name.trim().is_empty() {
        return Err(ToolError::InvalidInput("cache_name cannot be empty".to_string()).into());
    }

    if params.cache_name == manager.generation() {
        tracing::warn!(cache = %params.cache_name, "purging the current generation");
    }

    let deleted = manager.db().delete_cache(&params.cache_name).await?;
    json_result(&CachePurgeOutput { deleted })
}
