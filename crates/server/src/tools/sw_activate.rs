//! sw_activate tool implementation.
//!
//! Runs the activate phase, deleting every cache that is not the current
//! generation.

use precache_core::OfflineCacheManager;
use rmcp::{ErrorData as McpError, model::CallToolResult};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::json_result;

/// Output from the sw_activate tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct SwActivateOutput {
    pub generation: String,
    /// Stale generations removed by this activation.
    pub deleted: Vec<String>,
}

pub async fn activate_impl(manager: &OfflineCacheManager) -> Result<CallToolResult, McpError> {
    let deleted = manager.activate().await?;
    json_result(&SwActivateOutput { generation: manager.generation().to_string(), deleted })
}
