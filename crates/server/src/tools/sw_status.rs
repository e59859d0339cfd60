//! sw_status tool implementation.

use precache_core::{OfflineCacheManager, WorkerState};
use rmcp::{ErrorData as McpError, model::CallToolResult};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::json_result;

/// Output from the sw_status tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct SwStatusOutput {
    pub state: WorkerState,
    pub generation: String,
    pub manifest: Vec<String>,
    pub offline_page: String,
    /// Every cache currently in the store, in creation order.
    pub caches: Vec<String>,
}

pub async fn status_impl(manager: &OfflineCacheManager) -> Result<CallToolResult, McpError> {
    let config = manager.config();
    let output = SwStatusOutput {
        state: manager.state().await,
        generation: config.generation.clone(),
        manifest: config.manifest.urls().iter().map(|u| u.to_string()).collect(),
        offline_page: config.offline_page.to_string(),
        caches: manager.db().cache_names().await?,
    };
    json_result(&output)
}
