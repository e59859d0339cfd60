//! sw_install tool implementation.
//!
//! Runs the install phase: every manifest URL is fetched and stored in the
//! current generation, or nothing is.

use precache_core::OfflineCacheManager;
use rmcp::{ErrorData as McpError, model::CallToolResult};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::json_result;

/// Output from the sw_install tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct SwInstallOutput {
    /// Generation that was populated.
    pub generation: String,
    /// URLs now cached, in manifest order.
    pub cached: Vec<String>,
}

pub async fn install_impl(manager: &OfflineCacheManager) -> Result<CallToolResult, McpError> {
    let cached = manager.install().await?;
    json_result(&SwInstallOutput { generation: manager.generation().to_string(), cached })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::testing::{manager, output, site};
    use std::sync::atomic::Ordering;

    #[tokio::test]
    async fn test_install_reports_cached_urls() {
        let manager = manager(site()).await;
        let result = install_impl(&manager).await.unwrap();
        let out: SwInstallOutput = output(&result);

        assert_eq!(out.generation, "my-site-cache-v1");
        assert_eq!(out.cached.len(), 4);
        assert!(out.cached.contains(&"http://localhost:8080/offline.html".to_string()));
    }

    #[tokio::test]
    async fn test_install_offline_is_error() {
        let net = site();
        net.offline.store(true, Ordering::SeqCst);
        let manager = manager(net).await;

        let err = install_impl(&manager).await.unwrap_err();
        assert_eq!(err.code.0, -32014);
    }
}
