//! Application configuration with layered loading.
//!
//! This module provides configuration management using figment for layered
//! configuration loading from multiple sources:
//!
//! 1. Environment variables (PRECACHE_*)
//! 2. TOML config file (if PRECACHE_CONFIG_FILE set)
//! 3. Built-in defaults
//!
//! The generation name and manifest are deploy-time constants: they are read
//! once here and handed to the manager, never changed afterwards.

use std::collections::HashSet;
use std::path::PathBuf;
use std::time::Duration;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use url::{Position, Url};

use crate::worker::{Manifest, WorkerConfig};

mod validation;

pub use validation::ConfigError;

/// Application configuration with layered loading.
///
/// Loading precedence (highest wins):
/// 1. Environment variables (PRECACHE_*)
/// 2. TOML config file (if PRECACHE_CONFIG_FILE set)
/// 3. Built-in defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Name of the current cache generation.
    ///
    /// Changing it on redeploy is the only way to invalidate old caches.
    /// Set via PRECACHE_GENERATION environment variable.
    #[serde(default = "default_generation")]
    pub generation: String,

    /// Site origin that manifest paths are resolved against.
    ///
    /// Set via PRECACHE_ORIGIN environment variable.
    #[serde(default = "default_origin")]
    pub origin: String,

    /// Paths that must be cached for offline use, in install order.
    ///
    /// Set via PRECACHE_MANIFEST environment variable (TOML array syntax).
    #[serde(default = "default_manifest")]
    pub manifest: Vec<String>,

    /// Document served when a navigation fails offline. Must be in the manifest.
    ///
    /// Set via PRECACHE_OFFLINE_PAGE environment variable.
    #[serde(default = "default_offline_page")]
    pub offline_page: String,

    /// Path to SQLite cache database.
    ///
    /// Set via PRECACHE_DB_PATH environment variable.
    #[serde(default = "default_db_path")]
    pub db_path: PathBuf,

    /// User-Agent string for HTTP requests.
    ///
    /// Set via PRECACHE_USER_AGENT environment variable.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Maximum bytes to fetch per request.
    ///
    /// Set via PRECACHE_MAX_BYTES environment variable.
    #[serde(default = "default_max_bytes")]
    pub max_bytes: usize,

    /// HTTP request timeout in milliseconds.
    ///
    /// Set via PRECACHE_TIMEOUT_MS environment variable.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

fn default_generation() -> String {
    "my-site-cache-v1".into()
}

fn default_origin() -> String {
    "http://localhost:8080".into()
}

fn default_manifest() -> Vec<String> {
    ["/", "/styles/main.css", "/script/main.js", "/offline.html"]
        .into_iter()
        .map(String::from)
        .collect()
}

fn default_offline_page() -> String {
    "/offline.html".into()
}

fn default_db_path() -> PathBuf {
    PathBuf::from("./precache-cache.sqlite")
}

fn default_user_agent() -> String {
    "precache/0.1".into()
}

fn default_max_bytes() -> usize {
    5_242_880 // 5MB
}

fn default_timeout_ms() -> u64 {
    20_000
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            generation: default_generation(),
            origin: default_origin(),
            manifest: default_manifest(),
            offline_page: default_offline_page(),
            db_path: default_db_path(),
            user_agent: default_user_agent(),
            max_bytes: default_max_bytes(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

impl AppConfig {
    /// Timeout as Duration for use with reqwest/tokio.
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Load configuration from all sources with layered precedence.
    ///
    /// Priority (highest wins):
    /// 1. Environment variables prefixed with `PRECACHE_`
    /// 2. TOML file from `PRECACHE_CONFIG_FILE` (if set)
    /// 3. Built-in defaults via `Default::default()`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - Configuration file cannot be read
    /// - Environment variables cannot be parsed
    /// - Validation fails after loading
    pub fn load() -> Result<Self, ConfigError> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Ok(config_path) = std::env::var("PRECACHE_CONFIG_FILE") {
            figment = figment.merge(Toml::file(&config_path));
        }

        figment = figment.merge(
            Env::prefixed("PRECACHE_")
                .ignore(&["CONFIG_FILE"])
                .map(|key| key.as_str().to_lowercase().into())
                .split("__"),
        );

        let config: Self = figment.extract().map_err(|e| ConfigError::LoadFailed(e.to_string()))?;

        config.validate()?;

        Ok(config)
    }

    /// Parsed site origin.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` if the origin is not an absolute
    /// http(s) URL.
    pub fn origin_url(&self) -> Result<Url, ConfigError> {
        let url = Url::parse(&self.origin)
            .map_err(|e| ConfigError::Invalid { field: "origin".into(), reason: e.to_string() })?;
        match url.scheme() {
            "http" | "https" => Ok(url),
            scheme => Err(ConfigError::Invalid { field: "origin".into(), reason: format!("unsupported scheme: {scheme}") }),
        }
    }

    /// Build the immutable manager configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` if the origin, manifest or offline page
    /// cannot be resolved, two manifest entries resolve to the same URL, or
    /// the offline page is missing from the manifest.
    pub fn worker_config(&self) -> Result<WorkerConfig, ConfigError> {
        let origin = self.origin_url()?;
        let manifest = Manifest::resolve(&origin, &self.manifest)
            .map_err(|e| ConfigError::Invalid { field: "manifest".into(), reason: e.to_string() })?;
        let offline_page = origin
            .join(&self.offline_page)
            .map_err(|e| ConfigError::Invalid { field: "offline_page".into(), reason: e.to_string() })?;

        let mut seen = HashSet::new();
        if let Some(dup) = manifest.urls().iter().find(|url| !seen.insert(&url[..Position::AfterQuery])) {
            return Err(ConfigError::Invalid { field: "manifest".into(), reason: format!("duplicate entry {dup}") });
        }

        if !manifest.contains(&offline_page) {
            return Err(ConfigError::Invalid {
                field: "offline_page".into(),
                reason: format!("{} is not listed in the manifest", self.offline_page),
            });
        }

        Ok(WorkerConfig { generation: self.generation.clone(), manifest, offline_page })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.generation, "my-site-cache-v1");
        assert_eq!(config.origin, "http://localhost:8080");
        assert_eq!(config.manifest, vec!["/", "/styles/main.css", "/script/main.js", "/offline.html"]);
        assert_eq!(config.offline_page, "/offline.html");
        assert_eq!(config.db_path, PathBuf::from("./precache-cache.sqlite"));
        assert_eq!(config.user_agent, "precache/0.1");
        assert_eq!(config.max_bytes, 5_242_880);
        assert_eq!(config.timeout_ms, 20_000);
    }

    #[test]
    fn test_timeout_duration() {
        let config = AppConfig::default();
        assert_eq!(config.timeout(), Duration::from_millis(20_000));
    }

    #[test]
    fn test_worker_config_from_defaults() {
        let worker = AppConfig::default().worker_config().unwrap();
        assert_eq!(worker.generation, "my-site-cache-v1");
        assert_eq!(worker.offline_page.as_str(), "http://localhost:8080/offline.html");
        let urls: Vec<&str> = worker.manifest.urls().iter().map(Url::as_str).collect();
        assert_eq!(
            urls,
            vec![
                "http://localhost:8080/",
                "http://localhost:8080/styles/main.css",
                "http://localhost:8080/script/main.js",
                "http://localhost:8080/offline.html",
            ]
        );
    }

    #[test]
    fn test_worker_config_rejects_entries_resolving_alike() {
        let config = AppConfig {
            manifest: vec!["/".into(), "/offline.html".into(), "offline.html".into()],
            ..Default::default()
        };
        let result = config.worker_config();
        assert!(matches!(
            result,
            Err(ConfigError::Invalid { field, reason }) if field == "manifest" && reason.contains("offline.html")
        ));

        let config = AppConfig { manifest: vec!["/".into(), "/#top".into(), "/offline.html".into()], ..Default::default() };
        assert!(matches!(config.validate(), Err(ConfigError::Invalid { field, .. }) if field == "manifest"));
    }

    #[test]
    fn test_worker_config_offline_page_not_in_manifest() {
        let config = AppConfig { offline_page: "/fallback.html".into(), ..Default::default() };
        let result = config.worker_config();
        assert!(matches!(result, Err(ConfigError::Invalid { field, .. }) if field == "offline_page"));
    }

    #[test]
    fn test_origin_rejects_other_schemes() {
        let config = AppConfig { origin: "ftp://example.com".into(), ..Default::default() };
        assert!(matches!(config.origin_url(), Err(ConfigError::Invalid { field, .. }) if field == "origin"));
    }

    #[test]
    fn test_load_layers_file_and_env() {
        figment::Jail::expect_with(|jail| {
            jail.create_file(
                "precache.toml",
                r#"
                generation = "site-v7"
                origin = "https://example.com"
                manifest = ["/", "/offline.html"]
                "#,
            )?;
            jail.set_env("PRECACHE_CONFIG_FILE", "precache.toml");
            jail.set_env("PRECACHE_TIMEOUT_MS", "5000");

            let config = AppConfig::load().map_err(|e| e.to_string())?;
            assert_eq!(config.generation, "site-v7");
            assert_eq!(config.origin, "https://example.com");
            assert_eq!(config.manifest, vec!["/", "/offline.html"]);
            assert_eq!(config.timeout_ms, 5000);
            assert_eq!(config.user_agent, "precache/0.1");
            Ok(())
        });
    }

    #[test]
    fn test_load_rejects_invalid_env() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("PRECACHE_GENERATION", "\"\"");
            assert!(matches!(AppConfig::load(), Err(ConfigError::Missing { field, .. }) if field == "generation"));
            Ok(())
        });
    }
}
