//! Request/response model and the network seam.
//!
//! The cache manager never talks to an HTTP client directly; it goes through
//! the [`Network`] trait so hosts can plug in a real client and tests can
//! plug in a counting or failing one.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::Error;

/// How a request was issued by the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum RequestMode {
    /// Top-level document navigation.
    Navigate,
    #[default]
    SameOrigin,
    NoCors,
    Cors,
}

/// An outgoing request intercepted by the manager.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub method: String,
    pub url: Url,
    pub accept: Option<String>,
    pub mode: RequestMode,
}

impl Request {
    /// Plain `GET` subresource request.
    pub fn get(url: Url) -> Self {
        Self { method: "GET".to_string(), url, accept: None, mode: RequestMode::SameOrigin }
    }

    /// Document navigation request, as issued when following a link.
    pub fn navigate(url: Url) -> Self {
        Self {
            method: "GET".to_string(),
            url,
            accept: Some("text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8".to_string()),
            mode: RequestMode::Navigate,
        }
    }

    pub fn with_accept(mut self, accept: impl Into<String>) -> Self {
        self.accept = Some(accept.into());
        self
    }

    pub fn with_method(mut self, method: impl Into<String>) -> Self {
        self.method = method.into();
        self
    }

    /// Whether the request asks for an HTML document.
    pub fn is_document(&self) -> bool {
        self.mode == RequestMode::Navigate
            || self
                .accept
                .as_deref()
                .is_some_and(|accept| accept.to_ascii_lowercase().contains("text/html"))
    }

    /// URL used as the cache key: fragments never take part in matching.
    pub fn cache_url(&self) -> String {
        let mut url = self.url.clone();
        url.set_fragment(None);
        url.to_string()
    }
}

/// A response, either fresh from the network or read back from a cache.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Response {
    /// Final URL after redirects.
    pub url: String,
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl Response {
    /// 2xx status.
    pub fn is_ok(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// First header value with the given name (case-insensitive).
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn content_type(&self) -> Option<&str> {
        self.header("content-type")
    }
}

/// Anything that can put a request on the wire.
///
/// Implementations return `Ok` for every response the server produced,
/// whatever its status; `Err` means no response was obtained at all.
#[async_trait]
pub trait Network: Send + Sync {
    async fn fetch(&self, request: &Request) -> Result<Response, Error>;
}
