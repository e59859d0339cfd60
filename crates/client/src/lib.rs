//! Client code for precache.
//!
//! This crate provides the HTTP side of the offline cache manager: a
//! reqwest-backed implementation of `precache_core::Network` and the URL
//! handling hosts use before building requests.

pub mod fetch;

pub use fetch::{FetchClient, FetchConfig, UrlError, canonicalize, resolve};
