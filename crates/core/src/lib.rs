//! Core types and shared functionality for precache.
//!
//! This crate provides:
//! - Named cache generations with a SQLite backend
//! - The request/response model and the `Network` seam
//! - The offline cache manager lifecycle (install, activate, fetch)
//! - Unified error types
//! - Configuration structures
//! - Page-side helpers (search filter, install prompt, analytics events)

pub mod cache;
pub mod config;
pub mod error;
pub mod network;
pub mod page;
pub mod worker;

pub use cache::CacheDb;
pub use config::{AppConfig, ConfigError};
pub use error::Error;
pub use network::{Network, Request, RequestMode, Response};
pub use worker::{FetchOutcome, Manifest, OfflineCacheManager, ResponseSource, WorkerConfig, WorkerState};
