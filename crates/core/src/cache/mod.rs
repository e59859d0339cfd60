//! SQLite-backed storage for named cache generations.
//!
//! This module provides the persistent cache store the offline cache manager
//! reads and writes, using SQLite with async access via tokio-rusqlite. It
//! supports:
//!
//! - Named caches (one per generation) with cascade deletion of entries
//! - Request-keyed entries using SHA-256 hashing of method and URL
//! - Transactional bulk insertion for all-or-nothing installs
//! - Automatic schema migrations
//! - WAL mode for concurrent access from several manager instances

pub mod connection;
pub mod entries;
pub mod hash;
pub mod migrations;
pub mod preferences;

pub use crate::Error;

pub use connection::CacheDb;
