//! Offline cache manager.
//!
//! Mirrors the service-worker lifecycle of a static site:
//!
//! - **install**: populate the current generation with every manifest URL,
//!   all or nothing.
//! - **activate**: delete every cache whose name is not the current
//!   generation.
//! - **fetch**: answer requests cache-first, then from the network, then
//!   with the offline page for failed document requests.
//!
//! The lifecycle is an explicit state machine (see [`WorkerState`]); the
//! generation name and manifest are immutable once the manager is built.

pub mod manager;
pub mod manifest;
pub mod state;

pub use manager::{FetchOutcome, OfflineCacheManager, ResponseSource};
pub use manifest::{Manifest, WorkerConfig};
pub use state::WorkerState;
