//! Caching utilities for the study catalog server.
//!
//! Each catalog keeps one snapshot: the fetched rows plus the search index
//! built over them, expired after a TTL.

pub mod snapshot_cache;

pub use snapshot_cache::{CatalogSnapshot, SnapshotCache};
