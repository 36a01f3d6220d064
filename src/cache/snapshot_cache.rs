//! Time-based single-slot cache for catalog snapshots.

use crate::search::SearchIndex;
use chrono::{DateTime, Utc};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};
use std::time::{Duration, Instant};

/// One fetched record list and the index built over it.
#[derive(Debug)]
pub struct CatalogSnapshot<R> {
    /// Index over the fetched rows; it owns the row list
    pub index: SearchIndex<R>,

    /// When the rows were fetched
    pub fetched_at: DateTime<Utc>,

    /// Store counter value this snapshot was stored under
    pub generation: u64,
}

impl<R> CatalogSnapshot<R> {
    /// The fetched records, in backend order.
    pub fn records(&self) -> &Arc<[R]> {
        self.index.records()
    }
}

struct CacheEntry<R> {
    snapshot: Arc<CatalogSnapshot<R>>,
    inserted_at: Instant,
}

/// A thread-safe cache holding at most one snapshot.
///
/// Clones share the slot. A TTL of zero disables caching: every `get`
/// misses.
pub struct SnapshotCache<R> {
    slot: Arc<RwLock<Option<CacheEntry<R>>>>,
    generation: Arc<AtomicU64>,
    ttl: Duration,
}

impl<R> SnapshotCache<R> {
    /// Create a new SnapshotCache with the specified TTL in seconds.
    pub fn new(ttl_seconds: u64) -> Self {
        Self {
            slot: Arc::new(RwLock::new(None)),
            generation: Arc::new(AtomicU64::new(0)),
            ttl: Duration::from_secs(ttl_seconds),
        }
    }

    /// Get the snapshot if one is stored and hasn't expired.
    pub fn get(&self) -> Option<Arc<CatalogSnapshot<R>>> {
        let now = Instant::now();

        if let Ok(slot) = self.slot.read() {
            if let Some(entry) = slot.as_ref() {
                if now.duration_since(entry.inserted_at) < self.ttl {
                    return Some(entry.snapshot.clone());
                }
            }
        }

        None
    }

    /// Store a freshly built index, replacing any previous snapshot.
    pub fn store(&self, index: SearchIndex<R>) -> Arc<CatalogSnapshot<R>> {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let snapshot = Arc::new(CatalogSnapshot {
            index,
            fetched_at: Utc::now(),
            generation,
        });

        if let Ok(mut slot) = self.slot.write() {
            *slot = Some(CacheEntry {
                snapshot: snapshot.clone(),
                inserted_at: Instant::now(),
            });
        }

        snapshot
    }

    /// Drop the stored snapshot so the next `get` misses.
    pub fn invalidate(&self) {
        if let Ok(mut slot) = self.slot.write() {
            *slot = None;
        }
    }

    /// Number of snapshots stored so far.
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }
}

impl<R> Clone for SnapshotCache<R> {
    fn clone(&self) -> Self {
        Self {
            slot: self.slot.clone(),
            generation: self.generation.clone(),
            ttl: self.ttl,
        }
    }
}

impl<R> fmt::Debug for SnapshotCache<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SnapshotCache")
            .field("generation", &self.generation())
            .field("ttl", &self.ttl)
            .finish()
    }
}
