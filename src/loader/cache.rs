//! Single-slot cache for the loaded documentation index.
//!
//! The slot holds at most one index, tagged with the `(source_url, base_url)`
//! pair it was built from and the instant it was published. Readers get a
//! cloned `Arc`, so a published index is always complete and is never
//! modified in place; a refresh swaps in a new `Arc`.

use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::RwLock;

use crate::model::DocIndex;

/// Observable state of the cache slot for a given key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheState {
    /// Nothing loaded yet, invalidated, or loaded under another key.
    Empty,
    /// Holds an index inside its cache window.
    Populated,
    /// Holds an index whose cache window has elapsed.
    Stale,
}

/// Identity of the cached index.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub source_url: String,
    pub base_url: String,
}

impl CacheKey {
    pub fn new(source_url: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            source_url: source_url.into(),
            base_url: base_url.into(),
        }
    }
}

#[derive(Debug)]
struct CachedIndex {
    key: CacheKey,
    index: Arc<DocIndex>,
    loaded_at: Instant,
}

#[derive(Debug)]
pub struct IndexCache {
    slot: RwLock<Option<CachedIndex>>,
    /// `None` = never expires.
    ttl: Option<Duration>,
}

impl IndexCache {
    /// Create an empty cache with the given window.
    pub fn new(ttl: Option<Duration>) -> Self {
        Self {
            slot: RwLock::new(None),
            ttl,
        }
    }

    pub fn ttl(&self) -> Option<Duration> {
        self.ttl
    }

    fn is_expired(&self, loaded_at: Instant) -> bool {
        self.ttl.is_some_and(|ttl| loaded_at.elapsed() >= ttl)
    }

    /// The cached index, if present for `key` and still inside its window.
    pub fn get(&self, key: &CacheKey) -> Option<Arc<DocIndex>> {
        let slot = self.slot.read();
        slot.as_ref().and_then(|cached| {
            if cached.key == *key && !self.is_expired(cached.loaded_at) {
                Some(Arc::clone(&cached.index))
            } else {
                None
            }
        })
    }

    pub fn state(&self, key: &CacheKey) -> CacheState {
        match self.slot.read().as_ref() {
            Some(cached) if cached.key == *key => {
                if self.is_expired(cached.loaded_at) {
                    CacheState::Stale
                } else {
                    CacheState::Populated
                }
            }
            _ => CacheState::Empty,
        }
    }

    /// Replace the slot with a freshly built index and return the shared handle.
    pub fn publish(&self, key: CacheKey, index: DocIndex) -> Arc<DocIndex> {
        let index = Arc::new(index);
        let cached = CachedIndex {
            key,
            index: Arc::clone(&index),
            loaded_at: Instant::now(),
        };
        *self.slot.write() = Some(cached);
        index
    }

    /// Drop the cached index. Returns whether anything was cached.
    pub fn invalidate(&self) -> bool {
        self.slot.write().take().is_some()
    }

    /// Time since the cached index was published.
    pub fn age(&self) -> Option<Duration> {
        self.slot
            .read()
            .as_ref()
            .map(|cached| cached.loaded_at.elapsed())
    }
}

impl Default for IndexCache {
    fn default() -> Self {
        Self::new(None)
    }
}
