//! Artifact storage
//!
//! The [`ArtifactStore`] trait is the registry that upload and cleaning
//! requests write into and downloads read from. Two implementations are
//! provided:
//!
//! - [`MemoryStore`] keeps every artifact for the life of the process.
//! - [`BoundedStore`] keeps at most `capacity` artifacts, evicting the least
//!   recently used one, and optionally expires artifacts after a time-to-live.

use crate::artifact::{Artifact, ArtifactId};
use crate::config::{StoreConfig, StoreKind};
use crate::error::{CoreError, CoreResult};
use lru::LruCache;
use std::collections::HashMap;
use std::num::NonZeroUsize;
use std::sync::{Arc, Mutex, RwLock};
use std::time::{Duration, Instant};

/// Keyed registry of artifacts
///
/// Implementations must be Send + Sync; requests share one store.
pub trait ArtifactStore: Send + Sync {
    /// Store an artifact under a fresh identifier and return it
    fn put(&self, artifact: Artifact) -> CoreResult<ArtifactId>;

    /// Look up an artifact; unknown or expired ids are `NotFound`
    fn get(&self, id: &str) -> CoreResult<Arc<Artifact>>;

    /// Number of artifacts currently held
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Store type identifier for logging
    fn store_type(&self) -> &'static str;
}

/// Build the store described by `config`
pub fn from_config(config: &StoreConfig) -> CoreResult<Arc<dyn ArtifactStore>> {
    match config.kind {
        StoreKind::Unbounded => Ok(Arc::new(MemoryStore::new())),
        StoreKind::Bounded => {
            let capacity =
                NonZeroUsize::new(config.capacity).ok_or_else(|| CoreError::ConfigInvalid {
                    message: "store.capacity must be greater than 0".to_string(),
                })?;
            Ok(Arc::new(BoundedStore::new(capacity, config.ttl())))
        }
    }
}

fn not_found(id: &str) -> CoreError {
    CoreError::NotFound { id: id.to_string() }
}

fn poisoned(store: &str) -> CoreError {
    CoreError::Internal(format!("{} lock poisoned", store))
}

/// Unbounded in-memory store
#[derive(Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<ArtifactId, Arc<Artifact>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ArtifactStore for MemoryStore {
    fn put(&self, artifact: Artifact) -> CoreResult<ArtifactId> {
        let mut entries = self.entries.write().map_err(|_| poisoned("memory store"))?;
        let mut id = ArtifactId::generate();
        while entries.contains_key(&id) {
            id = ArtifactId::generate();
        }
        entries.insert(id.clone(), Arc::new(artifact));
        Ok(id)
    }

    fn get(&self, id: &str) -> CoreResult<Arc<Artifact>> {
        let entries = self.entries.read().map_err(|_| poisoned("memory store"))?;
        entries.get(id).cloned().ok_or_else(|| not_found(id))
    }

    fn len(&self) -> usize {
        self.entries.read().map(|e| e.len()).unwrap_or_default()
    }

    fn store_type(&self) -> &'static str {
        "memory"
    }
}

struct StoredEntry {
    artifact: Arc<Artifact>,
    stored_at: Instant,
}

/// Capacity- and age-bounded in-memory store
pub struct BoundedStore {
    entries: Mutex<LruCache<String, StoredEntry>>,
    ttl: Option<Duration>,
}

impl BoundedStore {
    /// Create a store holding at most `capacity` artifacts, each for at most `ttl`
    pub fn new(capacity: NonZeroUsize, ttl: Option<Duration>) -> Self {
        Self {
            entries: Mutex::new(LruCache::new(capacity)),
            ttl,
        }
    }

    pub fn capacity(&self) -> usize {
        self.entries
            .lock()
            .map(|e| e.cap().get())
            .unwrap_or_default()
    }

    fn is_expired(&self, stored_at: Instant, now: Instant) -> bool {
        self.ttl
            .is_some_and(|ttl| now.saturating_duration_since(stored_at) > ttl)
    }

    /// Look up `id` as of `now`, dropping the entry if it has expired
    fn lookup_at(&self, id: &str, now: Instant) -> CoreResult<Arc<Artifact>> {
        let mut entries = self.entries.lock().map_err(|_| poisoned("bounded store"))?;
        let hit = entries
            .get(id)
            .map(|entry| (self.is_expired(entry.stored_at, now), Arc::clone(&entry.artifact)));

        match hit {
            Some((false, artifact)) => Ok(artifact),
            Some((true, _)) => {
                entries.pop(id);
                log::debug!("Artifact {} expired", id);
                Err(not_found(id))
            }
            None => Err(not_found(id)),
        }
    }
}

impl ArtifactStore for BoundedStore {
    fn put(&self, artifact: Artifact) -> CoreResult<ArtifactId> {
        let mut entries = self.entries.lock().map_err(|_| poisoned("bounded store"))?;
        let mut id = ArtifactId::generate();
        while entries.contains(id.as_str()) {
            id = ArtifactId::generate();
        }

        let entry = StoredEntry {
            artifact: Arc::new(artifact),
            stored_at: Instant::now(),
        };
        if let Some((evicted, _)) = entries.push(id.to_string(), entry) {
            log::debug!("Evicted least recently used artifact {}", evicted);
        }
        Ok(id)
    }

    fn get(&self, id: &str) -> CoreResult<Arc<Artifact>> {
        self.lookup_at(id, Instant::now())
    }

    fn len(&self) -> usize {
        self.entries.lock().map(|e| e.len()).unwrap_or_default()
    }

    fn store_type(&self) -> &'static str {
        "bounded"
    }
}

#[cfg(test)]
#[path = "store_test.rs"]
mod tests;
