//! Memoizing Lookup Module
//!
//! Wraps a provider so that each identifier is resolved through it at most once.
//! Later lookups are served from the cache until the entry is cleared.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, Utc};
use once_cell::sync::OnceCell;
use tracing::{debug, info, trace, warn};

use crate::memo::stats::StatsRecorder;
use crate::memo::{CachedEntry, LookupStats};
use crate::provider::Provider;

/// Per-identifier slot. Empty while a first resolution is in flight.
type Slot<V> = Arc<OnceCell<CachedEntry<V>>>;

// == Memoizing Lookup ==
/// Memoizing decorator over a [`Provider`].
///
/// The first successful `resolve(id)` is stored and every later call for the same
/// identifier returns the same `Arc` without touching the provider. Failures are
/// handed back unchanged and never cached.
///
/// All operations take `&self`. Concurrent misses on one identifier share a single
/// provider call; misses on different identifiers proceed in parallel. A provider
/// that resolves the identifier it is currently resolving through this same lookup
/// will deadlock.
pub struct MemoizingLookup<P: Provider> {
    /// Wrapped provider, shared with the caller
    provider: Arc<P>,
    /// Identifier to slot mapping
    entries: Mutex<HashMap<String, Slot<P::Value>>>,
    /// Hit/miss counters
    stats: StatsRecorder,
}

impl<P: Provider> MemoizingLookup<P> {
    // == Constructor ==
    /// Creates a lookup over `provider` with an empty cache.
    pub fn new(provider: Arc<P>) -> Self {
        Self {
            provider,
            entries: Mutex::new(HashMap::new()),
            stats: StatsRecorder::default(),
        }
    }

    // The map only holds Arcs and is never left half-updated, so a poisoned
    // lock is still consistent.
    fn slots(&self) -> MutexGuard<'_, HashMap<String, Slot<P::Value>>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    // == Resolve ==
    /// Returns the value for `id`, resolving it through the provider on a miss.
    ///
    /// A provider error is returned as-is and leaves the cache unchanged, so the
    /// next call retries the provider.
    pub fn resolve(&self, id: &str) -> Result<Arc<P::Value>, P::Error> {
        self.resolve_traced(id).map(|(value, _)| value)
    }

    /// Like `resolve`, also reporting whether the value came from the cache
    /// (true) or from a provider call made by this caller (false).
    pub(crate) fn resolve_traced(&self, id: &str) -> Result<(Arc<P::Value>, bool), P::Error> {
        let slot = {
            let mut slots = self.slots();
            match slots.get(id) {
                Some(slot) => Arc::clone(slot),
                None => Arc::clone(slots.entry(id.to_owned()).or_default()),
            }
        };

        if let Some(entry) = slot.get() {
            self.stats.record_hit();
            debug!(id, "Cache hit");
            return Ok((Arc::clone(&entry.value), true));
        }

        let mut called_provider = false;
        let result = slot.get_or_try_init(|| {
            called_provider = true;
            self.stats.record_miss();
            debug!(id, "Cache miss, resolving through provider");
            self.provider.resolve(id).map(CachedEntry::new)
        });

        match result {
            Ok(entry) => {
                if !called_provider {
                    // Another caller finished the resolution while we waited.
                    self.stats.record_hit();
                }
                Ok((Arc::clone(&entry.value), !called_provider))
            }
            Err(err) => {
                self.stats.record_failure();
                warn!(id, error = %err, "Provider failed to resolve identifier");
                self.discard_vacant(id, &slot);
                Err(err)
            }
        }
    }

    /// Drops the slot for `id` after a failed resolution, unless another caller
    /// still holds it.
    ///
    /// When two failing callers overlap here, each can see the other's handle and
    /// both keep the slot, leaving one empty slot in the map for `id`. It is at most
    /// one per identifier, is invisible to `is_cached`, `len` and `cached_ids`, and
    /// the next `resolve(id)` reuses it.
    fn discard_vacant(&self, id: &str, slot: &Slot<P::Value>) {
        let mut slots = self.slots();
        let unused = slots.get(id).is_some_and(|current| {
            Arc::ptr_eq(current, slot) && current.get().is_none() && Arc::strong_count(current) == 2
        });
        if unused {
            slots.remove(id);
        }
    }

    // == Has ==
    /// Asks the provider whether it can resolve `id`. Never consults the cache.
    pub fn has(&self, id: &str) -> bool {
        let available = self.provider.has(id);
        trace!(id, available, "Provider availability check");
        available
    }

    // == Is Cached ==
    /// Returns true if `id` currently has a cached value.
    pub fn is_cached(&self, id: &str) -> bool {
        self.slots()
            .get(id)
            .is_some_and(|slot| slot.get().is_some())
    }

    /// Returns when `id` was cached, if it is.
    pub fn cached_at(&self, id: &str) -> Option<DateTime<Utc>> {
        self.slots()
            .get(id)
            .and_then(|slot| slot.get().map(|entry| entry.cached_at))
    }

    // == Clear ==
    /// Releases the cached value for `id`. Returns whether anything was removed.
    ///
    /// The next `resolve(id)` calls the provider again. A resolution still in flight
    /// for `id` is left alone.
    pub fn clear(&self, id: &str) -> bool {
        let removed = {
            let mut slots = self.slots();
            let cached = slots.get(id).is_some_and(|slot| slot.get().is_some());
            if cached {
                slots.remove(id);
            }
            cached
        };

        if removed {
            self.stats.record_clears(1);
            info!(id, "Cleared cached entry");
        }
        removed
    }

    // == Clear All ==
    /// Releases every cached value. Returns the number of entries removed.
    pub fn clear_all(&self) -> usize {
        let removed = {
            let mut slots = self.slots();
            let before = slots.len();
            slots.retain(|_, slot| slot.get().is_none());
            before - slots.len()
        };

        self.stats.record_clears(removed);
        info!(removed, "Cleared all cached entries");
        removed
    }

    // == Introspection ==
    /// Number of cached identifiers.
    pub fn len(&self) -> usize {
        self.slots()
            .values()
            .filter(|slot| slot.get().is_some())
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Cached identifiers, sorted.
    pub fn cached_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self
            .slots()
            .iter()
            .filter(|(_, slot)| slot.get().is_some())
            .map(|(id, _)| id.clone())
            .collect();
        ids.sort_unstable();
        ids
    }

    // == Stats ==
    /// Returns current lookup statistics.
    pub fn stats(&self) -> LookupStats {
        self.stats.snapshot(self.len())
    }
}

impl<P: Provider> Provider for MemoizingLookup<P> {
    type Value = Arc<P::Value>;
    type Error = P::Error;

    fn resolve(&self, id: &str) -> Result<Self::Value, Self::Error> {
        MemoizingLookup::resolve(self, id)
    }

    fn has(&self, id: &str) -> bool {
        MemoizingLookup::has(self, id)
    }
}

impl<P: Provider> fmt::Debug for MemoizingLookup<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoizingLookup")
            .field("cached", &self.len())
            .finish_non_exhaustive()
    }
}
