//! Cached Entry Module
//!
//! A value the provider produced, together with the moment it was memoized.

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};

// == Cached Entry ==
/// A memoized provider result.
pub(crate) struct CachedEntry<V> {
    /// The shared value handed to every caller
    pub(crate) value: Arc<V>,
    /// When the provider's result was stored
    pub(crate) cached_at: DateTime<Utc>,
}

impl<V> CachedEntry<V> {
    // == Constructor ==
    /// Wraps a freshly resolved value, stamped with the current time.
    pub(crate) fn new(value: V) -> Self {
        Self {
            value: Arc::new(value),
            cached_at: Utc::now(),
        }
    }
}

impl<V> Clone for CachedEntry<V> {
    fn clone(&self) -> Self {
        Self {
            value: Arc::clone(&self.value),
            cached_at: self.cached_at,
        }
    }
}

impl<V: fmt::Debug> fmt::Debug for CachedEntry<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CachedEntry")
            .field("value", &self.value)
            .field("cached_at", &self.cached_at)
            .finish()
    }
}
