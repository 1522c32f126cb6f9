//! Memo Module
//!
//! Memoizing decorator over a `Provider`: each identifier is resolved at most once
//! until it is cleared.

mod entry;
mod lookup;
mod stats;

#[cfg(test)]
pub(crate) mod mock;

// Re-export public types
pub(crate) use entry::CachedEntry;
pub use lookup::MemoizingLookup;
pub use stats::LookupStats;
