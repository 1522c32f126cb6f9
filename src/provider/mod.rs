//! Provider Module
//!
//! The capability the memoizing layer decorates: resolve an identifier to a value,
//! or report whether it could.

mod dir;

use std::sync::Arc;

pub use dir::{DirProvider, MAX_ID_LENGTH};

// == Provider Trait ==
/// Resolves string identifiers to values.
///
/// `has(id)` returning true does not mean `resolve(id)` will succeed. It does mean
/// `resolve(id)` will not fail with a "not found" kind of error.
pub trait Provider {
    /// Value produced for an identifier
    type Value;
    /// Failure reported by `resolve`
    type Error: std::error::Error + Send + Sync + 'static;

    /// Resolves `id` to its value.
    fn resolve(&self, id: &str) -> Result<Self::Value, Self::Error>;

    /// Returns true if this provider can in principle resolve `id`.
    fn has(&self, id: &str) -> bool;
}

impl<P: Provider + ?Sized> Provider for Arc<P> {
    type Value = P::Value;
    type Error = P::Error;

    fn resolve(&self, id: &str) -> Result<Self::Value, Self::Error> {
        (**self).resolve(id)
    }

    fn has(&self, id: &str) -> bool {
        (**self).has(id)
    }
}
