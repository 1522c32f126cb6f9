//! Singleton Lookup - memoizing decorator over key-to-value providers
//!
//! Wraps a [`Provider`] so each identifier is resolved through it at most once,
//! with explicit invalidation via `clear` and `clear_all`.

pub mod api;
pub mod config;
pub mod error;
pub mod memo;
pub mod models;
pub mod provider;

pub use api::AppState;
pub use config::Config;
pub use error::LookupError;
pub use memo::{LookupStats, MemoizingLookup};
pub use provider::{DirProvider, Provider};
