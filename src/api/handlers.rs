//! API Handlers
//!
//! HTTP request handlers for each lookup server endpoint.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};

use crate::config::Config;
use crate::error::{ApiError, Result};
use crate::memo::MemoizingLookup;
use crate::models::{
    CacheListResponse, CachedResponse, ClearAllResponse, ClearResponse, HasResponse,
    HealthResponse, ResolveResponse, StatsResponse,
};
use crate::provider::DirProvider;

/// Application state shared across all handlers.
///
/// The lookup synchronizes itself, so handlers share it through a plain `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Memoized document lookup
    pub lookup: Arc<MemoizingLookup<DirProvider>>,
}

impl AppState {
    /// Creates a new AppState memoizing the given provider.
    pub fn new(provider: DirProvider) -> Self {
        Self {
            lookup: Arc::new(MemoizingLookup::new(Arc::new(provider))),
        }
    }

    /// Creates a new AppState from configuration.
    pub fn from_config(config: &Config) -> Self {
        Self::new(DirProvider::new(config.provider_dir.clone()))
    }
}

/// Handler for GET /resolve/:id
///
/// Resolves a document, reading it from disk only on a cache miss.
pub async fn resolve_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ResolveResponse>> {
    // Provider reads block, keep them off the async workers
    let lookup = Arc::clone(&state.lookup);
    let (id, from_cache, value) = tokio::task::spawn_blocking(move || {
        lookup
            .resolve_traced(&id)
            .map(|(value, from_cache)| (id, from_cache, value))
    })
    .await
    .map_err(|err| ApiError::Internal(err.to_string()))??;

    Ok(Json(ResolveResponse::new(id, (*value).clone(), from_cache)))
}

/// Handler for GET /has/:id
///
/// Asks the provider whether the document exists. Does not cache anything.
pub async fn has_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<HasResponse>> {
    let lookup = Arc::clone(&state.lookup);
    let response = tokio::task::spawn_blocking(move || {
        let available = lookup.has(&id);
        HasResponse { id, available }
    })
    .await
    .map_err(|err| ApiError::Internal(err.to_string()))?;

    Ok(Json(response))
}

/// Handler for GET /cached/:id
pub async fn cached_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Json<CachedResponse> {
    let cached_at = state.lookup.cached_at(&id);
    Json(CachedResponse::new(id, cached_at))
}

/// Handler for GET /cache
///
/// Lists the identifiers currently cached.
pub async fn list_handler(State(state): State<AppState>) -> Json<CacheListResponse> {
    Json(CacheListResponse::new(state.lookup.cached_ids()))
}

/// Handler for DELETE /cache/:id
///
/// Releases one cached entry. Succeeds whether or not it was cached.
pub async fn clear_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Json<ClearResponse> {
    let removed = state.lookup.clear(&id);
    Json(ClearResponse::new(id, removed))
}

/// Handler for DELETE /cache
///
/// Releases every cached entry.
pub async fn clear_all_handler(State(state): State<AppState>) -> Json<ClearAllResponse> {
    Json(ClearAllResponse::new(state.lookup.clear_all()))
}

/// Handler for GET /stats
///
/// Returns current lookup statistics.
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    Json(StatsResponse::from(state.lookup.stats()))
}

/// Handler for GET /health
///
/// Returns health status of the server.
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LookupError;
    use std::fs;
    use tempfile::TempDir;

    fn test_state() -> (TempDir, AppState) {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("Interface.json"), r#"{"impl":"Concrete"}"#).unwrap();
        fs::write(dir.path().join("Broken.json"), "{oops").unwrap();
        let state = AppState::new(DirProvider::new(dir.path()));
        (dir, state)
    }

    #[tokio::test]
    async fn test_resolve_then_cached() {
        let (_dir, state) = test_state();

        let first = resolve_handler(State(state.clone()), Path("Interface".to_string()))
            .await
            .unwrap();
        assert!(!first.from_cache);
        assert_eq!(first.value["impl"], "Concrete");

        let second = resolve_handler(State(state.clone()), Path("Interface".to_string()))
            .await
            .unwrap();
        assert!(second.from_cache);

        let cached = cached_handler(State(state), Path("Interface".to_string())).await;
        assert!(cached.cached);
    }

    #[tokio::test]
    async fn test_resolve_missing_is_not_found() {
        let (_dir, state) = test_state();

        let result = resolve_handler(State(state.clone()), Path("Missing".to_string())).await;
        assert!(matches!(
            result,
            Err(ApiError::Lookup(LookupError::NotFound(_)))
        ));
        assert!(!state.lookup.is_cached("Missing"));
    }

    #[tokio::test]
    async fn test_resolve_broken_is_resolution_error() {
        let (_dir, state) = test_state();

        let result = resolve_handler(State(state), Path("Broken".to_string())).await;
        assert!(matches!(
            result,
            Err(ApiError::Lookup(LookupError::Resolution { .. }))
        ));
    }

    #[tokio::test]
    async fn test_has_handler() {
        let (_dir, state) = test_state();

        let found = has_handler(State(state.clone()), Path("Interface".to_string()))
            .await
            .unwrap();
        assert!(found.available);

        let missing = has_handler(State(state.clone()), Path("Missing".to_string()))
            .await
            .unwrap();
        assert!(!missing.available);
        assert!(state.lookup.is_empty());
    }

    #[tokio::test]
    async fn test_clear_handlers() {
        let (_dir, state) = test_state();
        resolve_handler(State(state.clone()), Path("Interface".to_string()))
            .await
            .unwrap();

        let cleared = clear_handler(State(state.clone()), Path("Interface".to_string())).await;
        assert!(cleared.removed);
        let again = clear_handler(State(state.clone()), Path("Interface".to_string())).await;
        assert!(!again.removed);

        let all = clear_all_handler(State(state)).await;
        assert_eq!(all.cleared, 0);
    }

    #[tokio::test]
    async fn test_list_and_stats_handlers() {
        let (_dir, state) = test_state();
        resolve_handler(State(state.clone()), Path("Interface".to_string()))
            .await
            .unwrap();

        let list = list_handler(State(state.clone())).await;
        assert_eq!(list.ids, vec!["Interface".to_string()]);

        let stats = stats_handler(State(state)).await;
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.total_entries, 1);
    }

    #[tokio::test]
    async fn test_health_handler() {
        let response = health_handler().await;
        assert_eq!(response.status, "healthy");
    }
}
