//! Response DTOs for the lookup server API
//!
//! Defines the structure of outgoing HTTP response bodies.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::memo::LookupStats;

/// Response body for GET /resolve/:id
#[derive(Debug, Clone, Serialize)]
pub struct ResolveResponse {
    /// The requested identifier
    pub id: String,
    /// The resolved document
    pub value: serde_json::Value,
    /// Whether the value was already cached before this request
    pub from_cache: bool,
}

impl ResolveResponse {
    /// Creates a new ResolveResponse
    pub fn new(id: impl Into<String>, value: serde_json::Value, from_cache: bool) -> Self {
        Self {
            id: id.into(),
            value,
            from_cache,
        }
    }
}

/// Response body for GET /has/:id
#[derive(Debug, Clone, Serialize)]
pub struct HasResponse {
    /// The requested identifier
    pub id: String,
    /// Whether the provider can resolve the identifier
    pub available: bool,
}

/// Response body for GET /cached/:id
#[derive(Debug, Clone, Serialize)]
pub struct CachedResponse {
    /// The requested identifier
    pub id: String,
    /// Whether the identifier is cached
    pub cached: bool,
    /// When the entry was cached (RFC 3339), if it is
    pub cached_at: Option<String>,
}

impl CachedResponse {
    /// Creates a new CachedResponse from the entry's timestamp, if any
    pub fn new(id: impl Into<String>, cached_at: Option<DateTime<Utc>>) -> Self {
        Self {
            id: id.into(),
            cached: cached_at.is_some(),
            cached_at: cached_at.map(|at| at.to_rfc3339()),
        }
    }
}

/// Response body for GET /cache
#[derive(Debug, Clone, Serialize)]
pub struct CacheListResponse {
    /// Cached identifiers, sorted
    pub ids: Vec<String>,
    /// Number of cached identifiers
    pub total: usize,
}

impl CacheListResponse {
    /// Creates a new CacheListResponse
    pub fn new(ids: Vec<String>) -> Self {
        Self {
            total: ids.len(),
            ids,
        }
    }
}

/// Response body for DELETE /cache/:id
#[derive(Debug, Clone, Serialize)]
pub struct ClearResponse {
    /// Human-readable outcome
    pub message: String,
    /// The cleared identifier
    pub id: String,
    /// Whether an entry was actually released
    pub removed: bool,
}

impl ClearResponse {
    /// Creates a new ClearResponse
    pub fn new(id: impl Into<String>, removed: bool) -> Self {
        let id = id.into();
        let message = if removed {
            format!("Entry '{}' cleared", id)
        } else {
            format!("Entry '{}' was not cached", id)
        };
        Self {
            message,
            id,
            removed,
        }
    }
}

/// Response body for DELETE /cache
#[derive(Debug, Clone, Serialize)]
pub struct ClearAllResponse {
    /// Human-readable outcome
    pub message: String,
    /// Number of entries released
    pub cleared: usize,
}

impl ClearAllResponse {
    /// Creates a new ClearAllResponse
    pub fn new(cleared: usize) -> Self {
        Self {
            message: format!("Cleared {} cached entries", cleared),
            cleared,
        }
    }
}

/// Response body for the stats endpoint (GET /stats)
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    /// Resolves answered from the cache
    pub hits: u64,
    /// Resolves that called the provider
    pub misses: u64,
    /// Provider resolutions that failed
    pub failures: u64,
    /// Entries released by clear operations
    pub clears: u64,
    /// Current number of cached entries
    pub total_entries: usize,
    /// Hit rate (hits / (hits + misses))
    pub hit_rate: f64,
}

impl From<LookupStats> for StatsResponse {
    fn from(stats: LookupStats) -> Self {
        Self {
            hit_rate: stats.hit_rate(),
            hits: stats.hits,
            misses: stats.misses,
            failures: stats.failures,
            clears: stats.clears,
            total_entries: stats.total_entries,
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: Utc::now().to_rfc3339(),
        }
    }
}

/// Error response body for all error conditions
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error message describing what went wrong
    pub error: String,
    /// Failure kind: "not_found", "resolution" or "internal"
    pub kind: String,
}

impl ErrorResponse {
    /// Creates a new ErrorResponse
    pub fn new(error: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            kind: kind.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_resolve_response_serialize() {
        let resp = ResolveResponse::new("Interface", json!({"impl": "Concrete"}), true);
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["id"], "Interface");
        assert_eq!(json["value"]["impl"], "Concrete");
        assert_eq!(json["from_cache"], true);
    }

    #[test]
    fn test_cached_response_without_entry() {
        let resp = CachedResponse::new("Interface", None);
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["cached"], false);
        assert!(json["cached_at"].is_null());
    }

    #[test]
    fn test_cached_response_with_entry() {
        let resp = CachedResponse::new("Interface", Some(Utc::now()));
        assert!(resp.cached);
        assert!(resp.cached_at.is_some());
    }

    #[test]
    fn test_clear_response_messages() {
        assert!(ClearResponse::new("a", true).message.contains("cleared"));
        assert!(ClearResponse::new("a", false).message.contains("not cached"));
    }

    #[test]
    fn test_cache_list_total() {
        let resp = CacheListResponse::new(vec!["a".to_string(), "b".to_string()]);
        assert_eq!(resp.total, 2);
    }

    #[test]
    fn test_stats_response_hit_rate() {
        let stats = LookupStats {
            hits: 80,
            misses: 20,
            failures: 5,
            clears: 3,
            total_entries: 15,
        };
        let resp = StatsResponse::from(stats);
        assert!((resp.hit_rate - 0.8).abs() < 0.001);
        assert_eq!(resp.failures, 5);
    }

    #[test]
    fn test_stats_response_zero_requests() {
        let resp = StatsResponse::from(LookupStats::default());
        assert_eq!(resp.hit_rate, 0.0);
    }

    #[test]
    fn test_health_response_serialize() {
        let resp = HealthResponse::healthy();
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("healthy"));
        assert!(json.contains("timestamp"));
    }

    #[test]
    fn test_error_response_serialize() {
        let resp = ErrorResponse::new("Something went wrong", "internal");
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("Something went wrong"));
        assert!(json.contains("internal"));
    }
}
