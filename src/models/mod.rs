//! Response models for the lookup server API
//!
//! DTOs serialized into HTTP response bodies.

pub mod responses;

// Re-export commonly used types
pub use responses::{
    CacheListResponse, CachedResponse, ClearAllResponse, ClearResponse, ErrorResponse,
    HasResponse, HealthResponse, ResolveResponse, StatsResponse,
};
