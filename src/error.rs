//! Error types for lookups and the HTTP surface
//!
//! `LookupError` is the failure taxonomy providers report. The memoizing layer never
//! creates or rewrites these; it hands back whatever the provider returned.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::models::ErrorResponse;

/// Boxed cause attached to a failed resolution.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

// == Lookup Error Enum ==
/// Failure kinds a provider reports from `resolve`.
#[derive(Error, Debug)]
pub enum LookupError {
    /// No entry exists for this exact identifier
    #[error("No entry found for identifier: {0}")]
    NotFound(String),

    /// An entry should exist but producing it failed
    #[error("Failed to resolve '{id}': {source}")]
    Resolution {
        id: String,
        #[source]
        source: BoxError,
    },
}

impl LookupError {
    /// Builds a `Resolution` error for `id` with the given cause.
    pub fn resolution(id: impl Into<String>, source: impl Into<BoxError>) -> Self {
        LookupError::Resolution {
            id: id.into(),
            source: source.into(),
        }
    }

    /// Returns true for the "no such entry" kind.
    pub fn is_not_found(&self) -> bool {
        matches!(self, LookupError::NotFound(_))
    }
}

// == API Error Enum ==
/// Errors surfaced by the HTTP handlers.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Provider failure passed through the lookup
    #[error(transparent)]
    Lookup(#[from] LookupError),

    /// Internal server error (e.g. a blocking task panicked)
    #[error("Internal error: {0}")]
    Internal(String),
}

// == IntoResponse Implementation ==
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, kind) = match &self {
            ApiError::Lookup(LookupError::NotFound(_)) => (StatusCode::NOT_FOUND, "not_found"),
            ApiError::Lookup(LookupError::Resolution { .. }) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "resolution")
            }
            ApiError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "internal"),
        };

        (status, Json(ErrorResponse::new(self.to_string(), kind))).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the HTTP handlers.
pub type Result<T> = std::result::Result<T, ApiError>;
