//! API Module
//!
//! HTTP handlers and routing exposing a memoized lookup over REST.
//!
//! # Endpoints
//! - `GET /resolve/:id` - Resolve an identifier (memoized)
//! - `GET /has/:id` - Provider availability check
//! - `GET /cached/:id` - Cache membership check
//! - `GET /cache` - List cached identifiers
//! - `DELETE /cache/:id` - Release one entry
//! - `DELETE /cache` - Release all entries
//! - `GET /stats` - Lookup statistics
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
