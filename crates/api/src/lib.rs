//! HTTP API layer for forkful.
//!
//! This crate provides the REST API:
//!
//! - **Endpoints**: recipes, forks, social graph, wishlists, moderation
//! - **Extractors**: authentication via bearer tokens
//! - **Middleware**: token verification
//!
//! Built on Axum 0.8.

pub mod endpoints;
pub mod extractors;
pub mod middleware;
pub mod response;

pub use endpoints::router;
pub use middleware::AppState;
