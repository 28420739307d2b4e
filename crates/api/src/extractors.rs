//! Request extractors.

use axum::{extract::FromRequestParts, http::request::Parts};
use forkful_common::AppError;
use forkful_core::Identity;

/// Authenticated caller extractor.
///
/// Reads the [`Identity`] the auth middleware placed in request extensions;
/// absent means the request carried no valid token.
#[derive(Debug, Clone)]
pub struct AuthIdentity(pub Identity);

impl<S> FromRequestParts<S> for AuthIdentity
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Identity>()
            .cloned()
            .map(AuthIdentity)
            .ok_or(AppError::Unauthorized)
    }
}
