//! Authentication endpoints.

use axum::{Json, Router, extract::State, routing::post};
use forkful_common::AppResult;
use forkful_core::{RegisterInput, TokenResponse};
use serde::Deserialize;

use crate::{endpoints::users::UserResponse, middleware::AppState, response::ApiResponse};

/// Token request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenRequest {
    /// Username or email address.
    pub username: String,
    pub password: String,
}

/// Register a new account.
async fn register(
    State(state): State<AppState>,
    Json(input): Json<RegisterInput>,
) -> AppResult<ApiResponse<UserResponse>> {
    let user = state.user_service.register(input).await?;
    Ok(ApiResponse::created(user.into()))
}

/// Exchange credentials for an access token.
async fn token(
    State(state): State<AppState>,
    Json(req): Json<TokenRequest>,
) -> AppResult<ApiResponse<TokenResponse>> {
    let token = state
        .auth_service
        .login(&req.username, &req.password)
        .await?;
    Ok(ApiResponse::ok(token))
}

/// Create the authentication router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/token", post(token))
}
