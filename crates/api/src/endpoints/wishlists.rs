//! Wishlist endpoints.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::get,
};
use forkful_common::AppResult;
use forkful_core::AddWishlistInput;
use forkful_db::entities::wishlist::{self, WishlistVisibility};
use serde::{Deserialize, Serialize};

use crate::{
    extractors::AuthIdentity,
    middleware::AppState,
    response::{ApiResponse, no_content},
};

/// Wishlist entry response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WishlistResponse {
    pub id: i32,
    pub recipe_id: i32,
    pub visibility: WishlistVisibility,
    pub created_at: String,
}

impl From<wishlist::Model> for WishlistResponse {
    fn from(w: wishlist::Model) -> Self {
        Self {
            id: w.id,
            recipe_id: w.recipe_id,
            visibility: w.visibility,
            created_at: w.created_at.to_rfc3339(),
        }
    }
}

/// Visibility change request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisibilityRequest {
    pub visibility: WishlistVisibility,
}

/// List the caller's wishlist.
async fn list(
    AuthIdentity(identity): AuthIdentity,
    State(state): State<AppState>,
) -> AppResult<ApiResponse<Vec<WishlistResponse>>> {
    let entries = state.wishlist_service.list_own(identity.id).await?;
    Ok(ApiResponse::ok(
        entries.into_iter().map(Into::into).collect(),
    ))
}

/// Add a recipe to the caller's wishlist.
async fn add(
    AuthIdentity(identity): AuthIdentity,
    State(state): State<AppState>,
    Json(input): Json<AddWishlistInput>,
) -> AppResult<ApiResponse<WishlistResponse>> {
    let entry = state.wishlist_service.add(identity.id, input).await?;
    Ok(ApiResponse::created(entry.into()))
}

/// Change an entry's visibility.
async fn set_visibility(
    AuthIdentity(identity): AuthIdentity,
    State(state): State<AppState>,
    Path(recipe_id): Path<i32>,
    Json(req): Json<VisibilityRequest>,
) -> AppResult<ApiResponse<WishlistResponse>> {
    let entry = state
        .wishlist_service
        .set_visibility(identity.id, recipe_id, req.visibility)
        .await?;
    Ok(ApiResponse::ok(entry.into()))
}

/// Remove a recipe from the caller's wishlist.
async fn remove(
    AuthIdentity(identity): AuthIdentity,
    State(state): State<AppState>,
    Path(recipe_id): Path<i32>,
) -> AppResult<StatusCode> {
    state.wishlist_service.remove(identity.id, recipe_id).await?;
    Ok(no_content())
}

/// Create the wishlists router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list).post(add))
        .route(
            "/{recipe_id}",
            axum::routing::put(set_visibility).delete(remove),
        )
}
