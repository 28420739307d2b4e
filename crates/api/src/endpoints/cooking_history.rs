//! Cooking history endpoints.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, put},
};
use forkful_common::AppResult;
use forkful_db::entities::cooking_history;
use serde::{Deserialize, Serialize};

use crate::{
    extractors::AuthIdentity,
    middleware::AppState,
    response::{ApiResponse, no_content},
};

/// History entry response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryResponse {
    pub id: i32,
    pub recipe_id: i32,
    pub created_at: String,
    pub updated_at: Option<String>,
}

impl From<cooking_history::Model> for HistoryResponse {
    fn from(h: cooking_history::Model) -> Self {
        Self {
            id: h.id,
            recipe_id: h.recipe_id,
            created_at: h.created_at.to_rfc3339(),
            updated_at: h.updated_at.map(|t| t.to_rfc3339()),
        }
    }
}

/// Record request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordRequest {
    pub recipe_id: i32,
}

/// List the caller's cooking history.
async fn list(
    AuthIdentity(identity): AuthIdentity,
    State(state): State<AppState>,
) -> AppResult<ApiResponse<Vec<HistoryResponse>>> {
    let entries = state.cooking_history_service.list(identity.id).await?;
    Ok(ApiResponse::ok(
        entries.into_iter().map(Into::into).collect(),
    ))
}

/// Record a cooked recipe.
async fn record(
    AuthIdentity(identity): AuthIdentity,
    State(state): State<AppState>,
    Json(req): Json<RecordRequest>,
) -> AppResult<ApiResponse<HistoryResponse>> {
    let entry = state
        .cooking_history_service
        .record(identity.id, req.recipe_id)
        .await?;
    Ok(ApiResponse::created(entry.into()))
}

/// Mark an entry as cooked again.
async fn touch(
    AuthIdentity(identity): AuthIdentity,
    State(state): State<AppState>,
    Path(recipe_id): Path<i32>,
) -> AppResult<ApiResponse<HistoryResponse>> {
    let entry = state
        .cooking_history_service
        .touch(identity.id, recipe_id)
        .await?;
    Ok(ApiResponse::ok(entry.into()))
}

/// Remove an entry from the caller's history.
async fn remove(
    AuthIdentity(identity): AuthIdentity,
    State(state): State<AppState>,
    Path(recipe_id): Path<i32>,
) -> AppResult<StatusCode> {
    state
        .cooking_history_service
        .remove(identity.id, recipe_id)
        .await?;
    Ok(no_content())
}

/// Create the cooking history router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list).post(record))
        .route("/{recipe_id}", put(touch).delete(remove))
}
