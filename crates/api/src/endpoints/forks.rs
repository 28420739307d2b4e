//! Forked recipe endpoints.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::get,
};
use forkful_common::AppResult;
use forkful_core::UpdateForkInput;
use forkful_db::entities::{forked_recipe, recipe::RecipeTag};
use serde::Serialize;

use crate::{
    extractors::AuthIdentity,
    middleware::AppState,
    response::{ApiResponse, no_content},
};

/// Fork response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ForkResponse {
    pub id: i32,
    pub user_id: i32,
    pub recipe_id: i32,
    pub name: String,
    pub description: Option<String>,
    pub tag: RecipeTag,
    pub people_count: i32,
    pub created_at: String,
    pub updated_at: Option<String>,
}

impl From<forked_recipe::Model> for ForkResponse {
    fn from(f: forked_recipe::Model) -> Self {
        Self {
            id: f.id,
            user_id: f.user_id,
            recipe_id: f.recipe_id,
            name: f.name,
            description: f.description,
            tag: f.tag,
            people_count: f.people_count,
            created_at: f.created_at.to_rfc3339(),
            updated_at: f.updated_at.map(|t| t.to_rfc3339()),
        }
    }
}

/// List the caller's forks.
async fn list(
    AuthIdentity(identity): AuthIdentity,
    State(state): State<AppState>,
) -> AppResult<ApiResponse<Vec<ForkResponse>>> {
    let forks = state.fork_service.list(identity.id).await?;
    Ok(ApiResponse::ok(forks.into_iter().map(Into::into).collect()))
}

/// Get one of the caller's forks.
async fn get_fork(
    AuthIdentity(identity): AuthIdentity,
    State(state): State<AppState>,
    Path(fork_id): Path<i32>,
) -> AppResult<ApiResponse<ForkResponse>> {
    let fork = state.fork_service.get(fork_id, identity.id).await?;
    Ok(ApiResponse::ok(fork.into()))
}

/// Update one of the caller's forks.
async fn update(
    AuthIdentity(identity): AuthIdentity,
    State(state): State<AppState>,
    Path(fork_id): Path<i32>,
    Json(input): Json<UpdateForkInput>,
) -> AppResult<ApiResponse<ForkResponse>> {
    let fork = state
        .fork_service
        .update(fork_id, identity.id, input)
        .await?;
    Ok(ApiResponse::ok(fork.into()))
}

/// Delete one of the caller's forks.
async fn delete_fork(
    AuthIdentity(identity): AuthIdentity,
    State(state): State<AppState>,
    Path(fork_id): Path<i32>,
) -> AppResult<StatusCode> {
    state.fork_service.delete(fork_id, identity.id).await?;
    Ok(no_content())
}

/// Create the forked recipes router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list))
        .route("/{id}", get(get_fork).put(update).delete(delete_fork))
}
