//! Recipe endpoints, including likes and forking.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
};
use forkful_common::AppResult;
use forkful_core::{CreateRecipeInput, UpdateRecipeInput};
use forkful_db::entities::recipe::{self, RecipeTag};
use serde::{Deserialize, Serialize};

use crate::{
    endpoints::forks::ForkResponse, extractors::AuthIdentity, middleware::AppState,
    response::{ApiResponse, no_content},
};

/// Recipe response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeResponse {
    pub id: i32,
    pub user_id: i32,
    pub name: String,
    pub description: Option<String>,
    pub tag: RecipeTag,
    pub people_count: i32,
    pub likes_count: i32,
    pub forked_count: i32,
    pub created_at: String,
    pub updated_at: Option<String>,
}

impl From<recipe::Model> for RecipeResponse {
    fn from(r: recipe::Model) -> Self {
        Self {
            id: r.id,
            user_id: r.user_id,
            name: r.name,
            description: r.description,
            tag: r.tag,
            people_count: r.people_count,
            likes_count: r.likes_count,
            forked_count: r.forked_count,
            created_at: r.created_at.to_rfc3339(),
            updated_at: r.updated_at.map(|t| t.to_rfc3339()),
        }
    }
}

/// Search query params.
#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub q: String,
}

fn list_response(recipes: Vec<recipe::Model>) -> ApiResponse<Vec<RecipeResponse>> {
    ApiResponse::ok(recipes.into_iter().map(Into::into).collect())
}

/// List all visible recipes.
async fn list(
    AuthIdentity(_identity): AuthIdentity,
    State(state): State<AppState>,
) -> AppResult<ApiResponse<Vec<RecipeResponse>>> {
    Ok(list_response(state.recipe_service.list().await?))
}

/// Create a recipe.
async fn create(
    AuthIdentity(identity): AuthIdentity,
    State(state): State<AppState>,
    Json(input): Json<CreateRecipeInput>,
) -> AppResult<ApiResponse<RecipeResponse>> {
    let recipe = state.recipe_service.create(identity.id, input).await?;
    Ok(ApiResponse::created(recipe.into()))
}

/// Search recipes by name or description.
async fn search(
    AuthIdentity(_identity): AuthIdentity,
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> AppResult<ApiResponse<Vec<RecipeResponse>>> {
    Ok(list_response(state.recipe_service.search(&query.q).await?))
}

/// List visible recipes with a dietary tag.
async fn by_type(
    AuthIdentity(_identity): AuthIdentity,
    State(state): State<AppState>,
    Path(tag): Path<RecipeTag>,
) -> AppResult<ApiResponse<Vec<RecipeResponse>>> {
    Ok(list_response(state.recipe_service.list_by_tag(tag).await?))
}

/// List visible recipes by serving size.
async fn by_people_count(
    AuthIdentity(_identity): AuthIdentity,
    State(state): State<AppState>,
    Path(count): Path<i32>,
) -> AppResult<ApiResponse<Vec<RecipeResponse>>> {
    Ok(list_response(
        state.recipe_service.list_by_people_count(count).await?,
    ))
}

/// List the caller's own recipes.
async fn mine(
    AuthIdentity(identity): AuthIdentity,
    State(state): State<AppState>,
) -> AppResult<ApiResponse<Vec<RecipeResponse>>> {
    Ok(list_response(
        state.recipe_service.list_by_owner(identity.id).await?,
    ))
}

/// Get one visible recipe.
async fn get_recipe(
    AuthIdentity(_identity): AuthIdentity,
    State(state): State<AppState>,
    Path(recipe_id): Path<i32>,
) -> AppResult<ApiResponse<RecipeResponse>> {
    let recipe = state.recipe_service.get(recipe_id).await?;
    Ok(ApiResponse::ok(recipe.into()))
}

/// Update a recipe owned by the caller.
async fn update(
    AuthIdentity(identity): AuthIdentity,
    State(state): State<AppState>,
    Path(recipe_id): Path<i32>,
    Json(input): Json<UpdateRecipeInput>,
) -> AppResult<ApiResponse<RecipeResponse>> {
    let recipe = state
        .recipe_service
        .update(recipe_id, identity.id, input)
        .await?;
    Ok(ApiResponse::ok(recipe.into()))
}

/// Soft delete a recipe owned by the caller.
async fn delete_recipe(
    AuthIdentity(identity): AuthIdentity,
    State(state): State<AppState>,
    Path(recipe_id): Path<i32>,
) -> AppResult<StatusCode> {
    state.recipe_service.delete(recipe_id, identity.id).await?;
    Ok(no_content())
}

/// Like a recipe.
async fn like(
    AuthIdentity(identity): AuthIdentity,
    State(state): State<AppState>,
    Path(recipe_id): Path<i32>,
) -> AppResult<ApiResponse<()>> {
    state.like_service.like(identity.id, recipe_id).await?;
    Ok(ApiResponse::ok(()))
}

/// Remove a like.
async fn unlike(
    AuthIdentity(identity): AuthIdentity,
    State(state): State<AppState>,
    Path(recipe_id): Path<i32>,
) -> AppResult<StatusCode> {
    state.like_service.unlike(identity.id, recipe_id).await?;
    Ok(no_content())
}

/// Fork a recipe into the caller's collection.
async fn fork(
    AuthIdentity(identity): AuthIdentity,
    State(state): State<AppState>,
    Path(recipe_id): Path<i32>,
) -> AppResult<ApiResponse<ForkResponse>> {
    let fork = state.fork_service.fork(identity.id, recipe_id).await?;
    Ok(ApiResponse::created(fork.into()))
}

/// Create the recipes router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list).post(create))
        .route("/search", get(search))
        .route("/by-type/{tag}", get(by_type))
        .route("/by-people-count/{count}", get(by_people_count))
        .route("/mine", get(mine))
        .route("/{id}", get(get_recipe).put(update).delete(delete_recipe))
        .route("/{id}/like", post(like).delete(unlike))
        .route("/{id}/fork", post(fork))
}
