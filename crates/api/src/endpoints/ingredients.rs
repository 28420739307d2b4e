//! Ingredient endpoints: catalog search plus per-recipe lines.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
};
use forkful_common::AppResult;
use forkful_core::{AttachIngredientInput, IngredientLine, UpdateIngredientLineInput};
use forkful_db::entities::{ingredient, recipe_ingredient};
use serde::{Deserialize, Serialize};

use crate::{
    extractors::AuthIdentity,
    middleware::AppState,
    response::{ApiResponse, no_content},
};

/// Catalog entry response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IngredientResponse {
    pub id: i32,
    pub name: String,
}

impl From<ingredient::Model> for IngredientResponse {
    fn from(i: ingredient::Model) -> Self {
        Self {
            id: i.id,
            name: i.name,
        }
    }
}

/// Ingredient line response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IngredientLineResponse {
    pub id: i32,
    pub recipe_id: i32,
    pub ingredient_id: i32,
    pub quantity: rust_decimal::Decimal,
    pub unit: recipe_ingredient::MeasureUnit,
}

impl From<recipe_ingredient::Model> for IngredientLineResponse {
    fn from(l: recipe_ingredient::Model) -> Self {
        Self {
            id: l.id,
            recipe_id: l.recipe_id,
            ingredient_id: l.ingredient_id,
            quantity: l.quantity,
            unit: l.unit,
        }
    }
}

/// Search query params.
#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub q: String,
}

/// Search the ingredient catalog.
async fn search(
    AuthIdentity(_identity): AuthIdentity,
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> AppResult<ApiResponse<Vec<IngredientResponse>>> {
    let matches = state.ingredient_service.search(&query.q).await?;
    Ok(ApiResponse::ok(
        matches.into_iter().map(Into::into).collect(),
    ))
}

/// List a recipe's ingredient lines.
async fn list_lines(
    AuthIdentity(_identity): AuthIdentity,
    State(state): State<AppState>,
    Path(recipe_id): Path<i32>,
) -> AppResult<ApiResponse<Vec<IngredientLine>>> {
    let lines = state.ingredient_service.list_for_recipe(recipe_id).await?;
    Ok(ApiResponse::ok(lines))
}

/// Attach an ingredient to a recipe owned by the caller.
async fn attach(
    AuthIdentity(identity): AuthIdentity,
    State(state): State<AppState>,
    Path(recipe_id): Path<i32>,
    Json(input): Json<AttachIngredientInput>,
) -> AppResult<ApiResponse<IngredientLineResponse>> {
    let line = state
        .ingredient_service
        .attach(recipe_id, identity.id, input)
        .await?;
    Ok(ApiResponse::created(line.into()))
}

/// Update an ingredient line.
async fn update_line(
    AuthIdentity(identity): AuthIdentity,
    State(state): State<AppState>,
    Path((recipe_id, ingredient_id)): Path<(i32, i32)>,
    Json(input): Json<UpdateIngredientLineInput>,
) -> AppResult<ApiResponse<IngredientLineResponse>> {
    let line = state
        .ingredient_service
        .update_line(recipe_id, ingredient_id, identity.id, input)
        .await?;
    Ok(ApiResponse::ok(line.into()))
}

/// Detach an ingredient from a recipe.
async fn detach(
    AuthIdentity(identity): AuthIdentity,
    State(state): State<AppState>,
    Path((recipe_id, ingredient_id)): Path<(i32, i32)>,
) -> AppResult<StatusCode> {
    state
        .ingredient_service
        .detach(recipe_id, ingredient_id, identity.id)
        .await?;
    Ok(no_content())
}

/// Create the catalog router (mounted at `/ingredients`).
pub fn router() -> Router<AppState> {
    Router::new().route("/search", get(search))
}

/// Create the per-recipe lines router (mounted at `/recipes`).
pub fn recipe_router() -> Router<AppState> {
    Router::new()
        .route("/{id}/ingredients", get(list_lines).post(attach))
        .route(
            "/{id}/ingredients/{ingredient_id}",
            axum::routing::put(update_line).delete(detach),
        )
}
