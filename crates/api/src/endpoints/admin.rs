//! Admin moderation endpoints. Every handler checks the caller's role.

use axum::{
    Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get, post},
};
use forkful_common::AppResult;

use crate::{
    endpoints::{recipes::RecipeResponse, users::UserResponse},
    extractors::AuthIdentity,
    middleware::AppState,
    response::{ApiResponse, no_content},
};

/// List every user.
async fn list_users(
    AuthIdentity(identity): AuthIdentity,
    State(state): State<AppState>,
) -> AppResult<ApiResponse<Vec<UserResponse>>> {
    identity.require_admin()?;
    let users = state.moderation_service.list_users().await?;
    Ok(ApiResponse::ok(users.into_iter().map(Into::into).collect()))
}

/// Block a user.
async fn block_user(
    AuthIdentity(identity): AuthIdentity,
    State(state): State<AppState>,
    Path(user_id): Path<i32>,
) -> AppResult<ApiResponse<()>> {
    identity.require_admin()?;
    state
        .moderation_service
        .block_user(identity.id, user_id)
        .await?;
    Ok(ApiResponse::ok(()))
}

/// Unblock a user.
async fn unblock_user(
    AuthIdentity(identity): AuthIdentity,
    State(state): State<AppState>,
    Path(user_id): Path<i32>,
) -> AppResult<StatusCode> {
    identity.require_admin()?;
    state
        .moderation_service
        .unblock_user(identity.id, user_id)
        .await?;
    Ok(no_content())
}

/// Hard-delete a user account.
async fn delete_user(
    AuthIdentity(identity): AuthIdentity,
    State(state): State<AppState>,
    Path(user_id): Path<i32>,
) -> AppResult<StatusCode> {
    identity.require_admin()?;
    state
        .moderation_service
        .delete_user(identity.id, user_id)
        .await?;
    Ok(no_content())
}

/// List every recipe, hidden and soft-deleted included.
async fn list_recipes(
    AuthIdentity(identity): AuthIdentity,
    State(state): State<AppState>,
) -> AppResult<ApiResponse<Vec<RecipeResponse>>> {
    identity.require_admin()?;
    let recipes = state.moderation_service.list_recipes().await?;
    Ok(ApiResponse::ok(
        recipes.into_iter().map(Into::into).collect(),
    ))
}

/// Get any recipe regardless of visibility.
async fn get_recipe(
    AuthIdentity(identity): AuthIdentity,
    State(state): State<AppState>,
    Path(recipe_id): Path<i32>,
) -> AppResult<ApiResponse<RecipeResponse>> {
    identity.require_admin()?;
    let recipe = state.moderation_service.get_recipe(recipe_id).await?;
    Ok(ApiResponse::ok(recipe.into()))
}

/// Soft-delete any recipe.
async fn delete_recipe(
    AuthIdentity(identity): AuthIdentity,
    State(state): State<AppState>,
    Path(recipe_id): Path<i32>,
) -> AppResult<StatusCode> {
    identity.require_admin()?;
    state
        .moderation_service
        .delete_recipe(identity.id, recipe_id)
        .await?;
    Ok(no_content())
}

/// Delete any comment.
async fn delete_comment(
    AuthIdentity(identity): AuthIdentity,
    State(state): State<AppState>,
    Path(comment_id): Path<i32>,
) -> AppResult<StatusCode> {
    identity.require_admin()?;
    state
        .moderation_service
        .delete_comment(identity.id, comment_id)
        .await?;
    Ok(no_content())
}

/// Hide a recipe from the public surface.
async fn hide_recipe(
    AuthIdentity(identity): AuthIdentity,
    State(state): State<AppState>,
    Path(recipe_id): Path<i32>,
) -> AppResult<ApiResponse<()>> {
    identity.require_admin()?;
    state
        .moderation_service
        .hide_recipe(identity.id, recipe_id)
        .await?;
    Ok(ApiResponse::ok(()))
}

/// Restore a hidden recipe.
async fn unhide_recipe(
    AuthIdentity(identity): AuthIdentity,
    State(state): State<AppState>,
    Path(recipe_id): Path<i32>,
) -> AppResult<StatusCode> {
    identity.require_admin()?;
    state
        .moderation_service
        .unhide_recipe(identity.id, recipe_id)
        .await?;
    Ok(no_content())
}

/// Create the admin router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/users", get(list_users))
        .route("/users/{id}", delete(delete_user))
        .route("/users/{id}/block", post(block_user).delete(unblock_user))
        .route("/recipes", get(list_recipes))
        .route("/recipes/{id}", get(get_recipe).delete(delete_recipe))
        .route("/recipes/{id}/hide", post(hide_recipe).delete(unhide_recipe))
        .route("/comments/{id}", delete(delete_comment))
}
