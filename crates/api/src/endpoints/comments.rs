//! Comment endpoints: flat listing, threaded view, CRUD.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, put},
};
use forkful_common::AppResult;
use forkful_core::{CommentNode, CreateCommentInput, UpdateCommentInput};
use forkful_db::entities::recipe_comment;
use serde::Serialize;

use crate::{
    extractors::AuthIdentity,
    middleware::AppState,
    response::{ApiResponse, no_content},
};

/// Comment response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentResponse {
    pub id: i32,
    pub recipe_id: i32,
    pub user_id: i32,
    pub body: String,
    pub parent_comment_id: Option<i32>,
    pub created_at: String,
    pub updated_at: Option<String>,
}

impl From<recipe_comment::Model> for CommentResponse {
    fn from(c: recipe_comment::Model) -> Self {
        Self {
            id: c.id,
            recipe_id: c.recipe_id,
            user_id: c.user_id,
            body: c.body,
            parent_comment_id: c.parent_comment_id,
            created_at: c.created_at.to_rfc3339(),
            updated_at: c.updated_at.map(|t| t.to_rfc3339()),
        }
    }
}

/// A comment with nested replies.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentTreeResponse {
    #[serde(flatten)]
    pub comment: CommentResponse,
    pub replies: Vec<CommentTreeResponse>,
}

impl From<CommentNode> for CommentTreeResponse {
    fn from(node: CommentNode) -> Self {
        Self {
            comment: node.comment.into(),
            replies: node.replies.into_iter().map(Into::into).collect(),
        }
    }
}

/// List a recipe's comments, flat.
async fn list(
    AuthIdentity(_identity): AuthIdentity,
    State(state): State<AppState>,
    Path(recipe_id): Path<i32>,
) -> AppResult<ApiResponse<Vec<CommentResponse>>> {
    let comments = state.comment_service.list(recipe_id).await?;
    Ok(ApiResponse::ok(
        comments.into_iter().map(Into::into).collect(),
    ))
}

/// Serve a recipe's comments as a reply tree.
async fn thread(
    AuthIdentity(_identity): AuthIdentity,
    State(state): State<AppState>,
    Path(recipe_id): Path<i32>,
) -> AppResult<ApiResponse<Vec<CommentTreeResponse>>> {
    let tree = state.comment_service.thread(recipe_id).await?;
    Ok(ApiResponse::ok(tree.into_iter().map(Into::into).collect()))
}

/// Post a comment or reply on a recipe.
async fn create(
    AuthIdentity(identity): AuthIdentity,
    State(state): State<AppState>,
    Path(recipe_id): Path<i32>,
    Json(input): Json<CreateCommentInput>,
) -> AppResult<ApiResponse<CommentResponse>> {
    let comment = state
        .comment_service
        .create(recipe_id, identity.id, input)
        .await?;
    Ok(ApiResponse::created(comment.into()))
}

/// Edit a comment authored by the caller.
async fn update(
    AuthIdentity(identity): AuthIdentity,
    State(state): State<AppState>,
    Path(comment_id): Path<i32>,
    Json(input): Json<UpdateCommentInput>,
) -> AppResult<ApiResponse<CommentResponse>> {
    let comment = state
        .comment_service
        .update(comment_id, identity.id, input)
        .await?;
    Ok(ApiResponse::ok(comment.into()))
}

/// Delete a comment authored by the caller.
async fn delete_comment(
    AuthIdentity(identity): AuthIdentity,
    State(state): State<AppState>,
    Path(comment_id): Path<i32>,
) -> AppResult<StatusCode> {
    state.comment_service.delete(comment_id, identity.id).await?;
    Ok(no_content())
}

/// Create the standalone comments router (mounted at `/comments`).
pub fn router() -> Router<AppState> {
    Router::new().route("/{id}", put(update).delete(delete_comment))
}

/// Create the per-recipe comments router (mounted at `/recipes`).
pub fn recipe_router() -> Router<AppState> {
    Router::new()
        .route("/{id}/comments", get(list).post(create))
        .route("/{id}/comments/thread", get(thread))
}
