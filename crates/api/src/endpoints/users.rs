//! User and social graph endpoints.

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{get, post, put},
};
use forkful_common::AppResult;
use forkful_core::{ChangePasswordInput, UpdateProfileInput};
use forkful_db::entities::user;
use serde::Serialize;

use crate::{
    endpoints::wishlists::WishlistResponse, extractors::AuthIdentity, middleware::AppState,
    response::ApiResponse,
};

/// User response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub bio: Option<String>,
    pub profile_photo: Option<String>,
    pub date_of_birth: Option<String>,
    pub phone_number: Option<String>,
    pub role: user::UserRole,
    pub followers_count: i32,
    pub following_count: i32,
    pub is_blocked: bool,
    pub created_at: String,
}

impl From<user::Model> for UserResponse {
    fn from(u: user::Model) -> Self {
        Self {
            id: u.id,
            username: u.username,
            email: u.email,
            first_name: u.first_name,
            last_name: u.last_name,
            bio: u.bio,
            profile_photo: u.profile_photo,
            date_of_birth: u.date_of_birth.map(|d| d.to_string()),
            phone_number: u.phone_number,
            role: u.role,
            followers_count: u.followers_count,
            following_count: u.following_count,
            is_blocked: u.is_blocked,
            created_at: u.created_at.to_rfc3339(),
        }
    }
}

/// Get the caller's own profile.
async fn me(
    AuthIdentity(identity): AuthIdentity,
    State(state): State<AppState>,
) -> AppResult<ApiResponse<UserResponse>> {
    let user = state.user_service.get_user(identity.id).await?;
    Ok(ApiResponse::ok(user.into()))
}

/// Update the caller's profile.
async fn update_me(
    AuthIdentity(identity): AuthIdentity,
    State(state): State<AppState>,
    Json(input): Json<UpdateProfileInput>,
) -> AppResult<ApiResponse<UserResponse>> {
    let user = state
        .user_service
        .update_profile(identity.id, input)
        .await?;
    Ok(ApiResponse::ok(user.into()))
}

/// Change the caller's password.
async fn change_password(
    AuthIdentity(identity): AuthIdentity,
    State(state): State<AppState>,
    Json(input): Json<ChangePasswordInput>,
) -> AppResult<ApiResponse<()>> {
    state
        .user_service
        .change_password(identity.id, input)
        .await?;
    Ok(ApiResponse::ok(()))
}

/// Get a user's public profile.
async fn get_user(
    AuthIdentity(_identity): AuthIdentity,
    State(state): State<AppState>,
    Path(user_id): Path<i32>,
) -> AppResult<ApiResponse<UserResponse>> {
    let user = state.user_service.get_user(user_id).await?;
    Ok(ApiResponse::ok(user.into()))
}

/// Follow a user.
async fn follow(
    AuthIdentity(identity): AuthIdentity,
    State(state): State<AppState>,
    Path(user_id): Path<i32>,
) -> AppResult<ApiResponse<()>> {
    state.following_service.follow(identity.id, user_id).await?;
    Ok(ApiResponse::ok(()))
}

/// Unfollow a user.
async fn unfollow(
    AuthIdentity(identity): AuthIdentity,
    State(state): State<AppState>,
    Path(user_id): Path<i32>,
) -> AppResult<axum::http::StatusCode> {
    state
        .following_service
        .unfollow(identity.id, user_id)
        .await?;
    Ok(crate::response::no_content())
}

/// List a user's followers.
async fn followers(
    AuthIdentity(_identity): AuthIdentity,
    State(state): State<AppState>,
    Path(user_id): Path<i32>,
) -> AppResult<ApiResponse<Vec<UserResponse>>> {
    let users = state.following_service.get_followers(user_id).await?;
    Ok(ApiResponse::ok(users.into_iter().map(Into::into).collect()))
}

/// List who a user is following.
async fn following(
    AuthIdentity(_identity): AuthIdentity,
    State(state): State<AppState>,
    Path(user_id): Path<i32>,
) -> AppResult<ApiResponse<Vec<UserResponse>>> {
    let users = state.following_service.get_following(user_id).await?;
    Ok(ApiResponse::ok(users.into_iter().map(Into::into).collect()))
}

/// List a user's public wishlist.
async fn public_wishlist(
    AuthIdentity(_identity): AuthIdentity,
    State(state): State<AppState>,
    Path(user_id): Path<i32>,
) -> AppResult<ApiResponse<Vec<WishlistResponse>>> {
    let entries = state.wishlist_service.list_public(user_id).await?;
    Ok(ApiResponse::ok(
        entries.into_iter().map(Into::into).collect(),
    ))
}

/// Create the users router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/me", get(me).put(update_me))
        .route("/me/password", put(change_password))
        .route("/{id}", get(get_user))
        .route("/{id}/follow", post(follow).delete(unfollow))
        .route("/{id}/followers", get(followers))
        .route("/{id}/following", get(following))
        .route("/{id}/wishlist/public", get(public_wishlist))
}
