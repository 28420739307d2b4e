//! API middleware.

#![allow(missing_docs)]

use axum::{body::Body, extract::State, http::Request, middleware::Next, response::Response};
use forkful_core::{
    AuthService, CommentService, CookingHistoryService, FollowingService, ForkService,
    IngredientService, LikeService, ModerationService, RecipeService, UserService, WishlistService,
};

/// Application state.
#[derive(Clone)]
pub struct AppState {
    pub auth_service: AuthService,
    pub user_service: UserService,
    pub following_service: FollowingService,
    pub recipe_service: RecipeService,
    pub like_service: LikeService,
    pub fork_service: ForkService,
    pub ingredient_service: IngredientService,
    pub comment_service: CommentService,
    pub cooking_history_service: CookingHistoryService,
    pub wishlist_service: WishlistService,
    pub moderation_service: ModerationService,
}

/// Authentication middleware.
///
/// A valid bearer token puts an [`forkful_core::Identity`] into request
/// extensions; anything else leaves the request anonymous and lets the
/// extractor decide whether that matters.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    if let Some(auth_header) = req.headers().get("Authorization")
        && let Ok(auth_str) = auth_header.to_str()
        && let Some(token) = auth_str.strip_prefix("Bearer ")
        && let Ok(identity) = state.auth_service.verify_token(token)
    {
        req.extensions_mut().insert(identity);
    }

    next.run(req).await
}
