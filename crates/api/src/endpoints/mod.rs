//! API endpoints.

mod admin;
mod auth;
mod comments;
mod cooking_history;
mod forks;
mod ingredients;
mod recipes;
mod users;
mod wishlists;

use axum::Router;

use crate::middleware::AppState;

/// Create the API router.
pub fn router() -> Router<AppState> {
    Router::new()
        .merge(auth::router())
        .nest("/users", users::router())
        .nest("/recipes", recipes::router())
        .nest("/recipes", ingredients::recipe_router())
        .nest("/recipes", comments::recipe_router())
        .nest("/ingredients", ingredients::router())
        .nest("/comments", comments::router())
        .nest("/forked-recipes", forks::router())
        .nest("/cooking-history", cooking_history::router())
        .nest("/wishlists", wishlists::router())
        .nest("/admin", admin::router())
}
