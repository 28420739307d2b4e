//! Forkful server entry point.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::middleware;
use forkful_api::{middleware::AppState, router as api_router};
use forkful_common::Config;
use forkful_core::{
    AuthService, CommentService, CookingHistoryService, FollowingService, ForkService,
    IngredientService, LikeService, ModerationService, RecipeService, UserService, WishlistService,
};
use forkful_db::repositories::{
    CookingHistoryRepository, FollowRepository, ForkedRecipeRepository, IngredientRepository,
    RecipeCommentRepository, RecipeIngredientRepository, RecipeLikeRepository, RecipeRepository,
    UserRepository, WishlistRepository,
};
use tokio::signal;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Waits for a shutdown signal (SIGINT or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("Received SIGINT, initiating graceful shutdown...");
        },
        () = terminate => {
            info!("Received SIGTERM, initiating graceful shutdown...");
        },
    }
}

#[tokio::main]
#[allow(clippy::expect_used)]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // .env is optional; real deployments use the environment directly
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "forkful=debug,tower_http=debug".into()),
        )
        .init();

    info!("Starting forkful server...");

    let config = Config::load()?;

    let db = forkful_db::init(&config).await?;
    info!("Connected to database");

    info!("Running database migrations...");
    forkful_db::migrate(&db).await?;
    info!("Migrations completed");

    let db = Arc::new(db);
    let user_repo = UserRepository::new(Arc::clone(&db));
    let follow_repo = FollowRepository::new(Arc::clone(&db));
    let recipe_repo = RecipeRepository::new(Arc::clone(&db));
    let fork_repo = ForkedRecipeRepository::new(Arc::clone(&db));
    let ingredient_repo = IngredientRepository::new(Arc::clone(&db));
    let line_repo = RecipeIngredientRepository::new(Arc::clone(&db));
    let comment_repo = RecipeCommentRepository::new(Arc::clone(&db));
    let like_repo = RecipeLikeRepository::new(Arc::clone(&db));
    let history_repo = CookingHistoryRepository::new(Arc::clone(&db));
    let wishlist_repo = WishlistRepository::new(Arc::clone(&db));

    let state = AppState {
        auth_service: AuthService::new(user_repo.clone(), config.auth.clone()),
        user_service: UserService::new(user_repo.clone()),
        following_service: FollowingService::new(
            Arc::clone(&db),
            follow_repo,
            user_repo.clone(),
        ),
        recipe_service: RecipeService::new(recipe_repo.clone()),
        like_service: LikeService::new(Arc::clone(&db), like_repo, recipe_repo.clone()),
        fork_service: ForkService::new(Arc::clone(&db), fork_repo, recipe_repo.clone()),
        ingredient_service: IngredientService::new(
            ingredient_repo,
            line_repo,
            recipe_repo.clone(),
        ),
        comment_service: CommentService::new(comment_repo.clone(), recipe_repo.clone()),
        cooking_history_service: CookingHistoryService::new(history_repo, recipe_repo.clone()),
        wishlist_service: WishlistService::new(wishlist_repo, recipe_repo.clone(), user_repo.clone()),
        moderation_service: ModerationService::new(user_repo, recipe_repo, comment_repo),
    };

    let app = api_router()
        .layer(middleware::from_fn_with_state(
            state.clone(),
            forkful_api::middleware::auth_middleware,
        ))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}
