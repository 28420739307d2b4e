//! Wishlist service.

use chrono::Utc;
use forkful_common::{AppError, AppResult};
use forkful_db::{
    entities::wishlist::{self, WishlistVisibility},
    repositories::{RecipeRepository, UserRepository, WishlistRepository},
};
use sea_orm::Set;
use serde::Deserialize;

/// Input for adding a wishlist entry.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddWishlistInput {
    pub recipe_id: i32,
    /// Defaults to private when omitted.
    pub visibility: Option<WishlistVisibility>,
}

/// Wishlist service for business logic.
#[derive(Clone)]
pub struct WishlistService {
    wishlist_repo: WishlistRepository,
    recipe_repo: RecipeRepository,
    user_repo: UserRepository,
}

impl WishlistService {
    /// Create a new wishlist service.
    #[must_use]
    pub const fn new(
        wishlist_repo: WishlistRepository,
        recipe_repo: RecipeRepository,
        user_repo: UserRepository,
    ) -> Self {
        Self {
            wishlist_repo,
            recipe_repo,
            user_repo,
        }
    }

    /// Add a visible recipe to the caller's wishlist.
    pub async fn add(&self, user_id: i32, input: AddWishlistInput) -> AppResult<wishlist::Model> {
        self.recipe_repo.get_visible_by_id(input.recipe_id).await?;

        if self
            .wishlist_repo
            .find_by_pair(user_id, input.recipe_id)
            .await?
            .is_some()
        {
            return Err(AppError::Conflict("Recipe already wishlisted".to_string()));
        }

        self.wishlist_repo
            .create(wishlist::ActiveModel {
                user_id: Set(user_id),
                recipe_id: Set(input.recipe_id),
                visibility: Set(input.visibility.unwrap_or(WishlistVisibility::Private)),
                created_at: Set(Utc::now().into()),
                ..Default::default()
            })
            .await
    }

    /// List the caller's own wishlist, both visibilities.
    pub async fn list_own(&self, user_id: i32) -> AppResult<Vec<wishlist::Model>> {
        self.wishlist_repo.find_by_user(user_id).await
    }

    /// List another user's public wishlist entries.
    pub async fn list_public(&self, user_id: i32) -> AppResult<Vec<wishlist::Model>> {
        self.user_repo.get_by_id(user_id).await?;
        self.wishlist_repo.find_public_by_user(user_id).await
    }

    /// Change an entry's visibility.
    pub async fn set_visibility(
        &self,
        user_id: i32,
        recipe_id: i32,
        visibility: WishlistVisibility,
    ) -> AppResult<wishlist::Model> {
        let existing = self
            .wishlist_repo
            .find_by_pair(user_id, recipe_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Wishlist entry not found".to_string()))?;

        let mut model: wishlist::ActiveModel = existing.into();
        model.visibility = Set(visibility);
        model.updated_at = Set(Some(Utc::now().into()));

        self.wishlist_repo.update(model).await
    }

    /// Remove an entry from the caller's wishlist.
    pub async fn remove(&self, user_id: i32, recipe_id: i32) -> AppResult<()> {
        let existing = self
            .wishlist_repo
            .find_by_pair(user_id, recipe_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Wishlist entry not found".to_string()))?;

        self.wishlist_repo.delete(existing).await
    }
}
