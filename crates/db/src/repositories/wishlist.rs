//! Wishlist repository.

use std::sync::Arc;

use crate::entities::{Wishlist, wishlist};
use crate::map_db_err;
use forkful_common::{AppError, AppResult};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait, QueryFilter,
    QueryOrder,
};

/// Wishlist repository for database operations.
#[derive(Clone)]
pub struct WishlistRepository {
    db: Arc<DatabaseConnection>,
}

impl WishlistRepository {
    /// Create a new wishlist repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find the entry for a (user, recipe) pair.
    pub async fn find_by_pair(
        &self,
        user_id: i32,
        recipe_id: i32,
    ) -> AppResult<Option<wishlist::Model>> {
        Wishlist::find()
            .filter(wishlist::Column::UserId.eq(user_id))
            .filter(wishlist::Column::RecipeId.eq(recipe_id))
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// List a user's wishlist entries, newest first.
    pub async fn find_by_user(&self, user_id: i32) -> AppResult<Vec<wishlist::Model>> {
        Wishlist::find()
            .filter(wishlist::Column::UserId.eq(user_id))
            .order_by_desc(wishlist::Column::CreatedAt)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// List a user's public entries only, newest first.
    pub async fn find_public_by_user(&self, user_id: i32) -> AppResult<Vec<wishlist::Model>> {
        Wishlist::find()
            .filter(wishlist::Column::UserId.eq(user_id))
            .filter(wishlist::Column::Visibility.eq(wishlist::WishlistVisibility::Public))
            .order_by_desc(wishlist::Column::CreatedAt)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Add an entry. Duplicate pairs surface as [`AppError::Conflict`].
    pub async fn create(&self, model: wishlist::ActiveModel) -> AppResult<wishlist::Model> {
        model.insert(self.db.as_ref()).await.map_err(map_db_err)
    }

    /// Update an entry (visibility change).
    pub async fn update(&self, model: wishlist::ActiveModel) -> AppResult<wishlist::Model> {
        model.update(self.db.as_ref()).await.map_err(map_db_err)
    }

    /// Remove an entry.
    pub async fn delete(&self, model: wishlist::Model) -> AppResult<()> {
        model
            .delete(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }
}
