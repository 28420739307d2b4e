//! Like service.

use std::sync::Arc;

use chrono::Utc;
use forkful_common::{AppError, AppResult};
use forkful_db::{
    entities::recipe_like,
    repositories::{RecipeLikeRepository, RecipeRepository},
};
use sea_orm::{DatabaseConnection, Set, TransactionTrait};

/// Like service for business logic.
///
/// Like and unlike pair the row change with the recipe's `likes_count`
/// update inside a single transaction.
#[derive(Clone)]
pub struct LikeService {
    db: Arc<DatabaseConnection>,
    like_repo: RecipeLikeRepository,
    recipe_repo: RecipeRepository,
}

impl LikeService {
    /// Create a new like service.
    #[must_use]
    pub const fn new(
        db: Arc<DatabaseConnection>,
        like_repo: RecipeLikeRepository,
        recipe_repo: RecipeRepository,
    ) -> Self {
        Self {
            db,
            like_repo,
            recipe_repo,
        }
    }

    /// Like a visible recipe.
    pub async fn like(&self, user_id: i32, recipe_id: i32) -> AppResult<()> {
        self.recipe_repo.get_visible_by_id(recipe_id).await?;

        if self.like_repo.has_liked(user_id, recipe_id).await? {
            return Err(AppError::Conflict("Already liked".to_string()));
        }

        let model = recipe_like::ActiveModel {
            user_id: Set(user_id),
            recipe_id: Set(recipe_id),
            created_at: Set(Utc::now().into()),
        };

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        self.like_repo.create(&txn, model).await?;
        self.recipe_repo.increment_likes_count(&txn, recipe_id).await?;

        txn.commit()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        tracing::debug!(user_id, recipe_id, "Recipe liked");
        Ok(())
    }

    /// Remove a like.
    pub async fn unlike(&self, user_id: i32, recipe_id: i32) -> AppResult<()> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        // Counter only moves when a row actually existed
        if !self
            .like_repo
            .delete_by_pair(&txn, user_id, recipe_id)
            .await?
        {
            return Err(AppError::NotFound("Not liked".to_string()));
        }

        self.recipe_repo.decrement_likes_count(&txn, recipe_id).await?;

        txn.commit()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        tracing::debug!(user_id, recipe_id, "Like removed");
        Ok(())
    }

    /// Check whether a user has liked a recipe.
    pub async fn has_liked(&self, user_id: i32, recipe_id: i32) -> AppResult<bool> {
        self.like_repo.has_liked(user_id, recipe_id).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use forkful_db::entities::recipe::{self, RecipeTag};
    use sea_orm::{DatabaseBackend, MockDatabase};

    fn create_test_recipe(id: i32) -> recipe::Model {
        recipe::Model {
            id,
            user_id: 1,
            name: "Dal".to_string(),
            description: None,
            tag: RecipeTag::Veg,
            people_count: 4,
            likes_count: 0,
            forked_count: 0,
            is_deleted: false,
            is_hidden: false,
            created_at: Utc::now().into(),
            updated_at: None,
            deleted_at: None,
        }
    }

    fn service_with(db: Arc<DatabaseConnection>) -> LikeService {
        LikeService::new(
            db.clone(),
            RecipeLikeRepository::new(db.clone()),
            RecipeRepository::new(db),
        )
    }

    #[tokio::test]
    async fn test_like_missing_recipe_is_not_found() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<recipe::Model>::new()])
                .into_connection(),
        );
        let service = service_with(db);

        assert!(matches!(
            service.like(1, 99).await,
            Err(AppError::RecipeNotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_like_twice_is_conflict() {
        let recipe = create_test_recipe(10);
        let existing = recipe_like::Model {
            user_id: 1,
            recipe_id: 10,
            created_at: Utc::now().into(),
        };

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[recipe]])
                .append_query_results([[existing]])
                .into_connection(),
        );
        let service = service_with(db);

        assert!(matches!(
            service.like(1, 10).await,
            Err(AppError::Conflict(_))
        ));
    }

    #[tokio::test]
    async fn test_has_liked_false() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<recipe_like::Model>::new()])
                .into_connection(),
        );
        let service = service_with(db);

        assert!(!service.has_liked(1, 10).await.unwrap());
    }
}
