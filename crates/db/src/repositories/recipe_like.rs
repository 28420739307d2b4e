//! Recipe like repository.

use std::sync::Arc;

use crate::entities::{RecipeLike, recipe_like};
use crate::map_db_err;
use forkful_common::{AppError, AppResult};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait,
    PaginatorTrait, QueryFilter,
};

/// Recipe like repository for database operations.
#[derive(Clone)]
pub struct RecipeLikeRepository {
    db: Arc<DatabaseConnection>,
}

impl RecipeLikeRepository {
    /// Create a new recipe like repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Check whether a user has liked a recipe.
    pub async fn has_liked(&self, user_id: i32, recipe_id: i32) -> AppResult<bool> {
        Ok(RecipeLike::find_by_id((user_id, recipe_id))
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?
            .is_some())
    }

    /// Create a like row.
    ///
    /// The composite primary key rejects a concurrent duplicate; the
    /// violation surfaces as [`AppError::Conflict`].
    pub async fn create<C: ConnectionTrait>(
        &self,
        conn: &C,
        model: recipe_like::ActiveModel,
    ) -> AppResult<recipe_like::Model> {
        model.insert(conn).await.map_err(map_db_err)
    }

    /// Delete a like row by pair. Returns whether a row existed.
    pub async fn delete_by_pair<C: ConnectionTrait>(
        &self,
        conn: &C,
        user_id: i32,
        recipe_id: i32,
    ) -> AppResult<bool> {
        let res = RecipeLike::delete_by_id((user_id, recipe_id))
            .exec(conn)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(res.rows_affected > 0)
    }

    /// Count likes on a recipe.
    pub async fn count_for_recipe(&self, recipe_id: i32) -> AppResult<u64> {
        RecipeLike::find()
            .filter(recipe_like::Column::RecipeId.eq(recipe_id))
            .count(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Utc;
    use sea_orm::{DatabaseBackend, MockDatabase};

    fn create_test_like(user_id: i32, recipe_id: i32) -> recipe_like::Model {
        recipe_like::Model {
            user_id,
            recipe_id,
            created_at: Utc::now().into(),
        }
    }

    #[tokio::test]
    async fn test_has_liked_true() {
        let like = create_test_like(1, 10);

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[like]])
                .into_connection(),
        );

        let repo = RecipeLikeRepository::new(db);
        assert!(repo.has_liked(1, 10).await.unwrap());
    }

    #[tokio::test]
    async fn test_has_liked_false() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<recipe_like::Model>::new()])
                .into_connection(),
        );

        let repo = RecipeLikeRepository::new(db);
        assert!(!repo.has_liked(1, 99).await.unwrap());
    }
}
