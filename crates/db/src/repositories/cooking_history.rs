//! Cooking history repository.

use std::sync::Arc;

use crate::entities::{CookingHistory, cooking_history};
use crate::map_db_err;
use forkful_common::{AppError, AppResult};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait, QueryFilter,
    QueryOrder,
};

/// Cooking history repository for database operations.
#[derive(Clone)]
pub struct CookingHistoryRepository {
    db: Arc<DatabaseConnection>,
}

impl CookingHistoryRepository {
    /// Create a new cooking history repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find the entry for a (user, recipe) pair.
    pub async fn find_by_pair(
        &self,
        user_id: i32,
        recipe_id: i32,
    ) -> AppResult<Option<cooking_history::Model>> {
        CookingHistory::find()
            .filter(cooking_history::Column::UserId.eq(user_id))
            .filter(cooking_history::Column::RecipeId.eq(recipe_id))
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// List a user's history, newest first.
    pub async fn find_by_user(&self, user_id: i32) -> AppResult<Vec<cooking_history::Model>> {
        CookingHistory::find()
            .filter(cooking_history::Column::UserId.eq(user_id))
            .order_by_desc(cooking_history::Column::CreatedAt)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Record a cook event. Duplicate pairs surface as [`AppError::Conflict`].
    pub async fn create(
        &self,
        model: cooking_history::ActiveModel,
    ) -> AppResult<cooking_history::Model> {
        model.insert(self.db.as_ref()).await.map_err(map_db_err)
    }

    /// Update an entry.
    pub async fn update(
        &self,
        model: cooking_history::ActiveModel,
    ) -> AppResult<cooking_history::Model> {
        model
            .update(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Remove an entry.
    pub async fn delete(&self, model: cooking_history::Model) -> AppResult<()> {
        model
            .delete(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Utc;
    use sea_orm::{DatabaseBackend, MockDatabase};

    fn create_test_entry(id: i32, user_id: i32, recipe_id: i32) -> cooking_history::Model {
        cooking_history::Model {
            id,
            user_id,
            recipe_id,
            created_at: Utc::now().into(),
            updated_at: None,
        }
    }

    #[tokio::test]
    async fn test_find_by_user() {
        let e1 = create_test_entry(1, 5, 10);
        let e2 = create_test_entry(2, 5, 11);

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[e1, e2]])
                .into_connection(),
        );

        let repo = CookingHistoryRepository::new(db);
        let result = repo.find_by_user(5).await.unwrap();

        assert_eq!(result.len(), 2);
        assert!(result.iter().all(|e| e.user_id == 5));
    }

    #[tokio::test]
    async fn test_find_by_pair_not_found() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<cooking_history::Model>::new()])
                .into_connection(),
        );

        let repo = CookingHistoryRepository::new(db);
        let result = repo.find_by_pair(5, 99).await.unwrap();

        assert!(result.is_none());
    }
}
