//! Forked recipe repository.

use std::sync::Arc;

use crate::entities::{ForkedRecipe, forked_recipe};
use crate::map_db_err;
use forkful_common::{AppError, AppResult};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, ModelTrait,
    QueryFilter, QueryOrder,
};

/// Forked recipe repository for database operations.
#[derive(Clone)]
pub struct ForkedRecipeRepository {
    db: Arc<DatabaseConnection>,
}

impl ForkedRecipeRepository {
    /// Create a new forked recipe repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find a fork owned by the given user (absent and not-owned conflate).
    pub async fn find_owned(
        &self,
        id: i32,
        owner_id: i32,
    ) -> AppResult<Option<forked_recipe::Model>> {
        ForkedRecipe::find_by_id(id)
            .filter(forked_recipe::Column::UserId.eq(owner_id))
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// List forks owned by a user, newest first.
    pub async fn find_by_owner(&self, owner_id: i32) -> AppResult<Vec<forked_recipe::Model>> {
        ForkedRecipe::find()
            .filter(forked_recipe::Column::UserId.eq(owner_id))
            .order_by_desc(forked_recipe::Column::CreatedAt)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Create a fork row. Paired with the source recipe's forked_count
    /// increment inside one transaction.
    pub async fn create<C: ConnectionTrait>(
        &self,
        conn: &C,
        model: forked_recipe::ActiveModel,
    ) -> AppResult<forked_recipe::Model> {
        model.insert(conn).await.map_err(map_db_err)
    }

    /// Update a fork.
    pub async fn update(
        &self,
        model: forked_recipe::ActiveModel,
    ) -> AppResult<forked_recipe::Model> {
        model.update(self.db.as_ref()).await.map_err(map_db_err)
    }

    /// Delete a fork row. Paired with the source recipe's forked_count
    /// decrement inside one transaction.
    pub async fn delete<C: ConnectionTrait>(
        &self,
        conn: &C,
        model: forked_recipe::Model,
    ) -> AppResult<()> {
        model
            .delete(conn)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::entities::recipe::RecipeTag;
    use chrono::Utc;
    use sea_orm::{DatabaseBackend, MockDatabase};

    fn create_test_fork(id: i32, user_id: i32, recipe_id: i32) -> forked_recipe::Model {
        forked_recipe::Model {
            id,
            user_id,
            recipe_id,
            name: "Dal".to_string(),
            description: None,
            tag: RecipeTag::Veg,
            people_count: 4,
            created_at: Utc::now().into(),
            updated_at: None,
        }
    }

    #[tokio::test]
    async fn test_find_owned_filters_by_owner() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<forked_recipe::Model>::new()])
                .into_connection(),
        );

        let repo = ForkedRecipeRepository::new(db);
        // Fork 1 exists but belongs to someone else; the query comes back empty
        let result = repo.find_owned(1, 99).await.unwrap();

        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_find_by_owner() {
        let f1 = create_test_fork(1, 5, 10);
        let f2 = create_test_fork(2, 5, 11);

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[f1, f2]])
                .into_connection(),
        );

        let repo = ForkedRecipeRepository::new(db);
        let result = repo.find_by_owner(5).await.unwrap();

        assert_eq!(result.len(), 2);
    }
}
