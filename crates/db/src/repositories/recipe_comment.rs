//! Recipe comment repository.

use std::sync::Arc;

use crate::entities::{RecipeComment, recipe_comment};
use crate::map_db_err;
use forkful_common::{AppError, AppResult};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait, QueryFilter,
    QueryOrder,
};

/// Recipe comment repository for database operations.
#[derive(Clone)]
pub struct RecipeCommentRepository {
    db: Arc<DatabaseConnection>,
}

impl RecipeCommentRepository {
    /// Create a new recipe comment repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find a comment by ID.
    pub async fn find_by_id(&self, id: i32) -> AppResult<Option<recipe_comment::Model>> {
        RecipeComment::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find a comment on a specific recipe.
    pub async fn find_on_recipe(
        &self,
        recipe_id: i32,
        comment_id: i32,
    ) -> AppResult<Option<recipe_comment::Model>> {
        RecipeComment::find_by_id(comment_id)
            .filter(recipe_comment::Column::RecipeId.eq(recipe_id))
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find a comment authored by the given user (absent and not-owned conflate).
    pub async fn find_owned(
        &self,
        comment_id: i32,
        author_id: i32,
    ) -> AppResult<Option<recipe_comment::Model>> {
        RecipeComment::find_by_id(comment_id)
            .filter(recipe_comment::Column::UserId.eq(author_id))
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// List every comment on a recipe, oldest first.
    pub async fn find_by_recipe(&self, recipe_id: i32) -> AppResult<Vec<recipe_comment::Model>> {
        RecipeComment::find()
            .filter(recipe_comment::Column::RecipeId.eq(recipe_id))
            .order_by_asc(recipe_comment::Column::CreatedAt)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// List direct replies to a comment, oldest first.
    pub async fn find_replies(&self, parent_id: i32) -> AppResult<Vec<recipe_comment::Model>> {
        RecipeComment::find()
            .filter(recipe_comment::Column::ParentCommentId.eq(parent_id))
            .order_by_asc(recipe_comment::Column::CreatedAt)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Create a comment.
    pub async fn create(
        &self,
        model: recipe_comment::ActiveModel,
    ) -> AppResult<recipe_comment::Model> {
        model.insert(self.db.as_ref()).await.map_err(map_db_err)
    }

    /// Update a comment.
    pub async fn update(
        &self,
        model: recipe_comment::ActiveModel,
    ) -> AppResult<recipe_comment::Model> {
        model.update(self.db.as_ref()).await.map_err(map_db_err)
    }

    /// Delete a comment; replies cascade at the storage layer.
    pub async fn delete(&self, model: recipe_comment::Model) -> AppResult<()> {
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

    fn create_test_comment(
        id: i32,
        recipe_id: i32,
        user_id: i32,
        parent: Option<i32>,
    ) -> recipe_comment::Model {
        recipe_comment::Model {
            id,
            recipe_id,
            user_id,
            body: "Looks great".to_string(),
            parent_comment_id: parent,
            created_at: Utc::now().into(),
            updated_at: None,
        }
    }

    #[tokio::test]
    async fn test_find_replies() {
        let r1 = create_test_comment(2, 1, 5, Some(1));
        let r2 = create_test_comment(3, 1, 6, Some(1));

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[r1, r2]])
                .into_connection(),
        );

        let repo = RecipeCommentRepository::new(db);
        let replies = repo.find_replies(1).await.unwrap();

        assert_eq!(replies.len(), 2);
        assert!(replies.iter().all(|r| r.parent_comment_id == Some(1)));
    }

    #[tokio::test]
    async fn test_find_owned_not_owned() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<recipe_comment::Model>::new()])
                .into_connection(),
        );

        let repo = RecipeCommentRepository::new(db);
        let result = repo.find_owned(1, 99).await.unwrap();

        assert!(result.is_none());
    }
}
