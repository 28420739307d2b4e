//! Recipe repository.

use std::sync::Arc;

use crate::entities::{Recipe, recipe};
use crate::map_db_err;
use forkful_common::{AppError, AppResult};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, sea_query::Expr,
};

/// Recipe repository for database operations.
#[derive(Clone)]
pub struct RecipeRepository {
    db: Arc<DatabaseConnection>,
}

impl RecipeRepository {
    /// Create a new recipe repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find a recipe by ID, including hidden and soft-deleted rows.
    pub async fn find_by_id(&self, id: i32) -> AppResult<Option<recipe::Model>> {
        Recipe::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find a recipe by ID, returning an error if not found (admin view).
    pub async fn get_by_id(&self, id: i32) -> AppResult<recipe::Model> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::RecipeNotFound(id.to_string()))
    }

    /// Find a visible recipe by ID (not soft-deleted, not hidden).
    pub async fn find_visible_by_id(&self, id: i32) -> AppResult<Option<recipe::Model>> {
        Recipe::find_by_id(id)
            .filter(recipe::Column::IsDeleted.eq(false))
            .filter(recipe::Column::IsHidden.eq(false))
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find a visible recipe by ID, returning an error if absent.
    pub async fn get_visible_by_id(&self, id: i32) -> AppResult<recipe::Model> {
        self.find_visible_by_id(id)
            .await?
            .ok_or_else(|| AppError::RecipeNotFound(id.to_string()))
    }

    /// Find a recipe owned by the given user (absent and not-owned conflate).
    pub async fn find_owned(&self, id: i32, owner_id: i32) -> AppResult<Option<recipe::Model>> {
        Recipe::find_by_id(id)
            .filter(recipe::Column::UserId.eq(owner_id))
            .filter(recipe::Column::IsDeleted.eq(false))
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// List all visible recipes, newest first.
    pub async fn find_visible(&self) -> AppResult<Vec<recipe::Model>> {
        Self::visible_query()
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// List visible recipes owned by a user.
    pub async fn find_by_owner(&self, owner_id: i32) -> AppResult<Vec<recipe::Model>> {
        Self::visible_query()
            .filter(recipe::Column::UserId.eq(owner_id))
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// List visible recipes with the given dietary tag.
    pub async fn find_by_tag(&self, tag: recipe::RecipeTag) -> AppResult<Vec<recipe::Model>> {
        Self::visible_query()
            .filter(recipe::Column::Tag.eq(tag))
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// List visible recipes serving exactly the given number of people.
    pub async fn find_by_people_count(&self, people_count: i32) -> AppResult<Vec<recipe::Model>> {
        Self::visible_query()
            .filter(recipe::Column::PeopleCount.eq(people_count))
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Substring search over name and description.
    pub async fn search(&self, query: &str) -> AppResult<Vec<recipe::Model>> {
        Self::visible_query()
            .filter(
                recipe::Column::Name
                    .contains(query)
                    .or(recipe::Column::Description.contains(query)),
            )
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// List every recipe including hidden and soft-deleted ones (admin view).
    pub async fn find_all(&self) -> AppResult<Vec<recipe::Model>> {
        Recipe::find()
            .order_by_desc(recipe::Column::CreatedAt)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Create a new recipe.
    pub async fn create(&self, model: recipe::ActiveModel) -> AppResult<recipe::Model> {
        model.insert(self.db.as_ref()).await.map_err(map_db_err)
    }

    /// Update a recipe.
    pub async fn update(&self, model: recipe::ActiveModel) -> AppResult<recipe::Model> {
        model.update(self.db.as_ref()).await.map_err(map_db_err)
    }

    /// Increment likes count atomically (single UPDATE query, no fetch).
    pub async fn increment_likes_count<C: ConnectionTrait>(
        &self,
        conn: &C,
        recipe_id: i32,
    ) -> AppResult<()> {
        Recipe::update_many()
            .col_expr(
                recipe::Column::LikesCount,
                Expr::col(recipe::Column::LikesCount).add(1),
            )
            .filter(recipe::Column::Id.eq(recipe_id))
            .exec(conn)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    /// Decrement likes count atomically, floored at zero.
    pub async fn decrement_likes_count<C: ConnectionTrait>(
        &self,
        conn: &C,
        recipe_id: i32,
    ) -> AppResult<()> {
        Recipe::update_many()
            .col_expr(
                recipe::Column::LikesCount,
                Expr::cust("GREATEST(likes_count - 1, 0)"),
            )
            .filter(recipe::Column::Id.eq(recipe_id))
            .exec(conn)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    /// Increment forked count atomically (single UPDATE query, no fetch).
    pub async fn increment_forked_count<C: ConnectionTrait>(
        &self,
        conn: &C,
        recipe_id: i32,
    ) -> AppResult<()> {
        Recipe::update_many()
            .col_expr(
                recipe::Column::ForkedCount,
                Expr::col(recipe::Column::ForkedCount).add(1),
            )
            .filter(recipe::Column::Id.eq(recipe_id))
            .exec(conn)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    /// Decrement forked count atomically, floored at zero.
    pub async fn decrement_forked_count<C: ConnectionTrait>(
        &self,
        conn: &C,
        recipe_id: i32,
    ) -> AppResult<()> {
        Recipe::update_many()
            .col_expr(
                recipe::Column::ForkedCount,
                Expr::cust("GREATEST(forked_count - 1, 0)"),
            )
            .filter(recipe::Column::Id.eq(recipe_id))
            .exec(conn)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    fn visible_query() -> sea_orm::Select<Recipe> {
        Recipe::find()
            .filter(recipe::Column::IsDeleted.eq(false))
            .filter(recipe::Column::IsHidden.eq(false))
            .order_by_desc(recipe::Column::CreatedAt)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::entities::recipe::RecipeTag;
    use chrono::Utc;
    use sea_orm::{DatabaseBackend, MockDatabase};

    fn create_test_recipe(id: i32, user_id: i32, name: &str) -> recipe::Model {
        recipe::Model {
            id,
            user_id,
            name: name.to_string(),
            description: Some("test".to_string()),
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

    #[tokio::test]
    async fn test_find_visible_by_id() {
        let recipe = create_test_recipe(1, 1, "Dal");

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[recipe]])
                .into_connection(),
        );

        let repo = RecipeRepository::new(db);
        let result = repo.find_visible_by_id(1).await.unwrap();

        assert!(result.is_some());
        assert_eq!(result.unwrap().name, "Dal");
    }

    #[tokio::test]
    async fn test_get_visible_by_id_not_found() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<recipe::Model>::new()])
                .into_connection(),
        );

        let repo = RecipeRepository::new(db);
        let result = repo.get_visible_by_id(42).await;

        assert!(matches!(result, Err(AppError::RecipeNotFound(_))));
    }

    #[tokio::test]
    async fn test_search_returns_matches() {
        let r1 = create_test_recipe(1, 1, "Paneer Tikka");
        let r2 = create_test_recipe(2, 2, "Paneer Butter Masala");

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[r1, r2]])
                .into_connection(),
        );

        let repo = RecipeRepository::new(db);
        let result = repo.search("Paneer").await.unwrap();

        assert_eq!(result.len(), 2);
    }
}
