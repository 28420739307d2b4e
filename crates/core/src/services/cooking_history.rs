//! Cooking history service.

use chrono::Utc;
use forkful_common::{AppError, AppResult};
use forkful_db::{
    entities::cooking_history,
    repositories::{CookingHistoryRepository, RecipeRepository},
};
use sea_orm::Set;

/// Cooking history service for business logic.
///
/// One entry per (user, recipe); cooking the same recipe again is a
/// conflict, not a second row.
#[derive(Clone)]
pub struct CookingHistoryService {
    history_repo: CookingHistoryRepository,
    recipe_repo: RecipeRepository,
}

impl CookingHistoryService {
    /// Create a new cooking history service.
    #[must_use]
    pub const fn new(history_repo: CookingHistoryRepository, recipe_repo: RecipeRepository) -> Self {
        Self {
            history_repo,
            recipe_repo,
        }
    }

    /// Record that the caller cooked a visible recipe.
    pub async fn record(&self, user_id: i32, recipe_id: i32) -> AppResult<cooking_history::Model> {
        self.recipe_repo.get_visible_by_id(recipe_id).await?;

        if self
            .history_repo
            .find_by_pair(user_id, recipe_id)
            .await?
            .is_some()
        {
            return Err(AppError::Conflict("Recipe already in history".to_string()));
        }

        self.history_repo
            .create(cooking_history::ActiveModel {
                user_id: Set(user_id),
                recipe_id: Set(recipe_id),
                created_at: Set(Utc::now().into()),
                ..Default::default()
            })
            .await
    }

    /// List the caller's history, newest first. Entries survive recipe
    /// soft deletion.
    pub async fn list(&self, user_id: i32) -> AppResult<Vec<cooking_history::Model>> {
        self.history_repo.find_by_user(user_id).await
    }

    /// Mark an entry as cooked again, bumping its `updated_at`.
    pub async fn touch(&self, user_id: i32, recipe_id: i32) -> AppResult<cooking_history::Model> {
        let existing = self
            .history_repo
            .find_by_pair(user_id, recipe_id)
            .await?
            .ok_or_else(|| AppError::NotFound("History entry not found".to_string()))?;

        let mut model: cooking_history::ActiveModel = existing.into();
        model.updated_at = Set(Some(Utc::now().into()));
        self.history_repo.update(model).await
    }

    /// Remove an entry from the caller's history.
    pub async fn remove(&self, user_id: i32, recipe_id: i32) -> AppResult<()> {
        let existing = self
            .history_repo
            .find_by_pair(user_id, recipe_id)
            .await?
            .ok_or_else(|| AppError::NotFound("History entry not found".to_string()))?;

        self.history_repo.delete(existing).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use forkful_db::entities::recipe::{self, RecipeTag};
    use sea_orm::{DatabaseBackend, MockDatabase};
    use std::sync::Arc;

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

    fn create_test_entry(id: i32, user_id: i32, recipe_id: i32) -> cooking_history::Model {
        cooking_history::Model {
            id,
            user_id,
            recipe_id,
            created_at: Utc::now().into(),
            updated_at: None,
        }
    }

    fn service_with(db: Arc<sea_orm::DatabaseConnection>) -> CookingHistoryService {
        CookingHistoryService::new(
            CookingHistoryRepository::new(db.clone()),
            RecipeRepository::new(db),
        )
    }

    #[tokio::test]
    async fn test_record_twice_is_conflict() {
        let recipe = create_test_recipe(10);
        let existing = create_test_entry(1, 5, 10);

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[recipe]])
                .append_query_results([[existing]])
                .into_connection(),
        );
        let service = service_with(db);

        assert!(matches!(
            service.record(5, 10).await,
            Err(AppError::Conflict(_))
        ));
    }

    #[tokio::test]
    async fn test_touch_missing_entry_is_not_found() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<cooking_history::Model>::new()])
                .into_connection(),
        );
        let service = service_with(db);

        assert!(matches!(
            service.touch(5, 99).await,
            Err(AppError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_remove_missing_entry_is_not_found() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<cooking_history::Model>::new()])
                .into_connection(),
        );
        let service = service_with(db);

        assert!(matches!(
            service.remove(5, 99).await,
            Err(AppError::NotFound(_))
        ));
    }
}
