//! Fork service: personal editable copies of shared recipes.

use std::sync::Arc;

use chrono::Utc;
use forkful_common::{AppError, AppResult};
use forkful_db::{
    entities::{forked_recipe, recipe::RecipeTag},
    repositories::{ForkedRecipeRepository, RecipeRepository},
};
use sea_orm::{DatabaseConnection, Set, TransactionTrait};
use serde::Deserialize;
use validator::Validate;

/// Input for updating a fork. Absent fields are left untouched.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateForkInput {
    #[validate(length(min = 1, max = 128))]
    pub name: Option<String>,
    #[validate(length(max = 4096))]
    pub description: Option<String>,
    pub tag: Option<RecipeTag>,
    #[validate(range(min = 1, max = 100))]
    pub people_count: Option<i32>,
}

/// Fork service for business logic.
///
/// Fork creation and deletion pair the row change with the source recipe's
/// `forked_count` update inside a single transaction.
#[derive(Clone)]
pub struct ForkService {
    db: Arc<DatabaseConnection>,
    fork_repo: ForkedRecipeRepository,
    recipe_repo: RecipeRepository,
}

impl ForkService {
    /// Create a new fork service.
    #[must_use]
    pub const fn new(
        db: Arc<DatabaseConnection>,
        fork_repo: ForkedRecipeRepository,
        recipe_repo: RecipeRepository,
    ) -> Self {
        Self {
            db,
            fork_repo,
            recipe_repo,
        }
    }

    /// Fork a visible recipe into the caller's collection.
    ///
    /// The fork starts as a field-by-field copy of the source and evolves
    /// independently afterwards.
    pub async fn fork(&self, user_id: i32, recipe_id: i32) -> AppResult<forked_recipe::Model> {
        let source = self.recipe_repo.get_visible_by_id(recipe_id).await?;

        let model = forked_recipe::ActiveModel {
            user_id: Set(user_id),
            recipe_id: Set(source.id),
            name: Set(source.name),
            description: Set(source.description),
            tag: Set(source.tag),
            people_count: Set(source.people_count),
            created_at: Set(Utc::now().into()),
            ..Default::default()
        };

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        let fork = self.fork_repo.create(&txn, model).await?;
        self.recipe_repo
            .increment_forked_count(&txn, recipe_id)
            .await?;

        txn.commit()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        tracing::info!(fork_id = fork.id, user_id, recipe_id, "Recipe forked");
        Ok(fork)
    }

    /// Get a fork owned by the caller.
    pub async fn get(&self, fork_id: i32, owner_id: i32) -> AppResult<forked_recipe::Model> {
        self.fork_repo
            .find_owned(fork_id, owner_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Fork not found: {fork_id}")))
    }

    /// List the caller's forks, newest first.
    pub async fn list(&self, owner_id: i32) -> AppResult<Vec<forked_recipe::Model>> {
        self.fork_repo.find_by_owner(owner_id).await
    }

    /// Update a fork owned by the caller.
    pub async fn update(
        &self,
        fork_id: i32,
        owner_id: i32,
        input: UpdateForkInput,
    ) -> AppResult<forked_recipe::Model> {
        input.validate()?;

        let existing = self.get(fork_id, owner_id).await?;

        let mut model: forked_recipe::ActiveModel = existing.into();
        if let Some(name) = input.name {
            model.name = Set(name);
        }
        if let Some(description) = input.description {
            model.description = Set(Some(description));
        }
        if let Some(tag) = input.tag {
            model.tag = Set(tag);
        }
        if let Some(people_count) = input.people_count {
            model.people_count = Set(people_count);
        }
        model.updated_at = Set(Some(Utc::now().into()));

        self.fork_repo.update(model).await
    }

    /// Delete a fork owned by the caller, decrementing the source recipe's
    /// `forked_count` in the same transaction.
    pub async fn delete(&self, fork_id: i32, owner_id: i32) -> AppResult<()> {
        let existing = self.get(fork_id, owner_id).await?;
        let recipe_id = existing.recipe_id;

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        self.fork_repo.delete(&txn, existing).await?;
        self.recipe_repo
            .decrement_forked_count(&txn, recipe_id)
            .await?;

        txn.commit()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        tracing::info!(fork_id, owner_id, recipe_id, "Fork deleted");
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use forkful_db::entities::recipe;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};

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

    fn service_with(db: Arc<DatabaseConnection>) -> ForkService {
        ForkService::new(
            db.clone(),
            ForkedRecipeRepository::new(db.clone()),
            RecipeRepository::new(db),
        )
    }

    #[tokio::test]
    async fn test_fork_missing_recipe_is_not_found() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<recipe::Model>::new()])
                .into_connection(),
        );
        let service = service_with(db);

        assert!(matches!(
            service.fork(1, 99).await,
            Err(AppError::RecipeNotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_get_not_owned_is_not_found() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<forked_recipe::Model>::new()])
                .into_connection(),
        );
        let service = service_with(db);

        assert!(matches!(
            service.get(1, 99).await,
            Err(AppError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_delete_decrements_source_count() {
        let fork = create_test_fork(1, 5, 10);

        // One DELETE for the fork row, one UPDATE for the source counter
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[fork]])
                .append_exec_results([
                    MockExecResult {
                        last_insert_id: 0,
                        rows_affected: 1,
                    },
                    MockExecResult {
                        last_insert_id: 0,
                        rows_affected: 1,
                    },
                ])
                .into_connection(),
        );
        let service = service_with(db);

        assert!(service.delete(1, 5).await.is_ok());
    }

    #[tokio::test]
    async fn test_list_forks() {
        let f1 = create_test_fork(1, 5, 10);
        let f2 = create_test_fork(2, 5, 11);

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[f1, f2]])
                .into_connection(),
        );
        let service = service_with(db);

        let forks = service.list(5).await.unwrap();
        assert_eq!(forks.len(), 2);
    }
}
