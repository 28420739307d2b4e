//! Recipe service.

use chrono::Utc;
use forkful_common::{AppError, AppResult};
use forkful_db::{
    entities::recipe::{self, RecipeTag},
    repositories::RecipeRepository,
};
use sea_orm::Set;
use serde::Deserialize;
use validator::Validate;

/// Input for creating a recipe.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateRecipeInput {
    #[validate(length(min = 1, max = 128))]
    pub name: String,
    #[validate(length(max = 4096))]
    pub description: Option<String>,
    pub tag: RecipeTag,
    #[validate(range(min = 1, max = 100))]
    pub people_count: i32,
}

/// Input for updating a recipe. Absent fields are left untouched.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRecipeInput {
    #[validate(length(min = 1, max = 128))]
    pub name: Option<String>,
    #[validate(length(max = 4096))]
    pub description: Option<String>,
    pub tag: Option<RecipeTag>,
    #[validate(range(min = 1, max = 100))]
    pub people_count: Option<i32>,
}

/// Recipe service for business logic.
#[derive(Clone)]
pub struct RecipeService {
    recipe_repo: RecipeRepository,
}

impl RecipeService {
    /// Create a new recipe service.
    #[must_use]
    pub const fn new(recipe_repo: RecipeRepository) -> Self {
        Self { recipe_repo }
    }

    /// Create a recipe owned by the caller.
    pub async fn create(&self, owner_id: i32, input: CreateRecipeInput) -> AppResult<recipe::Model> {
        input.validate()?;

        let model = recipe::ActiveModel {
            user_id: Set(owner_id),
            name: Set(input.name),
            description: Set(input.description),
            tag: Set(input.tag),
            people_count: Set(input.people_count),
            likes_count: Set(0),
            forked_count: Set(0),
            is_deleted: Set(false),
            is_hidden: Set(false),
            created_at: Set(Utc::now().into()),
            ..Default::default()
        };

        let created = self.recipe_repo.create(model).await?;
        tracing::info!(recipe_id = created.id, owner_id, "Recipe created");
        Ok(created)
    }

    /// Get a visible recipe.
    pub async fn get(&self, recipe_id: i32) -> AppResult<recipe::Model> {
        self.recipe_repo.get_visible_by_id(recipe_id).await
    }

    /// List all visible recipes, newest first.
    pub async fn list(&self) -> AppResult<Vec<recipe::Model>> {
        self.recipe_repo.find_visible().await
    }

    /// List visible recipes by a user.
    pub async fn list_by_owner(&self, owner_id: i32) -> AppResult<Vec<recipe::Model>> {
        self.recipe_repo.find_by_owner(owner_id).await
    }

    /// List visible recipes with the given dietary tag.
    pub async fn list_by_tag(&self, tag: RecipeTag) -> AppResult<Vec<recipe::Model>> {
        self.recipe_repo.find_by_tag(tag).await
    }

    /// List visible recipes serving the given number of people.
    pub async fn list_by_people_count(&self, people_count: i32) -> AppResult<Vec<recipe::Model>> {
        if people_count < 1 {
            return Err(AppError::BadRequest(
                "People count must be positive".to_string(),
            ));
        }
        self.recipe_repo.find_by_people_count(people_count).await
    }

    /// Substring search over recipe names and descriptions.
    pub async fn search(&self, query: &str) -> AppResult<Vec<recipe::Model>> {
        let query = query.trim();
        if query.is_empty() {
            return Err(AppError::BadRequest(
                "Search query must not be empty".to_string(),
            ));
        }
        self.recipe_repo.search(query).await
    }

    /// Update a recipe owned by the caller.
    ///
    /// A recipe that exists but belongs to someone else surfaces as not
    /// found, same as a missing one.
    pub async fn update(
        &self,
        recipe_id: i32,
        owner_id: i32,
        input: UpdateRecipeInput,
    ) -> AppResult<recipe::Model> {
        input.validate()?;

        let existing = self
            .recipe_repo
            .find_owned(recipe_id, owner_id)
            .await?
            .ok_or_else(|| AppError::RecipeNotFound(recipe_id.to_string()))?;

        let mut model: recipe::ActiveModel = existing.into();
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

        self.recipe_repo.update(model).await
    }

    /// Soft delete a recipe owned by the caller.
    ///
    /// The row stays for forks, history and wishlists that reference it.
    pub async fn delete(&self, recipe_id: i32, owner_id: i32) -> AppResult<()> {
        let existing = self
            .recipe_repo
            .find_owned(recipe_id, owner_id)
            .await?
            .ok_or_else(|| AppError::RecipeNotFound(recipe_id.to_string()))?;

        let mut model: recipe::ActiveModel = existing.into();
        model.is_deleted = Set(true);
        model.deleted_at = Set(Some(Utc::now().into()));

        self.recipe_repo.update(model).await?;
        tracing::info!(recipe_id, owner_id, "Recipe soft deleted");
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, MockDatabase};
    use std::sync::Arc;

    fn create_test_recipe(id: i32, user_id: i32, name: &str) -> recipe::Model {
        recipe::Model {
            id,
            user_id,
            name: name.to_string(),
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

    #[tokio::test]
    async fn test_create_rejects_empty_name() {
        let db = Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());
        let service = RecipeService::new(RecipeRepository::new(db));

        let input = CreateRecipeInput {
            name: String::new(),
            description: None,
            tag: RecipeTag::Veg,
            people_count: 4,
        };

        assert!(matches!(
            service.create(1, input).await,
            Err(AppError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn test_create_rejects_zero_people() {
        let db = Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());
        let service = RecipeService::new(RecipeRepository::new(db));

        let input = CreateRecipeInput {
            name: "Dal".to_string(),
            description: None,
            tag: RecipeTag::Veg,
            people_count: 0,
        };

        assert!(matches!(
            service.create(1, input).await,
            Err(AppError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn test_update_not_owned_is_not_found() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<recipe::Model>::new()])
                .into_connection(),
        );
        let service = RecipeService::new(RecipeRepository::new(db));

        let result = service.update(5, 99, UpdateRecipeInput::default()).await;

        assert!(matches!(result, Err(AppError::RecipeNotFound(_))));
    }

    #[tokio::test]
    async fn test_search_rejects_blank_query() {
        let db = Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());
        let service = RecipeService::new(RecipeRepository::new(db));

        assert!(matches!(
            service.search("   ").await,
            Err(AppError::BadRequest(_))
        ));
    }

    #[tokio::test]
    async fn test_get_visible_recipe() {
        let recipe = create_test_recipe(1, 1, "Dal");

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[recipe]])
                .into_connection(),
        );
        let service = RecipeService::new(RecipeRepository::new(db));

        let result = service.get(1).await.unwrap();
        assert_eq!(result.name, "Dal");
    }
}
