//! Recipe ingredient repository.

use std::sync::Arc;

use crate::entities::{RecipeIngredient, ingredient, recipe_ingredient};
use crate::map_db_err;
use forkful_common::{AppError, AppResult};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait, QueryFilter,
};

/// Recipe ingredient repository for database operations.
#[derive(Clone)]
pub struct RecipeIngredientRepository {
    db: Arc<DatabaseConnection>,
}

impl RecipeIngredientRepository {
    /// Create a new recipe ingredient repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// List a recipe's ingredient lines together with their catalog entries.
    pub async fn find_by_recipe_with_names(
        &self,
        recipe_id: i32,
    ) -> AppResult<Vec<(recipe_ingredient::Model, Option<ingredient::Model>)>> {
        RecipeIngredient::find()
            .filter(recipe_ingredient::Column::RecipeId.eq(recipe_id))
            .find_also_related(crate::entities::Ingredient)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find one ingredient line by (recipe, ingredient) pair.
    pub async fn find_by_pair(
        &self,
        recipe_id: i32,
        ingredient_id: i32,
    ) -> AppResult<Option<recipe_ingredient::Model>> {
        RecipeIngredient::find()
            .filter(recipe_ingredient::Column::RecipeId.eq(recipe_id))
            .filter(recipe_ingredient::Column::IngredientId.eq(ingredient_id))
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Attach an ingredient line to a recipe.
    pub async fn create(
        &self,
        model: recipe_ingredient::ActiveModel,
    ) -> AppResult<recipe_ingredient::Model> {
        model.insert(self.db.as_ref()).await.map_err(map_db_err)
    }

    /// Update an ingredient line.
    pub async fn update(
        &self,
        model: recipe_ingredient::ActiveModel,
    ) -> AppResult<recipe_ingredient::Model> {
        model.update(self.db.as_ref()).await.map_err(map_db_err)
    }

    /// Detach an ingredient line.
    pub async fn delete(&self, model: recipe_ingredient::Model) -> AppResult<()> {
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
    use crate::entities::recipe_ingredient::MeasureUnit;
    use chrono::Utc;
    use rust_decimal::Decimal;
    use sea_orm::{DatabaseBackend, MockDatabase};

    fn create_test_line(id: i32, recipe_id: i32, ingredient_id: i32) -> recipe_ingredient::Model {
        recipe_ingredient::Model {
            id,
            recipe_id,
            ingredient_id,
            quantity: Decimal::new(250, 2),
            unit: MeasureUnit::Gram,
            created_at: Utc::now().into(),
            updated_at: None,
        }
    }

    #[tokio::test]
    async fn test_find_by_pair_found() {
        let line = create_test_line(1, 10, 3);

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[line]])
                .into_connection(),
        );

        let repo = RecipeIngredientRepository::new(db);
        let result = repo.find_by_pair(10, 3).await.unwrap();

        assert!(result.is_some());
        assert_eq!(result.unwrap().unit, MeasureUnit::Gram);
    }

    #[tokio::test]
    async fn test_find_by_pair_not_found() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<recipe_ingredient::Model>::new()])
                .into_connection(),
        );

        let repo = RecipeIngredientRepository::new(db);
        let result = repo.find_by_pair(10, 99).await.unwrap();

        assert!(result.is_none());
    }
}
