//! Ingredient repository.

use std::sync::Arc;

use crate::entities::{Ingredient, ingredient};
use crate::map_db_err;
use forkful_common::{AppError, AppResult};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    sea_query::{Expr, extension::postgres::PgExpr},
};

/// Ingredient repository for database operations.
#[derive(Clone)]
pub struct IngredientRepository {
    db: Arc<DatabaseConnection>,
}

impl IngredientRepository {
    /// Create a new ingredient repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find an ingredient by exact (capitalized) name.
    pub async fn find_by_name(&self, name: &str) -> AppResult<Option<ingredient::Model>> {
        Ingredient::find()
            .filter(ingredient::Column::Name.eq(name))
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Case-insensitive substring search over the catalog.
    pub async fn search_by_name(&self, name: &str) -> AppResult<Vec<ingredient::Model>> {
        Ingredient::find()
            .filter(
                Expr::col(ingredient::Column::Name)
                    .ilike(format!("%{}%", name.replace(['%', '_'], ""))),
            )
            .order_by_asc(ingredient::Column::Name)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Create a new catalog entry.
    pub async fn create(&self, model: ingredient::ActiveModel) -> AppResult<ingredient::Model> {
        model.insert(self.db.as_ref()).await.map_err(map_db_err)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Utc;
    use sea_orm::{DatabaseBackend, MockDatabase};

    fn create_test_ingredient(id: i32, name: &str) -> ingredient::Model {
        ingredient::Model {
            id,
            name: name.to_string(),
            created_at: Utc::now().into(),
            updated_at: None,
        }
    }

    #[tokio::test]
    async fn test_find_by_name() {
        let ing = create_test_ingredient(1, "Flour");

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[ing]])
                .into_connection(),
        );

        let repo = IngredientRepository::new(db);
        let result = repo.find_by_name("Flour").await.unwrap();

        assert!(result.is_some());
    }

    #[tokio::test]
    async fn test_search_by_name() {
        let i1 = create_test_ingredient(1, "Red Chili");
        let i2 = create_test_ingredient(2, "Chili Powder");

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[i1, i2]])
                .into_connection(),
        );

        let repo = IngredientRepository::new(db);
        let result = repo.search_by_name("chili").await.unwrap();

        assert_eq!(result.len(), 2);
    }
}
