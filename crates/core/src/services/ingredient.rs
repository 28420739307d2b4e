//! Ingredient service: shared catalog and per-recipe ingredient lines.

use chrono::Utc;
use forkful_common::{AppError, AppResult};
use forkful_db::{
    entities::{
        ingredient,
        recipe_ingredient::{self, MeasureUnit},
    },
    repositories::{IngredientRepository, RecipeIngredientRepository, RecipeRepository},
};
use rust_decimal::Decimal;
use sea_orm::Set;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Input for attaching an ingredient to a recipe.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AttachIngredientInput {
    #[validate(length(min = 1, max = 64))]
    pub name: String,
    pub quantity: Decimal,
    pub unit: MeasureUnit,
}

/// Input for updating an ingredient line. Absent fields are left untouched.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateIngredientLineInput {
    pub quantity: Option<Decimal>,
    pub unit: Option<MeasureUnit>,
}

/// An ingredient line joined with its catalog entry.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IngredientLine {
    pub id: i32,
    pub ingredient_id: i32,
    pub name: String,
    pub quantity: Decimal,
    pub unit: MeasureUnit,
}

/// Normalize an ingredient name: trimmed, first letter of each word
/// uppercased, the rest lowercased. "red CHILI" and "Red chili" collapse
/// to the same catalog entry.
#[must_use]
pub fn normalize_name(name: &str) -> String {
    name.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            chars.next().map_or_else(String::new, |first| {
                first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
            })
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Ingredient service for business logic.
#[derive(Clone)]
pub struct IngredientService {
    ingredient_repo: IngredientRepository,
    line_repo: RecipeIngredientRepository,
    recipe_repo: RecipeRepository,
}

impl IngredientService {
    /// Create a new ingredient service.
    #[must_use]
    pub const fn new(
        ingredient_repo: IngredientRepository,
        line_repo: RecipeIngredientRepository,
        recipe_repo: RecipeRepository,
    ) -> Self {
        Self {
            ingredient_repo,
            line_repo,
            recipe_repo,
        }
    }

    /// Case-insensitive catalog search.
    pub async fn search(&self, query: &str) -> AppResult<Vec<ingredient::Model>> {
        let query = query.trim();
        if query.is_empty() {
            return Err(AppError::BadRequest(
                "Search query must not be empty".to_string(),
            ));
        }
        self.ingredient_repo.search_by_name(query).await
    }

    /// List a visible recipe's ingredient lines.
    pub async fn list_for_recipe(&self, recipe_id: i32) -> AppResult<Vec<IngredientLine>> {
        self.recipe_repo.get_visible_by_id(recipe_id).await?;

        let rows = self.line_repo.find_by_recipe_with_names(recipe_id).await?;
        rows.into_iter()
            .map(|(line, catalog)| {
                let catalog = catalog.ok_or_else(|| {
                    AppError::Database(format!(
                        "Ingredient line {} has no catalog entry",
                        line.id
                    ))
                })?;
                Ok(IngredientLine {
                    id: line.id,
                    ingredient_id: catalog.id,
                    name: catalog.name,
                    quantity: line.quantity,
                    unit: line.unit,
                })
            })
            .collect()
    }

    /// Attach an ingredient to a recipe owned by the caller.
    ///
    /// The catalog entry is created on first use; a line for the same
    /// (recipe, ingredient) pair is a conflict.
    pub async fn attach(
        &self,
        recipe_id: i32,
        owner_id: i32,
        input: AttachIngredientInput,
    ) -> AppResult<recipe_ingredient::Model> {
        input.validate()?;
        validate_quantity(input.quantity)?;

        self.recipe_repo
            .find_owned(recipe_id, owner_id)
            .await?
            .ok_or_else(|| AppError::RecipeNotFound(recipe_id.to_string()))?;

        let name = normalize_name(&input.name);
        if name.is_empty() {
            return Err(AppError::Validation(
                "Ingredient name must not be blank".to_string(),
            ));
        }

        let catalog = match self.ingredient_repo.find_by_name(&name).await? {
            Some(existing) => existing,
            None => {
                self.ingredient_repo
                    .create(ingredient::ActiveModel {
                        name: Set(name),
                        created_at: Set(Utc::now().into()),
                        ..Default::default()
                    })
                    .await?
            }
        };

        if self
            .line_repo
            .find_by_pair(recipe_id, catalog.id)
            .await?
            .is_some()
        {
            return Err(AppError::Conflict(
                "Ingredient already on recipe".to_string(),
            ));
        }

        self.line_repo
            .create(recipe_ingredient::ActiveModel {
                recipe_id: Set(recipe_id),
                ingredient_id: Set(catalog.id),
                quantity: Set(input.quantity),
                unit: Set(input.unit),
                created_at: Set(Utc::now().into()),
                ..Default::default()
            })
            .await
    }

    /// Update an ingredient line on a recipe owned by the caller.
    pub async fn update_line(
        &self,
        recipe_id: i32,
        ingredient_id: i32,
        owner_id: i32,
        input: UpdateIngredientLineInput,
    ) -> AppResult<recipe_ingredient::Model> {
        if let Some(quantity) = input.quantity {
            validate_quantity(quantity)?;
        }

        self.recipe_repo
            .find_owned(recipe_id, owner_id)
            .await?
            .ok_or_else(|| AppError::RecipeNotFound(recipe_id.to_string()))?;

        let existing = self
            .line_repo
            .find_by_pair(recipe_id, ingredient_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("Ingredient {ingredient_id} not on recipe"))
            })?;

        let mut model: recipe_ingredient::ActiveModel = existing.into();
        if let Some(quantity) = input.quantity {
            model.quantity = Set(quantity);
        }
        if let Some(unit) = input.unit {
            model.unit = Set(unit);
        }
        model.updated_at = Set(Some(Utc::now().into()));

        self.line_repo.update(model).await
    }

    /// Detach an ingredient from a recipe owned by the caller. The catalog
    /// entry stays for other recipes.
    pub async fn detach(&self, recipe_id: i32, ingredient_id: i32, owner_id: i32) -> AppResult<()> {
        self.recipe_repo
            .find_owned(recipe_id, owner_id)
            .await?
            .ok_or_else(|| AppError::RecipeNotFound(recipe_id.to_string()))?;

        let existing = self
            .line_repo
            .find_by_pair(recipe_id, ingredient_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("Ingredient {ingredient_id} not on recipe"))
            })?;

        self.line_repo.delete(existing).await
    }
}

fn validate_quantity(quantity: Decimal) -> AppResult<()> {
    if quantity <= Decimal::ZERO {
        return Err(AppError::Validation(
            "Quantity must be positive".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use forkful_db::entities::recipe::{self, RecipeTag};
    use sea_orm::{DatabaseBackend, MockDatabase};
    use std::sync::Arc;

    fn create_test_recipe(id: i32, user_id: i32) -> recipe::Model {
        recipe::Model {
            id,
            user_id,
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

    fn service_with(db: Arc<sea_orm::DatabaseConnection>) -> IngredientService {
        IngredientService::new(
            IngredientRepository::new(db.clone()),
            RecipeIngredientRepository::new(db.clone()),
            RecipeRepository::new(db),
        )
    }

    #[test]
    fn test_normalize_name() {
        assert_eq!(normalize_name("red CHILI"), "Red Chili");
        assert_eq!(normalize_name("  flour "), "Flour");
        assert_eq!(normalize_name("GARAM   masala"), "Garam Masala");
        assert_eq!(normalize_name(""), "");
    }

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(Decimal::new(250, 2)).is_ok());
        assert!(validate_quantity(Decimal::ZERO).is_err());
        assert!(validate_quantity(Decimal::new(-1, 0)).is_err());
    }

    #[tokio::test]
    async fn test_attach_to_unowned_recipe_is_not_found() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<recipe::Model>::new()])
                .into_connection(),
        );
        let service = service_with(db);

        let input = AttachIngredientInput {
            name: "Flour".to_string(),
            quantity: Decimal::new(500, 0),
            unit: MeasureUnit::Gram,
        };

        assert!(matches!(
            service.attach(1, 99, input).await,
            Err(AppError::RecipeNotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_attach_duplicate_pair_is_conflict() {
        let recipe = create_test_recipe(1, 5);
        let catalog = ingredient::Model {
            id: 3,
            name: "Flour".to_string(),
            created_at: Utc::now().into(),
            updated_at: None,
        };
        let existing_line = recipe_ingredient::Model {
            id: 7,
            recipe_id: 1,
            ingredient_id: 3,
            quantity: Decimal::new(500, 0),
            unit: MeasureUnit::Gram,
            created_at: Utc::now().into(),
            updated_at: None,
        };

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[recipe]])
                .append_query_results([[catalog]])
                .append_query_results([[existing_line]])
                .into_connection(),
        );
        let service = service_with(db);

        let input = AttachIngredientInput {
            name: "flour".to_string(),
            quantity: Decimal::new(250, 0),
            unit: MeasureUnit::Gram,
        };

        assert!(matches!(
            service.attach(1, 5, input).await,
            Err(AppError::Conflict(_))
        ));
    }
}
