//! Recipe ingredient entity (join of recipe and ingredient with quantity).

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Measurement units for ingredient quantities.
#[derive(Debug, Copy, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "lowercase")]
pub enum MeasureUnit {
    #[sea_orm(string_value = "gram")]
    Gram,
    #[sea_orm(string_value = "kilogram")]
    Kilogram,
    #[sea_orm(string_value = "liter")]
    Liter,
    #[sea_orm(string_value = "mililiter")]
    Mililiter,
    #[sea_orm(string_value = "teaspoon")]
    Teaspoon,
    #[sea_orm(string_value = "tablespoon")]
    Tablespoon,
    #[sea_orm(string_value = "cup")]
    Cup,
    #[sea_orm(string_value = "piece")]
    Piece,
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "recipe_ingredient")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub recipe_id: i32,

    pub ingredient_id: i32,

    /// Fixed-point quantity, DECIMAL(10,2)
    #[sea_orm(column_type = "Decimal(Some((10, 2)))")]
    pub quantity: Decimal,

    pub unit: MeasureUnit,

    pub created_at: DateTimeWithTimeZone,

    #[sea_orm(nullable)]
    pub updated_at: Option<DateTimeWithTimeZone>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    // Plain FKs: deleting a recipe or ingredient is not propagated here
    #[sea_orm(
        belongs_to = "super::recipe::Entity",
        from = "Column::RecipeId",
        to = "super::recipe::Column::Id"
    )]
    Recipe,

    #[sea_orm(
        belongs_to = "super::ingredient::Entity",
        from = "Column::IngredientId",
        to = "super::ingredient::Column::Id"
    )]
    Ingredient,
}

impl Related<super::recipe::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Recipe.def()
    }
}

impl Related<super::ingredient::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Ingredient.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
