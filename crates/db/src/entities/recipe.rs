//! Recipe entity.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Dietary tag for a recipe.
#[derive(Debug, Copy, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "lowercase")]
pub enum RecipeTag {
    #[sea_orm(string_value = "veg")]
    Veg,
    #[sea_orm(string_value = "nonveg")]
    NonVeg,
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "recipe")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    /// The owning account
    pub user_id: i32,

    pub name: String,

    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,

    pub tag: RecipeTag,

    /// How many people the recipe serves
    #[sea_orm(default_value = 1)]
    pub people_count: i32,

    /// Likes count (denormalized, tracks recipe_like rows)
    #[sea_orm(default_value = 0)]
    pub likes_count: i32,

    /// Forked count (denormalized, tracks forked_recipe rows)
    #[sea_orm(default_value = 0)]
    pub forked_count: i32,

    /// Soft-delete flag; the row is kept for referential history
    #[sea_orm(default_value = false)]
    pub is_deleted: bool,

    /// Hidden by a moderator
    #[sea_orm(default_value = false)]
    pub is_hidden: bool,

    pub created_at: DateTimeWithTimeZone,

    #[sea_orm(nullable)]
    pub updated_at: Option<DateTimeWithTimeZone>,

    #[sea_orm(nullable)]
    pub deleted_at: Option<DateTimeWithTimeZone>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id"
    )]
    Owner,

    #[sea_orm(has_many = "super::recipe_comment::Entity")]
    Comments,

    #[sea_orm(has_many = "super::forked_recipe::Entity")]
    Forks,

    #[sea_orm(has_many = "super::recipe_ingredient::Entity")]
    Ingredients,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Owner.def()
    }
}

impl Related<super::recipe_comment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Comments.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
