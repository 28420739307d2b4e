//! Forked recipe entity (point-in-time copy of a recipe).
//!
//! A fork copies the source recipe's editable fields at fork time and then
//! lives its own life: edits to the fork never propagate back.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::recipe::RecipeTag;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "forked_recipe")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    /// The forking account
    pub user_id: i32,

    /// The source recipe
    pub recipe_id: i32,

    pub name: String,

    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,

    pub tag: RecipeTag,

    #[sea_orm(default_value = 1)]
    pub people_count: i32,

    pub created_at: DateTimeWithTimeZone,

    #[sea_orm(nullable)]
    pub updated_at: Option<DateTimeWithTimeZone>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id"
    )]
    Owner,

    #[sea_orm(
        belongs_to = "super::recipe::Entity",
        from = "Column::RecipeId",
        to = "super::recipe::Column::Id",
        on_delete = "Cascade"
    )]
    SourceRecipe,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Owner.def()
    }
}

impl Related<super::recipe::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SourceRecipe.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
