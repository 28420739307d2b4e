//! User entity.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Account roles.
#[derive(Debug, Copy, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    #[sea_orm(string_value = "admin")]
    Admin,
    #[sea_orm(string_value = "user")]
    User,
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "user")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    #[sea_orm(unique)]
    pub email: String,

    #[sea_orm(unique)]
    pub username: String,

    #[sea_orm(nullable)]
    pub first_name: Option<String>,

    #[sea_orm(nullable)]
    pub last_name: Option<String>,

    #[sea_orm(nullable)]
    pub bio: Option<String>,

    /// Profile photo reference (URL or storage key)
    #[sea_orm(nullable)]
    pub profile_photo: Option<String>,

    #[sea_orm(nullable)]
    pub date_of_birth: Option<Date>,

    #[sea_orm(nullable)]
    pub phone_number: Option<String>,

    /// Argon2 PHC-encoded password digest, never the plaintext
    #[serde(skip_serializing)]
    pub password_hash: String,

    pub role: UserRole,

    /// Followers count (denormalized, maintained by the follow write path)
    #[sea_orm(default_value = 0)]
    pub followers_count: i32,

    /// Following count (denormalized)
    #[sea_orm(default_value = 0)]
    pub following_count: i32,

    /// Blocked accounts cannot obtain new tokens
    #[sea_orm(default_value = false)]
    pub is_blocked: bool,

    pub created_at: DateTimeWithTimeZone,

    #[sea_orm(nullable)]
    pub updated_at: Option<DateTimeWithTimeZone>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::recipe::Entity")]
    Recipes,

    #[sea_orm(has_many = "super::forked_recipe::Entity")]
    ForkedRecipes,

    #[sea_orm(has_many = "super::wishlist::Entity")]
    Wishlists,

    #[sea_orm(has_many = "super::cooking_history::Entity")]
    CookingHistory,
}

impl Related<super::recipe::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Recipes.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
