//! Database migrations.
//!
//! Schema migrations for the database.

#![allow(missing_docs)]

use sea_orm_migration::prelude::*;

mod m20250301_000001_create_user_table;
mod m20250301_000002_create_follow_table;
mod m20250301_000003_create_recipe_table;
mod m20250301_000004_create_forked_recipe_table;
mod m20250301_000005_create_ingredient_table;
mod m20250301_000006_create_recipe_ingredient_table;
mod m20250301_000007_create_recipe_comment_table;
mod m20250301_000008_create_recipe_like_table;
mod m20250301_000009_create_cooking_history_table;
mod m20250301_000010_create_wishlist_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250301_000001_create_user_table::Migration),
            Box::new(m20250301_000002_create_follow_table::Migration),
            Box::new(m20250301_000003_create_recipe_table::Migration),
            Box::new(m20250301_000004_create_forked_recipe_table::Migration),
            Box::new(m20250301_000005_create_ingredient_table::Migration),
            Box::new(m20250301_000006_create_recipe_ingredient_table::Migration),
            Box::new(m20250301_000007_create_recipe_comment_table::Migration),
            Box::new(m20250301_000008_create_recipe_like_table::Migration),
            Box::new(m20250301_000009_create_cooking_history_table::Migration),
            Box::new(m20250301_000010_create_wishlist_table::Migration),
        ]
    }
}
