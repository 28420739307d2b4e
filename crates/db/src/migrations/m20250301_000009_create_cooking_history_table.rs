//! Create cooking history table migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(CookingHistory::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(CookingHistory::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(CookingHistory::UserId).integer().not_null())
                    .col(ColumnDef::new(CookingHistory::RecipeId).integer().not_null())
                    .col(
                        ColumnDef::new(CookingHistory::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(ColumnDef::new(CookingHistory::UpdatedAt).timestamp_with_time_zone())
                    // Plain FKs: history has its own lifecycle
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_cooking_history_user")
                            .from(CookingHistory::Table, CookingHistory::UserId)
                            .to(User::Table, User::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_cooking_history_recipe")
                            .from(CookingHistory::Table, CookingHistory::RecipeId)
                            .to(Recipe::Table, Recipe::Id),
                    )
                    .to_owned(),
            )
            .await?;

        // Unique index: (user_id, recipe_id) - one history row per pair
        manager
            .create_index(
                Index::create()
                    .name("idx_cooking_history_pair")
                    .table(CookingHistory::Table)
                    .col(CookingHistory::UserId)
                    .col(CookingHistory::RecipeId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(CookingHistory::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum CookingHistory {
    Table,
    Id,
    UserId,
    RecipeId,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum User {
    Table,
    Id,
}

#[derive(Iden)]
enum Recipe {
    Table,
    Id,
}
