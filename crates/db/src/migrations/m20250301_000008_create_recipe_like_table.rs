//! Create recipe like table migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(RecipeLike::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(RecipeLike::UserId).integer().not_null())
                    .col(ColumnDef::new(RecipeLike::RecipeId).integer().not_null())
                    .col(
                        ColumnDef::new(RecipeLike::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    // Composite primary key doubles as the duplicate-like guard
                    .primary_key(
                        Index::create()
                            .col(RecipeLike::UserId)
                            .col(RecipeLike::RecipeId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_recipe_like_user")
                            .from(RecipeLike::Table, RecipeLike::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_recipe_like_recipe")
                            .from(RecipeLike::Table, RecipeLike::RecipeId)
                            .to(Recipe::Table, Recipe::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Index: recipe_id (for counting/auditing a recipe's likes)
        manager
            .create_index(
                Index::create()
                    .name("idx_recipe_like_recipe_id")
                    .table(RecipeLike::Table)
                    .col(RecipeLike::RecipeId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(RecipeLike::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum RecipeLike {
    Table,
    UserId,
    RecipeId,
    CreatedAt,
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
