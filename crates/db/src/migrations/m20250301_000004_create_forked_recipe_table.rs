//! Create forked recipe table migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ForkedRecipe::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ForkedRecipe::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ForkedRecipe::UserId).integer().not_null())
                    .col(ColumnDef::new(ForkedRecipe::RecipeId).integer().not_null())
                    .col(ColumnDef::new(ForkedRecipe::Name).string_len(255).not_null())
                    .col(ColumnDef::new(ForkedRecipe::Description).text())
                    .col(ColumnDef::new(ForkedRecipe::Tag).string_len(16).not_null())
                    .col(
                        ColumnDef::new(ForkedRecipe::PeopleCount)
                            .integer()
                            .not_null()
                            .default(1),
                    )
                    .col(
                        ColumnDef::new(ForkedRecipe::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(ColumnDef::new(ForkedRecipe::UpdatedAt).timestamp_with_time_zone())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_forked_recipe_user")
                            .from(ForkedRecipe::Table, ForkedRecipe::UserId)
                            .to(User::Table, User::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_forked_recipe_recipe")
                            .from(ForkedRecipe::Table, ForkedRecipe::RecipeId)
                            .to(Recipe::Table, Recipe::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Index: user_id (for listing a user's forks)
        manager
            .create_index(
                Index::create()
                    .name("idx_forked_recipe_user_id")
                    .table(ForkedRecipe::Table)
                    .col(ForkedRecipe::UserId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ForkedRecipe::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum ForkedRecipe {
    Table,
    Id,
    UserId,
    RecipeId,
    Name,
    Description,
    Tag,
    PeopleCount,
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
