//! Create recipe comment table migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(RecipeComment::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(RecipeComment::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(RecipeComment::RecipeId).integer().not_null())
                    .col(ColumnDef::new(RecipeComment::UserId).integer().not_null())
                    .col(ColumnDef::new(RecipeComment::Body).text().not_null())
                    .col(ColumnDef::new(RecipeComment::ParentCommentId).integer())
                    .col(
                        ColumnDef::new(RecipeComment::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(ColumnDef::new(RecipeComment::UpdatedAt).timestamp_with_time_zone())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_recipe_comment_recipe")
                            .from(RecipeComment::Table, RecipeComment::RecipeId)
                            .to(Recipe::Table, Recipe::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_recipe_comment_user")
                            .from(RecipeComment::Table, RecipeComment::UserId)
                            .to(User::Table, User::Id),
                    )
                    // Self-referential reply tree; replies go with their parent
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_recipe_comment_parent")
                            .from(RecipeComment::Table, RecipeComment::ParentCommentId)
                            .to(RecipeComment::Table, RecipeComment::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Index: recipe_id (for listing a recipe's comments)
        manager
            .create_index(
                Index::create()
                    .name("idx_recipe_comment_recipe_id")
                    .table(RecipeComment::Table)
                    .col(RecipeComment::RecipeId)
                    .to_owned(),
            )
            .await?;

        // Index: parent_comment_id (for reply traversal)
        manager
            .create_index(
                Index::create()
                    .name("idx_recipe_comment_parent_id")
                    .table(RecipeComment::Table)
                    .col(RecipeComment::ParentCommentId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(RecipeComment::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum RecipeComment {
    Table,
    Id,
    RecipeId,
    UserId,
    Body,
    ParentCommentId,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Recipe {
    Table,
    Id,
}

#[derive(Iden)]
enum User {
    Table,
    Id,
}
