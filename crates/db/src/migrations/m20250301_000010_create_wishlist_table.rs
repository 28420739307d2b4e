//! Create wishlist table migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Wishlist::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Wishlist::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Wishlist::UserId).integer().not_null())
                    .col(ColumnDef::new(Wishlist::RecipeId).integer().not_null())
                    .col(
                        ColumnDef::new(Wishlist::Visibility)
                            .string_len(16)
                            .not_null()
                            .default("private"),
                    )
                    .col(
                        ColumnDef::new(Wishlist::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(ColumnDef::new(Wishlist::UpdatedAt).timestamp_with_time_zone())
                    // Plain FKs: a deleted recipe leaves the entry behind
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_wishlist_user")
                            .from(Wishlist::Table, Wishlist::UserId)
                            .to(User::Table, User::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_wishlist_recipe")
                            .from(Wishlist::Table, Wishlist::RecipeId)
                            .to(Recipe::Table, Recipe::Id),
                    )
                    .to_owned(),
            )
            .await?;

        // Unique index: (user_id, recipe_id) - a recipe is wishlisted once
        manager
            .create_index(
                Index::create()
                    .name("idx_wishlist_pair")
                    .table(Wishlist::Table)
                    .col(Wishlist::UserId)
                    .col(Wishlist::RecipeId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Wishlist::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Wishlist {
    Table,
    Id,
    UserId,
    RecipeId,
    Visibility,
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
