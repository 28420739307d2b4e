//! Create recipe table migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Recipe::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Recipe::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Recipe::UserId).integer().not_null())
                    .col(ColumnDef::new(Recipe::Name).string_len(255).not_null())
                    .col(ColumnDef::new(Recipe::Description).text())
                    .col(ColumnDef::new(Recipe::Tag).string_len(16).not_null())
                    .col(ColumnDef::new(Recipe::PeopleCount).integer().not_null().default(1))
                    .col(ColumnDef::new(Recipe::LikesCount).integer().not_null().default(0))
                    .col(ColumnDef::new(Recipe::ForkedCount).integer().not_null().default(0))
                    .col(ColumnDef::new(Recipe::IsDeleted).boolean().not_null().default(false))
                    .col(ColumnDef::new(Recipe::IsHidden).boolean().not_null().default(false))
                    .col(
                        ColumnDef::new(Recipe::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(ColumnDef::new(Recipe::UpdatedAt).timestamp_with_time_zone())
                    .col(ColumnDef::new(Recipe::DeletedAt).timestamp_with_time_zone())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_recipe_user")
                            .from(Recipe::Table, Recipe::UserId)
                            .to(User::Table, User::Id),
                    )
                    .to_owned(),
            )
            .await?;

        // Index: user_id (for listing a user's recipes)
        manager
            .create_index(
                Index::create()
                    .name("idx_recipe_user_id")
                    .table(Recipe::Table)
                    .col(Recipe::UserId)
                    .to_owned(),
            )
            .await?;

        // Index: tag (for by-type listing)
        manager
            .create_index(
                Index::create()
                    .name("idx_recipe_tag")
                    .table(Recipe::Table)
                    .col(Recipe::Tag)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Recipe::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Recipe {
    Table,
    Id,
    UserId,
    Name,
    Description,
    Tag,
    PeopleCount,
    LikesCount,
    ForkedCount,
    IsDeleted,
    IsHidden,
    CreatedAt,
    UpdatedAt,
    DeletedAt,
}

#[derive(Iden)]
enum User {
    Table,
    Id,
}
