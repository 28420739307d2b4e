//! Create user table migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(User::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(User::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(User::Email).string_len(255).not_null())
                    .col(ColumnDef::new(User::Username).string_len(255).not_null())
                    .col(ColumnDef::new(User::FirstName).string_len(255))
                    .col(ColumnDef::new(User::LastName).string_len(255))
                    .col(ColumnDef::new(User::Bio).string_len(500))
                    .col(ColumnDef::new(User::ProfilePhoto).string_len(255))
                    .col(ColumnDef::new(User::DateOfBirth).date())
                    .col(ColumnDef::new(User::PhoneNumber).string_len(30))
                    .col(ColumnDef::new(User::PasswordHash).string_len(300).not_null())
                    .col(ColumnDef::new(User::Role).string_len(16).not_null())
                    .col(ColumnDef::new(User::FollowersCount).integer().not_null().default(0))
                    .col(ColumnDef::new(User::FollowingCount).integer().not_null().default(0))
                    .col(ColumnDef::new(User::IsBlocked).boolean().not_null().default(false))
                    .col(
                        ColumnDef::new(User::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(ColumnDef::new(User::UpdatedAt).timestamp_with_time_zone())
                    .to_owned(),
            )
            .await?;

        // Unique index: email
        manager
            .create_index(
                Index::create()
                    .name("idx_user_email")
                    .table(User::Table)
                    .col(User::Email)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // Unique index: username
        manager
            .create_index(
                Index::create()
                    .name("idx_user_username")
                    .table(User::Table)
                    .col(User::Username)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(User::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum User {
    Table,
    Id,
    Email,
    Username,
    FirstName,
    LastName,
    Bio,
    ProfilePhoto,
    DateOfBirth,
    PhoneNumber,
    PasswordHash,
    Role,
    FollowersCount,
    FollowingCount,
    IsBlocked,
    CreatedAt,
    UpdatedAt,
}
