//! Create recipe ingredient table migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(RecipeIngredient::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(RecipeIngredient::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(RecipeIngredient::RecipeId).integer().not_null())
                    .col(ColumnDef::new(RecipeIngredient::IngredientId).integer().not_null())
                    .col(
                        ColumnDef::new(RecipeIngredient::Quantity)
                            .decimal_len(10, 2)
                            .not_null(),
                    )
                    .col(ColumnDef::new(RecipeIngredient::Unit).string_len(16).not_null())
                    .col(
                        ColumnDef::new(RecipeIngredient::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(ColumnDef::new(RecipeIngredient::UpdatedAt).timestamp_with_time_zone())
                    // Plain FKs: deleting a recipe or ingredient is not propagated
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_recipe_ingredient_recipe")
                            .from(RecipeIngredient::Table, RecipeIngredient::RecipeId)
                            .to(Recipe::Table, Recipe::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_recipe_ingredient_ingredient")
                            .from(RecipeIngredient::Table, RecipeIngredient::IngredientId)
                            .to(Ingredient::Table, Ingredient::Id),
                    )
                    .to_owned(),
            )
            .await?;

        // Unique index: (recipe_id, ingredient_id) - one line per ingredient
        manager
            .create_index(
                Index::create()
                    .name("idx_recipe_ingredient_pair")
                    .table(RecipeIngredient::Table)
                    .col(RecipeIngredient::RecipeId)
                    .col(RecipeIngredient::IngredientId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(RecipeIngredient::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum RecipeIngredient {
    Table,
    Id,
    RecipeId,
    IngredientId,
    Quantity,
    Unit,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Recipe {
    Table,
    Id,
}

#[derive(Iden)]
enum Ingredient {
    Table,
    Id,
}
