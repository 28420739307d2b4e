//! Database entities.

#![allow(missing_docs)]

pub mod cooking_history;
pub mod follow;
pub mod forked_recipe;
pub mod ingredient;
pub mod recipe;
pub mod recipe_comment;
pub mod recipe_ingredient;
pub mod recipe_like;
pub mod user;
pub mod wishlist;

pub use cooking_history::Entity as CookingHistory;
pub use follow::Entity as Follow;
pub use forked_recipe::Entity as ForkedRecipe;
pub use ingredient::Entity as Ingredient;
pub use recipe::Entity as Recipe;
pub use recipe_comment::Entity as RecipeComment;
pub use recipe_ingredient::Entity as RecipeIngredient;
pub use recipe_like::Entity as RecipeLike;
pub use user::Entity as User;
pub use wishlist::Entity as Wishlist;
