//! Database repositories.
//!
//! Each repository wraps a shared connection and exposes typed queries for
//! one entity. Mutating methods that participate in counter maintenance are
//! generic over [`sea_orm::ConnectionTrait`] so services can pass either the
//! pooled connection or an open transaction.

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

pub use cooking_history::CookingHistoryRepository;
pub use follow::FollowRepository;
pub use forked_recipe::ForkedRecipeRepository;
pub use ingredient::IngredientRepository;
pub use recipe::RecipeRepository;
pub use recipe_comment::RecipeCommentRepository;
pub use recipe_ingredient::RecipeIngredientRepository;
pub use recipe_like::RecipeLikeRepository;
pub use user::UserRepository;
pub use wishlist::WishlistRepository;
