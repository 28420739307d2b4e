//! Business logic services.

#![allow(missing_docs)]

pub mod auth;
pub mod comment;
pub mod cooking_history;
pub mod following;
pub mod fork;
pub mod ingredient;
pub mod like;
pub mod moderation;
pub mod recipe;
pub mod user;
pub mod wishlist;

pub use auth::{AuthService, Claims, Identity, TokenResponse};
pub use comment::{CommentNode, CommentService, CreateCommentInput, UpdateCommentInput};
pub use cooking_history::CookingHistoryService;
pub use following::FollowingService;
pub use fork::{ForkService, UpdateForkInput};
pub use ingredient::{
    AttachIngredientInput, IngredientLine, IngredientService, UpdateIngredientLineInput,
};
pub use like::LikeService;
pub use moderation::ModerationService;
pub use recipe::{CreateRecipeInput, RecipeService, UpdateRecipeInput};
pub use user::{ChangePasswordInput, RegisterInput, UpdateProfileInput, UserService};
pub use wishlist::{AddWishlistInput, WishlistService};
