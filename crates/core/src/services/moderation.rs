//! Moderation service: admin controls over users and recipes.

use chrono::Utc;
use forkful_common::{AppError, AppResult};
use forkful_db::{
    entities::{recipe, user},
    repositories::{RecipeCommentRepository, RecipeRepository, UserRepository},
};
use sea_orm::Set;

/// Moderation service for business logic.
///
/// Callers are assumed to already hold the admin role; the role check
/// lives at the API boundary.
#[derive(Clone)]
pub struct ModerationService {
    user_repo: UserRepository,
    recipe_repo: RecipeRepository,
    comment_repo: RecipeCommentRepository,
}

impl ModerationService {
    /// Create a new moderation service.
    #[must_use]
    pub const fn new(
        user_repo: UserRepository,
        recipe_repo: RecipeRepository,
        comment_repo: RecipeCommentRepository,
    ) -> Self {
        Self {
            user_repo,
            recipe_repo,
            comment_repo,
        }
    }

    /// List every user, newest first.
    pub async fn list_users(&self) -> AppResult<Vec<user::Model>> {
        self.user_repo.find_all().await
    }

    /// Block a user. Their outstanding tokens keep working until expiry,
    /// but login is refused.
    pub async fn block_user(&self, admin_id: i32, user_id: i32) -> AppResult<()> {
        if admin_id == user_id {
            return Err(AppError::BadRequest("Cannot block yourself".to_string()));
        }

        self.user_repo.get_by_id(user_id).await?;
        self.user_repo.set_blocked(user_id, true).await?;
        tracing::info!(admin_id, user_id, "User blocked");
        Ok(())
    }

    /// Unblock a user.
    pub async fn unblock_user(&self, admin_id: i32, user_id: i32) -> AppResult<()> {
        self.user_repo.get_by_id(user_id).await?;
        self.user_repo.set_blocked(user_id, false).await?;
        tracing::info!(admin_id, user_id, "User unblocked");
        Ok(())
    }

    /// List every recipe including hidden and soft-deleted rows.
    pub async fn list_recipes(&self) -> AppResult<Vec<recipe::Model>> {
        self.recipe_repo.find_all().await
    }

    /// Get any recipe regardless of visibility.
    pub async fn get_recipe(&self, recipe_id: i32) -> AppResult<recipe::Model> {
        self.recipe_repo.get_by_id(recipe_id).await
    }

    /// Hide a recipe from the public surface. The owner's data is kept.
    pub async fn hide_recipe(&self, admin_id: i32, recipe_id: i32) -> AppResult<()> {
        self.set_hidden(recipe_id, true).await?;
        tracing::info!(admin_id, recipe_id, "Recipe hidden");
        Ok(())
    }

    /// Restore a hidden recipe.
    pub async fn unhide_recipe(&self, admin_id: i32, recipe_id: i32) -> AppResult<()> {
        self.set_hidden(recipe_id, false).await?;
        tracing::info!(admin_id, recipe_id, "Recipe unhidden");
        Ok(())
    }

    /// Soft-delete any recipe regardless of ownership.
    pub async fn delete_recipe(&self, admin_id: i32, recipe_id: i32) -> AppResult<()> {
        let existing = self.recipe_repo.get_by_id(recipe_id).await?;

        let mut model: recipe::ActiveModel = existing.into();
        model.is_deleted = Set(true);
        model.deleted_at = Set(Some(Utc::now().into()));

        self.recipe_repo.update(model).await?;
        tracing::info!(admin_id, recipe_id, "Recipe deleted by moderator");
        Ok(())
    }

    /// Hard-delete a user account. Follows, likes, comments and forks go
    /// with it through the cascading foreign keys.
    pub async fn delete_user(&self, admin_id: i32, user_id: i32) -> AppResult<()> {
        if admin_id == user_id {
            return Err(AppError::BadRequest("Cannot delete yourself".to_string()));
        }

        let existing = self.user_repo.get_by_id(user_id).await?;
        self.user_repo.delete(existing).await?;
        tracing::info!(admin_id, user_id, "User deleted by moderator");
        Ok(())
    }

    /// Delete any comment regardless of authorship.
    pub async fn delete_comment(&self, admin_id: i32, comment_id: i32) -> AppResult<()> {
        let existing = self
            .comment_repo
            .find_by_id(comment_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Comment not found".to_string()))?;

        self.comment_repo.delete(existing).await?;
        tracing::info!(admin_id, comment_id, "Comment deleted by moderator");
        Ok(())
    }

    async fn set_hidden(&self, recipe_id: i32, hidden: bool) -> AppResult<()> {
        let existing = self.recipe_repo.get_by_id(recipe_id).await?;

        let mut model: recipe::ActiveModel = existing.into();
        model.is_hidden = Set(hidden);
        model.updated_at = Set(Some(Utc::now().into()));

        self.recipe_repo.update(model).await?;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use forkful_db::entities::user::UserRole;
    use sea_orm::{DatabaseBackend, MockDatabase};
    use std::sync::Arc;

    fn create_test_user(id: i32, username: &str) -> user::Model {
        user::Model {
            id,
            email: format!("{username}@example.com"),
            username: username.to_string(),
            first_name: None,
            last_name: None,
            bio: None,
            profile_photo: None,
            date_of_birth: None,
            phone_number: None,
            password_hash: "$argon2id$dummy".to_string(),
            role: UserRole::User,
            followers_count: 0,
            following_count: 0,
            is_blocked: false,
            created_at: Utc::now().into(),
            updated_at: None,
        }
    }

    fn service_with(db: Arc<sea_orm::DatabaseConnection>) -> ModerationService {
        ModerationService::new(
            UserRepository::new(db.clone()),
            RecipeRepository::new(db.clone()),
            RecipeCommentRepository::new(db),
        )
    }

    #[tokio::test]
    async fn test_block_yourself_is_bad_request() {
        let db = Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());
        let service = service_with(db);

        assert!(matches!(
            service.block_user(1, 1).await,
            Err(AppError::BadRequest(_))
        ));
    }

    #[tokio::test]
    async fn test_block_unknown_user_is_not_found() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<user::Model>::new()])
                .into_connection(),
        );
        let service = service_with(db);

        assert!(matches!(
            service.block_user(1, 99).await,
            Err(AppError::UserNotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_delete_yourself_is_bad_request() {
        let db = Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());
        let service = service_with(db);

        assert!(matches!(
            service.delete_user(1, 1).await,
            Err(AppError::BadRequest(_))
        ));
    }

    #[tokio::test]
    async fn test_delete_missing_comment_is_not_found() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<forkful_db::entities::recipe_comment::Model>::new()])
                .into_connection(),
        );
        let service = service_with(db);

        assert!(matches!(
            service.delete_comment(1, 99).await,
            Err(AppError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_list_users() {
        let u1 = create_test_user(1, "alice");
        let u2 = create_test_user(2, "bob");

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[u1, u2]])
                .into_connection(),
        );
        let service = service_with(db);

        assert_eq!(service.list_users().await.unwrap().len(), 2);
    }
}
