//! User repository.

use std::sync::Arc;

use crate::entities::{User, user};
use crate::map_db_err;
use forkful_common::{AppError, AppResult};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, ModelTrait,
    QueryFilter, QueryOrder, sea_query::Expr,
};

/// User repository for database operations.
#[derive(Clone)]
pub struct UserRepository {
    db: Arc<DatabaseConnection>,
}

impl UserRepository {
    /// Create a new user repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find a user by ID.
    pub async fn find_by_id(&self, id: i32) -> AppResult<Option<user::Model>> {
        User::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find a user by ID, returning an error if not found.
    pub async fn get_by_id(&self, id: i32) -> AppResult<user::Model> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::UserNotFound(id.to_string()))
    }

    /// Find a user by username.
    pub async fn find_by_username(&self, username: &str) -> AppResult<Option<user::Model>> {
        User::find()
            .filter(user::Column::Username.eq(username))
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find a user matching either username or email (registration pre-check).
    pub async fn find_by_username_or_email(
        &self,
        username: &str,
        email: &str,
    ) -> AppResult<Option<user::Model>> {
        User::find()
            .filter(
                user::Column::Username
                    .eq(username)
                    .or(user::Column::Email.eq(email)),
            )
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Create a new user.
    pub async fn create(&self, model: user::ActiveModel) -> AppResult<user::Model> {
        model.insert(self.db.as_ref()).await.map_err(map_db_err)
    }

    /// Update a user.
    pub async fn update(&self, model: user::ActiveModel) -> AppResult<user::Model> {
        model.update(self.db.as_ref()).await.map_err(map_db_err)
    }

    /// Delete a user.
    pub async fn delete(&self, model: user::Model) -> AppResult<()> {
        model
            .delete(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    /// Find users by a set of IDs (follower/following listings).
    pub async fn find_by_ids(&self, ids: Vec<i32>) -> AppResult<Vec<user::Model>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        User::find()
            .filter(user::Column::Id.is_in(ids))
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// List all users, newest first (admin view).
    pub async fn find_all(&self) -> AppResult<Vec<user::Model>> {
        User::find()
            .order_by_desc(user::Column::CreatedAt)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Increment followers count atomically (single UPDATE query, no fetch).
    pub async fn increment_followers_count<C: ConnectionTrait>(
        &self,
        conn: &C,
        user_id: i32,
    ) -> AppResult<()> {
        User::update_many()
            .col_expr(
                user::Column::FollowersCount,
                Expr::col(user::Column::FollowersCount).add(1),
            )
            .filter(user::Column::Id.eq(user_id))
            .exec(conn)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    /// Decrement followers count atomically, floored at zero.
    pub async fn decrement_followers_count<C: ConnectionTrait>(
        &self,
        conn: &C,
        user_id: i32,
    ) -> AppResult<()> {
        User::update_many()
            .col_expr(
                user::Column::FollowersCount,
                Expr::cust("GREATEST(followers_count - 1, 0)"),
            )
            .filter(user::Column::Id.eq(user_id))
            .exec(conn)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    /// Increment following count atomically (single UPDATE query, no fetch).
    pub async fn increment_following_count<C: ConnectionTrait>(
        &self,
        conn: &C,
        user_id: i32,
    ) -> AppResult<()> {
        User::update_many()
            .col_expr(
                user::Column::FollowingCount,
                Expr::col(user::Column::FollowingCount).add(1),
            )
            .filter(user::Column::Id.eq(user_id))
            .exec(conn)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    /// Decrement following count atomically, floored at zero.
    pub async fn decrement_following_count<C: ConnectionTrait>(
        &self,
        conn: &C,
        user_id: i32,
    ) -> AppResult<()> {
        User::update_many()
            .col_expr(
                user::Column::FollowingCount,
                Expr::cust("GREATEST(following_count - 1, 0)"),
            )
            .filter(user::Column::Id.eq(user_id))
            .exec(conn)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    /// Set the blocked flag.
    pub async fn set_blocked(&self, user_id: i32, blocked: bool) -> AppResult<()> {
        User::update_many()
            .col_expr(user::Column::IsBlocked, Expr::value(blocked))
            .filter(user::Column::Id.eq(user_id))
            .exec(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::entities::user::UserRole;
    use chrono::Utc;
    use sea_orm::{DatabaseBackend, MockDatabase};

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

    #[tokio::test]
    async fn test_find_by_id_found() {
        let user = create_test_user(1, "alice");

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[user.clone()]])
                .into_connection(),
        );

        let repo = UserRepository::new(db);
        let result = repo.find_by_id(1).await.unwrap();

        assert!(result.is_some());
        assert_eq!(result.unwrap().username, "alice");
    }

    #[tokio::test]
    async fn test_get_by_id_not_found() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<user::Model>::new()])
                .into_connection(),
        );

        let repo = UserRepository::new(db);
        let result = repo.get_by_id(99).await;

        assert!(matches!(result, Err(AppError::UserNotFound(_))));
    }

    #[tokio::test]
    async fn test_find_by_username_or_email() {
        let user = create_test_user(2, "bob");

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[user.clone()]])
                .into_connection(),
        );

        let repo = UserRepository::new(db);
        let result = repo
            .find_by_username_or_email("bob", "bob@example.com")
            .await
            .unwrap();

        assert!(result.is_some());
        assert_eq!(result.unwrap().id, 2);
    }
}
