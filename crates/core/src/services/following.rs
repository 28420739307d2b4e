//! Following service.

use std::sync::Arc;

use chrono::Utc;
use forkful_common::{AppError, AppResult};
use forkful_db::{
    entities::{follow, user},
    repositories::{FollowRepository, UserRepository},
};
use sea_orm::{DatabaseConnection, Set, TransactionTrait};

/// Following service for business logic.
///
/// Follow and unfollow pair the relationship row change with the two
/// denormalized counter updates inside a single transaction.
#[derive(Clone)]
pub struct FollowingService {
    db: Arc<DatabaseConnection>,
    follow_repo: FollowRepository,
    user_repo: UserRepository,
}

impl FollowingService {
    /// Create a new following service.
    #[must_use]
    pub const fn new(
        db: Arc<DatabaseConnection>,
        follow_repo: FollowRepository,
        user_repo: UserRepository,
    ) -> Self {
        Self {
            db,
            follow_repo,
            user_repo,
        }
    }

    /// Follow a user.
    pub async fn follow(&self, follower_id: i32, followee_id: i32) -> AppResult<()> {
        if follower_id == followee_id {
            return Err(AppError::BadRequest("Cannot follow yourself".to_string()));
        }

        // Both sides must exist before touching the relationship
        self.user_repo.get_by_id(follower_id).await?;
        self.user_repo.get_by_id(followee_id).await?;

        if self
            .follow_repo
            .is_following(follower_id, followee_id)
            .await?
        {
            return Err(AppError::Conflict("Already following".to_string()));
        }

        let model = follow::ActiveModel {
            follower_id: Set(follower_id),
            followee_id: Set(followee_id),
            created_at: Set(Utc::now().into()),
        };

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        self.follow_repo.create(&txn, model).await?;
        self.user_repo
            .increment_following_count(&txn, follower_id)
            .await?;
        self.user_repo
            .increment_followers_count(&txn, followee_id)
            .await?;

        txn.commit()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        tracing::debug!(follower_id, followee_id, "Follow created");
        Ok(())
    }

    /// Unfollow a user.
    pub async fn unfollow(&self, follower_id: i32, followee_id: i32) -> AppResult<()> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        // Counters only move when a row actually existed
        if !self
            .follow_repo
            .delete_by_pair(&txn, follower_id, followee_id)
            .await?
        {
            return Err(AppError::NotFound("Not following".to_string()));
        }

        self.user_repo
            .decrement_following_count(&txn, follower_id)
            .await?;
        self.user_repo
            .decrement_followers_count(&txn, followee_id)
            .await?;

        txn.commit()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        tracing::debug!(follower_id, followee_id, "Follow removed");
        Ok(())
    }

    /// Get the users following a given user.
    pub async fn get_followers(&self, user_id: i32) -> AppResult<Vec<user::Model>> {
        self.user_repo.get_by_id(user_id).await?;

        let rows = self.follow_repo.find_followers(user_id).await?;
        let ids = rows.iter().map(|f| f.follower_id).collect();
        self.user_repo.find_by_ids(ids).await
    }

    /// Get the users a given user is following.
    pub async fn get_following(&self, user_id: i32) -> AppResult<Vec<user::Model>> {
        self.user_repo.get_by_id(user_id).await?;

        let rows = self.follow_repo.find_following(user_id).await?;
        let ids = rows.iter().map(|f| f.followee_id).collect();
        self.user_repo.find_by_ids(ids).await
    }

    /// Check if a user is following another.
    pub async fn is_following(&self, follower_id: i32, followee_id: i32) -> AppResult<bool> {
        self.follow_repo.is_following(follower_id, followee_id).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use forkful_db::entities::user::UserRole;
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

    fn service_with(db: Arc<DatabaseConnection>) -> FollowingService {
        FollowingService::new(
            db.clone(),
            FollowRepository::new(db.clone()),
            UserRepository::new(db),
        )
    }

    #[tokio::test]
    async fn test_follow_yourself_is_bad_request() {
        let db = Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());
        let service = service_with(db);

        assert!(matches!(
            service.follow(1, 1).await,
            Err(AppError::BadRequest(_))
        ));
    }

    #[tokio::test]
    async fn test_follow_unknown_followee_is_not_found() {
        let follower = create_test_user(1, "alice");

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([vec![follower], Vec::<user::Model>::new()])
                .into_connection(),
        );
        let service = service_with(db);

        assert!(matches!(
            service.follow(1, 99).await,
            Err(AppError::UserNotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_follow_twice_is_conflict() {
        let follower = create_test_user(1, "alice");
        let followee = create_test_user(2, "bob");
        let existing = follow::Model {
            follower_id: 1,
            followee_id: 2,
            created_at: Utc::now().into(),
        };

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([vec![follower], vec![followee]])
                .append_query_results([[existing]])
                .into_connection(),
        );
        let service = service_with(db);

        assert!(matches!(
            service.follow(1, 2).await,
            Err(AppError::Conflict(_))
        ));
    }

    #[tokio::test]
    async fn test_is_following() {
        let existing = follow::Model {
            follower_id: 1,
            followee_id: 2,
            created_at: Utc::now().into(),
        };

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[existing]])
                .into_connection(),
        );
        let service = service_with(db);

        assert!(service.is_following(1, 2).await.unwrap());
    }
}
