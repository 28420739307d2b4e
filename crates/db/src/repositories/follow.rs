//! Follow repository.

use std::sync::Arc;

use crate::entities::{Follow, follow};
use crate::map_db_err;
use forkful_common::{AppError, AppResult};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder,
};

/// Follow repository for database operations.
#[derive(Clone)]
pub struct FollowRepository {
    db: Arc<DatabaseConnection>,
}

impl FollowRepository {
    /// Create a new follow repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find a follow relationship by follower and followee.
    pub async fn find_by_pair(
        &self,
        follower_id: i32,
        followee_id: i32,
    ) -> AppResult<Option<follow::Model>> {
        Follow::find_by_id((follower_id, followee_id))
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Check if a user is following another user.
    pub async fn is_following(&self, follower_id: i32, followee_id: i32) -> AppResult<bool> {
        Ok(self.find_by_pair(follower_id, followee_id).await?.is_some())
    }

    /// Create a new follow relationship.
    ///
    /// The composite primary key rejects a concurrent duplicate; the
    /// violation surfaces as [`AppError::Conflict`].
    pub async fn create<C: ConnectionTrait>(
        &self,
        conn: &C,
        model: follow::ActiveModel,
    ) -> AppResult<follow::Model> {
        model.insert(conn).await.map_err(map_db_err)
    }

    /// Delete a follow relationship by pair. Returns whether a row existed.
    pub async fn delete_by_pair<C: ConnectionTrait>(
        &self,
        conn: &C,
        follower_id: i32,
        followee_id: i32,
    ) -> AppResult<bool> {
        let res = Follow::delete_by_id((follower_id, followee_id))
            .exec(conn)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(res.rows_affected > 0)
    }

    /// Get follow rows where the user is the followee (their followers).
    pub async fn find_followers(&self, user_id: i32) -> AppResult<Vec<follow::Model>> {
        Follow::find()
            .filter(follow::Column::FolloweeId.eq(user_id))
            .order_by_desc(follow::Column::CreatedAt)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Get follow rows where the user is the follower (who they follow).
    pub async fn find_following(&self, user_id: i32) -> AppResult<Vec<follow::Model>> {
        Follow::find()
            .filter(follow::Column::FollowerId.eq(user_id))
            .order_by_desc(follow::Column::CreatedAt)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Count followers of a user.
    pub async fn count_followers(&self, user_id: i32) -> AppResult<u64> {
        Follow::find()
            .filter(follow::Column::FolloweeId.eq(user_id))
            .count(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Count users a user is following.
    pub async fn count_following(&self, user_id: i32) -> AppResult<u64> {
        Follow::find()
            .filter(follow::Column::FollowerId.eq(user_id))
            .count(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Utc;
    use sea_orm::{DatabaseBackend, MockDatabase};

    fn create_test_follow(follower_id: i32, followee_id: i32) -> follow::Model {
        follow::Model {
            follower_id,
            followee_id,
            created_at: Utc::now().into(),
        }
    }

    #[tokio::test]
    async fn test_is_following_true() {
        let follow = create_test_follow(1, 2);

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[follow]])
                .into_connection(),
        );

        let repo = FollowRepository::new(db);
        assert!(repo.is_following(1, 2).await.unwrap());
    }

    #[tokio::test]
    async fn test_is_following_false() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<follow::Model>::new()])
                .into_connection(),
        );

        let repo = FollowRepository::new(db);
        assert!(!repo.is_following(1, 3).await.unwrap());
    }

    #[tokio::test]
    async fn test_find_followers() {
        let f1 = create_test_follow(2, 1);
        let f2 = create_test_follow(3, 1);

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[f1, f2]])
                .into_connection(),
        );

        let repo = FollowRepository::new(db);
        let result = repo.find_followers(1).await.unwrap();

        assert_eq!(result.len(), 2);
        assert!(result.iter().all(|f| f.followee_id == 1));
    }
}
