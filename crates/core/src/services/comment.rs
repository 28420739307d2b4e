//! Comment service: flat CRUD plus threaded reply trees.

use std::collections::HashMap;

use chrono::Utc;
use forkful_common::{AppError, AppResult};
use forkful_db::{
    entities::recipe_comment,
    repositories::{RecipeCommentRepository, RecipeRepository},
};
use sea_orm::Set;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Reply nesting depth served in a thread. Replies below this are dropped
/// from the tree, not deleted.
const MAX_THREAD_DEPTH: usize = 32;

/// Input for posting a comment.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateCommentInput {
    #[validate(length(min = 1, max = 2048))]
    pub body: String,
    /// Parent comment for a reply; must live on the same recipe.
    pub parent_comment_id: Option<i32>,
}

/// Input for editing a comment body.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCommentInput {
    #[validate(length(min = 1, max = 2048))]
    pub body: String,
}

/// A comment with its nested replies.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentNode {
    #[serde(flatten)]
    pub comment: recipe_comment::Model,
    pub replies: Vec<CommentNode>,
}

/// Comment service for business logic.
#[derive(Clone)]
pub struct CommentService {
    comment_repo: RecipeCommentRepository,
    recipe_repo: RecipeRepository,
}

impl CommentService {
    /// Create a new comment service.
    #[must_use]
    pub const fn new(comment_repo: RecipeCommentRepository, recipe_repo: RecipeRepository) -> Self {
        Self {
            comment_repo,
            recipe_repo,
        }
    }

    /// Post a comment (or reply) on a visible recipe.
    pub async fn create(
        &self,
        recipe_id: i32,
        author_id: i32,
        input: CreateCommentInput,
    ) -> AppResult<recipe_comment::Model> {
        input.validate()?;

        self.recipe_repo.get_visible_by_id(recipe_id).await?;

        if let Some(parent_id) = input.parent_comment_id {
            // A reply must target a comment on the same recipe
            self.comment_repo
                .find_on_recipe(recipe_id, parent_id)
                .await?
                .ok_or_else(|| {
                    AppError::NotFound(format!("Parent comment not found: {parent_id}"))
                })?;
        }

        self.comment_repo
            .create(recipe_comment::ActiveModel {
                recipe_id: Set(recipe_id),
                user_id: Set(author_id),
                body: Set(input.body),
                parent_comment_id: Set(input.parent_comment_id),
                created_at: Set(Utc::now().into()),
                ..Default::default()
            })
            .await
    }

    /// List every comment on a visible recipe, flat and oldest first.
    pub async fn list(&self, recipe_id: i32) -> AppResult<Vec<recipe_comment::Model>> {
        self.recipe_repo.get_visible_by_id(recipe_id).await?;
        self.comment_repo.find_by_recipe(recipe_id).await
    }

    /// Serve a recipe's comments as a reply tree.
    pub async fn thread(&self, recipe_id: i32) -> AppResult<Vec<CommentNode>> {
        self.recipe_repo.get_visible_by_id(recipe_id).await?;

        let comments = self.comment_repo.find_by_recipe(recipe_id).await?;
        Ok(build_thread(comments))
    }

    /// Edit a comment authored by the caller.
    pub async fn update(
        &self,
        comment_id: i32,
        author_id: i32,
        input: UpdateCommentInput,
    ) -> AppResult<recipe_comment::Model> {
        input.validate()?;

        let existing = self
            .comment_repo
            .find_owned(comment_id, author_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Comment not found: {comment_id}")))?;

        let mut model: recipe_comment::ActiveModel = existing.into();
        model.body = Set(input.body);
        model.updated_at = Set(Some(Utc::now().into()));

        self.comment_repo.update(model).await
    }

    /// Delete a comment.
    ///
    /// Unlike the other owner-scoped operations, deleting someone else's
    /// comment is a visible forbidden, not a not-found: the caller already
    /// sees the comment on the recipe page.
    pub async fn delete(&self, comment_id: i32, author_id: i32) -> AppResult<()> {
        let existing = self
            .comment_repo
            .find_by_id(comment_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Comment not found: {comment_id}")))?;

        if existing.user_id != author_id {
            return Err(AppError::Forbidden(
                "Cannot delete another user's comment".to_string(),
            ));
        }

        self.comment_repo.delete(existing).await
    }
}

/// Assemble a flat comment list into a reply tree, capped at
/// [`MAX_THREAD_DEPTH`] levels.
fn build_thread(comments: Vec<recipe_comment::Model>) -> Vec<CommentNode> {
    let mut children: HashMap<Option<i32>, Vec<recipe_comment::Model>> = HashMap::new();
    for comment in comments {
        children
            .entry(comment.parent_comment_id)
            .or_default()
            .push(comment);
    }

    attach_replies(&mut children, None, 0)
}

fn attach_replies(
    children: &mut HashMap<Option<i32>, Vec<recipe_comment::Model>>,
    parent: Option<i32>,
    depth: usize,
) -> Vec<CommentNode> {
    if depth >= MAX_THREAD_DEPTH {
        return Vec::new();
    }

    children
        .remove(&parent)
        .unwrap_or_default()
        .into_iter()
        .map(|comment| {
            let replies = attach_replies(children, Some(comment.id), depth + 1);
            CommentNode { comment, replies }
        })
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use forkful_db::entities::recipe::{self, RecipeTag};
    use sea_orm::{DatabaseBackend, MockDatabase};
    use std::sync::Arc;

    fn create_test_comment(id: i32, parent: Option<i32>) -> recipe_comment::Model {
        recipe_comment::Model {
            id,
            recipe_id: 1,
            user_id: 5,
            body: format!("comment {id}"),
            parent_comment_id: parent,
            created_at: Utc::now().into(),
            updated_at: None,
        }
    }

    fn create_test_recipe(id: i32) -> recipe::Model {
        recipe::Model {
            id,
            user_id: 1,
            name: "Dal".to_string(),
            description: None,
            tag: RecipeTag::Veg,
            people_count: 4,
            likes_count: 0,
            forked_count: 0,
            is_deleted: false,
            is_hidden: false,
            created_at: Utc::now().into(),
            updated_at: None,
            deleted_at: None,
        }
    }

    fn service_with(db: Arc<sea_orm::DatabaseConnection>) -> CommentService {
        CommentService::new(
            RecipeCommentRepository::new(db.clone()),
            RecipeRepository::new(db),
        )
    }

    #[test]
    fn test_build_thread_nests_replies() {
        let comments = vec![
            create_test_comment(1, None),
            create_test_comment(2, Some(1)),
            create_test_comment(3, Some(1)),
            create_test_comment(4, Some(2)),
            create_test_comment(5, None),
        ];

        let tree = build_thread(comments);

        assert_eq!(tree.len(), 2);
        assert_eq!(tree[0].comment.id, 1);
        assert_eq!(tree[0].replies.len(), 2);
        assert_eq!(tree[0].replies[0].replies[0].comment.id, 4);
        assert!(tree[1].replies.is_empty());
    }

    #[test]
    fn test_build_thread_caps_depth() {
        // A reply chain longer than the cap: 1 <- 2 <- 3 <- ...
        let mut comments = vec![create_test_comment(1, None)];
        for id in 2..=40 {
            comments.push(create_test_comment(id, Some(id - 1)));
        }

        let tree = build_thread(comments);

        let mut depth = 0;
        let mut node = &tree[0];
        while let Some(next) = node.replies.first() {
            node = next;
            depth += 1;
        }
        assert_eq!(depth, MAX_THREAD_DEPTH - 1);
    }

    #[tokio::test]
    async fn test_reply_to_comment_on_other_recipe() {
        let recipe = create_test_recipe(1);

        // Parent lookup scoped to recipe 1 comes back empty
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[recipe]])
                .append_query_results([Vec::<recipe_comment::Model>::new()])
                .into_connection(),
        );
        let service = service_with(db);

        let input = CreateCommentInput {
            body: "nice".to_string(),
            parent_comment_id: Some(77),
        };

        assert!(matches!(
            service.create(1, 5, input).await,
            Err(AppError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_delete_other_users_comment_is_forbidden() {
        let comment = create_test_comment(3, None);

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[comment]])
                .into_connection(),
        );
        let service = service_with(db);

        assert!(matches!(
            service.delete(3, 99).await,
            Err(AppError::Forbidden(_))
        ));
    }
}
