//! User service: registration and profile management.

use chrono::{NaiveDate, Utc};
use forkful_common::{AppError, AppResult};
use forkful_db::{entities::user, repositories::UserRepository};
use sea_orm::Set;
use serde::Deserialize;
use validator::Validate;

use crate::services::auth;

/// Input for registering a new account.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterInput {
    /// Unique login name.
    #[validate(length(min = 3, max = 32))]
    pub username: String,
    /// Unique email address.
    #[validate(email)]
    pub email: String,
    /// Plaintext password, hashed before storage.
    #[validate(length(min = 8, max = 128))]
    pub password: String,
    #[validate(length(max = 64))]
    pub first_name: Option<String>,
    #[validate(length(max = 64))]
    pub last_name: Option<String>,
    #[validate(length(max = 512))]
    pub bio: Option<String>,
    pub profile_photo: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    #[validate(length(max = 20))]
    pub phone_number: Option<String>,
}

/// Input for updating an existing profile. Absent fields are left untouched.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileInput {
    #[validate(length(max = 64))]
    pub first_name: Option<String>,
    #[validate(length(max = 64))]
    pub last_name: Option<String>,
    #[validate(length(max = 512))]
    pub bio: Option<String>,
    pub profile_photo: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    #[validate(length(max = 20))]
    pub phone_number: Option<String>,
}

/// Input for changing the account password.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordInput {
    pub current_password: String,
    #[validate(length(min = 8, max = 128))]
    pub new_password: String,
}

/// User service for business logic.
#[derive(Clone)]
pub struct UserService {
    user_repo: UserRepository,
}

impl UserService {
    /// Create a new user service.
    #[must_use]
    pub const fn new(user_repo: UserRepository) -> Self {
        Self { user_repo }
    }

    /// Register a new account.
    ///
    /// Username and email must both be unused; a taken value is a conflict.
    pub async fn register(&self, input: RegisterInput) -> AppResult<user::Model> {
        input.validate()?;

        if self
            .user_repo
            .find_by_username_or_email(&input.username, &input.email)
            .await?
            .is_some()
        {
            return Err(AppError::Conflict(
                "Username or email already taken".to_string(),
            ));
        }

        let password_hash = auth::hash_password(&input.password)?;

        let model = user::ActiveModel {
            email: Set(input.email),
            username: Set(input.username),
            first_name: Set(input.first_name),
            last_name: Set(input.last_name),
            bio: Set(input.bio),
            profile_photo: Set(input.profile_photo),
            date_of_birth: Set(input.date_of_birth),
            phone_number: Set(input.phone_number),
            password_hash: Set(password_hash),
            role: Set(user::UserRole::User),
            followers_count: Set(0),
            following_count: Set(0),
            is_blocked: Set(false),
            created_at: Set(Utc::now().into()),
            ..Default::default()
        };

        let created = self.user_repo.create(model).await?;
        tracing::info!(user_id = created.id, username = %created.username, "User registered");
        Ok(created)
    }

    /// Get a user by ID.
    pub async fn get_user(&self, user_id: i32) -> AppResult<user::Model> {
        self.user_repo.get_by_id(user_id).await
    }

    /// Update the caller's profile.
    pub async fn update_profile(
        &self,
        user_id: i32,
        input: UpdateProfileInput,
    ) -> AppResult<user::Model> {
        input.validate()?;

        let existing = self.user_repo.get_by_id(user_id).await?;
        let mut model: user::ActiveModel = existing.into();

        if let Some(first_name) = input.first_name {
            model.first_name = Set(Some(first_name));
        }
        if let Some(last_name) = input.last_name {
            model.last_name = Set(Some(last_name));
        }
        if let Some(bio) = input.bio {
            model.bio = Set(Some(bio));
        }
        if let Some(profile_photo) = input.profile_photo {
            model.profile_photo = Set(Some(profile_photo));
        }
        if let Some(date_of_birth) = input.date_of_birth {
            model.date_of_birth = Set(Some(date_of_birth));
        }
        if let Some(phone_number) = input.phone_number {
            model.phone_number = Set(Some(phone_number));
        }
        model.updated_at = Set(Some(Utc::now().into()));

        self.user_repo.update(model).await
    }

    /// Change the caller's password after verifying the current one.
    pub async fn change_password(&self, user_id: i32, input: ChangePasswordInput) -> AppResult<()> {
        input.validate()?;

        let existing = self.user_repo.get_by_id(user_id).await?;

        if !auth::verify_password(&input.current_password, &existing.password_hash) {
            return Err(AppError::Unauthorized);
        }

        let password_hash = auth::hash_password(&input.new_password)?;
        let mut model: user::ActiveModel = existing.into();
        model.password_hash = Set(password_hash);
        model.updated_at = Set(Some(Utc::now().into()));

        self.user_repo.update(model).await?;
        tracing::info!(user_id, "Password changed");
        Ok(())
    }
}
