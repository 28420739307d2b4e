//! Authentication service: credential checks and access token handling.

use argon2::{
    Argon2, PasswordVerifier,
    password_hash::{PasswordHash, PasswordHasher, SaltString, rand_core::OsRng},
};
use chrono::Utc;
use forkful_common::{AppError, AppResult, AuthConfig};
use forkful_db::{entities::user, repositories::UserRepository};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// Hash a password with Argon2id and a fresh random salt.
pub fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AppError::Internal(format!("Failed to hash password: {e}")))?;
    Ok(hash.to_string())
}

/// Verify a password against a stored hash.
///
/// A digest that fails to parse counts as a mismatch, not an error: a
/// corrupt stored hash must not turn login into a server fault.
#[must_use]
pub fn verify_password(password: &str, hash: &str) -> bool {
    let Ok(parsed_hash) = PasswordHash::new(hash) else {
        tracing::debug!("Stored password digest failed to parse");
        return false;
    };

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok()
}

/// Access token claims.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Username of the token holder.
    pub sub: String,
    /// User ID of the token holder.
    pub id: i32,
    /// Role at issue time.
    pub role: String,
    /// Expiry as a Unix timestamp.
    pub exp: i64,
}

/// The authenticated caller, as decoded from a verified token.
#[derive(Debug, Clone)]
pub struct Identity {
    /// User ID.
    pub id: i32,
    /// Username.
    pub username: String,
    /// Role at token issue time.
    pub role: user::UserRole,
}

impl Identity {
    /// Return whether the caller holds the admin role.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.role == user::UserRole::Admin
    }

    /// Reject non-admin callers.
    pub fn require_admin(&self) -> AppResult<()> {
        if self.is_admin() {
            Ok(())
        } else {
            Err(AppError::Forbidden("Admin access required".to_string()))
        }
    }
}

/// Issued token envelope returned to clients.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenResponse {
    /// The signed access token.
    pub access_token: String,
    /// Always `Bearer`.
    pub token_type: String,
    /// Lifetime in seconds.
    pub expires_in: i64,
}

/// Authentication service for business logic.
#[derive(Clone)]
pub struct AuthService {
    user_repo: UserRepository,
    config: AuthConfig,
}

impl AuthService {
    /// Create a new authentication service.
    #[must_use]
    pub const fn new(user_repo: UserRepository, config: AuthConfig) -> Self {
        Self { user_repo, config }
    }

    /// Authenticate by username (or email) and password, issuing a token.
    ///
    /// Blocked accounts are rejected even with valid credentials.
    pub async fn login(&self, username: &str, password: &str) -> AppResult<TokenResponse> {
        let user = self
            .user_repo
            .find_by_username_or_email(username, username)
            .await?
            .ok_or(AppError::Unauthorized)?;

        if !verify_password(password, &user.password_hash) {
            return Err(AppError::Unauthorized);
        }

        if user.is_blocked {
            return Err(AppError::Forbidden("Account is blocked".to_string()));
        }

        self.issue_token(&user)
    }

    /// Sign a fresh access token for a user.
    pub fn issue_token(&self, user: &user::Model) -> AppResult<TokenResponse> {
        let ttl_minutes = i64::try_from(self.config.token_ttl_minutes)
            .map_err(|e| AppError::Config(format!("Invalid token TTL: {e}")))?;
        let expires_in = ttl_minutes * 60;
        let exp = Utc::now().timestamp() + expires_in;

        let claims = Claims {
            sub: user.username.clone(),
            id: user.id,
            role: role_name(user.role).to_string(),
            exp,
        };

        let token = jsonwebtoken::encode(
            &Header::new(self.algorithm()?),
            &claims,
            &EncodingKey::from_secret(self.config.token_secret.as_bytes()),
        )
        .map_err(|e| AppError::Internal(format!("Failed to sign token: {e}")))?;

        Ok(TokenResponse {
            access_token: token,
            token_type: "Bearer".to_string(),
            expires_in,
        })
    }

    /// Decode and verify an access token.
    ///
    /// Any defect (bad signature, expiry, malformed claims) collapses to
    /// [`AppError::Unauthorized`] so callers cannot distinguish failure modes.
    pub fn verify_token(&self, token: &str) -> AppResult<Identity> {
        let mut validation = Validation::new(self.algorithm()?);
        validation.leeway = 0;

        let data = jsonwebtoken::decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.config.token_secret.as_bytes()),
            &validation,
        )
        .map_err(|_| AppError::Unauthorized)?;

        let role = parse_role(&data.claims.role).ok_or(AppError::Unauthorized)?;

        Ok(Identity {
            id: data.claims.id,
            username: data.claims.sub,
            role,
        })
    }

    fn algorithm(&self) -> AppResult<Algorithm> {
        match self.config.token_algorithm.as_str() {
            "HS256" => Ok(Algorithm::HS256),
            "HS384" => Ok(Algorithm::HS384),
            "HS512" => Ok(Algorithm::HS512),
            other => Err(AppError::Config(format!(
                "Unsupported token algorithm: {other}"
            ))),
        }
    }
}

const fn role_name(role: user::UserRole) -> &'static str {
    match role {
        user::UserRole::Admin => "admin",
        user::UserRole::User => "user",
    }
}

fn parse_role(name: &str) -> Option<user::UserRole> {
    match name {
        "admin" => Some(user::UserRole::Admin),
        "user" => Some(user::UserRole::User),
        _ => None,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, MockDatabase};
    use std::sync::Arc;

    fn test_config() -> AuthConfig {
        AuthConfig {
            token_secret: "test-secret-at-least-32-bytes-long!".to_string(),
            token_algorithm: "HS256".to_string(),
            token_ttl_minutes: 20,
        }
    }

    fn test_service() -> AuthService {
        let db = Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());
        AuthService::new(UserRepository::new(db), test_config())
    }

    fn create_test_user(id: i32, username: &str, password_hash: &str) -> user::Model {
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
            password_hash: password_hash.to_string(),
            role: user::UserRole::User,
            followers_count: 0,
            following_count: 0,
            is_blocked: false,
            created_at: Utc::now().into(),
            updated_at: None,
        }
    }

    #[test]
    fn test_password_round_trip() {
        let hash = hash_password("hunter2longenough").unwrap();

        assert!(verify_password("hunter2longenough", &hash));
        assert!(!verify_password("hunter2longenouhg", &hash));
    }

    #[test]
    fn test_malformed_digest_is_a_mismatch() {
        assert!(!verify_password("password", "not-a-valid-phc-digest"));
        assert!(!verify_password("password", ""));
    }

    #[test]
    fn test_hashes_are_salted() {
        let h1 = hash_password("same-password").unwrap();
        let h2 = hash_password("same-password").unwrap();

        assert_ne!(h1, h2);
    }

    #[test]
    fn test_token_round_trip() {
        let service = test_service();
        let user = create_test_user(7, "alice", "$argon2id$dummy");

        let token = service.issue_token(&user).unwrap();
        assert_eq!(token.token_type, "Bearer");
        assert_eq!(token.expires_in, 20 * 60);

        let identity = service.verify_token(&token.access_token).unwrap();
        assert_eq!(identity.id, 7);
        assert_eq!(identity.username, "alice");
        assert_eq!(identity.role, user::UserRole::User);
    }

    #[test]
    fn test_token_wrong_secret_rejected() {
        let service = test_service();
        let user = create_test_user(7, "alice", "$argon2id$dummy");
        let token = service.issue_token(&user).unwrap();

        let db = Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());
        let other = AuthService::new(
            UserRepository::new(db),
            AuthConfig {
                token_secret: "a-completely-different-secret-value".to_string(),
                ..test_config()
            },
        );

        assert!(matches!(
            other.verify_token(&token.access_token),
            Err(AppError::Unauthorized)
        ));
    }

    #[test]
    fn test_expired_token_rejected() {
        let service = test_service();

        // Signed with the right secret but already past its expiry
        let claims = Claims {
            sub: "alice".to_string(),
            id: 7,
            role: "user".to_string(),
            exp: Utc::now().timestamp() - 120,
        };
        let token = jsonwebtoken::encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(test_config().token_secret.as_bytes()),
        )
        .unwrap();

        assert!(matches!(
            service.verify_token(&token),
            Err(AppError::Unauthorized)
        ));
    }

    #[test]
    fn test_garbage_token_rejected() {
        let service = test_service();

        assert!(matches!(
            service.verify_token("not.a.token"),
            Err(AppError::Unauthorized)
        ));
    }

    #[test]
    fn test_require_admin() {
        let admin = Identity {
            id: 1,
            username: "root".to_string(),
            role: user::UserRole::Admin,
        };
        let plain = Identity {
            id: 2,
            username: "alice".to_string(),
            role: user::UserRole::User,
        };

        assert!(admin.require_admin().is_ok());
        assert!(matches!(
            plain.require_admin(),
            Err(AppError::Forbidden(_))
        ));
    }

    #[tokio::test]
    async fn test_login_unknown_user() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<user::Model>::new()])
                .into_connection(),
        );
        let service = AuthService::new(UserRepository::new(db), test_config());

        assert!(matches!(
            service.login("ghost", "whatever").await,
            Err(AppError::Unauthorized)
        ));
    }

    #[tokio::test]
    async fn test_login_blocked_account() {
        let hash = hash_password("correct-password").unwrap();
        let mut user = create_test_user(3, "mallory", &hash);
        user.is_blocked = true;

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[user]])
                .into_connection(),
        );
        let service = AuthService::new(UserRepository::new(db), test_config());

        assert!(matches!(
            service.login("mallory", "correct-password").await,
            Err(AppError::Forbidden(_))
        ));
    }

    #[tokio::test]
    async fn test_login_wrong_password() {
        let hash = hash_password("correct-password").unwrap();
        let user = create_test_user(3, "alice", &hash);

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[user]])
                .into_connection(),
        );
        let service = AuthService::new(UserRepository::new(db), test_config());

        assert!(matches!(
            service.login("alice", "wrong-password").await,
            Err(AppError::Unauthorized)
        ));
    }
}
