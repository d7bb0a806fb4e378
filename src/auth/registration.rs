//! User registration and credential checks for File Drawer.

use sqlx::SqlitePool;
use tracing::{info, warn};

use super::password::{hash_password, verify_password, PasswordError};
use crate::db::{NewUser, User, UserRepository};
use crate::{DrawerError, Result};

/// Maximum username length.
pub const MAX_USERNAME_LENGTH: usize = 64;

/// Message returned for every failed login, whatever the cause.
pub const INVALID_CREDENTIALS: &str = "Invalid username or password";

/// Registration request data.
#[derive(Debug, Clone)]
pub struct RegistrationRequest {
    /// Desired username.
    pub username: String,
    /// Password (8-128 characters).
    pub password: String,
}

impl RegistrationRequest {
    /// Create a new registration request.
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl From<PasswordError> for DrawerError {
    fn from(e: PasswordError) -> Self {
        match e {
            PasswordError::TooShort | PasswordError::TooLong => {
                DrawerError::InvalidInput(format!("Password error: {e}"))
            }
            PasswordError::VerificationFailed | PasswordError::InvalidHash => {
                DrawerError::Auth(INVALID_CREDENTIALS.to_string())
            }
            PasswordError::HashError(msg) => {
                DrawerError::Internal(format!("hashing failed: {msg}"))
            }
        }
    }
}

fn validate_username(username: &str) -> Result<()> {
    if username.is_empty() {
        return Err(DrawerError::InvalidInput(
            "Missing username or password".to_string(),
        ));
    }
    if username.chars().count() > MAX_USERNAME_LENGTH {
        return Err(DrawerError::InvalidInput(format!(
            "Username must be at most {MAX_USERNAME_LENGTH} characters"
        )));
    }
    if username.chars().any(char::is_control) {
        return Err(DrawerError::InvalidInput(
            "Username must not contain control characters".to_string(),
        ));
    }
    Ok(())
}

/// Register a new user.
///
/// # Errors
///
/// - `InvalidInput` for a missing username or an out-of-range password
/// - `Conflict` if the username is taken
pub async fn register(pool: &SqlitePool, request: RegistrationRequest) -> Result<User> {
    let username = request.username.trim();
    validate_username(username)?;
    if request.password.is_empty() {
        return Err(DrawerError::InvalidInput(
            "Missing username or password".to_string(),
        ));
    }

    let repo = UserRepository::new(pool);
    if repo.username_exists(username).await? {
        return Err(DrawerError::Conflict("Username already exists".to_string()));
    }

    let password_hash = hash_password(&request.password)?;
    let user = repo.create(&NewUser::new(username, password_hash)).await?;

    info!(username = %user.username, user_id = user.id, "New user registered");
    Ok(user)
}

/// Check a username and password.
///
/// Unknown users and wrong passwords fail with the same `Auth` error.
pub async fn authenticate(pool: &SqlitePool, username: &str, password: &str) -> Result<User> {
    let user = UserRepository::new(pool)
        .get_by_username(username.trim())
        .await?
        .ok_or_else(|| DrawerError::Auth(INVALID_CREDENTIALS.to_string()))?;

    if let Err(e) = verify_password(password, &user.password) {
        warn!(username = %user.username, "Failed login attempt");
        return Err(e.into());
    }

    info!(username = %user.username, user_id = user.id, "User logged in");
    Ok(user)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Database;

    #[tokio::test]
    async fn test_register_success() {
        let db = Database::open_in_memory().await.unwrap();

        let user = register(db.pool(), RegistrationRequest::new(" alice ", "password123"))
            .await
            .unwrap();
        assert_eq!(user.username, "alice");
        assert!(user.password.starts_with("$argon2id$"));
    }

    #[tokio::test]
    async fn test_register_duplicate_username() {
        let db = Database::open_in_memory().await.unwrap();
        register(db.pool(), RegistrationRequest::new("alice", "password123"))
            .await
            .unwrap();

        let err = register(db.pool(), RegistrationRequest::new("alice", "different123"))
            .await
            .unwrap_err();
        assert!(matches!(err, DrawerError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_register_invalid_input() {
        let db = Database::open_in_memory().await.unwrap();

        for (username, password) in [("", "password123"), ("  ", "password123"), ("bob", "")] {
            let err = register(db.pool(), RegistrationRequest::new(username, password))
                .await
                .unwrap_err();
            assert!(matches!(err, DrawerError::InvalidInput(_)));
        }

        let err = register(db.pool(), RegistrationRequest::new("bob", "short"))
            .await
            .unwrap_err();
        assert!(matches!(err, DrawerError::InvalidInput(_)));

        let long_name = "x".repeat(MAX_USERNAME_LENGTH + 1);
        assert!(register(db.pool(), RegistrationRequest::new(long_name, "password123"))
            .await
            .is_err());
    }

    #[tokio::test]
    async fn test_authenticate() {
        let db = Database::open_in_memory().await.unwrap();
        let user = register(db.pool(), RegistrationRequest::new("alice", "password123"))
            .await
            .unwrap();

        let found = authenticate(db.pool(), "alice", "password123").await.unwrap();
        assert_eq!(found.id, user.id);

        let wrong = authenticate(db.pool(), "alice", "wrongpass").await.unwrap_err();
        let unknown = authenticate(db.pool(), "nobody", "password123")
            .await
            .unwrap_err();
        assert!(matches!(wrong, DrawerError::Auth(_)));
        assert_eq!(wrong.to_string(), unknown.to_string());
    }
}
