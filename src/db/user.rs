//! User model for File Drawer.

/// A registered user.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct User {
    /// Unique user ID.
    pub id: i64,
    /// Unique username.
    pub username: String,
    /// Argon2 password hash.
    pub password: String,
    /// When the account was created.
    pub created_at: String,
}

/// Data for creating a new user.
#[derive(Debug, Clone)]
pub struct NewUser {
    /// Username.
    pub username: String,
    /// Password hash (already hashed).
    pub password: String,
}

impl NewUser {
    /// Create a new NewUser from a username and an already-hashed password.
    pub fn new(username: impl Into<String>, password_hash: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password_hash.into(),
        }
    }
}
