//! Authentication module for File Drawer.
//!
//! This module provides password hashing, user registration, JWT access
//! tokens, and the access guard that turns a request into a `Principal`.

mod guard;
mod password;
mod registration;
mod token;

pub use guard::{bearer_token, resolve_principal, Principal};
pub use password::{
    hash_password, validate_password, verify_password, PasswordError, MAX_PASSWORD_LENGTH,
    MIN_PASSWORD_LENGTH,
};
pub use registration::{
    authenticate, register, RegistrationRequest, INVALID_CREDENTIALS, MAX_USERNAME_LENGTH,
};
pub use token::{JwtClaims, JwtKeys};
