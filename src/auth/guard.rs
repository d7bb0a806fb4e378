//! Access guard: resolves the caller of a request.

use axum::http::{header::AUTHORIZATION, HeaderMap};

use super::token::JwtKeys;
use crate::{DrawerError, Result};

/// Authenticated caller identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    /// User ID; every owner-scoped lookup uses this.
    pub user_id: i64,
    /// Username at the time the token was issued.
    pub username: String,
}

/// Extract a bearer token from the `Authorization` header.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

/// Resolve the caller of a request.
///
/// Fails with `DrawerError::Auth` when no valid token is present. Performs no
/// data access.
pub fn resolve_principal(headers: &HeaderMap, keys: &JwtKeys) -> Result<Principal> {
    let token = bearer_token(headers)
        .ok_or_else(|| DrawerError::Auth("Authentication required".to_string()))?;
    let claims = keys.verify(token)?;

    Ok(Principal {
        user_id: claims.sub,
        username: claims.username,
    })
}
