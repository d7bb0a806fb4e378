//! JWT authentication middleware.

use axum::{
    async_trait,
    body::Body,
    extract::FromRequestParts,
    http::{request::Parts, Request},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;

use crate::auth::{resolve_principal, JwtKeys, Principal};
use crate::web::error::ApiError;

/// Extractor for authenticated users.
///
/// Rejects with 401 before the handler runs when the request carries no
/// valid bearer token.
#[derive(Debug, Clone)]
pub struct AuthUser(pub Principal);

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        // Set by `jwt_auth`
        let keys = parts
            .extensions
            .get::<Arc<JwtKeys>>()
            .ok_or_else(|| ApiError::internal("JWT state not configured"))?;

        let principal = resolve_principal(&parts.headers, keys)?;
        Ok(AuthUser(principal))
    }
}

/// Middleware function to inject the JWT keys into request extensions.
pub async fn jwt_auth(keys: Arc<JwtKeys>, mut request: Request<Body>, next: Next) -> Response {
    request.extensions_mut().insert(keys);
    next.run(request).await
}
