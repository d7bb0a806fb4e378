//! Authentication handlers.

use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;
use tracing::info;

use crate::auth::{authenticate, register as register_user, RegistrationRequest};
use crate::db::UserRepository;
use crate::web::dto::{
    ApiResponse, LoginRequest, LoginResponse, MessageResponse, RegisterRequest, RegisterResponse,
    UserInfo, ValidatedJson,
};
use crate::web::error::ApiError;
use crate::web::handlers::AppState;
use crate::web::middleware::AuthUser;

/// POST /api/auth/register - User registration.
#[utoipa::path(
    post,
    path = "/api/auth/register",
    tag = "auth",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User registered", body = RegisterResponse),
        (status = 400, description = "Missing username or password, or invalid password"),
        (status = 409, description = "Username already exists")
    )
)]
pub async fn register(
    State(state): State<Arc<AppState>>,
    ValidatedJson(req): ValidatedJson<RegisterRequest>,
) -> Result<(StatusCode, Json<ApiResponse<RegisterResponse>>), ApiError> {
    let user = register_user(
        state.db.pool(),
        RegistrationRequest::new(req.username, req.password),
    )
    .await?;

    let response = RegisterResponse {
        message: "User registered successfully".to_string(),
        user_id: user.id,
    };

    Ok((StatusCode::CREATED, Json(ApiResponse::new(response))))
}

/// POST /api/auth/login - User login.
#[utoipa::path(
    post,
    path = "/api/auth/login",
    tag = "auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Logged in", body = LoginResponse),
        (status = 400, description = "Missing username or password"),
        (status = 401, description = "Invalid username or password")
    )
)]
pub async fn login(
    State(state): State<Arc<AppState>>,
    ValidatedJson(req): ValidatedJson<LoginRequest>,
) -> Result<Json<ApiResponse<LoginResponse>>, ApiError> {
    let user = authenticate(state.db.pool(), &req.username, &req.password).await?;
    let access_token = state.jwt.issue(user.id, &user.username)?;

    let response = LoginResponse {
        message: format!("Welcome {}!", user.username),
        access_token,
        token_type: "Bearer".to_string(),
        expires_in: state.jwt.expiry_secs(),
        user: UserInfo::from(user),
    };

    Ok(Json(ApiResponse::new(response)))
}

/// POST /api/auth/logout - User logout.
///
/// Access tokens are stateless; the client discards its token.
#[utoipa::path(
    post,
    path = "/api/auth/logout",
    tag = "auth",
    responses(
        (status = 200, description = "Logged out", body = MessageResponse),
        (status = 401, description = "Unauthorized")
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn logout(AuthUser(principal): AuthUser) -> Json<ApiResponse<MessageResponse>> {
    info!(
        user_id = principal.user_id,
        username = %principal.username,
        "User logged out"
    );

    Json(ApiResponse::new(MessageResponse::new(
        "You have been logged out successfully.",
    )))
}

/// GET /api/auth/me - Get current user info.
#[utoipa::path(
    get,
    path = "/api/auth/me",
    tag = "auth",
    responses(
        (status = 200, description = "Current user", body = UserInfo),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "User no longer exists")
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn me(
    State(state): State<Arc<AppState>>,
    AuthUser(principal): AuthUser,
) -> Result<Json<ApiResponse<UserInfo>>, ApiError> {
    let user = UserRepository::new(state.db.pool())
        .get_by_id(principal.user_id)
        .await?
        .ok_or_else(|| ApiError::not_found("User not found"))?;

    Ok(Json(ApiResponse::new(UserInfo::from(user))))
}
