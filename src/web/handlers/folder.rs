//! Folder handlers for Web API.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;

use crate::file::FolderDirectory;
use crate::web::dto::{
    ApiResponse, FolderDetailResponse, FolderNameRequest, FolderResponse, ValidatedJson,
};
use crate::web::error::ApiError;
use crate::web::handlers::AppState;
use crate::web::middleware::AuthUser;

/// GET /api/folders - List the caller's folders.
#[utoipa::path(
    get,
    path = "/api/folders",
    tag = "folders",
    responses(
        (status = 200, description = "Folders ordered by name", body = Vec<FolderResponse>),
        (status = 401, description = "Unauthorized")
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn list_folders(
    State(state): State<Arc<AppState>>,
    AuthUser(principal): AuthUser,
) -> Result<Json<ApiResponse<Vec<FolderResponse>>>, ApiError> {
    let folders = FolderDirectory::new(state.db.pool())
        .list(principal.user_id)
        .await?;

    let response = folders.into_iter().map(FolderResponse::from).collect();
    Ok(Json(ApiResponse::new(response)))
}

/// POST /api/folders - Create a folder.
#[utoipa::path(
    post,
    path = "/api/folders",
    tag = "folders",
    request_body = FolderNameRequest,
    responses(
        (status = 201, description = "Folder created", body = FolderResponse),
        (status = 400, description = "Missing or blank name"),
        (status = 401, description = "Unauthorized"),
        (status = 409, description = "Folder name already used")
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn create_folder(
    State(state): State<Arc<AppState>>,
    AuthUser(principal): AuthUser,
    ValidatedJson(req): ValidatedJson<FolderNameRequest>,
) -> Result<(StatusCode, Json<ApiResponse<FolderResponse>>), ApiError> {
    let folder = FolderDirectory::new(state.db.pool())
        .create(principal.user_id, req.name())
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::new(FolderResponse::from(folder))),
    ))
}

/// GET /api/folders/:id - Get a folder with its files.
#[utoipa::path(
    get,
    path = "/api/folders/{id}",
    tag = "folders",
    params(
        ("id" = String, Path, description = "Folder ID")
    ),
    responses(
        (status = 200, description = "Folder with files", body = FolderDetailResponse),
        (status = 400, description = "Invalid folder ID"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Folder not found or access denied")
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn get_folder(
    State(state): State<Arc<AppState>>,
    AuthUser(principal): AuthUser,
    Path(folder_id): Path<String>,
) -> Result<Json<ApiResponse<FolderDetailResponse>>, ApiError> {
    let detail = FolderDirectory::new(state.db.pool())
        .get(principal.user_id, &folder_id)
        .await?;

    Ok(Json(ApiResponse::new(FolderDetailResponse::from(detail))))
}

/// PATCH /api/folders/:id - Rename a folder.
#[utoipa::path(
    patch,
    path = "/api/folders/{id}",
    tag = "folders",
    params(
        ("id" = String, Path, description = "Folder ID")
    ),
    request_body = FolderNameRequest,
    responses(
        (status = 200, description = "Folder renamed", body = FolderResponse),
        (status = 400, description = "Invalid folder ID or name"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Folder not found or access denied"),
        (status = 409, description = "Folder name already used")
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn rename_folder(
    State(state): State<Arc<AppState>>,
    AuthUser(principal): AuthUser,
    Path(folder_id): Path<String>,
    ValidatedJson(req): ValidatedJson<FolderNameRequest>,
) -> Result<Json<ApiResponse<FolderResponse>>, ApiError> {
    let folder = FolderDirectory::new(state.db.pool())
        .rename(principal.user_id, &folder_id, req.name())
        .await?;

    Ok(Json(ApiResponse::new(FolderResponse::from(folder))))
}

/// DELETE /api/folders/:id - Delete a folder. Its files move to the root.
#[utoipa::path(
    delete,
    path = "/api/folders/{id}",
    tag = "folders",
    params(
        ("id" = String, Path, description = "Folder ID")
    ),
    responses(
        (status = 204, description = "Folder deleted"),
        (status = 400, description = "Invalid folder ID"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Folder not found or access denied")
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn delete_folder(
    State(state): State<Arc<AppState>>,
    AuthUser(principal): AuthUser,
    Path(folder_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    FolderDirectory::new(state.db.pool())
        .delete(principal.user_id, &folder_id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
