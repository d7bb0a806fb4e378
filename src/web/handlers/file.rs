//! File handlers for Web API.

use axum::{
    body::Body,
    extract::{multipart::MultipartError, Multipart, Path, Query, State},
    http::{header, StatusCode},
    response::Response,
    Json,
};
use std::sync::Arc;

use crate::file::{FileRegistry, NewUpload};
use crate::web::dto::{
    ApiResponse, FileResponse, ListFilesQuery, MoveFileRequest, ValidatedJson,
};
use crate::web::error::ApiError;
use crate::web::handlers::AppState;
use crate::web::middleware::AuthUser;

/// Multipart field carrying the file.
const FILE_FIELD: &str = "uploadedFile";

/// Multipart field carrying the target folder.
const FOLDER_FIELD: &str = "folderId";

/// Content type for an upload: the declared one, else a guess from the name.
fn resolve_mime_type(declared: Option<&str>, filename: &str) -> String {
    match declared.map(str::trim) {
        Some(mime) if !mime.is_empty() => mime.to_string(),
        _ => mime_guess::from_path(filename)
            .first_or_octet_stream()
            .to_string(),
    }
}

fn too_large(max_bytes: usize) -> ApiError {
    ApiError::payload_too_large(format!(
        "File too large (max {}MB)",
        max_bytes / 1024 / 1024
    ))
}

fn multipart_error(e: MultipartError, max_bytes: usize) -> ApiError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        return too_large(max_bytes);
    }
    tracing::warn!("Failed to read multipart data: {}", e);
    ApiError::bad_request("Invalid multipart data")
}

/// GET /api/files - List the caller's files.
#[utoipa::path(
    get,
    path = "/api/files",
    tag = "files",
    params(ListFilesQuery),
    responses(
        (status = 200, description = "Files, newest first", body = Vec<FileResponse>),
        (status = 400, description = "Invalid folder ID"),
        (status = 401, description = "Unauthorized")
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn list_files(
    State(state): State<Arc<AppState>>,
    AuthUser(principal): AuthUser,
    Query(query): Query<ListFilesQuery>,
) -> Result<Json<ApiResponse<Vec<FileResponse>>>, ApiError> {
    let files = FileRegistry::new(state.db.pool(), state.blobs.as_ref())
        .list(principal.user_id, query.folder_id.as_deref())
        .await?;

    let response = files.into_iter().map(FileResponse::from).collect();
    Ok(Json(ApiResponse::new(response)))
}

/// POST /api/files - Upload a file.
///
/// Request body: multipart/form-data with an `uploadedFile` part and an
/// optional `folderId` field.
#[utoipa::path(
    post,
    path = "/api/files",
    tag = "files",
    request_body(content = crate::web::dto::UploadFileForm, content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "File uploaded", body = FileResponse),
        (status = 400, description = "No file uploaded or invalid folder ID"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Target folder not found or access denied"),
        (status = 413, description = "File too large"),
        (status = 500, description = "Blob storage failed")
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn upload_file(
    State(state): State<Arc<AppState>>,
    AuthUser(principal): AuthUser,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<ApiResponse<FileResponse>>), ApiError> {
    let max_bytes = state.max_upload_size;
    let mut upload: Option<NewUpload> = None;
    let mut folder_id: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error(e, max_bytes))?
    {
        let name = field.name().unwrap_or("").to_string();

        match name.as_str() {
            FILE_FIELD => {
                let filename = field.file_name().unwrap_or("").trim().to_string();
                let mime_type = resolve_mime_type(field.content_type(), &filename);
                let content = field
                    .bytes()
                    .await
                    .map_err(|e| multipart_error(e, max_bytes))?;

                if !filename.is_empty() {
                    upload = Some(NewUpload::new(filename, mime_type, content.to_vec()));
                }
            }
            FOLDER_FIELD => {
                folder_id = Some(
                    field
                        .text()
                        .await
                        .map_err(|e| multipart_error(e, max_bytes))?,
                );
            }
            _ => {}
        }
    }

    let upload = upload.ok_or_else(|| ApiError::bad_request("No file uploaded"))?;
    if upload.content.len() > max_bytes {
        return Err(too_large(max_bytes));
    }

    let file = FileRegistry::new(state.db.pool(), state.blobs.as_ref())
        .upload(principal.user_id, upload, folder_id.as_deref())
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::new(FileResponse::from(file))),
    ))
}

/// GET /api/files/:id - Get file metadata.
#[utoipa::path(
    get,
    path = "/api/files/{id}",
    tag = "files",
    params(
        ("id" = String, Path, description = "File ID")
    ),
    responses(
        (status = 200, description = "File metadata", body = FileResponse),
        (status = 400, description = "Invalid file ID"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "File not found or access denied")
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn get_file(
    State(state): State<Arc<AppState>>,
    AuthUser(principal): AuthUser,
    Path(file_id): Path<String>,
) -> Result<Json<ApiResponse<FileResponse>>, ApiError> {
    let file = FileRegistry::new(state.db.pool(), state.blobs.as_ref())
        .get(principal.user_id, &file_id)
        .await?;

    Ok(Json(ApiResponse::new(FileResponse::from(file))))
}

/// PATCH /api/files/:id - Move a file to a folder or to the root.
#[utoipa::path(
    patch,
    path = "/api/files/{id}",
    tag = "files",
    params(
        ("id" = String, Path, description = "File ID")
    ),
    request_body = MoveFileRequest,
    responses(
        (status = 200, description = "File moved", body = FileResponse),
        (status = 400, description = "Invalid file or folder ID"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "File or target folder not found")
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn move_file(
    State(state): State<Arc<AppState>>,
    AuthUser(principal): AuthUser,
    Path(file_id): Path<String>,
    ValidatedJson(req): ValidatedJson<MoveFileRequest>,
) -> Result<Json<ApiResponse<FileResponse>>, ApiError> {
    let target = req.target()?;
    let file = FileRegistry::new(state.db.pool(), state.blobs.as_ref())
        .move_file(principal.user_id, &file_id, target.as_deref())
        .await?;

    Ok(Json(ApiResponse::new(FileResponse::from(file))))
}

/// DELETE /api/files/:id - Delete a file and its content.
#[utoipa::path(
    delete,
    path = "/api/files/{id}",
    tag = "files",
    params(
        ("id" = String, Path, description = "File ID")
    ),
    responses(
        (status = 200, description = "File deleted"),
        (status = 400, description = "Invalid file ID"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "File not found or access denied")
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn delete_file(
    State(state): State<Arc<AppState>>,
    AuthUser(principal): AuthUser,
    Path(file_id): Path<String>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    FileRegistry::new(state.db.pool(), state.blobs.as_ref())
        .delete(principal.user_id, &file_id)
        .await?;

    Ok(Json(ApiResponse::new(())))
}

/// GET /blobs/:stored_id - Serve content from the blob store.
#[utoipa::path(
    get,
    path = "/blobs/{stored_id}",
    tag = "files",
    params(
        ("stored_id" = String, Path, description = "Blob store identifier")
    ),
    responses(
        (status = 200, description = "File content", content_type = "application/octet-stream"),
        (status = 404, description = "Blob not found")
    )
)]
pub async fn download_blob(
    State(state): State<Arc<AppState>>,
    Path(stored_id): Path<String>,
) -> Result<Response<Body>, ApiError> {
    let content = state
        .blobs
        .fetch(&stored_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Blob not found"))?;

    let content_type = mime_guess::from_path(&stored_id)
        .first_or_octet_stream()
        .to_string();

    Response::builder()
        .header(header::CONTENT_TYPE, content_type)
        .header(header::CONTENT_LENGTH, content.len())
        .body(Body::from(content))
        .map_err(|e| {
            tracing::error!("Failed to build response: {}", e);
            ApiError::internal("Failed to build response")
        })
}
