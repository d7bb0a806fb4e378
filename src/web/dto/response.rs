//! Response DTOs for Web API.

use serde::Serialize;
use utoipa::ToSchema;

use crate::datetime::to_rfc3339;
use crate::db::User;
use crate::file::{FileMetadata, Folder, FolderWithFiles};

/// Generic API response wrapper.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    /// Response data.
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// Create a new API response.
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

/// Plain acknowledgement.
#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    /// Human-readable message.
    pub message: String,
}

impl MessageResponse {
    /// Create a new message response.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// User information in responses.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserInfo {
    /// User ID.
    pub id: i64,
    /// Username.
    pub username: String,
    /// Account creation time (RFC 3339).
    pub created_at: String,
}

impl From<User> for UserInfo {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            created_at: to_rfc3339(&user.created_at),
        }
    }
}

/// Registration response.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterResponse {
    /// Confirmation message.
    pub message: String,
    /// ID of the new user.
    pub user_id: i64,
}

/// Login response.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    /// Greeting.
    pub message: String,
    /// Access token (JWT), sent back as `Authorization: Bearer <token>`.
    pub access_token: String,
    /// Always "Bearer".
    pub token_type: String,
    /// Access token lifetime in seconds.
    pub expires_in: u64,
    /// The logged-in user.
    pub user: UserInfo,
}

/// Folder in responses.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FolderResponse {
    /// Folder ID.
    pub id: i64,
    /// Folder name.
    pub name: String,
    /// Owning user ID.
    pub owner_id: i64,
    /// Creation time (RFC 3339).
    pub created_at: String,
}

impl From<Folder> for FolderResponse {
    fn from(folder: Folder) -> Self {
        Self {
            id: folder.id,
            name: folder.name,
            owner_id: folder.user_id,
            created_at: to_rfc3339(&folder.created_at),
        }
    }
}

/// Folder with its files.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FolderDetailResponse {
    /// Folder ID.
    pub id: i64,
    /// Folder name.
    pub name: String,
    /// Owning user ID.
    pub owner_id: i64,
    /// Creation time (RFC 3339).
    pub created_at: String,
    /// Files in the folder, ordered by filename.
    pub files: Vec<FileResponse>,
}

impl From<FolderWithFiles> for FolderDetailResponse {
    fn from(detail: FolderWithFiles) -> Self {
        let folder = FolderResponse::from(detail.folder);
        Self {
            id: folder.id,
            name: folder.name,
            owner_id: folder.owner_id,
            created_at: folder.created_at,
            files: detail.files.into_iter().map(FileResponse::from).collect(),
        }
    }
}

/// File metadata in responses.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FileResponse {
    /// File ID.
    pub id: i64,
    /// Original filename.
    pub filename: String,
    /// Blob store identifier.
    pub stored_id: String,
    /// Retrieval URL.
    pub url: String,
    /// MIME type.
    pub mime_type: String,
    /// Size in bytes.
    pub size: i64,
    /// Owning user ID.
    pub owner_id: i64,
    /// Containing folder, or null for the root.
    pub folder_id: Option<i64>,
    /// Upload time (RFC 3339).
    pub created_at: String,
}

impl From<FileMetadata> for FileResponse {
    fn from(file: FileMetadata) -> Self {
        Self {
            id: file.id,
            filename: file.filename,
            stored_id: file.stored_id,
            url: file.url,
            mime_type: file.mime_type,
            size: file.size,
            owner_id: file.user_id,
            folder_id: file.folder_id,
            created_at: to_rfc3339(&file.created_at),
        }
    }
}
