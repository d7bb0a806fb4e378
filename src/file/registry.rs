//! File registry for File Drawer.
//!
//! Coordinates file metadata with the blob store:
//! - Uploads validate the target folder before any content is stored
//! - Failed uploads leave neither a record nor a blob behind
//! - Deletes remove the blob best-effort and always remove the record

use sqlx::SqlitePool;
use tracing::{error, info, warn};

use super::blob::BlobStore;
use super::folder::FolderRepository;
use super::metadata::{FileMetadata, FileRepository, NewFile};
use super::{parse_id, FolderFilter, FolderTarget};
use crate::{DrawerError, Result};

/// Content and attributes of an upload.
#[derive(Debug, Clone)]
pub struct NewUpload {
    /// Original filename.
    pub filename: String,
    /// MIME type.
    pub mime_type: String,
    /// File content.
    pub content: Vec<u8>,
}

impl NewUpload {
    /// Create a new upload.
    pub fn new(
        filename: impl Into<String>,
        mime_type: impl Into<String>,
        content: Vec<u8>,
    ) -> Self {
        Self {
            filename: filename.into(),
            mime_type: mime_type.into(),
            content,
        }
    }
}

/// File operations scoped to one owner at a time.
pub struct FileRegistry<'a> {
    pool: &'a SqlitePool,
    blobs: &'a dyn BlobStore,
}

impl<'a> FileRegistry<'a> {
    /// Create a new FileRegistry.
    pub fn new(pool: &'a SqlitePool, blobs: &'a dyn BlobStore) -> Self {
        Self { pool, blobs }
    }

    fn not_found() -> DrawerError {
        DrawerError::NotFound("File not found or access denied.".to_string())
    }

    /// Resolve a target to a folder id owned by `owner_id`.
    async fn resolve_target(&self, owner_id: i64, target: FolderTarget) -> Result<Option<i64>> {
        match target {
            FolderTarget::Root => Ok(None),
            FolderTarget::Folder(folder_id) => {
                FolderRepository::new(self.pool)
                    .get_owned(folder_id, owner_id)
                    .await?
                    .ok_or_else(|| {
                        DrawerError::NotFound("Target folder not found or access denied.".to_string())
                    })?;
                Ok(Some(folder_id))
            }
        }
    }

    /// List the owner's files.
    ///
    /// `folder_filter` is the raw `folderId` query value: absent for all
    /// files, `"root"` for unfiled ones, or a folder id. The folder itself is
    /// not checked for existence.
    pub async fn list(&self, owner_id: i64, folder_filter: Option<&str>) -> Result<Vec<FileMetadata>> {
        let filter = FolderFilter::parse(folder_filter)?;
        FileRepository::new(self.pool).list(owner_id, filter).await
    }

    /// Get one of the owner's files.
    pub async fn get(&self, owner_id: i64, file_id: &str) -> Result<FileMetadata> {
        let file_id = parse_id(file_id, "file")?;
        FileRepository::new(self.pool)
            .get_owned(file_id, owner_id)
            .await?
            .ok_or_else(Self::not_found)
    }

    /// Upload a file into an optional target folder.
    ///
    /// # Errors
    ///
    /// - `InvalidInput` if the target folder id is malformed
    /// - `NotFound` if the target folder is missing or foreign
    /// - `UploadFailed` if the blob store rejects the content
    pub async fn upload(
        &self,
        owner_id: i64,
        upload: NewUpload,
        target_folder: Option<&str>,
    ) -> Result<FileMetadata> {
        let target = FolderTarget::parse(target_folder)?;
        let folder_id = self.resolve_target(owner_id, target).await?;

        let blob = self
            .blobs
            .store(&upload.content, &upload.filename)
            .await
            .map_err(|e| {
                error!(user_id = owner_id, error = %e, "Blob upload failed");
                DrawerError::UploadFailed(e.to_string())
            })?;

        let new_file = NewFile {
            filename: upload.filename,
            stored_id: blob.stored_id.clone(),
            url: blob.url,
            mime_type: upload.mime_type,
            size: upload.content.len() as i64,
            user_id: owner_id,
            folder_id,
        };

        let file = match FileRepository::new(self.pool).create(&new_file).await {
            Ok(file) => file,
            Err(e) => {
                error!(user_id = owner_id, error = %e, "Failed to record uploaded file");
                if let Err(cleanup) = self.blobs.remove(&blob.stored_id).await {
                    warn!(stored_id = %blob.stored_id, error = %cleanup, "Failed to remove orphaned blob");
                }
                return Err(e);
            }
        };

        info!(
            user_id = owner_id,
            file_id = file.id,
            folder_id = ?file.folder_id,
            size = file.size,
            "File uploaded"
        );
        Ok(file)
    }

    /// Move a file to another folder, or to the root.
    ///
    /// `target_folder` of `None` or `"root"` means the root. Any other value,
    /// blank included, must be a folder id.
    pub async fn move_file(
        &self,
        owner_id: i64,
        file_id: &str,
        target_folder: Option<&str>,
    ) -> Result<FileMetadata> {
        let file_id = parse_id(file_id, "file")?;
        let target = FolderTarget::parse_move(target_folder)?;
        let folder_id = self.resolve_target(owner_id, target).await?;

        let file = FileRepository::new(self.pool)
            .set_folder(file_id, owner_id, folder_id)
            .await?
            .ok_or_else(Self::not_found)?;

        info!(user_id = owner_id, file_id, folder_id = ?folder_id, "File moved");
        Ok(file)
    }

    /// Delete a file and its content.
    ///
    /// A blob store failure is logged and does not stop the record from
    /// being deleted.
    pub async fn delete(&self, owner_id: i64, file_id: &str) -> Result<()> {
        let file_id = parse_id(file_id, "file")?;
        let repo = FileRepository::new(self.pool);

        let file = repo
            .get_owned(file_id, owner_id)
            .await?
            .ok_or_else(Self::not_found)?;

        if let Err(e) = self.blobs.remove(&file.stored_id).await {
            warn!(
                file_id,
                stored_id = %file.stored_id,
                error = %e,
                "Blob deletion failed; removing metadata anyway"
            );
        }

        if !repo.delete_owned(file_id, owner_id).await? {
            return Err(Self::not_found());
        }

        info!(user_id = owner_id, file_id, "File deleted");
        Ok(())
    }
}
