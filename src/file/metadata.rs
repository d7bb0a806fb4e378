//! File metadata types and repository for File Drawer.

use sqlx::SqlitePool;

use super::FolderFilter;
use crate::{DrawerError, Result};

const FILE_COLUMNS: &str =
    "id, filename, stored_id, url, mime_type, size, user_id, folder_id, created_at";

/// Metadata for an uploaded file. The content itself lives in the blob store.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct FileMetadata {
    /// Unique file ID.
    pub id: i64,
    /// Original filename (display name).
    pub filename: String,
    /// Identifier assigned by the blob store.
    pub stored_id: String,
    /// Retrieval URL assigned by the blob store.
    pub url: String,
    /// MIME type reported at upload.
    pub mime_type: String,
    /// File size in bytes.
    pub size: i64,
    /// Owning user ID. Never changes after creation.
    pub user_id: i64,
    /// Folder this file is in (None for root).
    pub folder_id: Option<i64>,
    /// When the file was uploaded.
    pub created_at: String,
}

/// Data for creating a new file entry.
#[derive(Debug, Clone)]
pub struct NewFile {
    /// Original filename (display name).
    pub filename: String,
    /// Identifier assigned by the blob store.
    pub stored_id: String,
    /// Retrieval URL assigned by the blob store.
    pub url: String,
    /// MIME type.
    pub mime_type: String,
    /// File size in bytes.
    pub size: i64,
    /// Owning user ID.
    pub user_id: i64,
    /// Target folder (None for root).
    pub folder_id: Option<i64>,
}

/// Repository for file metadata operations.
pub struct FileRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> FileRepository<'a> {
    /// Create a new FileRepository with the given database pool reference.
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Create a new file entry.
    pub async fn create(&self, file: &NewFile) -> Result<FileMetadata> {
        let result = sqlx::query(
            "INSERT INTO files (filename, stored_id, url, mime_type, size, user_id, folder_id)
             VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&file.filename)
        .bind(&file.stored_id)
        .bind(&file.url)
        .bind(&file.mime_type)
        .bind(file.size)
        .bind(file.user_id)
        .bind(file.folder_id)
        .execute(self.pool)
        .await?;

        let id = result.last_insert_rowid();
        self.get_owned(id, file.user_id)
            .await?
            .ok_or_else(|| DrawerError::NotFound("file".to_string()))
    }

    /// Get a file by ID if it belongs to the given user.
    pub async fn get_owned(&self, id: i64, user_id: i64) -> Result<Option<FileMetadata>> {
        let file = sqlx::query_as::<_, FileMetadata>(&format!(
            "SELECT {FILE_COLUMNS} FROM files WHERE id = ? AND user_id = ?"
        ))
        .bind(id)
        .bind(user_id)
        .fetch_optional(self.pool)
        .await?;

        Ok(file)
    }

    /// List the user's files, newest first.
    pub async fn list(&self, user_id: i64, filter: FolderFilter) -> Result<Vec<FileMetadata>> {
        let order = "ORDER BY created_at DESC, id DESC";
        let files = match filter {
            FolderFilter::All => {
                sqlx::query_as::<_, FileMetadata>(&format!(
                    "SELECT {FILE_COLUMNS} FROM files WHERE user_id = ? {order}"
                ))
                .bind(user_id)
                .fetch_all(self.pool)
                .await?
            }
            FolderFilter::Root => {
                sqlx::query_as::<_, FileMetadata>(&format!(
                    "SELECT {FILE_COLUMNS} FROM files WHERE user_id = ? AND folder_id IS NULL {order}"
                ))
                .bind(user_id)
                .fetch_all(self.pool)
                .await?
            }
            FolderFilter::Folder(folder_id) => {
                sqlx::query_as::<_, FileMetadata>(&format!(
                    "SELECT {FILE_COLUMNS} FROM files WHERE user_id = ? AND folder_id = ? {order}"
                ))
                .bind(user_id)
                .bind(folder_id)
                .fetch_all(self.pool)
                .await?
            }
        };

        Ok(files)
    }

    /// List files in a folder ordered by filename.
    pub async fn list_by_folder(&self, folder_id: i64) -> Result<Vec<FileMetadata>> {
        let files = sqlx::query_as::<_, FileMetadata>(&format!(
            "SELECT {FILE_COLUMNS} FROM files WHERE folder_id = ? ORDER BY filename ASC, id ASC"
        ))
        .bind(folder_id)
        .fetch_all(self.pool)
        .await?;

        Ok(files)
    }

    /// Point a file of the user at another folder (or the root).
    ///
    /// Only `folder_id` is written; the owner never changes.
    pub async fn set_folder(
        &self,
        id: i64,
        user_id: i64,
        folder_id: Option<i64>,
    ) -> Result<Option<FileMetadata>> {
        let result = sqlx::query("UPDATE files SET folder_id = ? WHERE id = ? AND user_id = ?")
            .bind(folder_id)
            .bind(id)
            .bind(user_id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }

        self.get_owned(id, user_id).await
    }

    /// Delete a file of the user.
    pub async fn delete_owned(&self, id: i64, user_id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM files WHERE id = ? AND user_id = ?")
            .bind(id)
            .bind(user_id)
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{NewUser, UserRepository};
    use crate::file::{FolderRepository, NewFolder};
    use crate::Database;

    async fn setup_db() -> (Database, i64, i64) {
        let db = Database::open_in_memory().await.unwrap();
        let users = UserRepository::new(db.pool());
        let alice = users.create(&NewUser::new("alice", "hash")).await.unwrap();
        let bob = users.create(&NewUser::new("bob", "hash")).await.unwrap();
        (db, alice.id, bob.id)
    }

    fn new_file(user_id: i64, filename: &str, folder_id: Option<i64>) -> NewFile {
        NewFile {
            filename: filename.to_string(),
            stored_id: format!("{user_id}-{filename}"),
            url: format!("http://blobs/{user_id}-{filename}"),
            mime_type: "application/pdf".to_string(),
            size: 128,
            user_id,
            folder_id,
        }
    }

    #[tokio::test]
    async fn test_create_and_get_file() {
        let (db, alice, bob) = setup_db().await;
        let repo = FileRepository::new(db.pool());

        let file = repo.create(&new_file(alice, "a.pdf", None)).await.unwrap();
        assert_eq!(file.filename, "a.pdf");
        assert_eq!(file.stored_id, format!("{alice}-a.pdf"));
        assert_eq!(file.size, 128);
        assert_eq!(file.user_id, alice);
        assert!(file.folder_id.is_none());

        assert!(repo.get_owned(file.id, alice).await.unwrap().is_some());
        assert!(repo.get_owned(file.id, bob).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_filters() {
        let (db, alice, bob) = setup_db().await;
        let folder = FolderRepository::new(db.pool())
            .create(&NewFolder::new(alice, "Docs"))
            .await
            .unwrap();
        let repo = FileRepository::new(db.pool());

        let root = repo.create(&new_file(alice, "root.txt", None)).await.unwrap();
        let inside = repo
            .create(&new_file(alice, "inside.txt", Some(folder.id)))
            .await
            .unwrap();
        repo.create(&new_file(bob, "bob.txt", None)).await.unwrap();

        let all = repo.list(alice, FolderFilter::All).await.unwrap();
        assert_eq!(all.len(), 2);
        // Newest first
        assert_eq!(all[0].id, inside.id);
        assert_eq!(all[1].id, root.id);

        let roots = repo.list(alice, FolderFilter::Root).await.unwrap();
        assert_eq!(roots.len(), 1);
        assert_eq!(roots[0].id, root.id);

        let in_folder = repo
            .list(alice, FolderFilter::Folder(folder.id))
            .await
            .unwrap();
        assert_eq!(in_folder.len(), 1);
        assert_eq!(in_folder[0].id, inside.id);

        assert!(repo
            .list(alice, FolderFilter::Folder(9999))
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn test_list_by_folder_sorted_by_filename() {
        let (db, alice, _) = setup_db().await;
        let folder = FolderRepository::new(db.pool())
            .create(&NewFolder::new(alice, "Docs"))
            .await
            .unwrap();
        let repo = FileRepository::new(db.pool());

        repo.create(&new_file(alice, "c.txt", Some(folder.id)))
            .await
            .unwrap();
        repo.create(&new_file(alice, "a.txt", Some(folder.id)))
            .await
            .unwrap();
        repo.create(&new_file(alice, "b.txt", Some(folder.id)))
            .await
            .unwrap();

        let names: Vec<String> = repo
            .list_by_folder(folder.id)
            .await
            .unwrap()
            .into_iter()
            .map(|f| f.filename)
            .collect();
        assert_eq!(names, vec!["a.txt", "b.txt", "c.txt"]);
    }

    #[tokio::test]
    async fn test_set_folder_keeps_owner() {
        let (db, alice, bob) = setup_db().await;
        let folder = FolderRepository::new(db.pool())
            .create(&NewFolder::new(alice, "Docs"))
            .await
            .unwrap();
        let repo = FileRepository::new(db.pool());
        let file = repo.create(&new_file(alice, "a.pdf", None)).await.unwrap();

        let moved = repo
            .set_folder(file.id, alice, Some(folder.id))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(moved.folder_id, Some(folder.id));
        assert_eq!(moved.user_id, alice);

        assert!(repo.set_folder(file.id, bob, None).await.unwrap().is_none());

        let back = repo.set_folder(file.id, alice, None).await.unwrap().unwrap();
        assert!(back.folder_id.is_none());
    }

    #[tokio::test]
    async fn test_folder_delete_detaches_files() {
        let (db, alice, _) = setup_db().await;
        let folders = FolderRepository::new(db.pool());
        let folder = folders.create(&NewFolder::new(alice, "Docs")).await.unwrap();
        let repo = FileRepository::new(db.pool());
        let file = repo
            .create(&new_file(alice, "a.pdf", Some(folder.id)))
            .await
            .unwrap();

        assert!(folders.delete_owned(folder.id, alice).await.unwrap());

        let after = repo.get_owned(file.id, alice).await.unwrap().unwrap();
        assert!(after.folder_id.is_none());
    }

    #[tokio::test]
    async fn test_delete_owned() {
        let (db, alice, bob) = setup_db().await;
        let repo = FileRepository::new(db.pool());
        let file = repo.create(&new_file(alice, "a.pdf", None)).await.unwrap();

        assert!(!repo.delete_owned(file.id, bob).await.unwrap());
        assert!(repo.delete_owned(file.id, alice).await.unwrap());
        assert!(repo.get_owned(file.id, alice).await.unwrap().is_none());
    }
}
