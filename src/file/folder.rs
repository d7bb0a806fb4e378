//! Folder types and repository for File Drawer.
//!
//! Every query here is owner-scoped: a folder owned by someone else is
//! indistinguishable from a missing one.

use sqlx::SqlitePool;

use crate::{DrawerError, Result};

/// A folder owned by one user.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Folder {
    /// Unique folder ID.
    pub id: i64,
    /// Folder name (trimmed, unique per owner).
    pub name: String,
    /// Owning user ID.
    pub user_id: i64,
    /// When the folder was created.
    pub created_at: String,
}

/// Data for creating a new folder.
#[derive(Debug, Clone)]
pub struct NewFolder {
    /// Folder name, already trimmed.
    pub name: String,
    /// Owning user ID.
    pub user_id: i64,
}

impl NewFolder {
    /// Create a new NewFolder.
    pub fn new(user_id: i64, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            user_id,
        }
    }
}

/// Repository for folder operations.
pub struct FolderRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> FolderRepository<'a> {
    /// Create a new FolderRepository with the given database pool reference.
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Create a new folder.
    ///
    /// The `(user_id, name)` unique constraint is the final word on
    /// duplicates: a violation surfaces as `Conflict`.
    pub async fn create(&self, folder: &NewFolder) -> Result<Folder> {
        let result = sqlx::query("INSERT INTO folders (name, user_id) VALUES (?, ?)")
            .bind(&folder.name)
            .bind(folder.user_id)
            .execute(self.pool)
            .await
            .map_err(|e| DrawerError::from_write(e, "folder already exists"))?;

        let id = result.last_insert_rowid();
        self.get_owned(id, folder.user_id)
            .await?
            .ok_or_else(|| DrawerError::NotFound("folder".to_string()))
    }

    /// Get a folder by ID if it belongs to the given user.
    pub async fn get_owned(&self, id: i64, user_id: i64) -> Result<Option<Folder>> {
        let folder = sqlx::query_as::<_, Folder>(
            "SELECT id, name, user_id, created_at FROM folders WHERE id = ? AND user_id = ?",
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(self.pool)
        .await?;

        Ok(folder)
    }

    /// Find a folder of the user by exact name, optionally excluding one ID.
    pub async fn find_by_name(
        &self,
        user_id: i64,
        name: &str,
        exclude_id: Option<i64>,
    ) -> Result<Option<Folder>> {
        let folder = sqlx::query_as::<_, Folder>(
            "SELECT id, name, user_id, created_at FROM folders
             WHERE user_id = ? AND name = ? AND (? IS NULL OR id != ?)",
        )
        .bind(user_id)
        .bind(name)
        .bind(exclude_id)
        .bind(exclude_id)
        .fetch_optional(self.pool)
        .await?;

        Ok(folder)
    }

    /// List all folders of a user ordered by name.
    pub async fn list_by_owner(&self, user_id: i64) -> Result<Vec<Folder>> {
        let folders = sqlx::query_as::<_, Folder>(
            "SELECT id, name, user_id, created_at FROM folders
             WHERE user_id = ? ORDER BY name ASC, id ASC",
        )
        .bind(user_id)
        .fetch_all(self.pool)
        .await?;

        Ok(folders)
    }

    /// Rename a folder of the user.
    ///
    /// Returns `None` if the folder does not exist or is not owned.
    pub async fn rename(&self, id: i64, user_id: i64, name: &str) -> Result<Option<Folder>> {
        let result = sqlx::query("UPDATE folders SET name = ? WHERE id = ? AND user_id = ?")
            .bind(name)
            .bind(id)
            .bind(user_id)
            .execute(self.pool)
            .await
            .map_err(|e| {
                DrawerError::from_write(
                    e,
                    format!("Another folder with name \"{name}\" already exists."),
                )
            })?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }

        self.get_owned(id, user_id).await
    }

    /// Delete a folder if it belongs to the user.
    ///
    /// Ownership check and delete are one statement. Files in the folder are
    /// detached by the `ON DELETE SET NULL` foreign key.
    pub async fn delete_owned(&self, id: i64, user_id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM folders WHERE id = ? AND user_id = ?")
            .bind(id)
            .bind(user_id)
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
