//! Request DTOs for Web API.

use serde::Deserialize;
use serde_json::Value;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::{DrawerError, Result};

/// Login request.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    /// Username.
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,
    /// Password.
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// User registration request.
///
/// Missing fields deserialize as empty and are rejected with 400.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RegisterRequest {
    /// Username.
    #[serde(default)]
    #[validate(length(min = 1, message = "Missing username or password"))]
    pub username: String,
    /// Password (8-128 characters).
    #[serde(default)]
    #[validate(length(min = 1, message = "Missing username or password"))]
    pub password: String,
}

/// Create or rename a folder.
///
/// `name` is kept as raw JSON so that a non-string value is reported as
/// invalid input rather than a malformed body.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct FolderNameRequest {
    /// Folder name; trimmed before use.
    #[serde(default)]
    #[schema(value_type = String, example = "Invoices")]
    pub name: Option<Value>,
}

impl FolderNameRequest {
    /// The name if it is a JSON string.
    pub fn name(&self) -> Option<&str> {
        self.name.as_ref().and_then(Value::as_str)
    }
}

/// Move a file between folders.
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MoveFileRequest {
    /// Target folder id, `"root"`, or null for the root.
    #[serde(default)]
    #[schema(value_type = Option<String>, example = "3")]
    pub folder_id: Option<Value>,
}

impl MoveFileRequest {
    /// Normalize the target to the string form accepted by the registry.
    pub fn target(&self) -> Result<Option<String>> {
        match &self.folder_id {
            None | Some(Value::Null) => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.clone())),
            Some(Value::Number(n)) => Ok(Some(n.to_string())),
            Some(_) => Err(DrawerError::InvalidInput(
                "Invalid folder ID format.".to_string(),
            )),
        }
    }
}

/// Query parameters for listing files.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ListFilesQuery {
    /// Folder id, or `"root"` for files outside any folder.
    pub folder_id: Option<String>,
}

/// Multipart body of an upload. Only used for the API documentation.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UploadFileForm {
    /// File content.
    #[schema(value_type = String, format = Binary)]
    pub uploaded_file: Vec<u8>,
    /// Target folder id; blank, absent, or `"root"` for the root.
    pub folder_id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_folder_name_request() {
        let req: FolderNameRequest = serde_json::from_value(json!({"name": " Docs "})).unwrap();
        assert_eq!(req.name(), Some(" Docs "));

        let req: FolderNameRequest = serde_json::from_value(json!({"name": 42})).unwrap();
        assert_eq!(req.name(), None);

        let req: FolderNameRequest = serde_json::from_value(json!({})).unwrap();
        assert_eq!(req.name(), None);
    }

    #[test]
    fn test_move_file_target() {
        let target = |v: Value| {
            serde_json::from_value::<MoveFileRequest>(v)
                .unwrap()
                .target()
        };

        assert_eq!(target(json!({})).unwrap(), None);
        assert_eq!(target(json!({"folderId": null})).unwrap(), None);
        assert_eq!(
            target(json!({"folderId": "root"})).unwrap(),
            Some("root".to_string())
        );
        assert_eq!(
            target(json!({"folderId": 5})).unwrap(),
            Some("5".to_string())
        );
        assert!(matches!(
            target(json!({"folderId": [1]})),
            Err(DrawerError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_register_request_validation() {
        let req: RegisterRequest = serde_json::from_value(json!({"username": "alice"})).unwrap();
        assert!(req.validate().is_err());

        let req: RegisterRequest =
            serde_json::from_value(json!({"username": "alice", "password": "password123"}))
                .unwrap();
        assert!(req.validate().is_ok());
    }
}
