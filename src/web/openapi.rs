//! OpenAPI document for the Web API.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use super::dto::{
    FileResponse, FolderDetailResponse, FolderNameRequest, FolderResponse, LoginRequest,
    LoginResponse, MessageResponse, MoveFileRequest, RegisterRequest, RegisterResponse,
    UploadFileForm, UserInfo,
};
use super::handlers;

/// OpenAPI document, served at `/api-docs/openapi.json`.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "File Drawer API",
        description = "Per-user folders and files with pluggable blob storage"
    ),
    paths(
        handlers::auth::register,
        handlers::auth::login,
        handlers::auth::logout,
        handlers::auth::me,
        handlers::folder::list_folders,
        handlers::folder::create_folder,
        handlers::folder::get_folder,
        handlers::folder::rename_folder,
        handlers::folder::delete_folder,
        handlers::file::list_files,
        handlers::file::upload_file,
        handlers::file::get_file,
        handlers::file::move_file,
        handlers::file::delete_file,
        handlers::file::download_blob,
    ),
    components(schemas(
        RegisterRequest,
        LoginRequest,
        FolderNameRequest,
        MoveFileRequest,
        UploadFileForm,
        MessageResponse,
        UserInfo,
        RegisterResponse,
        LoginResponse,
        FolderResponse,
        FolderDetailResponse,
        FileResponse,
    )),
    modifiers(&SecurityAddon),
    tags(
        (name = "auth", description = "Registration and sessions"),
        (name = "folders", description = "Folder management"),
        (name = "files", description = "File upload and organization")
    )
)]
pub struct ApiDoc;

/// Registers the `bearer_auth` scheme referenced by protected paths.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_lists_routes() {
        let doc = serde_json::to_value(ApiDoc::openapi()).unwrap();

        for path in [
            "/api/auth/login",
            "/api/folders",
            "/api/folders/{id}",
            "/api/files",
            "/api/files/{id}",
        ] {
            assert!(doc["paths"][path].is_object(), "missing {path}");
        }
        assert!(doc["components"]["securitySchemes"]["bearer_auth"].is_object());
    }

    #[test]
    fn test_upload_documented_as_multipart() {
        let doc = serde_json::to_value(ApiDoc::openapi()).unwrap();

        let content = &doc["paths"]["/api/files"]["post"]["requestBody"]["content"];
        assert!(content["multipart/form-data"].is_object());
        assert!(doc["components"]["schemas"]["UploadFileForm"].is_object());
    }
}
