//! Router configuration for Web API.

use axum::{
    body::Body,
    extract::DefaultBodyLimit,
    http::Request,
    middleware::{self, Next},
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use super::handlers::{
    create_folder, delete_file, delete_folder, download_blob, get_file, get_folder, list_files,
    list_folders, login, logout, me, move_file, register, rename_folder, upload_file, AppState,
};
use super::middleware::{create_cors_layer, jwt_auth};
use super::openapi::ApiDoc;

/// Room for multipart boundaries and headers on top of the file size limit.
const MULTIPART_OVERHEAD: usize = 64 * 1024;

/// Create the main API router.
pub fn create_router(app_state: Arc<AppState>, cors_origins: &[String]) -> Router {
    let auth_routes = Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/logout", post(logout))
        .route("/me", get(me));

    let api_routes = Router::new()
        .nest("/auth", auth_routes)
        .route("/folders", get(list_folders).post(create_folder))
        .route(
            "/folders/:id",
            get(get_folder).patch(rename_folder).delete(delete_folder),
        )
        .route("/files", get(list_files).post(upload_file))
        .route(
            "/files/:id",
            get(get_file).patch(move_file).delete(delete_file),
        );

    let keys = app_state.jwt.clone();
    let body_limit = app_state.max_upload_size.saturating_add(MULTIPART_OVERHEAD);

    Router::new()
        .nest("/api", api_routes)
        .route("/blobs/:stored_id", get(download_blob))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(create_cors_layer(cors_origins))
                .layer(DefaultBodyLimit::max(body_limit))
                .layer(middleware::from_fn(
                    move |req: Request<Body>, next: Next| {
                        let keys = keys.clone();
                        jwt_auth(keys, req, next)
                    },
                )),
        )
        .with_state(app_state)
}

/// Create a health check router.
pub fn create_health_router() -> Router {
    Router::new().route("/health", get(health_check))
}

/// Create the Swagger UI router serving the OpenAPI document.
pub fn create_swagger_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}

/// Health check handler.
async fn health_check() -> &'static str {
    "OK"
}
