pub mod api;
pub mod client;
pub mod config;
pub mod infrastructure;
pub mod services;
pub mod utils;

use crate::config::StorageConfig;
use crate::services::storage::StorageService;
use axum::{
    Router,
    routing::{delete, get, post},
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
    paths(
        api::handlers::presign::get_presigned_upload_url,
        api::handlers::presign::get_presigned_download_url,
        api::handlers::files::list_files,
        api::handlers::files::delete_file,
        api::handlers::files::get_file_url,
        api::handlers::health::health_check,
    ),
    components(
        schemas(
            api::handlers::presign::PresignUploadRequest,
            api::handlers::presign::PresignUploadResponse,
            api::handlers::presign::PresignDownloadRequest,
            api::handlers::presign::PresignDownloadResponse,
            api::handlers::files::ListFilesResponse,
            api::handlers::files::FileUrlResponse,
            api::handlers::health::HealthResponse,
        )
    ),
    tags(
        (name = "presign", description = "Presigned URL endpoints"),
        (name = "files", description = "Object management endpoints"),
        (name = "system", description = "Health and diagnostics")
    )
)]
pub struct ApiDoc;

#[derive(Clone)]
pub struct AppState {
    pub storage: Arc<dyn StorageService>,
    pub config: StorageConfig,
}

pub fn create_app(state: AppState) -> Router {
    // Browsers upload straight to storage, so the presign routes must be
    // callable cross-origin.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .route(
            "/api/get-presigned-upload-url",
            post(api::handlers::presign::get_presigned_upload_url),
        )
        .route(
            "/api/get-presigned-download-url",
            post(api::handlers::presign::get_presigned_download_url),
        )
        .route("/api/files", get(api::handlers::files::list_files))
        .route("/api/files/*key", delete(api::handlers::files::delete_file))
        .route("/api/file-url/*key", get(api::handlers::files::get_file_url))
        .route("/health", get(api::handlers::health::health_check))
        .layer(cors)
        .with_state(state)
}
