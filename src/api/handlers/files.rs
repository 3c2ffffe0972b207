use crate::api::error::AppError;
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Deserialize)]
pub struct ListFilesQuery {
    pub prefix: Option<String>,
}

#[derive(Serialize, ToSchema)]
pub struct ListFilesResponse {
    pub files: Vec<String>,
}

#[derive(Serialize, ToSchema)]
pub struct FileUrlResponse {
    pub url: String,
}

#[utoipa::path(
    get,
    path = "/api/files",
    params(
        ("prefix" = Option<String>, Query, description = "Only list objects whose key starts with this prefix")
    ),
    responses(
        (status = 200, description = "Object keys in the bucket", body = ListFilesResponse)
    ),
    tag = "files"
)]
pub async fn list_files(
    State(state): State<crate::AppState>,
    Query(query): Query<ListFilesQuery>,
) -> Result<Json<ListFilesResponse>, AppError> {
    let prefix = query.prefix.unwrap_or_default();

    let files = state.storage.list_objects(&prefix).await.map_err(|e| {
        tracing::error!("Failed to list objects with prefix '{}': {}", prefix, e);
        AppError::Internal("Failed to list objects".to_string())
    })?;

    Ok(Json(ListFilesResponse { files }))
}

#[utoipa::path(
    delete,
    path = "/api/files/{key}",
    params(
        ("key" = String, Path, description = "Object key to delete")
    ),
    responses(
        (status = 204, description = "Object deleted"),
        (status = 404, description = "No such object")
    ),
    tag = "files"
)]
pub async fn delete_file(
    State(state): State<crate::AppState>,
    Path(key): Path<String>,
) -> Result<StatusCode, AppError> {
    let exists = state.storage.file_exists(&key).await.map_err(|e| {
        tracing::error!("Failed to check object {}: {}", key, e);
        AppError::Internal("Failed to delete object".to_string())
    })?;

    if !exists {
        return Err(AppError::NotFound(format!("No such object: {}", key)));
    }

    state.storage.delete_file(&key).await.map_err(|e| {
        tracing::error!("Failed to delete object {}: {}", key, e);
        AppError::Internal("Failed to delete object".to_string())
    })?;

    tracing::info!("🗑️  Deleted object {}", key);

    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get,
    path = "/api/file-url/{key}",
    params(
        ("key" = String, Path, description = "Object key")
    ),
    responses(
        (status = 200, description = "Durable public URL for the object", body = FileUrlResponse)
    ),
    tag = "files"
)]
pub async fn get_file_url(
    State(state): State<crate::AppState>,
    Path(key): Path<String>,
) -> Result<Json<FileUrlResponse>, AppError> {
    let url = state.storage.public_url(&key);
    Ok(Json(FileUrlResponse { url }))
}
