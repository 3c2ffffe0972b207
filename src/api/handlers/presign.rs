use crate::api::error::AppError;
use crate::utils::validation::sanitize_filename;
use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use utoipa::ToSchema;
use validator::Validate;

#[derive(Deserialize, ToSchema, Validate)]
pub struct PresignUploadRequest {
    #[validate(length(
        min = 1,
        max = 255,
        message = "File name must be between 1 and 255 characters"
    ))]
    #[serde(rename = "fileName")]
    pub file_name: String,
}

#[derive(Serialize, ToSchema)]
pub struct PresignUploadResponse {
    #[serde(rename = "uploadURL")]
    pub upload_url: String,
}

#[derive(Deserialize, ToSchema, Validate)]
pub struct PresignDownloadRequest {
    #[validate(length(
        min = 1,
        max = 255,
        message = "File name must be between 1 and 255 characters"
    ))]
    #[serde(rename = "fileName")]
    pub file_name: String,
}

#[derive(Serialize, ToSchema)]
pub struct PresignDownloadResponse {
    #[serde(rename = "downloadURL")]
    pub download_url: String,
}

#[utoipa::path(
    post,
    path = "/api/get-presigned-upload-url",
    request_body = PresignUploadRequest,
    responses(
        (status = 200, description = "Presigned upload URL issued", body = PresignUploadResponse),
        (status = 400, description = "Invalid file name")
    ),
    tag = "presign"
)]
pub async fn get_presigned_upload_url(
    State(state): State<crate::AppState>,
    Json(req): Json<PresignUploadRequest>,
) -> Result<Json<PresignUploadResponse>, AppError> {
    req.validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let key = sanitize_filename(&req.file_name).map_err(|e| AppError::BadRequest(e.to_string()))?;
    let expiry = Duration::from_secs(state.config.presign_expiry_secs);

    let upload_url = state
        .storage
        .presigned_upload_url(&key, expiry)
        .await
        .map_err(|e| {
            tracing::error!("Failed to generate presigned upload URL for {}: {}", key, e);
            AppError::Internal("Failed to generate upload URL".to_string())
        })?;

    tracing::info!("🔗 Presigned upload URL issued for {}", key);

    Ok(Json(PresignUploadResponse { upload_url }))
}

#[utoipa::path(
    post,
    path = "/api/get-presigned-download-url",
    request_body = PresignDownloadRequest,
    responses(
        (status = 200, description = "Presigned download URL issued", body = PresignDownloadResponse),
        (status = 400, description = "Invalid file name")
    ),
    tag = "presign"
)]
pub async fn get_presigned_download_url(
    State(state): State<crate::AppState>,
    Json(req): Json<PresignDownloadRequest>,
) -> Result<Json<PresignDownloadResponse>, AppError> {
    req.validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let key = sanitize_filename(&req.file_name).map_err(|e| AppError::BadRequest(e.to_string()))?;
    let expiry = Duration::from_secs(state.config.presign_expiry_secs);

    let download_url = state
        .storage
        .presigned_download_url(&key, expiry)
        .await
        .map_err(|e| {
            tracing::error!(
                "Failed to generate presigned download URL for {}: {}",
                key,
                e
            );
            AppError::Internal("Failed to generate download URL".to_string())
        })?;

    tracing::info!("🔗 Presigned download URL issued for {}", key);

    Ok(Json(PresignDownloadResponse { download_url }))
}
