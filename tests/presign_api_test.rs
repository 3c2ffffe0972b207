use anyhow::Result;
use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use rustfs_gateway::config::StorageConfig;
use rustfs_gateway::services::storage::{StorageService, validate_expiry};
use rustfs_gateway::{AppState, create_app};
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceExt;

struct MockStorage;

#[async_trait]
impl StorageService for MockStorage {
    async fn presigned_upload_url(&self, key: &str, expiry: Duration) -> Result<String> {
        validate_expiry(expiry)?;
        Ok(format!(
            "http://127.0.0.1:9000/uploads/{}?X-Amz-Signature=mock",
            key
        ))
    }

    async fn presigned_download_url(&self, key: &str, expiry: Duration) -> Result<String> {
        validate_expiry(expiry)?;
        Ok(format!(
            "http://127.0.0.1:9000/uploads/{}?X-Amz-Signature=mock&response-content-type=auto",
            key
        ))
    }

    async fn delete_file(&self, _key: &str) -> Result<()> {
        Ok(())
    }

    async fn file_exists(&self, key: &str) -> Result<bool> {
        Ok(key == "existing.txt")
    }

    async fn list_objects(&self, prefix: &str) -> Result<Vec<String>> {
        let all = ["docs/a.txt", "docs/b.txt", "photos/c.jpg"];
        Ok(all
            .iter()
            .filter(|k| k.starts_with(prefix))
            .map(|k| k.to_string())
            .collect())
    }

    fn public_url(&self, key: &str) -> String {
        format!("http://cdn.example.com/uploads/{}", key)
    }
}

fn test_app() -> axum::Router {
    create_app(AppState {
        storage: Arc::new(MockStorage),
        config: StorageConfig::development(),
    })
}

async fn json_body(response: axum::response::Response) -> Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}

#[tokio::test]
async fn test_presign_upload_url() {
    let response = test_app()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/get-presigned-upload-url")
                .header("Content-Type", "application/json")
                .body(Body::from(r#"{"fileName": "photo.png"}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = json_body(response).await;
    assert_eq!(
        json["uploadURL"].as_str().unwrap(),
        "http://127.0.0.1:9000/uploads/photo.png?X-Amz-Signature=mock"
    );
}

#[tokio::test]
async fn test_presign_upload_rejects_empty_file_name() {
    let response = test_app()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/get-presigned-upload-url")
                .header("Content-Type", "application/json")
                .body(Body::from(r#"{"fileName": ""}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_presign_upload_sanitizes_path_traversal() {
    let response = test_app()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/get-presigned-upload-url")
                .header("Content-Type", "application/json")
                .body(Body::from(r#"{"fileName": "../../etc/passwd"}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = json_body(response).await;
    let url = json["uploadURL"].as_str().unwrap();
    assert!(url.contains("/uploads/passwd?"));
    assert!(!url.contains(".."));
}

#[tokio::test]
async fn test_presign_download_url() {
    let response = test_app()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/get-presigned-download-url")
                .header("Content-Type", "application/json")
                .body(Body::from(r#"{"fileName": "photo.png"}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = json_body(response).await;
    assert!(
        json["downloadURL"]
            .as_str()
            .unwrap()
            .starts_with("http://127.0.0.1:9000/uploads/photo.png?")
    );
}

#[tokio::test]
async fn test_list_files_with_prefix() {
    let response = test_app()
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/api/files?prefix=docs/")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = json_body(response).await;
    let files: Vec<&str> = json["files"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v.as_str().unwrap())
        .collect();
    assert_eq!(files, vec!["docs/a.txt", "docs/b.txt"]);
}

#[tokio::test]
async fn test_delete_existing_file() {
    let response = test_app()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri("/api/files/existing.txt")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn test_delete_missing_file_is_404() {
    let response = test_app()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri("/api/files/missing.txt")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_file_url_for_nested_key() {
    let response = test_app()
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/api/file-url/docs/a.txt")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = json_body(response).await;
    assert_eq!(
        json["url"].as_str().unwrap(),
        "http://cdn.example.com/uploads/docs/a.txt"
    );
}

#[tokio::test]
async fn test_health_check() {
    let response = test_app()
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = json_body(response).await;
    assert_eq!(json["status"], "ok");
    assert_eq!(json["storage"], "connected");
}
