use crate::config::StorageConfig;
use crate::services::storage::{S3StorageService, public_read_policy};
use anyhow::{Context, Result};
use aws_sdk_s3::config::Region;
use std::sync::Arc;
use tracing::info;

pub async fn setup_storage(config: &StorageConfig) -> Result<Arc<S3StorageService>> {
    url::Url::parse(&config.endpoint)
        .with_context(|| format!("invalid storage endpoint '{}'", config.endpoint))?;
    url::Url::parse(&config.public_endpoint)
        .with_context(|| format!("invalid public endpoint '{}'", config.public_endpoint))?;

    info!("☁️  S3 Storage: {} (Bucket: {})", config.endpoint, config.bucket);

    let aws_config = aws_config::from_env()
        .endpoint_url(&config.endpoint)
        .region(Region::new(config.region.clone()))
        .credentials_provider(aws_sdk_s3::config::Credentials::new(
            config.access_key.clone(),
            config.secret_key.clone(),
            None,
            None,
            "static",
        ))
        .load()
        .await;

    let s3_config = aws_sdk_s3::config::Builder::from(&aws_config)
        .force_path_style(true)
        .build();

    let s3_client = aws_sdk_s3::Client::from_conf(s3_config);

    // Ensure bucket exists
    match s3_client.head_bucket().bucket(&config.bucket).send().await {
        Ok(_) => info!("✅ Bucket '{}' is ready", config.bucket),
        Err(_) => {
            info!("🪣 Bucket '{}' not found, creating...", config.bucket);
            s3_client
                .create_bucket()
                .bucket(&config.bucket)
                .send()
                .await
                .with_context(|| format!("failed to create bucket '{}'", config.bucket))?;
            info!("✅ Bucket '{}' created successfully", config.bucket);
        }
    }

    apply_bucket_policy(&s3_client, &config.bucket, &config.bucket_policy).await?;

    Ok(Arc::new(S3StorageService::new(
        s3_client,
        config.bucket.clone(),
        config.public_endpoint.clone(),
    )))
}

async fn apply_bucket_policy(
    client: &aws_sdk_s3::Client,
    bucket: &str,
    policy: &str,
) -> Result<()> {
    match policy {
        "public-read" => {
            client
                .put_bucket_policy()
                .bucket(bucket)
                .policy(public_read_policy(bucket))
                .send()
                .await
                .with_context(|| format!("failed to set policy on bucket '{}'", bucket))?;
            info!("🔓 Bucket '{}' set to public-read", bucket);
        }
        "private" => {
            client
                .delete_bucket_policy()
                .bucket(bucket)
                .send()
                .await
                .with_context(|| format!("failed to clear policy on bucket '{}'", bucket))?;
            info!("🔒 Bucket '{}' set to private", bucket);
        }
        other => anyhow::bail!(
            "unsupported bucket policy: {}. Use 'public-read' or 'private'",
            other
        ),
    }

    Ok(())
}
