use anyhow::Result;
use async_trait::async_trait;
use aws_sdk_s3::Client;
use aws_sdk_s3::presigning::PresigningConfig;
use std::time::Duration;

/// Longest lifetime SigV4 accepts for a presigned URL.
pub const MAX_PRESIGN_EXPIRY: Duration = Duration::from_secs(7 * 24 * 60 * 60);

#[async_trait]
pub trait StorageService: Send + Sync {
    async fn presigned_upload_url(&self, key: &str, expiry: Duration) -> Result<String>;
    async fn presigned_download_url(&self, key: &str, expiry: Duration) -> Result<String>;
    async fn delete_file(&self, key: &str) -> Result<()>;
    async fn file_exists(&self, key: &str) -> Result<bool>;
    async fn list_objects(&self, prefix: &str) -> Result<Vec<String>>;
    fn public_url(&self, key: &str) -> String;
}

pub struct S3StorageService {
    client: Client,
    bucket: String,
    public_endpoint: String,
}

impl S3StorageService {
    pub fn new(client: Client, bucket: String, public_endpoint: String) -> Self {
        Self {
            client,
            bucket,
            public_endpoint,
        }
    }
}

pub fn validate_expiry(expiry: Duration) -> Result<()> {
    if expiry.is_zero() {
        anyhow::bail!("expiry must be positive");
    }
    if expiry > MAX_PRESIGN_EXPIRY {
        anyhow::bail!("expiry cannot exceed 7 days");
    }
    Ok(())
}

/// Bucket policy granting anonymous read on every object while keeping
/// writes restricted to credentialed callers.
pub fn public_read_policy(bucket: &str) -> String {
    serde_json::json!({
        "Version": "2012-10-17",
        "Statement": [
            {
                "Effect": "Allow",
                "Principal": { "AWS": ["*"] },
                "Action": ["s3:GetObject"],
                "Resource": [format!("arn:aws:s3:::{}/*", bucket)]
            }
        ]
    })
    .to_string()
}

#[async_trait]
impl StorageService for S3StorageService {
    async fn presigned_upload_url(&self, key: &str, expiry: Duration) -> Result<String> {
        validate_expiry(expiry)?;

        let presigned = self
            .client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .presigned(PresigningConfig::expires_in(expiry)?)
            .await?;

        Ok(presigned.uri().to_string())
    }

    async fn presigned_download_url(&self, key: &str, expiry: Duration) -> Result<String> {
        validate_expiry(expiry)?;

        let presigned = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(key)
            .presigned(PresigningConfig::expires_in(expiry)?)
            .await?;

        Ok(presigned.uri().to_string())
    }

    async fn delete_file(&self, key: &str) -> Result<()> {
        self.client
            .delete_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await?;
        Ok(())
    }

    async fn file_exists(&self, key: &str) -> Result<bool> {
        let res = self
            .client
            .head_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await;

        match res {
            Ok(_) => Ok(true),
            Err(e) => {
                let service_error = e.into_service_error();
                if service_error.is_not_found() {
                    Ok(false)
                } else {
                    Err(anyhow::anyhow!(service_error))
                }
            }
        }
    }

    async fn list_objects(&self, prefix: &str) -> Result<Vec<String>> {
        let mut objects = Vec::new();
        let mut continuation_token = None;

        loop {
            let res = self
                .client
                .list_objects_v2()
                .bucket(&self.bucket)
                .prefix(prefix)
                .set_continuation_token(continuation_token)
                .send()
                .await?;

            if let Some(contents) = res.contents {
                for object in contents {
                    if let Some(key) = object.key {
                        objects.push(key);
                    }
                }
            }

            if res.is_truncated.unwrap_or(false) {
                continuation_token = res.next_continuation_token;
            } else {
                break;
            }
        }

        Ok(objects)
    }

    fn public_url(&self, key: &str) -> String {
        format!(
            "{}/{}/{}",
            self.public_endpoint.trim_end_matches('/'),
            self.bucket,
            key
        )
    }
}
