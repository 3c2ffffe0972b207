use std::env;

/// Gateway configuration for the backing object store
#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// S3-compatible endpoint, e.g. a local MinIO/RustFS instance
    pub endpoint: String,

    /// Access key for the object store
    pub access_key: String,

    /// Secret key for the object store
    pub secret_key: String,

    /// Bucket all objects are stored in
    pub bucket: String,

    /// Signing region (default: "us-east-1")
    pub region: String,

    /// Endpoint used when deriving public access URLs. Usually the
    /// CDN/reverse-proxy address in front of the store; falls back to the
    /// storage endpoint itself.
    pub public_endpoint: String,

    /// Lifetime of issued presigned URLs in seconds (default: 900)
    pub presign_expiry_secs: u64,

    /// Bucket access policy applied at startup: "public-read" or "private"
    pub bucket_policy: String,

    /// Address the HTTP server binds to (default: "127.0.0.1:3000")
    pub bind_addr: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://127.0.0.1:9000".to_string(),
            access_key: "minioadmin".to_string(),
            secret_key: "minioadmin".to_string(),
            bucket: "uploads".to_string(),
            region: "us-east-1".to_string(),
            public_endpoint: "http://127.0.0.1:9000".to_string(),
            presign_expiry_secs: 900, // 15 minutes
            bucket_policy: "public-read".to_string(),
            bind_addr: "127.0.0.1:3000".to_string(),
        }
    }
}

impl StorageConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let default = Self::default();

        let endpoint = env::var("MINIO_ENDPOINT").unwrap_or(default.endpoint);

        Self {
            access_key: env::var("MINIO_ACCESS_KEY").unwrap_or(default.access_key),

            secret_key: env::var("MINIO_SECRET_KEY").unwrap_or(default.secret_key),

            bucket: env::var("MINIO_BUCKET").unwrap_or(default.bucket),

            region: env::var("MINIO_REGION").unwrap_or(default.region),

            public_endpoint: env::var("PUBLIC_ENDPOINT").unwrap_or_else(|_| endpoint.clone()),

            presign_expiry_secs: env::var("PRESIGN_EXPIRY_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(default.presign_expiry_secs),

            bucket_policy: env::var("BUCKET_POLICY").unwrap_or(default.bucket_policy),

            bind_addr: env::var("BIND_ADDR").unwrap_or(default.bind_addr),

            endpoint,
        }
    }

    /// Create config for development (local MinIO, short-lived URLs)
    pub fn development() -> Self {
        Self {
            presign_expiry_secs: 300,
            ..Self::default()
        }
    }
}
