//! Resume file storage on S3 / MinIO.

use aws_config::Region;
use aws_sdk_s3::config::Credentials;
use aws_sdk_s3::primitives::ByteStream;
use bytes::Bytes;
use tracing::info;
use uuid::Uuid;

use crate::config::StorageConfig;
use crate::errors::AppError;

#[derive(Clone)]
pub struct ResumeStorage {
    client: aws_sdk_s3::Client,
    bucket: String,
    endpoint: String,
}

impl ResumeStorage {
    /// Constructs an S3 client configured for MinIO (local) or AWS (production).
    pub async fn from_config(config: &StorageConfig) -> Self {
        let credentials = Credentials::new(
            &config.access_key_id,
            &config.secret_access_key,
            None,
            None,
            "rolerocket-static",
        );

        let sdk_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .region(Region::new(config.region.clone()))
            .credentials_provider(credentials)
            .endpoint_url(&config.endpoint)
            .load()
            .await;

        // MinIO only serves path-style URLs.
        let s3_config = aws_sdk_s3::config::Builder::from(&sdk_config)
            .force_path_style(true)
            .build();

        Self {
            client: aws_sdk_s3::Client::from_conf(s3_config),
            bucket: config.bucket.clone(),
            endpoint: config.endpoint.clone(),
        }
    }

    /// Uploads a resume PDF and returns its public URL.
    pub async fn upload_resume(&self, user_id: Uuid, pdf: Bytes) -> Result<String, AppError> {
        let key = resume_key(user_id, chrono::Utc::now().timestamp_millis());

        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(&key)
            .body(ByteStream::from(pdf))
            .content_type("application/pdf")
            .send()
            .await
            .map_err(|e| AppError::Storage(format!("S3 upload failed: {e}")))?;

        info!("Uploaded resume to s3://{}/{}", self.bucket, key);
        Ok(public_url(&self.endpoint, &self.bucket, &key))
    }
}

pub fn resume_key(user_id: Uuid, unix_millis: i64) -> String {
    format!("resumes/{user_id}/resume-{user_id}-{unix_millis}.pdf")
}

pub fn public_url(endpoint: &str, bucket: &str, key: &str) -> String {
    format!("{}/{}/{}", endpoint.trim_end_matches('/'), bucket, key)
}
