use std::time::Duration;

use aws_sdk_s3::presigning::PresigningConfig;
use aws_sdk_s3::Client as S3Client;

use crate::config::Config;
use crate::error::{Result, StorageError};

/// S3 access for to-do attachments.
///
/// Produces URLs only; the binary payload travels directly between the
/// caller and S3 through the presigned upload URL.
pub struct AttachmentStore {
    client: S3Client,
    bucket_name: String,
    url_expiration: Duration,
}

impl AttachmentStore {
    pub fn new(client: S3Client, config: &Config) -> Self {
        Self {
            client,
            bucket_name: config.attachments_bucket.clone(),
            url_expiration: Duration::from_secs(config.signed_url_expiration),
        }
    }

    /// Public retrieval URL for an attachment key.
    ///
    /// Deterministic, no existence check and no signature: the URL only
    /// resolves if the bucket grants public read on the object.
    pub fn attachment_url(&self, attachment_id: &str) -> String {
        format!(
            "https://{}.s3.amazonaws.com/{}",
            self.bucket_name, attachment_id
        )
    }

    /// Presigned URL authorizing a single PUT of the object at
    /// `attachment_id`, valid for the configured expiration.
    pub async fn upload_url(&self, attachment_id: &str) -> Result<String> {
        tracing::info!(
            "Generating upload URL for attachment {} in bucket {}",
            attachment_id,
            self.bucket_name
        );

        let presigning = PresigningConfig::expires_in(self.url_expiration)
            .map_err(|e| StorageError::Presign(e.to_string()))?;

        let request = self
            .client
            .put_object()
            .bucket(&self.bucket_name)
            .key(attachment_id)
            .presigned(presigning)
            .await
            .map_err(|e| {
                tracing::error!("Failed to generate presigned URL: {}", e);
                StorageError::Presign(e.to_string())
            })?;

        Ok(request.uri().to_string())
    }
}
