//! Data-access layer for the serverless to-do backend: DynamoDB for
//! items, S3 for attachment upload/download URLs.

pub mod attachments;
pub mod config;
pub mod error;
pub mod todos;
pub mod types;

use aws_sdk_dynamodb::Client as DynamoClient;
use aws_sdk_s3::Client as S3Client;
use std::sync::Arc;

/// Shared application state
pub struct AppState {
    pub dynamo_client: DynamoClient,
    pub s3_client: S3Client,
}

impl AppState {
    pub fn new(dynamo_client: DynamoClient, s3_client: S3Client) -> Arc<Self> {
        Arc::new(Self {
            dynamo_client,
            s3_client,
        })
    }

    /// Initialize both AWS clients once at startup and share them across
    /// all invocations for the lifetime of the process.
    pub async fn from_env() -> Arc<Self> {
        let config = aws_config::load_from_env().await;
        Self::new(DynamoClient::new(&config), S3Client::new(&config))
    }
}
