use thiserror::Error;

/// Errors raised while reading configuration from the environment.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    MissingVar(&'static str),
    #[error("invalid value for {var}: {message}")]
    InvalidVar {
        var: &'static str,
        message: String,
    },
}

/// Errors raised by the DynamoDB and S3 access layers.
///
/// A missing item is not an error: point lookups return `Ok(None)`.
/// Store failures carry the operation name and key for diagnostics but
/// are otherwise propagated unchanged; no retry happens at this layer.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StorageError {
    #[error("DynamoDB {operation} failed for {id}: {message}")]
    Dynamo {
        operation: &'static str,
        id: String,
        message: String,
    },
    #[error("malformed todo item: {0}")]
    InvalidItem(String),
    #[error("failed to presign upload URL: {0}")]
    Presign(String),
}

/// Result type for data-access operations.
pub type Result<T> = std::result::Result<T, StorageError>;
