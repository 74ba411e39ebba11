use crate::error::ConfigError;

/// Signed upload URLs default to a 300 second lifetime.
pub const DEFAULT_SIGNED_URL_EXPIRATION: u64 = 300;

/// Environment-sourced settings, read once at process startup.
///
/// The entry point builds this and injects it into the component
/// constructors; nothing reads the environment ad hoc inside a request.
/// The AWS region resolves through the SDK default provider chain.
#[derive(Debug, Clone)]
pub struct Config {
    /// Table holding to-do items, keyed by `todoId`.
    pub todos_table: String,
    /// Secondary index keyed by `userId`, for owner-scoped listing.
    pub todos_by_user_index: String,
    /// Bucket holding attachment objects.
    pub attachments_bucket: String,
    /// Lifetime of a signed upload URL, in seconds.
    pub signed_url_expiration: u64,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            todos_table: require_var("TODOS_TABLE")?,
            todos_by_user_index: require_var("TODOS_BY_USER_INDEX")?,
            attachments_bucket: require_var("ATTACHMENTS_S3_BUCKET")?,
            signed_url_expiration: parse_expiration(
                std::env::var("SIGNED_URL_EXPIRATION").ok(),
            )?,
        })
    }
}

fn require_var(name: &'static str) -> Result<String, ConfigError> {
    std::env::var(name).map_err(|_| ConfigError::MissingVar(name))
}

fn parse_expiration(raw: Option<String>) -> Result<u64, ConfigError> {
    match raw {
        None => Ok(DEFAULT_SIGNED_URL_EXPIRATION),
        Some(s) => s.parse().map_err(|_| ConfigError::InvalidVar {
            var: "SIGNED_URL_EXPIRATION",
            message: format!("expected seconds, got {s:?}"),
        }),
    }
}
