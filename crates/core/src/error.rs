use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("validation failed: {0}")]
    Validation(String),
    #[error("user {user_id} is already queued in channel {channel_id}")]
    UniquenessViolation { channel_id: String, user_id: String },
    #[error("not found: {0}")]
    NotFound(String),
    #[error("storage backend error: {0}")]
    Backend(String),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing required setting: {0}")]
    Missing(&'static str),
    #[error("unknown time zone: {0}")]
    InvalidTimezone(String),
    #[error("reset hour must be between 0 and 23, got {0}")]
    InvalidResetHour(u32),
    #[error("invalid value for {key}: {value}")]
    InvalidValue { key: &'static str, value: String },
}
