use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("key does not belong to prefix '{prefix}': {key}")]
    InvalidKey { prefix: String, key: String },

    #[error("invalid uuid: {0}")]
    InvalidUuid(#[from] uuid::Error),
}
