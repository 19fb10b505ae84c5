use thiserror::Error;

/// Errors raised while constructing core identifiers.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CoreError {
    #[error("invalid alias: {0}")]
    InvalidAlias(String),
    #[error("invalid user id: {0}")]
    InvalidUserId(String),
}

/// Errors returned by alias and user stores.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StorageError {
    #[error("key already exists: {0}")]
    Conflict(String),
    #[error("email already registered: {0}")]
    EmailTaken(String),
    #[error("record not found: {0}")]
    NotFound(String),
    #[error("record {alias} is not owned by {requester}")]
    OwnerMismatch { alias: String, requester: String },
    #[error("storage operation failed: {0}")]
    Operation(String),
}
