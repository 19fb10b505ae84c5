use thiserror::Error;
use tinyapp_core::StorageError;

pub type Result<T> = std::result::Result<T, RedirectorError>;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RedirectorError {
    #[error("short url not found: {0}")]
    NotFound(String),
    #[error("storage error: {0}")]
    Storage(String),
}

impl From<StorageError> for RedirectorError {
    fn from(value: StorageError) -> Self {
        match value {
            StorageError::NotFound(alias) => Self::NotFound(alias),
            other => Self::Storage(other.to_string()),
        }
    }
}
