use thiserror::Error;
use tinyapp_core::StorageError;

pub type Result<T> = std::result::Result<T, ShortenerError>;

/// Every way a shortener or account operation can fail.
///
/// Failed operations never leave a partial mutation behind.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ShortenerError {
    #[error("email address and password must not be empty")]
    EmptyField,
    #[error("email address already in use: {0}")]
    EmailTaken(String),
    /// Unknown email and wrong password are reported identically.
    #[error("email address or password is incorrect")]
    CredentialMismatch,
    #[error("short url not found: {0}")]
    AliasNotFound(String),
    #[error("you must be logged in")]
    Unauthorized,
    #[error("short url {0} belongs to another user")]
    Forbidden(String),
    #[error("long url must not be empty")]
    InvalidTarget,
    #[error("no free identifier after {0} attempts")]
    GenerationExhausted(usize),
    #[error("password hashing failed: {0}")]
    Hashing(String),
    #[error("storage error: {0}")]
    Storage(String),
}

impl From<StorageError> for ShortenerError {
    fn from(value: StorageError) -> Self {
        match value {
            StorageError::NotFound(alias) => Self::AliasNotFound(alias),
            StorageError::OwnerMismatch { alias, .. } => Self::Forbidden(alias),
            StorageError::EmailTaken(email) => Self::EmailTaken(email),
            other => Self::Storage(other.to_string()),
        }
    }
}
