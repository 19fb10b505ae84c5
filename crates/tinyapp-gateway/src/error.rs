use crate::model::ErrorView;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;
use tinyapp_redirector::RedirectorError;
use tinyapp_shortener::ShortenerError;
use tracing::error;

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Shortener(#[from] ShortenerError),
    #[error(transparent)]
    Redirector(#[from] RedirectorError),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Shortener(e) => match e {
                ShortenerError::EmptyField
                | ShortenerError::EmailTaken(_)
                | ShortenerError::InvalidTarget => StatusCode::BAD_REQUEST,
                ShortenerError::Unauthorized => StatusCode::UNAUTHORIZED,
                ShortenerError::CredentialMismatch | ShortenerError::Forbidden(_) => {
                    StatusCode::FORBIDDEN
                }
                ShortenerError::AliasNotFound(_) => StatusCode::NOT_FOUND,
                ShortenerError::GenerationExhausted(_)
                | ShortenerError::Hashing(_)
                | ShortenerError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            AppError::Redirector(e) => match e {
                RedirectorError::NotFound(_) => StatusCode::NOT_FOUND,
                RedirectorError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(error = %self, "request failed");
        }

        let body = ErrorView {
            error: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}
