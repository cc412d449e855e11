use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

use crate::storage::StorageError;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    Forbidden(String),

    // The storage provider answered with an error of its own
    #[error("{0}")]
    Provider(String),

    #[error("{0}")]
    Validation(String),

    #[error(transparent)]
    BadBody(#[from] JsonRejection),

    // The storage provider could not be reached or answered garbage
    #[error("{0}")]
    Upstream(String),
}

impl From<StorageError> for AppError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::Rejected { message, .. } => AppError::Provider(message),
            other => AppError::Upstream(other.to_string()),
        }
    }
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
            Self::Provider(_) => StatusCode::BAD_REQUEST,
            Self::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::BadBody(rejection) => rejection.status(),
            Self::Upstream(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status_code = self.status_code();
        if status_code.is_server_error() {
            tracing::error!("Generating response for AppError: {:?}", self);
        } else {
            tracing::warn!("Generating response for AppError: {:?}", self);
        }

        let detail = match &self {
            Self::BadBody(rejection) => rejection.body_text(),
            other => other.to_string(),
        };
        (status_code, Json(json!({ "detail": detail }))).into_response()
    }
}
