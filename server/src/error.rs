use crate::api::ErrorResponse;
use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use cookbook_core::{ImageError, ValidationError};
use thiserror::Error;

type Source = Box<dyn std::error::Error + Send + Sync>;

/// Errors returned by API handlers, rendered as an `ErrorResponse` body.
///
/// `Fetch` and `Write` carry the underlying cause for the log; clients only
/// see which operation failed.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Unauthorized(&'static str),

    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("{0}")]
    Conflict(&'static str),

    #[error("Failed to {action}")]
    Fetch {
        action: &'static str,
        #[source]
        source: Source,
    },

    #[error("Failed to {action}")]
    Write {
        action: &'static str,
        #[source]
        source: Source,
    },

    #[error("Database connection failed")]
    Unavailable,
}

impl ApiError {
    pub fn fetch(action: &'static str, source: impl Into<Source>) -> Self {
        ApiError::Fetch {
            action,
            source: source.into(),
        }
    }

    pub fn write(action: &'static str, source: impl Into<Source>) -> Self {
        ApiError::Write {
            action,
            source: source.into(),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Fetch { .. } | ApiError::Write { .. } | ApiError::Unavailable => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(e: ValidationError) -> Self {
        ApiError::BadRequest(e.to_string())
    }
}

impl From<ImageError> for ApiError {
    fn from(e: ImageError) -> Self {
        ApiError::BadRequest(e.to_string())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            ApiError::Fetch { action, source } => {
                tracing::error!(error = %source, "Failed to {}", action);
            }
            ApiError::Write { action, source } => {
                tracing::error!(error = %source, "Failed to {}", action);
            }
            ApiError::Unauthorized(reason) => tracing::debug!("Rejected request: {}", reason),
            _ => {}
        }

        (
            self.status(),
            Json(ErrorResponse {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}
