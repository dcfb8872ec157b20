use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde::Serialize;
use thiserror::Error;

/// Domain-level errors surfaced to callers, mapped to HTTP status codes at
/// the API boundary.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("{kind} '{id}' not found")]
    NotFound { kind: &'static str, id: i64 },

    #[error("unauthorized")]
    Unauthorized,

    #[error("forbidden")]
    Forbidden,

    #[error("insufficient resources: {missing}")]
    InsufficientResources { missing: String },

    #[error("a generation run is already in progress for schedule {0}")]
    AlreadyRunning(i64),

    #[error("resolver proposal is no longer feasible: {0}")]
    FeasibilityViolated(String),

    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::Forbidden => StatusCode::FORBIDDEN,
            AppError::InsufficientResources { .. } => StatusCode::CONFLICT,
            AppError::AlreadyRunning(_) => StatusCode::CONFLICT,
            AppError::FeasibilityViolated(_) => StatusCode::CONFLICT,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!(error = %self, "internal error");
            return (status, Json(ErrorBody { error: "internal error".to_string() })).into_response();
        }
        (status, Json(ErrorBody { error: self.to_string() })).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
