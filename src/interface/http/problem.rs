use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::errors::DomainError;

pub type ApiResult<T> = Result<T, ApiProblem>;

/// The single error responder for the HTTP layer; carries everything the
/// error body needs.
#[derive(Debug)]
pub struct ApiProblem {
    status: StatusCode,
    error: &'static str,
    message: String,
    path: String,
}

impl ApiProblem {
    pub fn from_domain(error: DomainError, path: &str) -> Self {
        match error {
            DomainError::ResourceNotFound(message) => {
                Self::new(StatusCode::NOT_FOUND, "Resource not found", message, path)
            }
            DomainError::Database(message) => {
                Self::new(StatusCode::BAD_REQUEST, "Database exception", message, path)
            }
            DomainError::Storage(message) => Self::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error",
                message,
                path,
            ),
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    fn new(
        status: StatusCode,
        error: &'static str,
        message: impl Into<String>,
        path: &str,
    ) -> Self {
        Self {
            status,
            error,
            message: message.into(),
            path: path.to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    timestamp: DateTime<Utc>,
    status: u16,
    error: String,
    message: String,
    path: String,
}

impl IntoResponse for ApiProblem {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            timestamp: Utc::now(),
            status: self.status.as_u16(),
            error: self.error.to_string(),
            message: self.message,
            path: self.path,
        };

        (self.status, Json(body)).into_response()
    }
}
