//! Mapping of domain failures onto HTTP responses

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use tracing::{debug, error};

use super::ApiResponse;
use crate::domain::DomainError;

pub type ApiResult<T> = Result<Json<ApiResponse<T>>, ApiError>;

/// Error half of every handler result. Renders as the standard envelope.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }
}

impl From<DomainError> for ApiError {
    fn from(e: DomainError) -> Self {
        let status = match &e {
            DomainError::Validation(_) | DomainError::OutOfRange { .. } => StatusCode::BAD_REQUEST,
            DomainError::NotFound { .. } => StatusCode::NOT_FOUND,
            DomainError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            DomainError::Conflict(_) | DomainError::Busy(_) => StatusCode::CONFLICT,
            DomainError::Integrity(_) | DomainError::Storage(_) | DomainError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        Self::new(status, e.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            error!(status = self.status.as_u16(), "{}", self.message);
        } else {
            debug!(status = self.status.as_u16(), "{}", self.message);
        }
        let body = ApiResponse::<()>::error(self.message);
        (self.status, Json(body)).into_response()
    }
}
