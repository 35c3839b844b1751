//! Shared HTTP building blocks: response envelope, error mapping, extractors

mod error;
mod validated_json;

pub use error::{ApiError, ApiResult};
pub use validated_json::{ValidatedJson, ValidatedJsonRejection};

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Standard API response wrapper
///
/// Every REST endpoint answers with this envelope.
/// On success: `{"success": true, "data": {...}}`,
/// on failure: `{"success": false, "data": null, "error": "description"}`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    /// `true` when the request succeeded
    pub success: bool,
    /// Payload. `null` on failure
    pub data: Option<T>,
    /// Error description. Omitted on success
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}
