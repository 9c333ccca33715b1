//! Shared HTTP building blocks

mod validated_json;

pub use validated_json::{ValidatedJson, ValidatedJsonRejection};

use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::DomainError;
use crate::shared::PaginatedResult;

/// Standard API response envelope
///
/// Success: `{"success": true, "data": {...}}`,
/// failure: `{"success": false, "data": null, "error": "..."}`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
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

/// Error half of every handler's return type
pub type ApiError = (StatusCode, Json<ApiResponse<()>>);

/// Result alias for handlers returning the envelope
pub type ApiResult<T> = Result<Json<ApiResponse<T>>, ApiError>;

pub fn status_for(error: &DomainError) -> StatusCode {
    match error {
        DomainError::NotFound { .. } => StatusCode::NOT_FOUND,
        DomainError::Validation(_) => StatusCode::BAD_REQUEST,
        DomainError::Conflict(_) => StatusCode::CONFLICT,
        DomainError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
        DomainError::Forbidden(_) => StatusCode::FORBIDDEN,
        DomainError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Map a domain failure onto the envelope.
///
/// Storage failures are logged and reported without internals.
pub fn domain_error(error: DomainError) -> ApiError {
    let status = status_for(&error);
    let message = match &error {
        DomainError::Storage(detail) => {
            tracing::error!(error = detail.as_str(), "Storage failure while handling request");
            "Internal server error".to_string()
        }
        _ => error.to_string(),
    };
    (status, Json(ApiResponse::error(message)))
}

/// Wrap a value in a successful envelope.
pub fn ok<T>(data: T) -> ApiResult<T> {
    Ok(Json(ApiResponse::success(data)))
}

/// One page of items plus page metadata
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PaginatedResponse<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub page: u64,
    pub limit: u64,
    pub total_pages: u64,
}

impl<T> PaginatedResponse<T> {
    pub fn from_result<U>(result: PaginatedResult<U>, f: impl FnMut(U) -> T) -> Self {
        let result = result.map(f);
        Self {
            items: result.items,
            total: result.total,
            page: result.page,
            limit: result.limit,
            total_pages: result.total_pages,
        }
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn domain_errors_map_to_statuses() {
        assert_eq!(
            status_for(&DomainError::not_found("Bill", "id", 1)),
            StatusCode::NOT_FOUND
        );
        assert_eq!(status_for(&DomainError::Conflict("x".into())), StatusCode::CONFLICT);
        assert_eq!(
            status_for(&DomainError::Validation("x".into())),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn storage_details_are_not_leaked() {
        let (status, Json(body)) = domain_error(DomainError::Storage("db password wrong".into()));
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.error.as_deref(), Some("Internal server error"));
    }
}
