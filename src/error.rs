use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::validation::ValidationErrors;

/// Error response type
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    /// Per-field validation failures, only present on 400 responses
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub details: Vec<FieldErrorDetail>,
}

/// A single rejected field
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct FieldErrorDetail {
    pub field: String,
    pub message: String,
}

/// Response type for health check endpoint
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct HealthResponse {
    pub status: String,
}

/// Response type for unhealthy status
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct UnhealthyResponse {
    pub status: String,
    pub error: String,
}

/// Custom error type for API endpoints
///
/// Every handler failure funnels through here so that status codes and the
/// JSON error body stay consistent across endpoints.
#[derive(Debug)]
pub enum ApiError {
    /// Malformed or unknown customer id. Both map to 404.
    CustomerNotFound(String),
    /// One or more supplied fields broke their constraint
    Validation(ValidationErrors),
    /// Body was not JSON or had the wrong shape
    InvalidBody(String),
    /// Database operation error
    DatabaseError(anyhow::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_message, details) = match self {
            ApiError::CustomerNotFound(id) => (
                StatusCode::NOT_FOUND,
                format!("Customer not found: {}", id),
                Vec::new(),
            ),
            ApiError::Validation(errors) => (
                StatusCode::BAD_REQUEST,
                format!("Validation failed: {}", errors),
                errors
                    .violations()
                    .iter()
                    .map(|v| FieldErrorDetail {
                        field: v.field.to_string(),
                        message: v.error.to_string(),
                    })
                    .collect(),
            ),
            ApiError::InvalidBody(msg) => (
                StatusCode::BAD_REQUEST,
                format!("Invalid request body: {}", msg),
                Vec::new(),
            ),
            ApiError::DatabaseError(err) => {
                tracing::error!("Database error: {:#}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!("Database error: {}", err),
                    Vec::new(),
                )
            }
        };

        let body = Json(ErrorResponse {
            error: error_message,
            details,
        });

        (status, body).into_response()
    }
}

impl From<ValidationErrors> for ApiError {
    fn from(errors: ValidationErrors) -> Self {
        ApiError::Validation(errors)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::InvalidBody(rejection.body_text())
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        ApiError::DatabaseError(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CustomerPayload;

    async fn render(error: ApiError) -> (StatusCode, ErrorResponse) {
        let response = error.into_response();
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&body).unwrap())
    }

    #[tokio::test]
    async fn test_not_found_maps_to_404() {
        let (status, body) = render(ApiError::CustomerNotFound("123".to_string())).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body.error, "Customer not found: 123");
        assert!(body.details.is_empty());
    }

    #[tokio::test]
    async fn test_validation_maps_to_400_with_details() {
        let errors = CustomerPayload {
            phone: Some("123456789".to_string()),
            gender: Some("invalid_gender".to_string()),
            ..Default::default()
        }
        .validate_partial()
        .unwrap_err();

        let (status, body) = render(errors.into()).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body.error.starts_with("Validation failed"));
        assert_eq!(body.details.len(), 2);
        assert_eq!(body.details[0].field, "phone");
        assert_eq!(body.details[0].message, "must be exactly 10 characters");
        assert_eq!(body.details[1].field, "gender");
    }

    #[tokio::test]
    async fn test_database_error_maps_to_500() {
        let (status, body) = render(anyhow::anyhow!("connection reset").into()).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body.error.contains("connection reset"));
    }

    #[tokio::test]
    async fn test_details_omitted_from_json_when_empty() {
        let response = ApiError::InvalidBody("EOF".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json, serde_json::json!({ "error": "Invalid request body: EOF" }));
    }
}
