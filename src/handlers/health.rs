use crate::error::{HealthResponse, UnhealthyResponse};
use crate::routes;
use crate::state::AppState;
use axum::{extract::State, http::StatusCode, Json};

/// GET /health handler - Health check endpoint
///
/// Probes the customer store. Returns 200 OK if it answers,
/// 503 Service Unavailable otherwise.
#[utoipa::path(
    get,
    path = routes::HEALTH,
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse),
        (status = 503, description = "Service is unhealthy", body = UnhealthyResponse)
    ),
    tag = "health"
)]
pub async fn health_handler(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<HealthResponse>), (StatusCode, Json<UnhealthyResponse>)> {
    match state.store.health_check().await {
        Ok(_) => {
            tracing::debug!("Health check passed");
            Ok((
                StatusCode::OK,
                Json(HealthResponse {
                    status: "healthy".to_string(),
                }),
            ))
        }
        Err(e) => {
            tracing::error!("Health check failed: {}", e);
            Err((
                StatusCode::SERVICE_UNAVAILABLE,
                Json(UnhealthyResponse {
                    status: "unhealthy".to_string(),
                    error: format!("Cannot connect to database: {}", e),
                }),
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::test_support::{send_json, setup_test_app};
    use crate::models::Customer;
    use crate::store::CustomerStore;
    use async_trait::async_trait;
    use std::sync::Arc;
    use uuid::Uuid;

    /// Store whose every call fails, standing in for an unreachable database
    struct UnreachableStore;

    #[async_trait]
    impl CustomerStore for UnreachableStore {
        async fn find_by_id(&self, _id: Uuid) -> anyhow::Result<Option<Customer>> {
            anyhow::bail!("connection refused")
        }

        async fn save(&self, _customer: &Customer) -> anyhow::Result<()> {
            anyhow::bail!("connection refused")
        }

        async fn delete_all(&self) -> anyhow::Result<()> {
            anyhow::bail!("connection refused")
        }

        async fn health_check(&self) -> anyhow::Result<()> {
            anyhow::bail!("connection refused")
        }
    }

    #[tokio::test]
    async fn test_health_endpoint_healthy() {
        let (app, _store) = setup_test_app();

        let (status, body) = send_json(&app, "GET", "/health", None).await;

        assert_eq!(status, StatusCode::OK);
        let response: HealthResponse = serde_json::from_value(body).unwrap();
        assert_eq!(response.status, "healthy");
    }

    #[tokio::test]
    async fn test_health_endpoint_unhealthy() {
        let app = routes::app(AppState::new(Arc::new(UnreachableStore)));

        let (status, body) = send_json(&app, "GET", "/health", None).await;

        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        let response: UnhealthyResponse = serde_json::from_value(body).unwrap();
        assert_eq!(response.status, "unhealthy");
        assert!(response.error.contains("connection refused"));
    }

    #[tokio::test]
    async fn test_store_failure_surfaces_as_500() {
        let app = routes::app(AppState::new(Arc::new(UnreachableStore)));

        let (status, body) =
            send_json(&app, "GET", &format!("/customers/{}", Uuid::new_v4()), None).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body["error"].as_str().unwrap().contains("Database error"));
    }
}
