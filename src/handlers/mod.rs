pub mod health;
pub mod create;
pub mod get;
pub mod put;

pub use health::health_handler;
pub use create::create_handler;
pub use get::get_handler;
pub use put::put_handler;

#[cfg(test)]
pub(crate) mod test_support {
    use crate::models::{john_doe, Customer};
    use crate::routes;
    use crate::state::AppState;
    use crate::store::{CustomerStore, InMemoryCustomerStore};
    use axum::{body::Body, http::Request, http::StatusCode, Router};
    use serde_json::Value as JsonValue;
    use std::sync::Arc;
    use tower::ServiceExt;

    pub fn setup_test_app() -> (Router, Arc<InMemoryCustomerStore>) {
        let store = Arc::new(InMemoryCustomerStore::new());
        let app = routes::app(AppState::new(store.clone()));
        (app, store)
    }

    /// Seed the store with the John Doe fixture
    pub async fn seed_customer(store: &InMemoryCustomerStore) -> Customer {
        let customer = john_doe();
        store.save(&customer).await.unwrap();
        customer
    }

    pub async fn send_json(
        app: &Router,
        method: &str,
        uri: &str,
        body: Option<JsonValue>,
    ) -> (StatusCode, JsonValue) {
        let request = match body {
            Some(body) => Request::builder()
                .method(method)
                .uri(uri)
                .header("content-type", "application/json")
                .body(Body::from(serde_json::to_string(&body).unwrap()))
                .unwrap(),
            None => Request::builder()
                .method(method)
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        };

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = if body.is_empty() {
            JsonValue::Null
        } else {
            serde_json::from_slice(&body).unwrap()
        };
        (status, json)
    }
}
