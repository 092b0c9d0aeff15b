use crate::error::{ApiError, ErrorResponse};
use crate::models::{Customer, CustomerPayload};
use crate::routes;
use crate::state::AppState;
use axum::{extract::rejection::JsonRejection, extract::State, http::StatusCode, Json};
use uuid::Uuid;

/// POST /customers handler - Create a customer
///
/// All five fields are required. The id is generated here.
#[utoipa::path(
    post,
    path = routes::CUSTOMERS,
    request_body = CustomerPayload,
    responses(
        (status = 201, description = "Customer created", body = Customer),
        (status = 400, description = "A field is missing or invalid", body = ErrorResponse),
        (status = 500, description = "Database error", body = ErrorResponse)
    ),
    tag = "customers"
)]
pub async fn create_handler(
    State(state): State<AppState>,
    payload: Result<Json<CustomerPayload>, JsonRejection>,
) -> Result<(StatusCode, Json<Customer>), ApiError> {
    let Json(payload) = payload?;
    let customer = payload.into_customer(Uuid::new_v4()).inspect_err(|errors| {
        tracing::info!("Rejected new customer: {}", errors);
    })?;

    state.store.save(&customer).await?;

    tracing::info!("Successfully created customer with id: {}", customer.id);
    Ok((StatusCode::CREATED, Json(customer)))
}
