use crate::error::{ApiError, ErrorResponse};
use crate::models::{Customer, CustomerPayload};
use crate::routes;
use crate::state::AppState;
use crate::validation::resolve_customer_id;
use axum::{
    extract::rejection::JsonRejection, extract::Path, extract::State, http::StatusCode, Json,
};

/// PUT /customers/:id handler - Partially update a customer
///
/// Only the supplied fields are validated and written; omitted fields keep
/// their stored values. Nothing is written unless every supplied field
/// passes.
#[utoipa::path(
    put,
    path = routes::CUSTOMER_ITEM,
    params(
        ("id" = String, Path, description = "UUID of the customer")
    ),
    request_body = CustomerPayload,
    responses(
        (status = 200, description = "Customer updated", body = Customer),
        (status = 400, description = "A supplied field is invalid or the body is not JSON", body = ErrorResponse),
        (status = 404, description = "Malformed id or customer not found", body = ErrorResponse),
        (status = 500, description = "Database error", body = ErrorResponse)
    ),
    tag = "customers"
)]
pub async fn put_handler(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
    payload: Result<Json<CustomerPayload>, JsonRejection>,
) -> Result<(StatusCode, Json<Customer>), ApiError> {
    let Some(id) = resolve_customer_id(&id_str) else {
        tracing::info!("Rejected malformed customer id: {}", id_str);
        return Err(ApiError::CustomerNotFound(id_str));
    };

    let Some(mut customer) = state.store.find_by_id(id).await? else {
        tracing::info!("Customer not found with id: {}", id);
        return Err(ApiError::CustomerNotFound(id.to_string()));
    };

    let Json(payload) = payload?;
    let changes = payload.validate_partial().inspect_err(|errors| {
        tracing::info!("Rejected update for customer {}: {}", id, errors);
    })?;

    if changes.is_empty() {
        tracing::debug!("Update for customer {} carries no fields", id);
    }

    customer.merge(changes);
    state.store.save(&customer).await?;

    tracing::info!("Successfully updated customer with id: {}", id);
    Ok((StatusCode::OK, Json(customer)))
}
