use crate::error::{ApiError, ErrorResponse};
use crate::models::Customer;
use crate::routes;
use crate::state::AppState;
use crate::validation::resolve_customer_id;
use axum::{extract::State, extract::Path, http::StatusCode, Json};

/// GET /customers/:id handler - Fetch a customer by id
///
/// A malformed id is answered with 404, exactly like an unknown one.
#[utoipa::path(
    get,
    path = routes::CUSTOMER_ITEM,
    params(
        ("id" = String, Path, description = "UUID of the customer")
    ),
    responses(
        (status = 200, description = "Customer found", body = Customer),
        (status = 404, description = "Malformed id or customer not found", body = ErrorResponse),
        (status = 500, description = "Database error", body = ErrorResponse)
    ),
    tag = "customers"
)]
pub async fn get_handler(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<(StatusCode, Json<Customer>), ApiError> {
    let Some(id) = resolve_customer_id(&id_str) else {
        tracing::info!("Rejected malformed customer id: {}", id_str);
        return Err(ApiError::CustomerNotFound(id_str));
    };

    match state.store.find_by_id(id).await? {
        Some(customer) => {
            tracing::info!("Successfully retrieved customer with id: {}", id);
            Ok((StatusCode::OK, Json(customer)))
        }
        None => {
            tracing::info!("Customer not found with id: {}", id);
            Err(ApiError::CustomerNotFound(id.to_string()))
        }
    }
}
