use utoipa::OpenApi;

use crate::error::{ErrorResponse, FieldErrorDetail, HealthResponse, UnhealthyResponse};
use crate::handlers;
use crate::models::{Customer, CustomerPayload, Gender};

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "rust-spanner-customers API",
        version = "1.0.0",
        description = "Customer records with validated partial updates, backed by Google Cloud Spanner"
    ),
    paths(
        handlers::health::health_handler,
        handlers::create::create_handler,
        handlers::get::get_handler,
        handlers::put::put_handler
    ),
    components(
        schemas(
            Customer,
            CustomerPayload,
            Gender,
            ErrorResponse,
            FieldErrorDetail,
            HealthResponse,
            UnhealthyResponse
        )
    ),
    tags(
        (name = "health", description = "Health check operations"),
        (name = "customers", description = "Customer record operations")
    )
)]
pub struct ApiDoc;
