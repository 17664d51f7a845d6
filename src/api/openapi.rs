use axum::Json;
use utoipa::OpenApi;

use crate::api::handlers::Item;
use crate::errors::{ErrorCode, ErrorResponse};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "HTTP Rescuer",
        version = "0.1.0",
        description = "Demo service whose handler errors are rescued into a uniform JSON error body.",
    ),
    paths(
        crate::api::handlers::health,
        crate::api::handlers::get_item,
        crate::api::handlers::fail_system,
        crate::api::handlers::fail_stack,
        crate::api::handlers::fail_unknown,
        crate::api::handlers::fail_quota,
    ),
    components(
        schemas(
            Item,
            ErrorCode,
            ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "items", description = "Item lookup"),
        (name = "failures", description = "Endpoints that always fail, one per rescue branch"),
    )
)]
pub struct ApiDoc;

/// Serve the generated OpenAPI document
pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
