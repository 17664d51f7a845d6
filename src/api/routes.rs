use axum::{middleware, routing::get, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    fail_quota, fail_stack, fail_system, fail_unknown, get_item, health, AppState,
};
use super::middleware::logging_middleware;
use super::openapi::openapi_json;
use crate::errors::SystemError;
use crate::metrics;
use crate::rescuer::Rescued;

pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Health check
        .route("/health", get(health))
        // Item lookup
        .route("/items/:id", get(get_item))
        // One endpoint per rescue branch
        .route("/fail/system", get(fail_system))
        .route("/fail/stack/:status", get(fail_stack))
        .route("/fail/unknown", get(fail_unknown))
        .route("/fail/quota", get(fail_quota))
        // Metrics endpoint (Prometheus)
        .route("/metrics", get(metrics::metrics_handler))
        // OpenAPI documentation
        .route("/api-docs/openapi.json", get(openapi_json))
        .fallback(route_not_found)
        // Add middleware (order matters: logging -> metrics -> cors -> trace)
        .layer(middleware::from_fn(logging_middleware))
        .layer(middleware::from_fn(metrics::middleware::track_metrics))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Unmatched routes are rescued like any other missing resource
async fn route_not_found() -> Rescued<SystemError> {
    Rescued(SystemError::not_found("no route matches the request"))
}
