use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::collections::HashMap;
use std::error::Error as StdError;
use std::sync::Arc;
use std::time::Instant;
use thiserror::Error;
use utoipa::{IntoParams, ToSchema};

use crate::errors::{ErrorResponse, Rescuable, StackError, SystemCode, SystemError, UnknownError};
use crate::rescuer::Rescued;

lazy_static::lazy_static! {
    static ref START_TIME: Instant = Instant::now();
}

pub type AppState = Arc<AppStateInner>;

pub struct AppStateInner {
    pub instance_id: String,
    pub items: HashMap<u64, Item>,
}

impl AppStateInner {
    pub fn new(instance_id: impl Into<String>) -> Self {
        Self {
            instance_id: instance_id.into(),
            items: Item::samples()
                .into_iter()
                .map(|item| (item.id, item))
                .collect(),
        }
    }
}

/// Catalog entry served by `/items/:id`
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Item {
    pub id: u64,
    pub name: String,
}

impl Item {
    fn samples() -> Vec<Item> {
        vec![
            Item {
                id: 1,
                name: "anvil".to_string(),
            },
            Item {
                id: 2,
                name: "bellows".to_string(),
            },
            Item {
                id: 3,
                name: "crucible".to_string(),
            },
        ]
    }
}

/// Parameters for `/fail/system`
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SystemFailureParams {
    /// Internal fault code, e.g. `timeout` (default: `internal`)
    pub code: Option<String>,
}

/// Parameters for `/fail/unknown`
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct UnknownFailureParams {
    /// Status the error reports, if any
    pub status: Option<u16>,
    /// Identifier the error reports, if any
    pub code: Option<String>,
    /// Error message
    pub message: Option<String>,
}

/// Domain error that reports both its status and its identifier
#[derive(Debug, Error)]
#[error("quota of {limit} requests exhausted")]
pub struct QuotaExceeded {
    pub limit: u32,
}

impl Rescuable for QuotaExceeded {
    fn status(&self) -> Option<StatusCode> {
        Some(StatusCode::TOO_MANY_REQUESTS)
    }

    fn code(&self) -> Option<Cow<'_, str>> {
        Some(Cow::Borrowed("QUOTA_EXCEEDED"))
    }
}

/// Health check endpoint
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Service is healthy", body = serde_json::Value)
    )
)]
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "http-rescuer",
        "version": env!("CARGO_PKG_VERSION"),
        "instance_id": state.instance_id,
        "uptime_seconds": START_TIME.elapsed().as_secs(),
    }))
}

/// Look up an item by numeric id
#[utoipa::path(
    get,
    path = "/items/{id}",
    tag = "items",
    params(
        ("id" = String, Path, description = "Numeric item id")
    ),
    responses(
        (status = 200, description = "Item found", body = Item),
        (status = 400, description = "Id is not numeric", body = ErrorResponse),
        (status = 404, description = "No such item", body = ErrorResponse)
    )
)]
pub async fn get_item(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Item>, Rescued<SystemError>> {
    let id: u64 = id
        .parse()
        .map_err(|_| SystemError::bad_request(format!("item id {:?} is not numeric", id)))?;

    state
        .items
        .get(&id)
        .cloned()
        .map(Json)
        .ok_or_else(|| SystemError::not_found(format!("item {} does not exist", id)).into())
}

/// Raise a system error with the requested internal code
#[utoipa::path(
    get,
    path = "/fail/system",
    tag = "failures",
    params(SystemFailureParams),
    responses(
        (status = 400, description = "Bad request code", body = ErrorResponse),
        (status = 404, description = "Not found code", body = ErrorResponse),
        (status = 500, description = "Any other code", body = ErrorResponse)
    )
)]
pub async fn fail_system(Query(params): Query<SystemFailureParams>) -> Rescued<SystemError> {
    let code = params.code.as_deref().unwrap_or("internal");
    match code.parse::<SystemCode>() {
        Ok(code) => Rescued(SystemError::new(
            code,
            format!("system failure requested ({})", code),
        )),
        Err(e) => Rescued(SystemError::bad_request(e)),
    }
}

/// Raise a stack error carrying the status from the path
#[utoipa::path(
    get,
    path = "/fail/stack/{status}",
    tag = "failures",
    params(
        ("status" = u16, Path, description = "HTTP status the error carries")
    ),
    responses(
        (status = 400, description = "Status outside 400-599", body = ErrorResponse),
        (status = "default", description = "The requested status", body = ErrorResponse)
    )
)]
pub async fn fail_stack(Path(status): Path<u16>) -> Rescued<Box<dyn StdError + Send + Sync>> {
    match StatusCode::from_u16(status) {
        Ok(status) if status.is_client_error() || status.is_server_error() => Rescued(Box::new(
            StackError::new(status, format!("stack failure with status {}", status.as_u16())),
        )),
        _ => Rescued(Box::new(SystemError::bad_request(format!(
            "{} is not an error status",
            status
        )))),
    }
}

/// Raise an unclassified error with whatever status and code were requested
#[utoipa::path(
    get,
    path = "/fail/unknown",
    tag = "failures",
    params(UnknownFailureParams),
    responses(
        (status = 500, description = "No status requested", body = ErrorResponse),
        (status = "default", description = "The requested status", body = ErrorResponse)
    )
)]
pub async fn fail_unknown(Query(params): Query<UnknownFailureParams>) -> Rescued<anyhow::Error> {
    let message = params
        .message
        .unwrap_or_else(|| "unknown failure requested".to_string());

    if params.status.is_none() && params.code.is_none() {
        return Rescued(anyhow::anyhow!(message));
    }

    let mut err = UnknownError::new(message);
    if let Some(status) = params.status {
        match StatusCode::from_u16(status) {
            Ok(status) => err = err.with_status(status),
            Err(_) => {
                return Rescued(SystemError::bad_request(format!("{} is not a status", status)).into())
            }
        }
    }
    if let Some(code) = params.code {
        err = err.with_code(code);
    }
    Rescued(err.into())
}

/// Raise a domain error that reports its own status and code
#[utoipa::path(
    get,
    path = "/fail/quota",
    tag = "failures",
    responses(
        (status = 429, description = "Quota exhausted", body = ErrorResponse)
    )
)]
pub async fn fail_quota() -> Rescued<QuotaExceeded> {
    Rescued(QuotaExceeded { limit: 100 })
}
