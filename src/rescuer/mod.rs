//! Converts error values into a terminal HTTP response plus a log record

pub mod connection;
pub mod http;
pub mod logger;

use axum::http::StatusCode;

use crate::errors::{ErrorClass, ErrorCode, ErrorResponse, Rescuable, SystemCode};

pub use connection::{Connection, ResponseWriter};
pub use http::{HttpConnection, HttpResponseWriter, Rescued};
pub use logger::{Logger, TracingLogger};

pub trait Rescuer {
    /// Write a response for `err` on `connection` and log it.
    ///
    /// Returns the error untouched when there is no connection to write to,
    /// and `Ok(())` once a response has been written.
    fn rescue<C, E>(&self, connection: Option<&mut C>, err: E) -> Result<(), E>
    where
        C: Connection,
        E: Rescuable;
}

/// Default [`Rescuer`] backed by an injected [`Logger`]
#[derive(Debug, Clone, Default)]
pub struct FactoryRescuer<L = TracingLogger> {
    logger: L,
}

impl<L: Logger> FactoryRescuer<L> {
    pub fn new(logger: L) -> Self {
        Self { logger }
    }
}

impl<L: Logger> Rescuer for FactoryRescuer<L> {
    fn rescue<C, E>(&self, connection: Option<&mut C>, err: E) -> Result<(), E>
    where
        C: Connection,
        E: Rescuable,
    {
        let Some(connection) = connection else {
            return Err(err);
        };
        let Some(writer) = connection.response() else {
            return Err(err);
        };

        let (status, body) = resolve(&err);
        writer.with_status(status).with_content(&body);

        self.logger.error(format_args!("{}", err));

        Ok(())
    }
}

/// Status and body the rescuer writes for `err`
pub fn resolve<E: Rescuable + ?Sized>(err: &E) -> (StatusCode, ErrorResponse) {
    match err.classify() {
        ErrorClass::System(SystemCode::HttpNotFound) => (
            StatusCode::NOT_FOUND,
            ErrorResponse::with_code(ErrorCode::HttpNotFound, reason(StatusCode::NOT_FOUND)),
        ),
        ErrorClass::System(SystemCode::HttpBadRequest) => (
            StatusCode::BAD_REQUEST,
            ErrorResponse::with_code(ErrorCode::HttpBadRequest, reason(StatusCode::BAD_REQUEST)),
        ),
        ErrorClass::System(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            ErrorResponse::with_code(ErrorCode::InternalServerError, err.to_string()),
        ),
        // Stack errors carry no identifier
        ErrorClass::Stack(status) => (status, ErrorResponse::uncoded(err.to_string())),
        ErrorClass::Unknown { status, code } => {
            let status = status.unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
            let code = code
                .map(|c| c.into_owned())
                .unwrap_or_else(|| ErrorCode::UnknownError.to_string());
            (status, ErrorResponse::new(code, err.to_string()))
        }
    }
}

fn reason(status: StatusCode) -> &'static str {
    status.canonical_reason().unwrap_or("")
}
