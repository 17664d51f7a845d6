use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use lazy_static::lazy_static;

use super::{Connection, FactoryRescuer, Rescuer, ResponseWriter, TracingLogger};
use crate::errors::{ErrorResponse, Rescuable};
use crate::metrics::ERRORS_RESCUED_TOTAL;

lazy_static! {
    static ref RESCUER: FactoryRescuer<TracingLogger> = FactoryRescuer::new(TracingLogger);
}

/// Buffers the status and JSON body until it is turned into an axum response
#[derive(Debug, Clone)]
pub struct HttpResponseWriter {
    status: StatusCode,
    body: Option<ErrorResponse>,
}

impl Default for HttpResponseWriter {
    fn default() -> Self {
        Self {
            status: StatusCode::OK,
            body: None,
        }
    }
}

impl HttpResponseWriter {
    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn body(&self) -> Option<&ErrorResponse> {
        self.body.as_ref()
    }
}

impl ResponseWriter for HttpResponseWriter {
    fn with_status(&mut self, status: StatusCode) -> &mut Self {
        self.status = status;
        self
    }

    fn with_content(&mut self, body: &ErrorResponse) -> &mut Self {
        self.body = Some(body.clone());
        self
    }
}

impl IntoResponse for HttpResponseWriter {
    fn into_response(self) -> Response {
        match self.body {
            Some(body) => (self.status, Json(body)).into_response(),
            None => self.status.into_response(),
        }
    }
}

/// Connection for a single axum request
#[derive(Debug, Clone, Default)]
pub struct HttpConnection {
    writer: HttpResponseWriter,
}

impl HttpConnection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn writer(&self) -> &HttpResponseWriter {
        &self.writer
    }
}

impl Connection for HttpConnection {
    type Writer = HttpResponseWriter;

    fn response(&mut self) -> Option<&mut HttpResponseWriter> {
        Some(&mut self.writer)
    }
}

impl IntoResponse for HttpConnection {
    fn into_response(self) -> Response {
        self.writer.into_response()
    }
}

/// Handler error that is rescued into a JSON response.
///
/// ```ignore
/// async fn get_item(Path(id): Path<String>) -> Result<Json<Item>, Rescued<SystemError>> {
///     let item = lookup(&id).ok_or_else(|| SystemError::not_found(id))?;
///     Ok(Json(item))
/// }
/// ```
#[derive(Debug)]
pub struct Rescued<E>(pub E);

impl<E> From<E> for Rescued<E> {
    fn from(err: E) -> Self {
        Rescued(err)
    }
}

impl<E: Rescuable> IntoResponse for Rescued<E> {
    fn into_response(self) -> Response {
        let class = self.0.classify().label();
        let mut connection = HttpConnection::new();

        match RESCUER.rescue(Some(&mut connection), self.0) {
            Ok(()) => {
                ERRORS_RESCUED_TOTAL.with_label_values(&[class]).inc();
                connection.into_response()
            }
            Err(err) => {
                tracing::error!(error = %err, "Failed to rescue error");
                StatusCode::INTERNAL_SERVER_ERROR.into_response()
            }
        }
    }
}
