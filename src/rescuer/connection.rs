use axum::http::StatusCode;

use crate::errors::ErrorResponse;

/// Fluent writer for the status and body of a response.
///
/// Implementations own serialization of the body.
pub trait ResponseWriter {
    fn with_status(&mut self, status: StatusCode) -> &mut Self;
    fn with_content(&mut self, body: &ErrorResponse) -> &mut Self;
}

/// A request in flight that can hand out its response writer
pub trait Connection {
    type Writer: ResponseWriter;

    /// `None` when the response can no longer be written
    fn response(&mut self) -> Option<&mut Self::Writer>;
}

impl<C: Connection + ?Sized> Connection for &mut C {
    type Writer = C::Writer;

    fn response(&mut self) -> Option<&mut Self::Writer> {
        (**self).response()
    }
}
