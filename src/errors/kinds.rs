use axum::http::StatusCode;
use std::borrow::Cow;
use std::error::Error as StdError;
use std::fmt;
use thiserror::Error;

use super::codes::SystemCode;

/// Dispatch tag the rescuer switches on
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorClass<'a> {
    /// Internal fault with a recognized code
    System(SystemCode),
    /// Fault that already knows its HTTP status
    Stack(StatusCode),
    /// Anything else, with whatever status and code it chose to report
    Unknown {
        status: Option<StatusCode>,
        code: Option<Cow<'a, str>>,
    },
}

impl ErrorClass<'_> {
    pub fn unknown() -> Self {
        ErrorClass::Unknown {
            status: None,
            code: None,
        }
    }

    /// Short label used for metrics and log fields
    pub fn label(&self) -> &'static str {
        match self {
            ErrorClass::System(_) => "system",
            ErrorClass::Stack(_) => "stack",
            ErrorClass::Unknown { .. } => "unknown",
        }
    }
}

/// An error value the rescuer knows how to classify.
///
/// Types that only report a status or an identifier implement
/// [`Rescuable::status`] and [`Rescuable::code`]; the default
/// [`Rescuable::classify`] turns those into [`ErrorClass::Unknown`].
pub trait Rescuable: fmt::Display + fmt::Debug {
    /// HTTP status this error should be answered with, if it knows one
    fn status(&self) -> Option<StatusCode> {
        None
    }

    /// String identifier for the response body, if it has one
    fn code(&self) -> Option<Cow<'_, str>> {
        None
    }

    fn classify(&self) -> ErrorClass<'_> {
        ErrorClass::Unknown {
            status: self.status(),
            code: self.code(),
        }
    }
}

/// Internal error carrying one of the fixed [`SystemCode`]s
#[derive(Debug, Error)]
#[error("{message}")]
pub struct SystemError {
    code: SystemCode,
    message: String,
}

impl SystemError {
    pub fn new(code: SystemCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(SystemCode::HttpNotFound, message)
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(SystemCode::HttpBadRequest, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(SystemCode::Internal, message)
    }

    pub fn code(&self) -> SystemCode {
        self.code
    }
}

impl Rescuable for SystemError {
    fn classify(&self) -> ErrorClass<'_> {
        ErrorClass::System(self.code)
    }
}

/// Error raised close to the HTTP layer with its status already decided
#[derive(Debug, Error)]
#[error("{message}")]
pub struct StackError {
    status: StatusCode,
    message: String,
}

impl StackError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl Rescuable for StackError {
    fn status(&self) -> Option<StatusCode> {
        Some(self.status)
    }

    fn classify(&self) -> ErrorClass<'_> {
        ErrorClass::Stack(self.status)
    }
}

/// Free-form error with an optional status and identifier
#[derive(Debug, Error)]
#[error("{message}")]
pub struct UnknownError {
    message: String,
    status: Option<StatusCode>,
    code: Option<String>,
}

impl UnknownError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status: None,
            code: None,
        }
    }

    pub fn with_status(mut self, status: StatusCode) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }
}

impl Rescuable for UnknownError {
    fn status(&self) -> Option<StatusCode> {
        self.status
    }

    fn code(&self) -> Option<Cow<'_, str>> {
        self.code.as_deref().map(Cow::Borrowed)
    }
}

impl<E: Rescuable + ?Sized> Rescuable for &E {
    fn status(&self) -> Option<StatusCode> {
        (**self).status()
    }

    fn code(&self) -> Option<Cow<'_, str>> {
        (**self).code()
    }

    fn classify(&self) -> ErrorClass<'_> {
        (**self).classify()
    }
}

impl Rescuable for anyhow::Error {
    fn classify(&self) -> ErrorClass<'_> {
        if let Some(e) = self.downcast_ref::<SystemError>() {
            e.classify()
        } else if let Some(e) = self.downcast_ref::<StackError>() {
            e.classify()
        } else if let Some(e) = self.downcast_ref::<UnknownError>() {
            e.classify()
        } else {
            ErrorClass::unknown()
        }
    }
}

impl Rescuable for Box<dyn StdError + Send + Sync> {
    fn classify(&self) -> ErrorClass<'_> {
        classify_dyn(&**self)
    }
}

/// Classify a type-erased error by probing the concrete types this crate knows
pub fn classify_dyn<'a>(err: &'a (dyn StdError + 'static)) -> ErrorClass<'a> {
    if let Some(e) = err.downcast_ref::<SystemError>() {
        e.classify()
    } else if let Some(e) = err.downcast_ref::<StackError>() {
        e.classify()
    } else if let Some(e) = err.downcast_ref::<UnknownError>() {
        e.classify()
    } else {
        ErrorClass::unknown()
    }
}
