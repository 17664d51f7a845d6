use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;

/// Machine-readable identifiers written into the `code` field of an error body
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum ErrorCode {
    /// Requested resource does not exist
    #[serde(rename = "ERROR_HTTP_NOT_FOUND")]
    HttpNotFound,

    /// Request could not be understood
    #[serde(rename = "ERROR_HTTP_BAD_REQUEST")]
    HttpBadRequest,

    /// Any other internal fault
    #[serde(rename = "ERROR_INTERNAL_SERVER_ERROR")]
    InternalServerError,

    /// Error that carries no classification of its own
    #[serde(rename = "ERROR_UNKNOWN_ERROR")]
    UnknownError,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::HttpNotFound => "ERROR_HTTP_NOT_FOUND",
            Self::HttpBadRequest => "ERROR_HTTP_BAD_REQUEST",
            Self::InternalServerError => "ERROR_INTERNAL_SERVER_ERROR",
            Self::UnknownError => "ERROR_UNKNOWN_ERROR",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Internal fault codes carried by a [`SystemError`](super::SystemError)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SystemCode {
    /// Route or entity lookup came back empty
    HttpNotFound,
    /// Request parameters failed to parse or validate
    HttpBadRequest,
    /// Generic internal failure
    Internal,
    /// A dependency is not reachable
    Unavailable,
    /// An operation ran past its deadline
    Timeout,
    /// The process was started with invalid settings
    Misconfigured,
}

impl fmt::Display for SystemCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::HttpNotFound => write!(f, "http_not_found"),
            Self::HttpBadRequest => write!(f, "http_bad_request"),
            Self::Internal => write!(f, "internal"),
            Self::Unavailable => write!(f, "unavailable"),
            Self::Timeout => write!(f, "timeout"),
            Self::Misconfigured => write!(f, "misconfigured"),
        }
    }
}

impl FromStr for SystemCode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "http_not_found" => Ok(Self::HttpNotFound),
            "http_bad_request" => Ok(Self::HttpBadRequest),
            "internal" => Ok(Self::Internal),
            "unavailable" => Ok(Self::Unavailable),
            "timeout" => Ok(Self::Timeout),
            "misconfigured" => Ok(Self::Misconfigured),
            other => Err(format!("unknown system code: {}", other)),
        }
    }
}
