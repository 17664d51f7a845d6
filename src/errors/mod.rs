//! Error types and the JSON body they are rescued into

pub mod codes;
pub mod kinds;
pub mod response;

pub use codes::{ErrorCode, SystemCode};
pub use kinds::{classify_dyn, ErrorClass, Rescuable, StackError, SystemError, UnknownError};
pub use response::ErrorResponse;
