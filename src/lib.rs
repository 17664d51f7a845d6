// Library exports for testing
pub mod api;
pub mod config;
pub mod errors;
pub mod metrics;
pub mod rescuer;

pub use errors::{ErrorResponse, Rescuable, StackError, SystemError, UnknownError};
pub use rescuer::{Connection, FactoryRescuer, Logger, Rescued, Rescuer, ResponseWriter};
