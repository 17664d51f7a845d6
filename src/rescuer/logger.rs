use std::fmt;
use std::sync::Arc;

/// Sink for rescued errors
pub trait Logger: Send + Sync {
    fn error(&self, args: fmt::Arguments<'_>);
}

/// Logger that forwards to `tracing` at error level
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogger;

impl Logger for TracingLogger {
    fn error(&self, args: fmt::Arguments<'_>) {
        tracing::error!("{}", args);
    }
}

impl<L: Logger + ?Sized> Logger for Arc<L> {
    fn error(&self, args: fmt::Arguments<'_>) {
        (**self).error(args)
    }
}

impl<L: Logger + ?Sized> Logger for &L {
    fn error(&self, args: fmt::Arguments<'_>) {
        (**self).error(args)
    }
}
