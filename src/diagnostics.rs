//! Sinks for failures absorbed while bootstrapping.

use std::{error::Error, sync::Arc};

/// Receives the failures a [`ServerResolver`] absorbs instead of returning.
///
/// Sinks are fire-and-forget: they must not panic and nothing is done with
/// their outcome.
///
/// [`ServerResolver`]: crate::bootstrap::ServerResolver
pub trait DiagnosticSink: Send + Sync {
    /// Records an error-level event describing `fault`.
    fn log_error(&self, message: &str, fault: &(dyn Error + 'static));
}

impl<S: DiagnosticSink + ?Sized> DiagnosticSink for &S {
    fn log_error(&self, message: &str, fault: &(dyn Error + 'static)) {
        (**self).log_error(message, fault)
    }
}

impl<S: DiagnosticSink + ?Sized> DiagnosticSink for Arc<S> {
    fn log_error(&self, message: &str, fault: &(dyn Error + 'static)) {
        (**self).log_error(message, fault)
    }
}

impl<S: DiagnosticSink + ?Sized> DiagnosticSink for Box<S> {
    fn log_error(&self, message: &str, fault: &(dyn Error + 'static)) {
        (**self).log_error(message, fault)
    }
}

/// Sink emitting each fault as a `tracing` error event, along with the chain
/// of errors that caused it.
#[cfg(feature = "log")]
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingSink;

#[cfg(feature = "log")]
impl DiagnosticSink for TracingSink {
    fn log_error(&self, message: &str, fault: &(dyn Error + 'static)) {
        let mut causes = Vec::new();
        let mut source = fault.source();
        while let Some(cause) = source {
            causes.push(cause.to_string());
            source = cause.source();
        }
        tracing::error!(error = %fault, causes = ?causes, "{}", message);
    }
}

/// Sink that drops every event.
#[derive(Clone, Copy, Debug, Default)]
pub struct Discard;

impl DiagnosticSink for Discard {
    fn log_error(&self, _message: &str, _fault: &(dyn Error + 'static)) {}
}
