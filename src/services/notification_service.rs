use crate::domain::{FailureKind, IngestFailure};

/// One-way sink for per-source problems found while ingesting
#[cfg_attr(test, mockall::automock)]
pub trait Notifier: Send + Sync {
    fn warn(&self, message: &str);
    fn error(&self, message: &str);
}

impl<T: Notifier + ?Sized> Notifier for &T {
    fn warn(&self, message: &str) {
        (**self).warn(message)
    }

    fn error(&self, message: &str) {
        (**self).error(message)
    }
}

/// Route a failure to the matching severity
pub fn notify_failure(notifier: &dyn Notifier, failure: &IngestFailure) {
    let message = failure.message();
    match failure.kind {
        FailureKind::MalformedFeed => notifier.warn(&message),
        FailureKind::FetchOrParse(_) => notifier.error(&message),
    }
}

/// Emits notifications as tracing events
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn warn(&self, message: &str) {
        tracing::warn!("{}", message);
    }

    fn error(&self, message: &str) {
        tracing::error!("{}", message);
    }
}

/// Drops every notification
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentNotifier;

impl Notifier for SilentNotifier {
    fn warn(&self, _message: &str) {}

    fn error(&self, _message: &str) {}
}
