//! Ingestion event reporting
//!
//! The upload pipeline reports what happens to each request through
//! [`IngestEvents`] instead of logging directly. The server installs
//! [`TracingEvents`]; tests can install a recorder.

use uuid::Uuid;

use crate::error::AppError;
use crate::features::files::counter::Counts;

/// Structured events emitted by the upload pipeline, in request order
pub trait IngestEvents: Send + Sync + 'static {
    fn received(&self, filename: Option<&str>, size_hint: Option<u64>);

    fn validated(&self, filename: &str, extension: &str);

    fn counting_started(&self, filename: &str);

    fn counted(&self, filename: &str, counts: Counts);

    fn stored(&self, id: Uuid, filename: &str);

    /// Terminal failure; `error` may carry an internal cause
    fn rejected(&self, filename: Option<&str>, error: &AppError);
}

/// Emits every event through `tracing`
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingEvents;

impl IngestEvents for TracingEvents {
    fn received(&self, filename: Option<&str>, size_hint: Option<u64>) {
        tracing::info!(name = ?filename, size = ?size_hint, "received");
    }

    fn validated(&self, filename: &str, extension: &str) {
        tracing::info!(name = %filename, extension = %extension, "validated");
    }

    fn counting_started(&self, filename: &str) {
        tracing::info!(name = %filename, "processed_start");
    }

    fn counted(&self, filename: &str, counts: Counts) {
        tracing::info!(
            name = %filename,
            lines = counts.lines,
            words = counts.words,
            "processed_end"
        );
    }

    fn stored(&self, id: Uuid, filename: &str) {
        tracing::debug!(%id, name = %filename, "stored");
    }

    fn rejected(&self, filename: Option<&str>, error: &AppError) {
        match error {
            AppError::ProcessingFailure { source } => {
                tracing::error!(name = ?filename, error = ?source, "io_error");
            },
            other => {
                tracing::warn!(name = ?filename, code = other.code(), reason = %other, "rejected");
            },
        }
    }
}


#[cfg(test)]
mod tests {
    use super::recording::ErrorEventCounter;
    use super::*;
    use tracing_subscriber::layer::SubscriberExt;

    #[test]
    fn test_processing_failure_logged_once() {
        let errors = ErrorEventCounter::default();
        let subscriber = tracing_subscriber::registry().with(errors.clone());

        tracing::subscriber::with_default(subscriber, || {
            let err = AppError::ProcessingFailure {
                source: std::io::Error::new(std::io::ErrorKind::ConnectionReset, "peer gone"),
            };
            TracingEvents.rejected(Some("broken.txt"), &err);
        });

        assert_eq!(errors.count(), 1);
    }

    #[test]
    fn test_caller_rejection_is_not_an_error_event() {
        let errors = ErrorEventCounter::default();
        let subscriber = tracing_subscriber::registry().with(errors.clone());

        tracing::subscriber::with_default(subscriber, || {
            TracingEvents.rejected(None, &AppError::InvalidInput("no content".into()));
        });

        assert_eq!(errors.count(), 0);
    }
}
