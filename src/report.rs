//! Error reporting sink.
//!
//! Load-sequence failures are handed to an [`ErrorSink`] together with
//! a caller-supplied context tag naming the operation that failed. The
//! engine reports and aborts the step; it never retries on its own.

use crate::error::Error;
use tracing::error;

/// External error-reporting collaborator.
pub trait ErrorSink: Send + Sync {
    fn report(&self, context: &str, error: &Error);
}

/// Default sink: one structured log line per report.
#[derive(Debug, Clone, Default)]
pub struct TracingSink;

impl ErrorSink for TracingSink {
    fn report(&self, context: &str, error: &Error) {
        error!(context, %error, "paginator operation failed");
    }
}
