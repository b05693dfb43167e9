//! Error type shared by all observers and the reporter.
//!
//! Recording never fails; only writing a report to its destination can.
//! The [`Reporter`](crate::reporter::Reporter) logs and swallows these
//! errors, while the observers return them to callers that render by hand.

use thiserror::Error;

/// Errors raised while rendering or emitting a report.
#[derive(Debug, Error)]
pub enum ReportError {
    /// The output sink rejected the report.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Error from the JSON observer.
    #[cfg(feature = "json")]
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for observer operations.
pub type Result<T> = std::result::Result<T, ReportError>;
