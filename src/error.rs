//! Run-level error types.
//!
//! Only failures that abort a run before (or instead of) scheduling live
//! here. Per-task failures — a demand that does not fit, a single rejected
//! calendar write — are not errors; they are recorded in the run report and
//! the run continues.

use thiserror::Error;

use crate::adapters::AdapterError;

/// Failures that abort a run with nothing scheduled and no writes attempted.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The board's task listing could not be fetched.
    #[error("source-unavailable: {0}")]
    SourceUnavailable(AdapterError),

    /// The calendar's busy intervals could not be fetched.
    #[error("calendar-unavailable: {0}")]
    CalendarUnavailable(AdapterError),
}

/// Result type alias for run-level operations.
pub type Result<T> = std::result::Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_carries_reason_family() {
        let err = EngineError::SourceUnavailable(AdapterError::Unavailable("board 503".into()));
        assert!(err.to_string().starts_with("source-unavailable"));
        assert!(err.to_string().contains("board 503"));

        let err = EngineError::CalendarUnavailable(AdapterError::Unavailable("dns".into()));
        assert!(err.to_string().starts_with("calendar-unavailable"));
    }
}
