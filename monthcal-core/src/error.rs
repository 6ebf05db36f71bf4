//! Error types for monthcal.

use std::time::Duration;

use thiserror::Error;

/// Errors that can occur in monthcal operations.
///
/// No variant is fatal: every operation that returns one leaves the
/// event store in the last valid state it had.
#[derive(Error, Debug)]
pub enum CalError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid state: {0}")]
    InvalidState(String),

    #[error("Holiday fetch failed: {0}")]
    ExternalFetch(String),

    #[error("Holiday fetch timed out after {}", humantime::format_duration(*.0))]
    ExternalFetchTimeout(Duration),

    #[error("Provider '{0}' not found in PATH")]
    ProviderNotInstalled(String),

    #[error("Persistence error: {0}")]
    Persistence(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl CalError {
    /// Whether the error came from the holiday side of the pipeline.
    /// The session skips the merge cycle for all of these.
    pub fn is_external_fetch(&self) -> bool {
        matches!(
            self,
            CalError::ExternalFetch(_)
                | CalError::ExternalFetchTimeout(_)
                | CalError::ProviderNotInstalled(_)
        )
    }
}

/// Result type alias for monthcal operations.
pub type CalResult<T> = Result<T, CalError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeout_message_keeps_sub_second_limits() {
        let err = CalError::ExternalFetchTimeout(Duration::from_millis(500));
        assert_eq!(err.to_string(), "Holiday fetch timed out after 500ms");

        let err = CalError::ExternalFetchTimeout(Duration::from_secs(10));
        assert_eq!(err.to_string(), "Holiday fetch timed out after 10s");
        assert!(err.is_external_fetch());
    }
}
