//! Custom error types for the health reporter.

use std::time::Duration;

use thiserror::Error;

/// Health reporter errors.
///
/// Caller-initiated shutdown is not an error: a cancelled serve that
/// drains cleanly returns `Ok(())`. These variants are reserved for
/// genuine faults.
#[derive(Debug, Error)]
pub enum HealthError {
    #[error("server already started")]
    AlreadyStarted,

    #[error("failed to bind listener: {0}")]
    Listen(std::io::Error),

    #[error("server fault: {0}")]
    Serve(std::io::Error),

    #[error("graceful shutdown timed out after {0:?}")]
    ShutdownTimeout(Duration),
}

/// Result type alias for reporter operations.
pub type HealthResult<T> = Result<T, HealthError>;
