//! In-process health reporting over HTTP.
//!
//! A [`HealthReporter`] owns a readiness flag and serves two probe
//! endpoints — `/liveness` and `/readiness` — until the caller's
//! cancellation token fires. The decision of *when* a process is ready
//! stays with the caller: push it in with [`HealthReporter::set_ready`]
//! (or a shared [`Readiness`] handle) once your own dependencies are up,
//! and cancel the token on process shutdown.

pub mod error;
pub mod readiness;
mod reporter;
mod routes;

pub use error::{HealthError, HealthResult};
pub use readiness::Readiness;
pub use reporter::{HealthReporter, SHUTDOWN_TIMEOUT};
