//! Reporter construction and the serve lifecycle.

use std::future::IntoFuture;
use std::io;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use parking_lot::Mutex;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::error::{HealthError, HealthResult};
use crate::readiness::Readiness;
use crate::routes;

/// Budget for draining in-flight requests once shutdown begins.
pub const SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(5);

/// Health reporter bound to one address, serving `/liveness` and
/// `/readiness` while the caller's cancellation token stays live.
pub struct HealthReporter {
    addr: String,
    ready: Readiness,
    serving: AtomicBool,
    local_addr: Mutex<Option<SocketAddr>>,
}

impl HealthReporter {
    /// New reporter for `addr` (`host:port`). Readiness starts `false`;
    /// nothing is bound until [`serve`](Self::serve).
    pub fn new(addr: impl Into<String>) -> Self {
        Self {
            addr: addr.into(),
            ready: Readiness::new(),
            serving: AtomicBool::new(false),
            local_addr: Mutex::new(None),
        }
    }

    /// Push the readiness value. Safe from any task, at any time,
    /// including concurrently with in-flight probe requests.
    pub fn set_ready(&self, ready: bool) {
        self.ready.set(ready);
    }

    /// Current readiness value.
    pub fn is_ready(&self) -> bool {
        self.ready.get()
    }

    /// Shared handle collaborators can keep to push readiness without
    /// holding the reporter itself.
    pub fn readiness(&self) -> Readiness {
        self.ready.clone()
    }

    /// Address actually bound, `Some` only while serving. Useful when
    /// the reporter was constructed with port 0.
    pub fn local_addr(&self) -> Option<SocketAddr> {
        *self.local_addr.lock()
    }

    /// Serve the probe endpoints until `shutdown` fires or the listener
    /// faults. Blocks the calling task for the whole server lifetime.
    ///
    /// On cancellation the readiness flag drops to `false` first, so
    /// orchestrator polls start failing while in-flight requests get
    /// [`SHUTDOWN_TIMEOUT`] to drain; a clean drain returns `Ok(())`.
    /// A second call while one is active returns
    /// [`HealthError::AlreadyStarted`] and leaves the active serve
    /// untouched. Once a call returns — cleanly or not — the instance
    /// is idle again and may be re-served.
    pub async fn serve(&self, shutdown: CancellationToken) -> HealthResult<()> {
        if self.serving.swap(true, Ordering::SeqCst) {
            return Err(HealthError::AlreadyStarted);
        }

        let result = self.serve_inner(shutdown).await;

        self.local_addr.lock().take();
        self.serving.store(false, Ordering::SeqCst);
        result
    }

    async fn serve_inner(&self, shutdown: CancellationToken) -> HealthResult<()> {
        let listener = TcpListener::bind(&self.addr)
            .await
            .map_err(HealthError::Listen)?;
        let local = listener.local_addr().map_err(HealthError::Listen)?;
        *self.local_addr.lock() = Some(local);
        info!("health endpoints listening on {local}");

        let app = routes::router(self.ready.clone());
        let drain = shutdown.clone();
        let mut server = tokio::spawn(
            axum::serve(listener, app.into_make_service())
                .with_graceful_shutdown(async move { drain.cancelled().await })
                .into_future(),
        );

        tokio::select! {
            // Cancellation wins when both are ready, so readiness always
            // drops before the drain outcome is observed.
            biased;

            _ = shutdown.cancelled() => {
                self.ready.set(false);
                info!("shutdown requested, draining for up to {SHUTDOWN_TIMEOUT:?}");
                match tokio::time::timeout(SHUTDOWN_TIMEOUT, &mut server).await {
                    Ok(joined) => flatten(joined),
                    Err(_) => {
                        warn!("drain budget exhausted, closing listener");
                        server.abort();
                        Err(HealthError::ShutdownTimeout(SHUTDOWN_TIMEOUT))
                    }
                }
            }

            joined = &mut server => flatten(joined),
        }
    }
}

/// Collapse the spawned server's join and serve layers into one result.
fn flatten(joined: Result<io::Result<()>, tokio::task::JoinError>) -> HealthResult<()> {
    match joined {
        Ok(Ok(())) => Ok(()),
        Ok(Err(e)) => Err(HealthError::Serve(e)),
        Err(e) => Err(HealthError::Serve(io::Error::other(e))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_reporter_is_idle_and_not_ready() {
        let reporter = HealthReporter::new("127.0.0.1:0");
        assert!(!reporter.is_ready());
        assert!(reporter.local_addr().is_none());
    }

    #[test]
    fn readiness_handle_shares_the_flag() {
        let reporter = HealthReporter::new("127.0.0.1:0");
        let handle = reporter.readiness();
        handle.set(true);
        assert!(reporter.is_ready());
        reporter.set_ready(false);
        assert!(!handle.get());
    }
}
