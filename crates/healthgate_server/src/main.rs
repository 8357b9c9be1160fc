use healthgate::HealthReporter;
use tokio::signal;
use tokio_util::sync::CancellationToken;
use tracing::info;

const DEFAULT_ADDRESS: &str = "127.0.0.1:3000";

/// Resolve the bind address using the provided lookup. Blank values fall
/// back to the default so an empty env var can't produce a bind on "".
fn bind_address_from<F>(mut get: F) -> String
where
    F: FnMut(&str) -> Option<String>,
{
    get("HEALTHGATE_ADDRESS")
        .filter(|addr| !addr.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_ADDRESS.to_string())
}

/// Read the bind address from the environment.
fn bind_address() -> String {
    bind_address_from(|key| std::env::var(key).ok())
}

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    // Configure logging from env var `HEALTHGATE_LOG_LEVEL` (or fallback to `RUST_LOG`, default `info`).
    let log_env = std::env::var("HEALTHGATE_LOG_LEVEL")
        .or_else(|_| std::env::var("RUST_LOG"))
        .unwrap_or_else(|_| "info".to_string());
    let env_filter = tracing_subscriber::EnvFilter::try_new(log_env.clone())
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .compact()
        .with_ansi(false)
        .with_target(false)
        .with_env_filter(env_filter)
        .init();
    tracing::info!(%log_env, "healthgate: log filter");

    let addr = bind_address();
    let reporter = HealthReporter::new(addr.clone());

    let shutdown = CancellationToken::new();
    let canceller = shutdown.clone();
    tokio::spawn(async move {
        signal::ctrl_c()
            .await
            .expect("failed to install ctrl+c handler");
        info!("ctrl+c received, shutting down");
        canceller.cancel();
    });

    // This binary has no dependencies of its own to wait for, so the
    // process is ready as soon as the probes come up. An application
    // embedding the library flips this only once its backends are up.
    reporter.set_ready(true);

    info!(%addr, "starting health endpoints");
    if let Err(e) = reporter.serve(shutdown).await {
        tracing::error!("health server error: {e}");
        std::process::exit(1);
    }

    info!("shutdown complete");
    Ok(())
}
