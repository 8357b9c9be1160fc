//! Probe routes and handlers.

use axum::Router;
use axum::debug_handler;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;

use crate::readiness::Readiness;

/// Build the instance-owned router for the two probe endpoints. Each
/// reporter gets its own router so multiple reporters can coexist in
/// one process without colliding on global route state.
pub(crate) fn router(ready: Readiness) -> Router {
    Router::new()
        .route("/liveness", get(liveness))
        .route("/readiness", get(readiness))
        .with_state(ready)
}

/// The process exists and can respond, nothing more.
#[debug_handler]
async fn liveness() -> StatusCode {
    StatusCode::OK
}

#[debug_handler]
async fn readiness(State(ready): State<Readiness>) -> Response {
    if ready.get() {
        StatusCode::OK.into_response()
    } else {
        let reason = StatusCode::SERVICE_UNAVAILABLE
            .canonical_reason()
            .unwrap_or("Service Unavailable");
        (StatusCode::SERVICE_UNAVAILABLE, reason).into_response()
    }
}
