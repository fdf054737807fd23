//! Axum router assembly.

use axum::Router;
use axum::routing::{get, post};
use tower_http::trace::TraceLayer;

use bustrack_app::ports::BusRepository;

use crate::state::AppState;

/// Build the top-level axum [`Router`].
///
/// Mounts the update endpoint at `/bus-update` and the read API under
/// `/api`. Includes a [`TraceLayer`] that logs each HTTP request/response at
/// the `DEBUG` level using the `tracing` ecosystem.
pub fn build<R>(state: AppState<R>) -> Router
where
    R: BusRepository + Send + Sync + 'static,
{
    Router::new()
        .route("/health", get(health_check))
        .route("/bus-update", post(crate::update::handle::<R>))
        .nest("/api", crate::api::routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_check() -> &'static str {
    "OK"
}
