//! JSON read API handler modules.

#[allow(clippy::missing_errors_doc)]
pub mod buses;

use axum::Router;
use axum::routing::get;

use bustrack_app::ports::BusRepository;

use crate::state::AppState;

/// Build the `/api` sub-router.
pub fn routes<R>() -> Router<AppState<R>>
where
    R: BusRepository + Send + Sync + 'static,
{
    Router::new()
        .route("/buses/{id}", get(buses::get::<R>))
        .route("/buses/{id}/updates", get(buses::updates::<R>))
}
