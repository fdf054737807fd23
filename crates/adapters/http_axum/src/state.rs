//! Shared application state for axum handlers.

use std::sync::Arc;

use bustrack_app::ports::BusRepository;
use bustrack_app::services::bus_location_service::BusLocationService;

/// Application state shared across all axum handlers.
///
/// Generic over the repository type to avoid dynamic dispatch.
/// `Clone` is implemented manually so the repository itself does not
/// need to be `Clone` — only the `Arc` wrapper is cloned.
pub struct AppState<R> {
    /// Bus location use-cases.
    pub bus_service: Arc<BusLocationService<R>>,
}

impl<R> Clone for AppState<R> {
    fn clone(&self) -> Self {
        Self {
            bus_service: Arc::clone(&self.bus_service),
        }
    }
}

impl<R> AppState<R>
where
    R: BusRepository + Send + Sync + 'static,
{
    /// Create a new application state from a service instance.
    pub fn new(bus_service: BusLocationService<R>) -> Self {
        Self {
            bus_service: Arc::new(bus_service),
        }
    }
}
