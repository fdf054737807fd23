//! Bus location service — use-cases for recording and reading bus positions.

use bustrack_domain::bus::Bus;
use bustrack_domain::error::{BusTrackError, NotFoundError, ValidationError};
use bustrack_domain::id::{BusId, StopId};
use bustrack_domain::time::now;
use bustrack_domain::update_event::UpdateEvent;

use crate::ports::BusRepository;

/// Number of events returned when the caller does not ask for a limit.
pub const DEFAULT_UPDATES_LIMIT: usize = 20;
/// Upper bound on events returned by a single query.
pub const MAX_UPDATES_LIMIT: usize = 100;

/// Application service for bus location updates.
pub struct BusLocationService<R> {
    repo: R,
}

impl<R: BusRepository> BusLocationService<R> {
    /// Create a new service backed by the given repository.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Record that `bus_id` is now at `stop_id`.
    ///
    /// The timestamp is generated here and used for both the bus's
    /// `last_update` and the appended event.
    ///
    /// # Errors
    ///
    /// Returns [`BusTrackError::Validation`] when the bus or stop does not
    /// exist, or a storage error propagated from the repository.
    pub async fn record_location(
        &self,
        bus_id: BusId,
        stop_id: StopId,
    ) -> Result<UpdateEvent, BusTrackError> {
        let event = UpdateEvent::new(bus_id, stop_id, now());
        match self.repo.record_location(event).await {
            Ok(event) => {
                tracing::info!(
                    bus_id = %event.bus_id,
                    stop_id = %event.stop_id,
                    "bus location recorded"
                );
                Ok(event)
            }
            Err(BusTrackError::Validation(ValidationError::UnknownReference)) => {
                tracing::warn!("location update rejected: unknown bus or stop");
                Err(ValidationError::UnknownReference.into())
            }
            Err(err) => Err(err),
        }
    }

    /// Look up a bus by id, returning an error if not found.
    ///
    /// # Errors
    ///
    /// Returns [`BusTrackError::NotFound`] when no bus with `id` exists,
    /// or a storage error from the repository.
    pub async fn get_bus(&self, id: &BusId) -> Result<Bus, BusTrackError> {
        self.repo.get_by_id(id).await?.ok_or_else(|| {
            NotFoundError {
                entity: "Bus",
                id: id.to_string(),
            }
            .into()
        })
    }

    /// List the most recent update events for a bus, newest first.
    ///
    /// `limit` falls back to [`DEFAULT_UPDATES_LIMIT`] and is clamped to
    /// `1..=MAX_UPDATES_LIMIT`. An unknown bus yields an empty list.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn recent_updates(
        &self,
        bus_id: &BusId,
        limit: Option<usize>,
    ) -> Result<Vec<UpdateEvent>, BusTrackError> {
        let limit = limit
            .unwrap_or(DEFAULT_UPDATES_LIMIT)
            .clamp(1, MAX_UPDATES_LIMIT);
        self.repo.find_updates(bus_id, limit).await
    }
}
