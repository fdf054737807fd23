//! Storage port — repository trait for bus locations and their update log.

use std::future::Future;

use bustrack_domain::bus::Bus;
use bustrack_domain::error::BusTrackError;
use bustrack_domain::id::BusId;
use bustrack_domain::update_event::UpdateEvent;

/// Persistence for buses and the append-only update log.
pub trait BusRepository {
    /// Point the bus at the event's stop and append the event.
    ///
    /// Implementations validate both references at the storage layer. When
    /// the bus or the stop does not exist they return
    /// [`ValidationError::UnknownReference`](bustrack_domain::error::ValidationError::UnknownReference)
    /// and leave no write behind. The bus's `last_update` is set to the
    /// event's timestamp.
    fn record_location(
        &self,
        event: UpdateEvent,
    ) -> impl Future<Output = Result<UpdateEvent, BusTrackError>> + Send;

    /// Get a bus by its identifier.
    fn get_by_id(
        &self,
        id: &BusId,
    ) -> impl Future<Output = Result<Option<Bus>, BusTrackError>> + Send;

    /// Find update events for a bus, ordered newest-first.
    fn find_updates(
        &self,
        bus_id: &BusId,
        limit: usize,
    ) -> impl Future<Output = Result<Vec<UpdateEvent>, BusTrackError>> + Send;
}
