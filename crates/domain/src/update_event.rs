//! Update event — an append-only record of a bus being seen at a stop.

use serde::{Deserialize, Serialize};

use crate::id::{BusId, StopId};
use crate::time::Timestamp;

/// Immutable audit record of a bus-to-stop assignment.
///
/// One is appended for every accepted location update; identical requests
/// produce distinct events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateEvent {
    pub bus_id: BusId,
    pub stop_id: StopId,
    pub timestamp: Timestamp,
}

impl UpdateEvent {
    #[must_use]
    pub fn new(bus_id: BusId, stop_id: StopId, timestamp: Timestamp) -> Self {
        Self {
            bus_id,
            stop_id,
            timestamp,
        }
    }
}
