//! Bus — a tracked vehicle and the stop it was last reported at.

use serde::{Deserialize, Serialize};

use crate::id::{BusId, StopId};
use crate::time::Timestamp;

/// A tracked vehicle.
///
/// `current_stop_id` and `last_update` stay `None` until the first location
/// update is recorded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bus {
    pub id: BusId,
    pub current_stop_id: Option<StopId>,
    pub last_update: Option<Timestamp>,
}

impl Bus {
    /// A bus that has never reported a location.
    #[must_use]
    pub fn new(id: BusId) -> Self {
        Self {
            id,
            current_stop_id: None,
            last_update: None,
        }
    }

    /// Point the bus at `stop_id` as of `at`.
    pub fn move_to(&mut self, stop_id: StopId, at: Timestamp) {
        self.current_stop_id = Some(stop_id);
        self.last_update = Some(at);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::now;

    fn bus_id() -> BusId {
        BusId::new("bus-1").unwrap()
    }

    #[test]
    fn should_start_without_location() {
        let bus = Bus::new(bus_id());
        assert!(bus.current_stop_id.is_none());
        assert!(bus.last_update.is_none());
    }

    #[test]
    fn should_replace_stop_and_timestamp_when_moved() {
        let mut bus = Bus::new(bus_id());
        let first = now();
        bus.move_to(StopId::new("stop-1").unwrap(), first);

        let second = now();
        bus.move_to(StopId::new("stop-9").unwrap(), second);

        assert_eq!(bus.current_stop_id.unwrap().as_str(), "stop-9");
        assert_eq!(bus.last_update, Some(second));
    }

    #[test]
    fn should_serialize_with_snake_case_columns() {
        let mut bus = Bus::new(bus_id());
        bus.move_to(StopId::new("stop-9").unwrap(), now());
        let json = serde_json::to_value(&bus).unwrap();
        assert_eq!(json["id"], "bus-1");
        assert_eq!(json["current_stop_id"], "stop-9");
        assert!(json["last_update"].is_string());
    }
}
