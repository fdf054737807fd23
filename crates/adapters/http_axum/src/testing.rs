//! In-memory repository and request helpers shared by handler tests.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};
use std::sync::atomic::{AtomicBool, Ordering};

use axum::body::Body;
use axum::http::Response;
use http_body_util::BodyExt;

use bustrack_app::ports::BusRepository;
use bustrack_app::services::bus_location_service::BusLocationService;
use bustrack_domain::bus::Bus;
use bustrack_domain::error::{BusTrackError, ValidationError};
use bustrack_domain::id::{BusId, StopId};
use bustrack_domain::update_event::UpdateEvent;

use crate::state::AppState;

/// Cloning shares the underlying store, so a test can keep a handle on
/// what the router writes.
#[derive(Clone, Default)]
pub struct InMemoryBusRepo {
    pub buses: Arc<Mutex<HashMap<BusId, Bus>>>,
    pub stops: Arc<Mutex<HashSet<StopId>>>,
    pub events: Arc<Mutex<Vec<UpdateEvent>>>,
    pub fail_writes: Arc<AtomicBool>,
}

impl InMemoryBusRepo {
    pub fn with(buses: &[&str], stops: &[&str]) -> Self {
        let repo = Self::default();
        for id in buses {
            let id = BusId::new(*id).unwrap();
            repo.buses.lock().unwrap().insert(id.clone(), Bus::new(id));
        }
        for id in stops {
            repo.stops.lock().unwrap().insert(StopId::new(*id).unwrap());
        }
        repo
    }

    pub fn failing() -> Self {
        let repo = Self::with(&["bus-1"], &["stop-9"]);
        repo.fail_writes.store(true, Ordering::SeqCst);
        repo
    }

    pub fn current_stop(&self, bus: &str) -> Option<String> {
        self.buses.lock().unwrap()[&BusId::new(bus).unwrap()]
            .current_stop_id
            .clone()
            .map(String::from)
    }

    pub fn event_count(&self) -> usize {
        self.events.lock().unwrap().len()
    }
}

impl BusRepository for InMemoryBusRepo {
    async fn record_location(&self, event: UpdateEvent) -> Result<UpdateEvent, BusTrackError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(BusTrackError::Storage(Box::new(std::io::Error::other(
                "connection refused",
            ))));
        }
        if !self.stops.lock().unwrap().contains(&event.stop_id) {
            return Err(ValidationError::UnknownReference.into());
        }
        let mut buses = self.buses.lock().unwrap();
        let Some(bus) = buses.get_mut(&event.bus_id) else {
            return Err(ValidationError::UnknownReference.into());
        };
        bus.move_to(event.stop_id.clone(), event.timestamp);
        self.events.lock().unwrap().push(event.clone());
        Ok(event)
    }

    async fn get_by_id(&self, id: &BusId) -> Result<Option<Bus>, BusTrackError> {
        Ok(self.buses.lock().unwrap().get(id).cloned())
    }

    async fn find_updates(
        &self,
        bus_id: &BusId,
        limit: usize,
    ) -> Result<Vec<UpdateEvent>, BusTrackError> {
        Ok(self
            .events
            .lock()
            .unwrap()
            .iter()
            .rev()
            .filter(|event| &event.bus_id == bus_id)
            .take(limit)
            .cloned()
            .collect())
    }
}

pub fn state(repo: InMemoryBusRepo) -> AppState<InMemoryBusRepo> {
    AppState::new(BusLocationService::new(repo))
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
