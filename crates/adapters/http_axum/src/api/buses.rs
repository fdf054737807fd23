//! JSON REST handlers for buses and their update log.

use axum::Json;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Path, Query, State};
use axum::response::{IntoResponse, Response};
use serde::Deserialize;

use bustrack_app::ports::BusRepository;
use bustrack_domain::bus::Bus;
use bustrack_domain::id::BusId;
use bustrack_domain::update_event::UpdateEvent;

use crate::error::ApiError;
use crate::state::AppState;

/// Query parameters for the updates endpoint.
#[derive(Debug, Deserialize)]
pub struct UpdatesQuery {
    pub limit: Option<usize>,
}

/// Possible responses from the get endpoint.
pub enum GetResponse {
    Ok(Json<Bus>),
}

impl IntoResponse for GetResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the updates endpoint.
pub enum UpdatesResponse {
    Ok(Json<Vec<UpdateEvent>>),
}

impl IntoResponse for UpdatesResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// `GET /api/buses/{id}`
pub async fn get<R>(
    State(state): State<AppState<R>>,
    Path(id): Path<String>,
) -> Result<GetResponse, ApiError>
where
    R: BusRepository + Send + Sync + 'static,
{
    let bus_id = BusId::new(id)?;
    let bus = state.bus_service.get_bus(&bus_id).await?;
    Ok(GetResponse::Ok(Json(bus)))
}

/// `GET /api/buses/{id}/updates?limit=N`
pub async fn updates<R>(
    State(state): State<AppState<R>>,
    Path(id): Path<String>,
    query: Result<Query<UpdatesQuery>, QueryRejection>,
) -> Result<UpdatesResponse, ApiError>
where
    R: BusRepository + Send + Sync + 'static,
{
    let Query(query) = query.map_err(|rejection| ApiError::malformed(rejection.body_text()))?;
    let bus_id = BusId::new(id)?;
    let updates = state
        .bus_service
        .recent_updates(&bus_id, query.limit)
        .await?;
    Ok(UpdatesResponse::Ok(Json(updates)))
}

#[cfg(test)]
mod tests {
    use crate::router;
    use crate::testing::{InMemoryBusRepo, body_json, state};
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use bustrack_domain::id::{BusId, StopId};
    use bustrack_domain::time::now;
    use bustrack_domain::update_event::UpdateEvent;
    use tower::ServiceExt;

    async fn get(repo: &InMemoryBusRepo, uri: &str) -> axum::http::Response<Body> {
        router::build(state(repo.clone()))
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    fn seed_events(repo: &InMemoryBusRepo, stops: &[&str]) {
        let mut events = repo.events.lock().unwrap();
        for stop in stops {
            events.push(UpdateEvent::new(
                BusId::new("bus-1").unwrap(),
                StopId::new(*stop).unwrap(),
                now(),
            ));
        }
    }

    #[tokio::test]
    async fn should_return_bus_when_present() {
        let repo = InMemoryBusRepo::with(&["bus-1"], &[]);

        let response = get(&repo, "/api/buses/bus-1").await;

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["id"], "bus-1");
        assert!(body["current_stop_id"].is_null());
    }

    #[tokio::test]
    async fn should_return_404_when_bus_missing() {
        let repo = InMemoryBusRepo::default();

        let response = get(&repo, "/api/buses/bus-404").await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = body_json(response).await;
        assert_eq!(body["error"], "Bus bus-404 not found");
    }

    #[tokio::test]
    async fn should_list_updates_newest_first_with_limit() {
        let repo = InMemoryBusRepo::with(&["bus-1"], &[]);
        seed_events(&repo, &["stop-1", "stop-2", "stop-3"]);

        let response = get(&repo, "/api/buses/bus-1/updates?limit=2").await;

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        let stops: Vec<&str> = body
            .as_array()
            .unwrap()
            .iter()
            .map(|event| event["stop_id"].as_str().unwrap())
            .collect();
        assert_eq!(stops, vec!["stop-3", "stop-2"]);
    }

    #[tokio::test]
    async fn should_reject_non_numeric_limit() {
        let repo = InMemoryBusRepo::default();

        let response = get(&repo, "/api/buses/bus-1/updates?limit=many").await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert!(body["error"].is_string());
    }
}
