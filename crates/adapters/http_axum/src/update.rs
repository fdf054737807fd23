//! `POST /bus-update` — record that a bus has reached a stop.
//!
//! The body is parsed by hand rather than through the `Json` extractor so
//! that clients sending no `Content-Type` are accepted and parse failures
//! come back as JSON like every other error.

use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use bustrack_app::ports::BusRepository;
use bustrack_domain::id::{BusId, StopId};

use crate::error::ApiError;
use crate::state::AppState;

/// Request body. A `timestamp` field, if sent, is ignored: the server clock
/// is authoritative.
#[derive(Debug, Deserialize)]
pub struct UpdateRequest {
    pub bus_id: String,
    pub stop_id: String,
}

#[derive(Serialize)]
pub struct Accepted {
    success: bool,
}

/// Possible responses from the update endpoint.
pub enum UpdateResponse {
    Ok(Json<Accepted>),
}

impl IntoResponse for UpdateResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// `POST /bus-update`
///
/// # Errors
///
/// Returns [`ApiError`] for unparseable bodies, unknown buses or stops, and
/// storage failures.
pub async fn handle<R>(
    State(state): State<AppState<R>>,
    body: Bytes,
) -> Result<UpdateResponse, ApiError>
where
    R: BusRepository + Send + Sync + 'static,
{
    let req: UpdateRequest = serde_json::from_slice(&body).map_err(ApiError::malformed)?;
    let bus_id = BusId::new(req.bus_id)?;
    let stop_id = StopId::new(req.stop_id)?;

    state.bus_service.record_location(bus_id, stop_id).await?;

    Ok(UpdateResponse::Ok(Json(Accepted { success: true })))
}
