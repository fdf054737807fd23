//! Supabase implementation of [`BusRepository`].
//!
//! Each call maps onto one or two `PostgREST` requests. Filters are passed as
//! query parameters (`id=eq.bus-1`).

use reqwest::Response;
use serde::de::IgnoredAny;
use serde::{Deserialize, Serialize};

use bustrack_app::ports::BusRepository;
use bustrack_domain::bus::Bus;
use bustrack_domain::error::{BusTrackError, ValidationError};
use bustrack_domain::id::BusId;
use bustrack_domain::time::Timestamp;
use bustrack_domain::update_event::UpdateEvent;

use crate::error::SupabaseError;

const BUSES: &str = "buses";
const UPDATES: &str = "bus_updates";
const BUS_COLUMNS: &str = "id,current_stop_id,last_update";
const UPDATE_COLUMNS: &str = "bus_id,stop_id,timestamp";

/// Postgres SQLSTATE for a foreign-key violation.
const FOREIGN_KEY_VIOLATION: &str = "23503";

#[derive(Serialize)]
struct LocationPatch<'a> {
    current_stop_id: &'a str,
    last_update: Timestamp,
}

/// Error payload returned by `PostgREST`.
#[derive(Deserialize)]
struct PostgrestError {
    code: Option<String>,
}

fn eq(value: &str) -> String {
    format!("eq.{value}")
}

/// Pass successful responses through; map failures to domain errors.
async fn check(response: Response) -> Result<Response, BusTrackError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let code = response
        .json::<PostgrestError>()
        .await
        .ok()
        .and_then(|body| body.code);

    if code.as_deref() == Some(FOREIGN_KEY_VIOLATION) {
        return Err(ValidationError::UnknownReference.into());
    }

    tracing::debug!(status = status.as_u16(), code = ?code, "supabase request rejected");
    Err(SupabaseError::Status {
        status: status.as_u16(),
        code,
    }
    .into())
}

/// Supabase-backed bus repository.
///
/// A location update is a `PATCH` of the bus row followed by an `INSERT` of
/// the event. The REST API offers no transaction spanning both requests, so a
/// failed insert leaves the bus moved; the failure is still reported.
pub struct SupabaseBusRepository {
    client: reqwest::Client,
    rest_url: String,
}

impl SupabaseBusRepository {
    pub(crate) fn new(client: reqwest::Client, rest_url: String) -> Self {
        Self { client, rest_url }
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/{table}", self.rest_url)
    }
}

impl BusRepository for SupabaseBusRepository {
    async fn record_location(&self, event: UpdateEvent) -> Result<UpdateEvent, BusTrackError> {
        // The returned rows tell whether the bus exists; the stop's foreign
        // key rejects unknown stops with 23503.
        let response = self
            .client
            .patch(self.table_url(BUSES))
            .query(&[("id", eq(event.bus_id.as_str())), ("select", "id".to_string())])
            .header("Prefer", "return=representation")
            .json(&LocationPatch {
                current_stop_id: event.stop_id.as_str(),
                last_update: event.timestamp,
            })
            .send()
            .await
            .map_err(SupabaseError::from)?;

        let touched: Vec<IgnoredAny> = check(response)
            .await?
            .json()
            .await
            .map_err(SupabaseError::from)?;
        if touched.is_empty() {
            return Err(ValidationError::UnknownReference.into());
        }

        let response = self
            .client
            .post(self.table_url(UPDATES))
            .header("Prefer", "return=minimal")
            .json(&event)
            .send()
            .await
            .map_err(SupabaseError::from)?;
        check(response).await?;

        Ok(event)
    }

    async fn get_by_id(&self, id: &BusId) -> Result<Option<Bus>, BusTrackError> {
        let response = self
            .client
            .get(self.table_url(BUSES))
            .query(&[("id", eq(id.as_str())), ("select", BUS_COLUMNS.to_string())])
            .send()
            .await
            .map_err(SupabaseError::from)?;

        let rows: Vec<Bus> = check(response)
            .await?
            .json()
            .await
            .map_err(SupabaseError::from)?;

        Ok(rows.into_iter().next())
    }

    async fn find_updates(
        &self,
        bus_id: &BusId,
        limit: usize,
    ) -> Result<Vec<UpdateEvent>, BusTrackError> {
        let response = self
            .client
            .get(self.table_url(UPDATES))
            .query(&[
                ("bus_id", eq(bus_id.as_str())),
                ("select", UPDATE_COLUMNS.to_string()),
                ("order", "timestamp.desc".to_string()),
                ("limit", limit.to_string()),
            ])
            .send()
            .await
            .map_err(SupabaseError::from)?;

        let rows: Vec<UpdateEvent> = check(response)
            .await?
            .json()
            .await
            .map_err(SupabaseError::from)?;

        Ok(rows)
    }
}
