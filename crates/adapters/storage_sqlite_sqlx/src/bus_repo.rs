//! `SQLite` implementation of [`BusRepository`].

use chrono::SecondsFormat;
use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use bustrack_app::ports::BusRepository;
use bustrack_domain::bus::Bus;
use bustrack_domain::error::{BusTrackError, ValidationError};
use bustrack_domain::id::{BusId, StopId};
use bustrack_domain::time::Timestamp;
use bustrack_domain::update_event::UpdateEvent;

use crate::error::StorageError;

fn decode_error<E>(err: E) -> sqlx::Error
where
    E: std::error::Error + Send + Sync + 'static,
{
    sqlx::Error::Decode(Box::new(err))
}

fn parse_timestamp(value: &str) -> Result<Timestamp, sqlx::Error> {
    Ok(chrono::DateTime::parse_from_rfc3339(value)
        .map_err(decode_error)?
        .to_utc())
}

// Fixed precision keeps the stored text sortable.
fn format_timestamp(value: Timestamp) -> String {
    value.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Wrapper for converting database rows into a domain [`Bus`].
struct BusRow(Bus);

impl<'r> FromRow<'r, SqliteRow> for BusRow {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let id: String = row.try_get("id")?;
        let current_stop_id: Option<String> = row.try_get("current_stop_id")?;
        let last_update: Option<String> = row.try_get("last_update")?;

        Ok(Self(Bus {
            id: BusId::new(id).map_err(decode_error)?,
            current_stop_id: current_stop_id
                .map(StopId::new)
                .transpose()
                .map_err(decode_error)?,
            last_update: last_update.as_deref().map(parse_timestamp).transpose()?,
        }))
    }
}

/// Wrapper for converting database rows into a domain [`UpdateEvent`].
struct EventRow(UpdateEvent);

impl<'r> FromRow<'r, SqliteRow> for EventRow {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let bus_id: String = row.try_get("bus_id")?;
        let stop_id: String = row.try_get("stop_id")?;
        let timestamp: String = row.try_get("timestamp")?;

        Ok(Self(UpdateEvent {
            bus_id: BusId::new(bus_id).map_err(decode_error)?,
            stop_id: StopId::new(stop_id).map_err(decode_error)?,
            timestamp: parse_timestamp(&timestamp)?,
        }))
    }
}

const UPDATE_LOCATION: &str = "UPDATE buses SET current_stop_id = ?, last_update = ? WHERE id = ?";
const INSERT_EVENT: &str = "INSERT INTO bus_updates (bus_id, stop_id, timestamp) VALUES (?, ?, ?)";
const SELECT_BY_ID: &str = "SELECT id, current_stop_id, last_update FROM buses WHERE id = ?";
const SELECT_UPDATES_BY_BUS: &str = r"
    SELECT bus_id, stop_id, timestamp FROM bus_updates
    WHERE bus_id = ?
    ORDER BY id DESC
    LIMIT ?
";

/// Map a failed write, turning foreign-key violations into a rejected reference.
fn write_error(err: sqlx::Error) -> BusTrackError {
    if let sqlx::Error::Database(db) = &err
        && db.is_foreign_key_violation()
    {
        return ValidationError::UnknownReference.into();
    }
    StorageError::from(err).into()
}

/// `SQLite`-backed bus repository.
///
/// Location updates run in a single transaction: either the bus moves and
/// the event is appended, or nothing is written.
pub struct SqliteBusRepository {
    pool: SqlitePool,
}

impl SqliteBusRepository {
    /// Create a new repository using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl BusRepository for SqliteBusRepository {
    async fn record_location(&self, event: UpdateEvent) -> Result<UpdateEvent, BusTrackError> {
        let timestamp = format_timestamp(event.timestamp);
        let mut tx = self.pool.begin().await.map_err(StorageError::from)?;

        let updated = sqlx::query(UPDATE_LOCATION)
            .bind(event.stop_id.as_str())
            .bind(&timestamp)
            .bind(event.bus_id.as_str())
            .execute(&mut *tx)
            .await
            .map_err(write_error)?;

        // Dropping `tx` rolls back.
        if updated.rows_affected() == 0 {
            return Err(ValidationError::UnknownReference.into());
        }

        sqlx::query(INSERT_EVENT)
            .bind(event.bus_id.as_str())
            .bind(event.stop_id.as_str())
            .bind(&timestamp)
            .execute(&mut *tx)
            .await
            .map_err(write_error)?;

        tx.commit().await.map_err(StorageError::from)?;

        Ok(event)
    }

    async fn get_by_id(&self, id: &BusId) -> Result<Option<Bus>, BusTrackError> {
        let row: Option<BusRow> = sqlx::query_as(SELECT_BY_ID)
            .bind(id.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(row.map(|r| r.0))
    }

    async fn find_updates(
        &self,
        bus_id: &BusId,
        limit: usize,
    ) -> Result<Vec<UpdateEvent>, BusTrackError> {
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        let rows: Vec<EventRow> = sqlx::query_as(SELECT_UPDATES_BY_BUS)
            .bind(bus_id.as_str())
            .bind(limit)
            .fetch_all(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(rows.into_iter().map(|r| r.0).collect())
    }
}
