use std::path::Path;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::SqlitePool;
use thiserror::Error;
use tracing::{debug, info};
use uuid::Uuid;

use crate::models::event::{Event, EventRow, RowMappingError};

const MAX_CONNECTIONS: u32 = 5;
const BUSY_TIMEOUT_SECS: u64 = 5;

const CREATE_EVENTS_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS events (
        id TEXT PRIMARY KEY,
        title TEXT NOT NULL CHECK(length(title) <= 100),
        description TEXT,
        start_time TEXT NOT NULL,
        end_time TEXT NOT NULL,
        created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
    )
"#;

const CREATE_START_TIME_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS idx_events_start_time ON events(start_time)";

const CREATE_END_TIME_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS idx_events_end_time ON events(end_time)";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("event {0} already exists")]
    DuplicateId(Uuid),

    #[error("event not found")]
    NotFound,

    #[error("stored event is malformed: {0}")]
    CorruptRow(#[from] RowMappingError),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// SQLite-backed store for the `events` table.
#[derive(Clone)]
pub struct EventRepository {
    pool: SqlitePool,
}

impl EventRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Opens (creating if needed) the database file in WAL mode.
    pub async fn connect(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let options = SqliteConnectOptions::new()
            .filename(path.as_ref())
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .foreign_keys(true)
            .busy_timeout(Duration::from_secs(BUSY_TIMEOUT_SECS));

        let pool = SqlitePoolOptions::new()
            .max_connections(MAX_CONNECTIONS)
            .connect_with(options)
            .await?;

        info!(path = %path.as_ref().display(), "Connected to SQLite database");
        Ok(Self::new(pool))
    }

    /// Creates the table and its indexes if they do not exist yet.
    pub async fn init_schema(&self) -> Result<(), StoreError> {
        for statement in [
            CREATE_EVENTS_TABLE,
            CREATE_START_TIME_INDEX,
            CREATE_END_TIME_INDEX,
        ] {
            sqlx::query(statement).execute(&self.pool).await?;
        }

        info!("Table 'events' is ready");
        Ok(())
    }

    pub async fn close(&self) {
        self.pool.close().await;
        info!("Database connection closed");
    }

    pub async fn insert(&self, event: &Event) -> Result<(), StoreError> {
        let row = event.to_row();

        sqlx::query(
            r#"INSERT INTO events (id, title, description, start_time, end_time, created_at)
               VALUES (?, ?, ?, ?, ?, ?)"#,
        )
        .bind(&row.id)
        .bind(&row.title)
        .bind(&row.description)
        .bind(&row.start_time)
        .bind(&row.end_time)
        .bind(&row.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            let duplicate = e
                .as_database_error()
                .is_some_and(|db_err| db_err.is_unique_violation());
            if duplicate {
                StoreError::DuplicateId(event.id)
            } else {
                StoreError::Database(e)
            }
        })?;

        debug!(id = %event.id, "Event inserted");
        Ok(())
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<Event, StoreError> {
        let row = sqlx::query_as::<_, EventRow>(
            r#"SELECT id, title, description, start_time, end_time, created_at
               FROM events
               WHERE id = ?"#,
        )
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await?
        .ok_or(StoreError::NotFound)?;

        Ok(Event::try_from(row)?)
    }

    /// All events ordered by ascending start time.
    pub async fn list_all(&self) -> Result<Vec<Event>, StoreError> {
        let rows = sqlx::query_as::<_, EventRow>(
            r#"SELECT id, title, description, start_time, end_time, created_at
               FROM events
               ORDER BY start_time ASC"#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter()
            .map(|row| Event::try_from(row).map_err(StoreError::from))
            .collect()
    }

    /// Rewrites title, description and both timestamps. Returns the affected row count.
    pub async fn update(&self, event: &Event) -> Result<u64, StoreError> {
        let row = event.to_row();

        let result = sqlx::query(
            r#"UPDATE events
               SET title = ?, description = ?, start_time = ?, end_time = ?
               WHERE id = ?"#,
        )
        .bind(&row.title)
        .bind(&row.description)
        .bind(&row.start_time)
        .bind(&row.end_time)
        .bind(&row.id)
        .execute(&self.pool)
        .await?;

        match result.rows_affected() {
            0 => Err(StoreError::NotFound),
            affected => {
                debug!(id = %event.id, "Event updated");
                Ok(affected)
            }
        }
    }

    pub async fn delete(&self, id: Uuid) -> Result<u64, StoreError> {
        let result = sqlx::query("DELETE FROM events WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await?;

        match result.rows_affected() {
            0 => Err(StoreError::NotFound),
            affected => {
                debug!(%id, "Event deleted");
                Ok(affected)
            }
        }
    }
}
