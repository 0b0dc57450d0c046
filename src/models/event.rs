use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use thiserror::Error;
use uuid::Uuid;

use crate::models::validation::ValidatedEvent;
use crate::utils::time::{format_timestamp, parse_timestamp, truncate_to_seconds};

/// The in-memory event record.
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl Event {
    /// Builds a new event with a generated id and the current time as `created_at`.
    pub fn new(fields: ValidatedEvent) -> Self {
        Self::with_identity(fields, None, None)
    }

    /// Builds an event, filling in `id` and `created_at` only when they are missing.
    pub fn with_identity(
        fields: ValidatedEvent,
        id: Option<Uuid>,
        created_at: Option<DateTime<Utc>>,
    ) -> Self {
        let id = id.filter(|id| !id.is_nil()).unwrap_or_else(Uuid::new_v4);
        let created_at = created_at.unwrap_or_else(Utc::now);

        Self {
            id,
            title: fields.title,
            description: fields.description,
            start_time: truncate_to_seconds(fields.start_time),
            end_time: truncate_to_seconds(fields.end_time),
            created_at: truncate_to_seconds(created_at),
        }
    }

    /// Replaces the mutable fields. `id` and `created_at` are left untouched.
    pub fn apply_update(&mut self, fields: ValidatedEvent) {
        self.title = fields.title;
        self.description = fields.description;
        self.start_time = truncate_to_seconds(fields.start_time);
        self.end_time = truncate_to_seconds(fields.end_time);
    }

    pub fn to_row(&self) -> EventRow {
        EventRow {
            id: self.id.to_string(),
            title: self.title.clone(),
            description: self.description.clone(),
            start_time: format_timestamp(&self.start_time),
            end_time: format_timestamp(&self.end_time),
            created_at: format_timestamp(&self.created_at),
        }
    }
}

/// The `events` table row. Every column is stored as text.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct EventRow {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub start_time: String,
    pub end_time: String,
    pub created_at: String,
}

#[derive(Debug, Error)]
pub enum RowMappingError {
    #[error("invalid id {0:?}: {1}")]
    InvalidId(String, #[source] uuid::Error),

    #[error("invalid {column} timestamp {value:?}")]
    InvalidTimestamp { column: &'static str, value: String },
}

fn parse_column(column: &'static str, value: String) -> Result<DateTime<Utc>, RowMappingError> {
    parse_timestamp(&value).ok_or(RowMappingError::InvalidTimestamp { column, value })
}

impl TryFrom<EventRow> for Event {
    type Error = RowMappingError;

    fn try_from(row: EventRow) -> Result<Self, Self::Error> {
        let id = Uuid::parse_str(&row.id).map_err(|e| RowMappingError::InvalidId(row.id, e))?;

        Ok(Self {
            id,
            title: row.title,
            description: row.description,
            start_time: parse_column("start_time", row.start_time)?,
            end_time: parse_column("end_time", row.end_time)?,
            created_at: parse_column("created_at", row.created_at)?,
        })
    }
}

/// The JSON shape returned to clients.
#[derive(Debug, Clone, Serialize)]
pub struct EventResponse {
    pub id: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub start_time: String,
    pub end_time: String,
    pub created_at: String,
}

impl From<&Event> for EventResponse {
    fn from(event: &Event) -> Self {
        Self {
            id: event.id.to_string(),
            title: event.title.clone(),
            description: event.description.clone(),
            start_time: format_timestamp(&event.start_time),
            end_time: format_timestamp(&event.end_time),
            created_at: format_timestamp(&event.created_at),
        }
    }
}

impl From<Event> for EventResponse {
    fn from(event: Event) -> Self {
        Self::from(&event)
    }
}
