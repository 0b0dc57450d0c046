use serde::Deserialize;

use crate::models::validation::{validate_event, ValidatedEvent, ValidationError};

/// JSON payload accepted by create and update.
///
/// Missing string fields default to empty so they fail validation with the
/// matching message instead of a deserialization error.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EventRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub start_time: String,
    #[serde(default)]
    pub end_time: String,
}

impl EventRequest {
    pub fn validate(&self) -> Result<ValidatedEvent, ValidationError> {
        validate_event(
            &self.title,
            self.description.as_deref(),
            &self.start_time,
            &self.end_time,
        )
    }
}
