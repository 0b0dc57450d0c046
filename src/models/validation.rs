use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::utils::time::parse_timestamp;

pub const MAX_TITLE_LENGTH: usize = 100;

/// Reasons a create or update payload is rejected before it reaches the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("title should not be empty")]
    TitleEmpty,

    #[error("title exceeds maximum length of 100 characters")]
    TitleTooLong,

    #[error("invalid time format, expected ISO 8601 format")]
    InvalidTimeFormat,

    #[error("end_time should be after start_time")]
    EndTimeBeforeStart,
}

/// Event fields that passed validation, with both timestamps already parsed.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedEvent {
    pub title: String,
    pub description: Option<String>,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
}

/// Checks the candidate fields and stops at the first failure.
///
/// Title length is the byte length of the string as received.
pub fn validate_event(
    title: &str,
    description: Option<&str>,
    start_time: &str,
    end_time: &str,
) -> Result<ValidatedEvent, ValidationError> {
    if title.is_empty() {
        return Err(ValidationError::TitleEmpty);
    }

    if title.len() > MAX_TITLE_LENGTH {
        return Err(ValidationError::TitleTooLong);
    }

    let start = parse_timestamp(start_time).ok_or(ValidationError::InvalidTimeFormat)?;
    let end = parse_timestamp(end_time).ok_or(ValidationError::InvalidTimeFormat)?;

    if end < start {
        return Err(ValidationError::EndTimeBeforeStart);
    }

    Ok(ValidatedEvent {
        title: title.to_string(),
        description: description.map(str::to_string),
        start_time: start,
        end_time: end,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const START: &str = "2026-01-20T10:00:00Z";
    const END: &str = "2026-01-20T11:00:00Z";

    #[test]
    fn test_valid_event() {
        let validated = validate_event("Standup", Some("daily"), START, END).unwrap();
        assert_eq!(validated.title, "Standup");
        assert_eq!(validated.description.as_deref(), Some("daily"));
        assert!(validated.start_time < validated.end_time);
    }

    #[test]
    fn test_empty_title() {
        assert_eq!(
            validate_event("", None, START, END),
            Err(ValidationError::TitleEmpty)
        );
    }

    #[test]
    fn test_title_length_boundary() {
        let exact = "a".repeat(MAX_TITLE_LENGTH);
        assert!(validate_event(&exact, None, START, END).is_ok());

        let too_long = "a".repeat(MAX_TITLE_LENGTH + 1);
        assert_eq!(
            validate_event(&too_long, None, START, END),
            Err(ValidationError::TitleTooLong)
        );
    }

    #[test]
    fn test_title_length_counts_bytes() {
        // 51 characters, 102 bytes
        let title = "é".repeat(51);
        assert_eq!(
            validate_event(&title, None, START, END),
            Err(ValidationError::TitleTooLong)
        );
    }

    #[test]
    fn test_invalid_start_or_end() {
        assert_eq!(
            validate_event("t", None, "yesterday", END),
            Err(ValidationError::InvalidTimeFormat)
        );
        assert_eq!(
            validate_event("t", None, START, "2026/01/20"),
            Err(ValidationError::InvalidTimeFormat)
        );
    }

    #[test]
    fn test_end_before_start() {
        assert_eq!(
            validate_event("t", None, END, START),
            Err(ValidationError::EndTimeBeforeStart)
        );
    }

    #[test]
    fn test_end_equal_to_start_is_allowed() {
        assert!(validate_event("t", None, START, START).is_ok());
    }

    #[test]
    fn test_comparison_respects_offsets() {
        // 10:30+02:00 is 08:30Z, before 09:00Z
        assert_eq!(
            validate_event("t", None, "2026-01-20T09:00:00Z", "2026-01-20T10:30:00+02:00"),
            Err(ValidationError::EndTimeBeforeStart)
        );
    }

    #[test]
    fn test_first_failure_wins() {
        assert_eq!(
            validate_event("", None, "bad", "bad"),
            Err(ValidationError::TitleEmpty)
        );
        let too_long = "x".repeat(101);
        assert_eq!(
            validate_event(&too_long, None, "bad", "bad"),
            Err(ValidationError::TitleTooLong)
        );
        assert_eq!(
            validate_event("t", None, "bad", START),
            Err(ValidationError::InvalidTimeFormat)
        );
    }

    #[test]
    fn test_messages() {
        assert_eq!(
            ValidationError::TitleEmpty.to_string(),
            "title should not be empty"
        );
        assert_eq!(
            ValidationError::EndTimeBeforeStart.to_string(),
            "end_time should be after start_time"
        );
    }
}
