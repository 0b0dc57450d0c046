pub mod dto;
pub mod event;
pub mod validation;

pub use dto::EventRequest;
pub use event::{Event, EventResponse, EventRow};
pub use validation::{validate_event, ValidatedEvent, ValidationError};
