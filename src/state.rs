use crate::repository::EventRepository;

/// Shared handler state. Cloning is cheap: the repository wraps a pooled handle.
#[derive(Clone)]
pub struct AppState {
    pub events: EventRepository,
}

impl AppState {
    pub fn new(events: EventRepository) -> Self {
        Self { events }
    }
}
