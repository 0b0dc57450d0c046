use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::response::Response;
use axum::Json;
use tracing::info;
use uuid::Uuid;

use crate::models::{Event, EventRequest, EventResponse};
use crate::state::AppState;
use crate::utils::error::AppError;
use crate::utils::response::{created, no_content, ok};

fn parse_id(raw: &str) -> Result<Uuid, AppError> {
    Ok(Uuid::parse_str(raw)?)
}

/// `POST /api/v1/events`
pub async fn create_event(
    State(state): State<AppState>,
    payload: Result<Json<EventRequest>, JsonRejection>,
) -> Result<Response, AppError> {
    let Json(request) = payload?;
    let fields = request.validate()?;

    let event = Event::new(fields);
    state
        .events
        .insert(&event)
        .await
        .map_err(AppError::store("Failed to create event"))?;

    info!(id = %event.id, title = %event.title, "Event created");
    Ok(created(EventResponse::from(&event)))
}

/// `GET /api/v1/events`
pub async fn list_events(State(state): State<AppState>) -> Result<Response, AppError> {
    let events = state
        .events
        .list_all()
        .await
        .map_err(AppError::store("Failed to retrieve events"))?;

    let body: Vec<EventResponse> = events.iter().map(EventResponse::from).collect();
    Ok(ok(body))
}

/// `GET /api/v1/events/:id`
pub async fn get_event(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    let id = parse_id(&id)?;

    let event = state
        .events
        .get_by_id(id)
        .await
        .map_err(AppError::store("Failed to retrieve event"))?;

    Ok(ok(EventResponse::from(event)))
}

/// `PUT /api/v1/events/:id`
pub async fn update_event(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<EventRequest>, JsonRejection>,
) -> Result<Response, AppError> {
    let id = parse_id(&id)?;
    let Json(request) = payload?;
    let fields = request.validate()?;

    let mut event = state
        .events
        .get_by_id(id)
        .await
        .map_err(AppError::store("Failed to update event"))?;

    event.apply_update(fields);
    state
        .events
        .update(&event)
        .await
        .map_err(AppError::store("Failed to update event"))?;

    info!(%id, "Event updated");
    Ok(ok(EventResponse::from(event)))
}

/// `DELETE /api/v1/events/:id`
pub async fn delete_event(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    let id = parse_id(&id)?;

    state
        .events
        .delete(id)
        .await
        .map_err(AppError::store("Failed to delete event"))?;

    info!(%id, "Event deleted");
    Ok(no_content())
}
