//! Event route handlers

use axum::extract::{Path, State};
use axum::Json;
use tracing::debug;
use crate::handlers::ApiJson;
use crate::middleware::CurrentUser;
use crate::models::{
    CreateEventRequest, Event, JoinRequest, Registration, UpdateEventRequest, UpdateEventStatusRequest,
};
use crate::state::AppState;
use crate::utils::errors::Result;

/// GET /events
pub async fn list_events(State(state): State<AppState>) -> Result<Json<Vec<Event>>> {
    let events = state.services.event_service.list().await?;
    debug!(count = events.len(), "Listing events");
    Ok(Json(events))
}

/// POST /events
pub async fn create_event(
    State(state): State<AppState>,
    CurrentUser(identity): CurrentUser,
    ApiJson(payload): ApiJson<CreateEventRequest>,
) -> Result<Json<Event>> {
    let event = state.services.event_service.create(&identity, payload).await?;
    Ok(Json(event))
}

/// GET /events/:id
pub async fn get_event(State(state): State<AppState>, Path(event_id): Path<String>) -> Result<Json<Event>> {
    Ok(Json(state.services.event_service.get(&event_id).await?))
}

/// PUT /events/:id
pub async fn update_event(
    State(state): State<AppState>,
    Path(event_id): Path<String>,
    CurrentUser(identity): CurrentUser,
    ApiJson(payload): ApiJson<UpdateEventRequest>,
) -> Result<Json<Event>> {
    let event = state.services.event_service.update(&event_id, &identity, payload).await?;
    Ok(Json(event))
}

/// PATCH /events/:id
pub async fn update_event_status(
    State(state): State<AppState>,
    Path(event_id): Path<String>,
    CurrentUser(identity): CurrentUser,
    ApiJson(payload): ApiJson<UpdateEventStatusRequest>,
) -> Result<Json<Event>> {
    let event = state
        .services
        .event_service
        .update_status(&event_id, &identity, payload.status)
        .await?;
    Ok(Json(event))
}

/// POST /events/:id/join
pub async fn join_event(
    State(state): State<AppState>,
    Path(event_id): Path<String>,
    CurrentUser(identity): CurrentUser,
    ApiJson(payload): ApiJson<JoinRequest>,
) -> Result<Json<Registration>> {
    let registration = state
        .services
        .registration_service
        .register(&event_id, &identity, payload)
        .await?;
    Ok(Json(registration))
}

/// GET /events/:id/registrations
pub async fn list_event_registrations(
    State(state): State<AppState>,
    Path(event_id): Path<String>,
    CurrentUser(identity): CurrentUser,
) -> Result<Json<Vec<Registration>>> {
    let registrations = state.services.event_service.registrations(&event_id, &identity).await?;
    Ok(Json(registrations))
}
