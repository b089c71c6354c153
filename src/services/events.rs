//! Event service implementation
//!
//! Publishing and editing events. Only the owning organizer may change an event or
//! see who registered for it.

use tracing::{debug, info};
use crate::database::DatabaseService;
use crate::models::{CreateEventRequest, Event, EventStatus, Registration, UpdateEventRequest};
use crate::services::auth::Identity;
use crate::utils::errors::{Result, VolunteerHubError};
use crate::utils::helpers::{non_blank, normalize_whitespace};
use crate::utils::logging::log_event_action;

const DEFAULT_ORGANIZER_NAME: &str = "Organizer";

#[derive(Clone)]
pub struct EventService {
    db: DatabaseService,
}

impl EventService {
    pub fn new(db: DatabaseService) -> Self {
        Self { db }
    }

    /// Publish a new event owned by the caller
    pub async fn create(&self, identity: &Identity, mut request: CreateEventRequest) -> Result<Event> {
        identity.require_organizer()?;
        request.title = normalize_whitespace(&request.title);
        validate_title(&request.title)?;
        validate_max_volunteers(request.max_volunteers)?;

        let organizer_name = non_blank(request.organizer_name.take())
            .unwrap_or_else(|| DEFAULT_ORGANIZER_NAME.to_string());
        let event = self.db.events.create(&identity.subject_id, &organizer_name, request).await?;

        log_event_action(&event.id, "created", &identity.subject_id, Some(&event.title));
        Ok(event)
    }

    pub async fn list(&self) -> Result<Vec<Event>> {
        self.db.events.list().await
    }

    pub async fn get(&self, event_id: &str) -> Result<Event> {
        self.db
            .events
            .find_by_id(event_id)
            .await?
            .ok_or_else(|| not_found(event_id))
    }

    /// Edit event details. The occupancy counter and the owner never change here.
    pub async fn update(&self, event_id: &str, identity: &Identity, mut request: UpdateEventRequest) -> Result<Event> {
        let event = self.get(event_id).await?;
        require_owner(&event, identity)?;

        if let Some(title) = request.title.as_mut() {
            *title = normalize_whitespace(title);
            validate_title(title)?;
        }
        if let Some(max_volunteers) = request.max_volunteers {
            validate_max_volunteers(max_volunteers)?;
        }

        let updated = self
            .db
            .events
            .update_details(event_id, request)
            .await?
            .ok_or_else(|| not_found(event_id))?;

        log_event_action(event_id, "updated", &identity.subject_id, None);
        Ok(updated)
    }

    pub async fn update_status(&self, event_id: &str, identity: &Identity, status: EventStatus) -> Result<Event> {
        let event = self.get(event_id).await?;
        require_owner(&event, identity)?;

        let updated = self
            .db
            .events
            .update_status(event_id, status)
            .await?
            .ok_or_else(|| not_found(event_id))?;

        info!(event_id = event_id, from = %event.status, to = %status, "Event status changed");
        Ok(updated)
    }

    /// Registrations of an event, visible to its organizer only
    pub async fn registrations(&self, event_id: &str, identity: &Identity) -> Result<Vec<Registration>> {
        let event = self.get(event_id).await?;
        require_owner(&event, identity)?;

        let registrations = self.db.registrations.list_for_event(event_id).await?;
        debug!(event_id = event_id, count = registrations.len(), "Listed registrations");
        Ok(registrations)
    }
}

fn not_found(event_id: &str) -> VolunteerHubError {
    VolunteerHubError::EventNotFound {
        event_id: event_id.to_string(),
    }
}

fn require_owner(event: &Event, identity: &Identity) -> Result<()> {
    if !event.is_organized_by(&identity.subject_id) {
        return Err(VolunteerHubError::Forbidden("Not authorized".to_string()));
    }
    Ok(())
}

fn validate_title(title: &str) -> Result<()> {
    if title.is_empty() {
        return Err(VolunteerHubError::Validation("Title must not be empty".to_string()));
    }
    Ok(())
}

fn validate_max_volunteers(max_volunteers: i32) -> Result<()> {
    if max_volunteers < 1 {
        return Err(VolunteerHubError::Validation(format!(
            "maxVolunteers must be at least 1, got {}",
            max_volunteers
        )));
    }
    Ok(())
}
