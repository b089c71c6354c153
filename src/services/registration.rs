//! Registration service implementation
//!
//! Joining an event and moderating registrations. Joining never touches the
//! occupancy counter; only confirmation does.

use std::sync::Arc;
use tracing::{debug, info};
use crate::database::store::RegistrationStore;
use crate::models::{JoinRequest, Registration, RegistrationStatus};
use crate::services::admission::AdmissionController;
use crate::services::auth::Identity;
use crate::utils::errors::{Result, VolunteerHubError};

pub struct RegistrationService<S: ?Sized> {
    store: Arc<S>,
    admission: AdmissionController<S>,
}

impl<S: ?Sized> Clone for RegistrationService<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            admission: self.admission.clone(),
        }
    }
}

impl<S: RegistrationStore + ?Sized> RegistrationService<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self {
            admission: AdmissionController::new(Arc::clone(&store)),
            store,
        }
    }

    /// Register the caller for an event as PENDING
    pub async fn register(&self, event_id: &str, identity: &Identity, request: JoinRequest) -> Result<Registration> {
        identity.require_subject(&request.user_id)?;
        debug!(event_id = event_id, user_id = %request.user_id, "Joining event");

        if self.store.find_event(event_id).await?.is_none() {
            return Err(VolunteerHubError::EventNotFound {
                event_id: event_id.to_string(),
            });
        }
        if self.store.find_user_registration(event_id, &request.user_id).await?.is_some() {
            return Err(VolunteerHubError::Conflict("Already joined".to_string()));
        }

        let registration = Registration::new_pending(event_id, &request.user_id, request.user_name, request.user_avatar);
        let registration = self.store.insert_registration(&registration).await?;

        info!(
            registration_id = %registration.id,
            event_id = event_id,
            user_id = %registration.user_id,
            "Volunteer joined event"
        );
        Ok(registration)
    }

    /// Change a registration's status on behalf of the event's organizer
    pub async fn set_status(
        &self,
        registration_id: &str,
        next: RegistrationStatus,
        identity: &Identity,
    ) -> Result<Registration> {
        let registration = self
            .store
            .find_registration(registration_id)
            .await?
            .ok_or_else(|| VolunteerHubError::RegistrationNotFound {
                registration_id: registration_id.to_string(),
            })?;
        let event = self
            .store
            .find_event(&registration.event_id)
            .await?
            .ok_or_else(|| VolunteerHubError::EventNotFound {
                event_id: registration.event_id.clone(),
            })?;

        if !identity.is_organizer || !event.is_organized_by(&identity.subject_id) {
            return Err(VolunteerHubError::Forbidden(
                "Only the event's organizer can manage its registrations".to_string(),
            ));
        }

        self.admission.transition(&registration, next).await
    }
}
