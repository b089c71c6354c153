//! Capacity admission controller
//!
//! Decides how a registration status change is committed. Transitions into or out of
//! CONFIRMED move the event's occupancy counter and therefore run under the event lock;
//! everything else is a conditional status write.

use std::sync::Arc;
use tracing::debug;
use crate::database::store::{CommittedTransition, RegistrationStore};
use crate::models::{OccupancyEffect, Registration, RegistrationStatus};
use crate::utils::errors::{Result, VolunteerHubError};
use crate::utils::logging::{log_admission_rejected, log_registration_transition};

pub struct AdmissionController<S: ?Sized> {
    store: Arc<S>,
}

impl<S: ?Sized> Clone for AdmissionController<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<S: RegistrationStore + ?Sized> AdmissionController<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Move `registration` to `next`.
    ///
    /// `registration` is the caller's last read; the stored status may have moved since
    /// and is re-checked before anything is written.
    pub async fn transition(&self, registration: &Registration, next: RegistrationStatus) -> Result<Registration> {
        let committed = match OccupancyEffect::between(registration.status, next) {
            OccupancyEffect::Neutral => self.neutral(registration, next).await?,
            OccupancyEffect::Admit | OccupancyEffect::Release => self.locked(registration, next).await?,
        };

        if committed.previous_status == next {
            debug!(registration_id = %registration.id, status = %next, "Status unchanged");
        } else {
            log_registration_transition(
                &committed.registration.id,
                &committed.registration.event_id,
                committed.previous_status,
                next,
                committed.current_volunteers,
            );
        }
        Ok(committed.registration)
    }

    async fn neutral(&self, registration: &Registration, next: RegistrationStatus) -> Result<CommittedTransition> {
        let written = self
            .store
            .compare_and_set_status(&registration.id, registration.status, next)
            .await?;

        match written {
            Some(updated) => Ok(CommittedTransition {
                registration: updated,
                previous_status: registration.status,
                current_volunteers: None,
            }),
            None => {
                debug!(
                    registration_id = %registration.id,
                    "Status moved concurrently, retrying under the event lock"
                );
                self.locked(registration, next).await
            }
        }
    }

    async fn locked(&self, registration: &Registration, next: RegistrationStatus) -> Result<CommittedTransition> {
        match self.store.transition_locked(&registration.id, next).await {
            Err(VolunteerHubError::CapacityExceeded { event_id, max_volunteers }) => {
                log_admission_rejected(&registration.id, &event_id, max_volunteers);
                Err(VolunteerHubError::CapacityExceeded { event_id, max_volunteers })
            }
            other => other,
        }
    }
}
