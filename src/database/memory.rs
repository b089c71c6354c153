//! In-memory registration store
//!
//! Every event owns a slot behind its own async mutex. The slot holds the event and
//! all of its registrations, so holding the slot lock plays the role the event row
//! lock plays in Postgres. Transitions on different events never wait on each other.

use std::collections::HashMap;
use std::sync::Arc;
use async_trait::async_trait;
use tokio::sync::{Mutex, RwLock};
use crate::database::store::{CommittedTransition, RegistrationStore};
use crate::models::{Event, EventStatus, OccupancyEffect, Registration, RegistrationStatus};
use crate::utils::errors::{Result, VolunteerHubError};

#[derive(Debug)]
struct EventSlot {
    event: Event,
    registrations: HashMap<String, Registration>,
}

impl EventSlot {
    fn registration_mut(&mut self, registration_id: &str) -> Result<&mut Registration> {
        self.registrations
            .get_mut(registration_id)
            .ok_or_else(|| VolunteerHubError::RegistrationNotFound {
                registration_id: registration_id.to_string(),
            })
    }
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    slots: RwLock<HashMap<String, Arc<Mutex<EventSlot>>>>,
    /// registration id -> event id
    index: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace an event
    pub async fn insert_event(&self, event: Event) {
        let mut slots = self.slots.write().await;
        match slots.get(&event.id) {
            Some(slot) => slot.lock().await.event = event,
            None => {
                let id = event.id.clone();
                let slot = EventSlot {
                    event,
                    registrations: HashMap::new(),
                };
                slots.insert(id, Arc::new(Mutex::new(slot)));
            }
        }
    }

    pub async fn set_event_status(&self, event_id: &str, status: EventStatus) -> Result<Event> {
        let slot = self.slot(event_id).await?;
        let mut slot = slot.lock().await;
        slot.event.status = status;
        Ok(slot.event.clone())
    }

    /// Registrations of an event, unordered
    pub async fn registrations_for(&self, event_id: &str) -> Result<Vec<Registration>> {
        let slot = self.slot(event_id).await?;
        let slot = slot.lock().await;
        Ok(slot.registrations.values().cloned().collect())
    }

    /// Number of CONFIRMED registrations of an event, counted from the records
    pub async fn confirmed_count(&self, event_id: &str) -> Result<i32> {
        let confirmed = self
            .registrations_for(event_id)
            .await?
            .iter()
            .filter(|registration| registration.status == RegistrationStatus::Confirmed)
            .count();
        Ok(confirmed as i32)
    }

    async fn slot(&self, event_id: &str) -> Result<Arc<Mutex<EventSlot>>> {
        self.slots
            .read()
            .await
            .get(event_id)
            .cloned()
            .ok_or_else(|| VolunteerHubError::EventNotFound {
                event_id: event_id.to_string(),
            })
    }

    async fn slot_of_registration(&self, registration_id: &str) -> Result<Arc<Mutex<EventSlot>>> {
        let event_id = self
            .index
            .read()
            .await
            .get(registration_id)
            .cloned()
            .ok_or_else(|| VolunteerHubError::RegistrationNotFound {
                registration_id: registration_id.to_string(),
            })?;
        self.slot(&event_id).await
    }
}

#[async_trait]
impl RegistrationStore for MemoryStore {
    async fn find_event(&self, event_id: &str) -> Result<Option<Event>> {
        match self.slot(event_id).await {
            Ok(slot) => Ok(Some(slot.lock().await.event.clone())),
            Err(VolunteerHubError::EventNotFound { .. }) => Ok(None),
            Err(e) => Err(e),
        }
    }

    async fn find_registration(&self, registration_id: &str) -> Result<Option<Registration>> {
        let slot = match self.slot_of_registration(registration_id).await {
            Ok(slot) => slot,
            Err(VolunteerHubError::RegistrationNotFound { .. }) => return Ok(None),
            Err(e) => return Err(e),
        };
        let slot = slot.lock().await;
        Ok(slot.registrations.get(registration_id).cloned())
    }

    async fn find_user_registration(&self, event_id: &str, user_id: &str) -> Result<Option<Registration>> {
        let slot = match self.slot(event_id).await {
            Ok(slot) => slot,
            Err(VolunteerHubError::EventNotFound { .. }) => return Ok(None),
            Err(e) => return Err(e),
        };
        let slot = slot.lock().await;
        Ok(slot.registrations.values().find(|r| r.user_id == user_id).cloned())
    }

    async fn insert_registration(&self, registration: &Registration) -> Result<Registration> {
        let slot = self.slot(&registration.event_id).await?;
        let mut slot = slot.lock().await;

        if slot.registrations.values().any(|existing| existing.user_id == registration.user_id) {
            return Err(VolunteerHubError::Conflict("Already joined".to_string()));
        }

        slot.registrations.insert(registration.id.clone(), registration.clone());
        self.index
            .write()
            .await
            .insert(registration.id.clone(), registration.event_id.clone());

        Ok(registration.clone())
    }

    async fn compare_and_set_status(
        &self,
        registration_id: &str,
        expected: RegistrationStatus,
        next: RegistrationStatus,
    ) -> Result<Option<Registration>> {
        let slot = self.slot_of_registration(registration_id).await?;
        let mut slot = slot.lock().await;
        let registration = slot.registration_mut(registration_id)?;

        if registration.status != expected {
            return Ok(None);
        }
        registration.status = next;
        Ok(Some(registration.clone()))
    }

    async fn transition_locked(&self, registration_id: &str, next: RegistrationStatus) -> Result<CommittedTransition> {
        let slot = self.slot_of_registration(registration_id).await?;
        let mut slot = slot.lock().await;

        let previous_status = slot.registration_mut(registration_id)?.status;
        let effect = OccupancyEffect::between(previous_status, next);
        let updated = slot.event.occupancy().apply(effect, &slot.event.id)?;
        slot.event.current_volunteers = updated.current;

        let registration = slot.registration_mut(registration_id)?;
        registration.status = next;

        Ok(CommittedTransition {
            registration: registration.clone(),
            previous_status,
            current_volunteers: (effect != OccupancyEffect::Neutral).then_some(updated.current),
        })
    }

    async fn count_completed_confirmed(&self, user_id: &str) -> Result<i64> {
        let slots: Vec<_> = self.slots.read().await.values().cloned().collect();

        let mut count = 0;
        for slot in slots {
            let slot = slot.lock().await;
            if slot.event.status != EventStatus::Completed {
                continue;
            }
            count += slot
                .registrations
                .values()
                .filter(|r| r.user_id == user_id && r.status == RegistrationStatus::Confirmed)
                .count() as i64;
        }
        Ok(count)
    }
}
