//! Storage seam for the registration engine
//!
//! The admission rules are written once against this trait; Postgres implements it
//! with row locks (`SELECT ... FOR UPDATE`) and [`crate::database::MemoryStore`]
//! implements it with one async mutex per event.

use async_trait::async_trait;
use crate::models::{Event, Registration, RegistrationStatus};
use crate::utils::errors::Result;

/// Outcome of a locked status transition
#[derive(Debug, Clone, PartialEq)]
pub struct CommittedTransition {
    pub registration: Registration,
    /// Status the registration held when the lock was taken
    pub previous_status: RegistrationStatus,
    /// Occupancy counter after commit, when the event row was touched
    pub current_volunteers: Option<i32>,
}

#[async_trait]
pub trait RegistrationStore: Send + Sync {
    async fn find_event(&self, event_id: &str) -> Result<Option<Event>>;

    async fn find_registration(&self, registration_id: &str) -> Result<Option<Registration>>;

    async fn find_user_registration(&self, event_id: &str, user_id: &str) -> Result<Option<Registration>>;

    /// Persist a new registration. Fails with `Conflict` when the user already holds
    /// a registration for the event.
    async fn insert_registration(&self, registration: &Registration) -> Result<Registration>;

    /// Write `next` only if the stored status is still `expected`.
    ///
    /// Returns `None` when the status moved underneath the caller. Used for transitions
    /// that never touch the occupancy counter.
    async fn compare_and_set_status(
        &self,
        registration_id: &str,
        expected: RegistrationStatus,
        next: RegistrationStatus,
    ) -> Result<Option<Registration>>;

    /// Move a registration to `next` while holding the exclusive lock of its event.
    ///
    /// The current status and occupancy are re-read under the lock, the counter effect
    /// is applied through [`crate::models::Occupancy::apply`], and the status and counter
    /// writes commit together. On `CapacityExceeded` nothing is written.
    async fn transition_locked(&self, registration_id: &str, next: RegistrationStatus) -> Result<CommittedTransition>;

    /// Number of the user's CONFIRMED registrations whose event is COMPLETED
    async fn count_completed_confirmed(&self, user_id: &str) -> Result<i64>;
}
