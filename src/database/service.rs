//! Database service layer
//!
//! This module bundles the repositories over one pool and implements the
//! registration storage seam on top of them.

use async_trait::async_trait;
use crate::database::{BookmarkRepository, DatabasePool, EventRepository, FeedbackRepository, RegistrationRepository};
use crate::database::store::{CommittedTransition, RegistrationStore};
use crate::models::{Event, Registration, RegistrationStatus};
use crate::utils::errors::Result;

#[derive(Debug, Clone)]
pub struct DatabaseService {
    pool: DatabasePool,
    pub events: EventRepository,
    pub registrations: RegistrationRepository,
    pub feedbacks: FeedbackRepository,
    pub bookmarks: BookmarkRepository,
}

impl DatabaseService {
    pub fn new(pool: DatabasePool) -> Self {
        Self {
            events: EventRepository::new(pool.clone()),
            registrations: RegistrationRepository::new(pool.clone()),
            feedbacks: FeedbackRepository::new(pool.clone()),
            bookmarks: BookmarkRepository::new(pool.clone()),
            pool,
        }
    }

    pub fn pool(&self) -> &DatabasePool {
        &self.pool
    }

    /// Check the connection backing every repository
    pub async fn health_check(&self) -> Result<()> {
        crate::database::health_check(&self.pool).await
    }
}

#[async_trait]
impl RegistrationStore for DatabaseService {
    async fn find_event(&self, event_id: &str) -> Result<Option<Event>> {
        self.events.find_by_id(event_id).await
    }

    async fn find_registration(&self, registration_id: &str) -> Result<Option<Registration>> {
        self.registrations.find_by_id(registration_id).await
    }

    async fn find_user_registration(&self, event_id: &str, user_id: &str) -> Result<Option<Registration>> {
        self.registrations.find_for_user(event_id, user_id).await
    }

    async fn insert_registration(&self, registration: &Registration) -> Result<Registration> {
        self.registrations.create(registration).await
    }

    async fn compare_and_set_status(
        &self,
        registration_id: &str,
        expected: RegistrationStatus,
        next: RegistrationStatus,
    ) -> Result<Option<Registration>> {
        self.registrations.compare_and_set_status(registration_id, expected, next).await
    }

    async fn transition_locked(&self, registration_id: &str, next: RegistrationStatus) -> Result<CommittedTransition> {
        self.registrations.transition_locked(registration_id, next).await
    }

    async fn count_completed_confirmed(&self, user_id: &str) -> Result<i64> {
        self.registrations.count_completed_confirmed(user_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::postgres::PgPoolOptions;

    #[tokio::test]
    async fn test_database_service_creation_is_lazy() {
        let pool = PgPoolOptions::new()
            .connect_lazy("postgresql://localhost/volunteer_hub")
            .unwrap();
        let service = DatabaseService::new(pool);
        assert_eq!(service.pool().size(), 0);
    }
}
