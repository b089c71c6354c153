//! Derived statistics: volunteer badges and the organizer dashboard
//!
//! Nothing here is stored; badges and ratings are computed at read time.

use tracing::debug;
use crate::database::store::RegistrationStore;
use crate::database::DatabaseService;
use crate::models::{compute_badges, BadgeSummary, EventWithStats};
use crate::services::auth::Identity;
use crate::utils::errors::Result;

/// Badges earned by `user_id` from confirmed participation in completed events
pub async fn badge_summary<S: RegistrationStore + ?Sized>(store: &S, user_id: &str) -> Result<BadgeSummary> {
    let completed_events = store.count_completed_confirmed(user_id).await?;
    Ok(BadgeSummary {
        user_id: user_id.to_string(),
        completed_events,
        badges: compute_badges(completed_events),
    })
}

#[derive(Clone)]
pub struct StatsService {
    db: DatabaseService,
}

impl StatsService {
    pub fn new(db: DatabaseService) -> Self {
        Self { db }
    }

    pub async fn user_badges(&self, user_id: &str) -> Result<BadgeSummary> {
        let summary = badge_summary(&self.db, user_id).await?;
        debug!(user_id = user_id, completed_events = summary.completed_events, "Computed badges");
        Ok(summary)
    }

    /// The caller's events with average rating and feedback count
    pub async fn dashboard(&self, identity: &Identity) -> Result<Vec<EventWithStats>> {
        identity.require_organizer()?;
        self.db.events.list_with_stats_for_organizer(&identity.subject_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::MemoryStore;
    use crate::models::{Badge, Event, EventStatus, Registration, RegistrationStatus};
    use chrono::NaiveDate;

    async fn event_with_confirmed(store: &MemoryStore, event_id: &str, user_id: &str, status: EventStatus) {
        store
            .insert_event(Event {
                id: event_id.to_string(),
                title: format!("Event {event_id}"),
                date: NaiveDate::from_ymd_opt(2024, 1, 20).unwrap(),
                location: "Town square".to_string(),
                category: "Community".to_string(),
                max_volunteers: 10,
                current_volunteers: 0,
                description: String::new(),
                organizer_id: "org".to_string(),
                organizer_name: "Org".to_string(),
                image_url: None,
                tasks: String::new(),
                status: EventStatus::Upcoming,
            })
            .await;
        let registration = store
            .insert_registration(&Registration::new_pending(event_id, user_id, None, None))
            .await
            .unwrap();
        store
            .transition_locked(&registration.id, RegistrationStatus::Confirmed)
            .await
            .unwrap();
        store.set_event_status(event_id, status).await.unwrap();
    }

    #[tokio::test]
    async fn test_badge_summary_counts_completed_only() {
        let store = MemoryStore::new();
        for event_id in ["a", "b", "c"] {
            event_with_confirmed(&store, event_id, "vol", EventStatus::Completed).await;
        }
        event_with_confirmed(&store, "d", "vol", EventStatus::Upcoming).await;

        let summary = badge_summary(&store, "vol").await.unwrap();
        assert_eq!(summary.completed_events, 3);
        assert_eq!(summary.badges, vec![Badge::FirstStep, Badge::HelpingHand]);
    }

    #[tokio::test]
    async fn test_badge_summary_for_newcomer() {
        let summary = badge_summary(&MemoryStore::new(), "new").await.unwrap();
        assert_eq!(summary.completed_events, 0);
        assert!(summary.badges.is_empty());
    }
}
