//! Bookmark service implementation

use tracing::debug;
use crate::database::DatabaseService;
use crate::models::{BookmarkToggle, Event};
use crate::services::auth::Identity;
use crate::utils::errors::{Result, VolunteerHubError};

#[derive(Clone)]
pub struct BookmarkService {
    db: DatabaseService,
}

impl BookmarkService {
    pub fn new(db: DatabaseService) -> Self {
        Self { db }
    }

    /// Flip the bookmark of `user_id` on `event_id`
    pub async fn toggle(&self, user_id: &str, identity: &Identity, event_id: &str) -> Result<BookmarkToggle> {
        identity.require_subject(user_id)?;
        if self.db.events.find_by_id(event_id).await?.is_none() {
            return Err(VolunteerHubError::EventNotFound {
                event_id: event_id.to_string(),
            });
        }

        let toggle = self.db.bookmarks.toggle(user_id, event_id).await?;
        debug!(user_id = user_id, event_id = event_id, bookmarked = toggle.bookmarked, "Bookmark toggled");
        Ok(toggle)
    }

    /// Bookmarked events with their full records
    pub async fn list(&self, user_id: &str, identity: &Identity) -> Result<Vec<Event>> {
        identity.require_subject(user_id)?;
        self.db.events.list_bookmarked_by(user_id).await
    }
}
