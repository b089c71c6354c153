//! Feedback service implementation

use tracing::info;
use crate::database::DatabaseService;
use crate::models::{validate_rating, CreateFeedbackRequest, Feedback, UpdateFeedbackRequest};
use crate::services::auth::Identity;
use crate::utils::errors::{Result, VolunteerHubError};

#[derive(Clone)]
pub struct FeedbackService {
    db: DatabaseService,
}

impl FeedbackService {
    pub fn new(db: DatabaseService) -> Self {
        Self { db }
    }

    /// Rate an event as the caller
    pub async fn submit(&self, identity: &Identity, request: CreateFeedbackRequest) -> Result<Feedback> {
        validate_rating(request.rating)?;
        if self.db.events.find_by_id(&request.event_id).await?.is_none() {
            return Err(VolunteerHubError::EventNotFound {
                event_id: request.event_id,
            });
        }

        let feedback = self.db.feedbacks.create(&identity.subject_id, request).await?;
        info!(
            feedback_id = %feedback.id,
            event_id = %feedback.event_id,
            user_id = %feedback.user_id,
            rating = feedback.rating,
            "Feedback submitted"
        );
        Ok(feedback)
    }

    pub async fn list(&self, event_id: Option<&str>) -> Result<Vec<Feedback>> {
        self.db.feedbacks.list(event_id).await
    }

    /// Replace the caller's own feedback
    pub async fn update(&self, feedback_id: &str, identity: &Identity, request: UpdateFeedbackRequest) -> Result<Feedback> {
        validate_rating(request.rating)?;

        let not_found = || VolunteerHubError::FeedbackNotFound {
            feedback_id: feedback_id.to_string(),
        };
        let existing = self.db.feedbacks.find_by_id(feedback_id).await?.ok_or_else(not_found)?;
        if existing.user_id != identity.subject_id {
            return Err(VolunteerHubError::Forbidden("Only the author can edit feedback".to_string()));
        }

        let feedback = self.db.feedbacks.update(feedback_id, request).await?.ok_or_else(not_found)?;
        info!(feedback_id = feedback_id, rating = feedback.rating, "Feedback updated");
        Ok(feedback)
    }
}
