//! Feedback repository implementation

use sqlx::PgPool;
use crate::models::feedback::{CreateFeedbackRequest, Feedback, UpdateFeedbackRequest};
use crate::utils::errors::Result;
use crate::utils::helpers::generate_uuid;

const FEEDBACK_COLUMNS: &str = "id, event_id, user_id, rating, comment";

#[derive(Debug, Clone)]
pub struct FeedbackRepository {
    pool: PgPool,
}

impl FeedbackRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create feedback authored by `user_id`
    pub async fn create(&self, user_id: &str, request: CreateFeedbackRequest) -> Result<Feedback> {
        let feedback = sqlx::query_as::<_, Feedback>(&format!(
            r#"
            INSERT INTO feedbacks (id, event_id, user_id, rating, comment)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {FEEDBACK_COLUMNS}
            "#
        ))
        .bind(generate_uuid())
        .bind(request.event_id)
        .bind(user_id)
        .bind(request.rating)
        .bind(request.comment)
        .fetch_one(&self.pool)
        .await?;

        Ok(feedback)
    }

    /// Find feedback by ID
    pub async fn find_by_id(&self, id: &str) -> Result<Option<Feedback>> {
        let feedback = sqlx::query_as::<_, Feedback>(&format!("SELECT {FEEDBACK_COLUMNS} FROM feedbacks WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(feedback)
    }

    /// All feedback, or only the feedback of one event
    pub async fn list(&self, event_id: Option<&str>) -> Result<Vec<Feedback>> {
        let feedbacks = sqlx::query_as::<_, Feedback>(&format!(
            "SELECT {FEEDBACK_COLUMNS} FROM feedbacks WHERE ($1::TEXT IS NULL OR event_id = $1) ORDER BY created_at ASC"
        ))
        .bind(event_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(feedbacks)
    }

    /// Replace rating and comment. Returns `None` when the feedback does not exist.
    pub async fn update(&self, id: &str, request: UpdateFeedbackRequest) -> Result<Option<Feedback>> {
        let feedback = sqlx::query_as::<_, Feedback>(&format!(
            "UPDATE feedbacks SET rating = $2, comment = $3 WHERE id = $1 RETURNING {FEEDBACK_COLUMNS}"
        ))
        .bind(id)
        .bind(request.rating)
        .bind(request.comment)
        .fetch_optional(&self.pool)
        .await?;

        Ok(feedback)
    }
}
