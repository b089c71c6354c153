//! Feedback route handlers

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;
use crate::handlers::ApiJson;
use crate::middleware::CurrentUser;
use crate::models::{CreateFeedbackRequest, Feedback, UpdateFeedbackRequest};
use crate::state::AppState;
use crate::utils::errors::Result;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackQuery {
    pub event_id: Option<String>,
}

/// GET /feedbacks?eventId=
pub async fn list_feedbacks(
    State(state): State<AppState>,
    Query(query): Query<FeedbackQuery>,
) -> Result<Json<Vec<Feedback>>> {
    let feedbacks = state.services.feedback_service.list(query.event_id.as_deref()).await?;
    Ok(Json(feedbacks))
}

/// POST /feedbacks
pub async fn create_feedback(
    State(state): State<AppState>,
    CurrentUser(identity): CurrentUser,
    ApiJson(payload): ApiJson<CreateFeedbackRequest>,
) -> Result<Json<Feedback>> {
    Ok(Json(state.services.feedback_service.submit(&identity, payload).await?))
}

/// PUT /feedbacks/:id
pub async fn update_feedback(
    State(state): State<AppState>,
    Path(feedback_id): Path<String>,
    CurrentUser(identity): CurrentUser,
    ApiJson(payload): ApiJson<UpdateFeedbackRequest>,
) -> Result<Json<Feedback>> {
    let feedback = state
        .services
        .feedback_service
        .update(&feedback_id, &identity, payload)
        .await?;
    Ok(Json(feedback))
}
