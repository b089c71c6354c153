//! Registration route handlers

use axum::extract::{Path, State};
use axum::Json;
use crate::handlers::ApiJson;
use crate::middleware::CurrentUser;
use crate::models::{Registration, UpdateRegistrationStatusRequest};
use crate::state::AppState;
use crate::utils::errors::Result;

/// PATCH /registrations/:id
pub async fn update_registration_status(
    State(state): State<AppState>,
    Path(registration_id): Path<String>,
    CurrentUser(identity): CurrentUser,
    ApiJson(payload): ApiJson<UpdateRegistrationStatusRequest>,
) -> Result<Json<Registration>> {
    let registration = state
        .services
        .registration_service
        .set_status(&registration_id, payload.status, &identity)
        .await?;
    Ok(Json(registration))
}
