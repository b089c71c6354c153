//! Per-user route handlers: bookmarks, badges and the organizer dashboard

use axum::extract::{Path, State};
use axum::Json;
use crate::handlers::ApiJson;
use crate::middleware::CurrentUser;
use crate::models::{BadgeSummary, BookmarkRequest, BookmarkToggle, Event, EventWithStats};
use crate::state::AppState;
use crate::utils::errors::Result;

/// GET /users/:id/bookmarks
pub async fn list_bookmarks(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    CurrentUser(identity): CurrentUser,
) -> Result<Json<Vec<Event>>> {
    Ok(Json(state.services.bookmark_service.list(&user_id, &identity).await?))
}

/// POST /users/:id/bookmarks
pub async fn toggle_bookmark(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    CurrentUser(identity): CurrentUser,
    ApiJson(payload): ApiJson<BookmarkRequest>,
) -> Result<Json<BookmarkToggle>> {
    let toggle = state
        .services
        .bookmark_service
        .toggle(&user_id, &identity, &payload.event_id)
        .await?;
    Ok(Json(toggle))
}

/// GET /users/:id/badges
pub async fn user_badges(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    CurrentUser(_identity): CurrentUser,
) -> Result<Json<BadgeSummary>> {
    Ok(Json(state.services.stats_service.user_badges(&user_id).await?))
}

/// GET /organizers/dashboard
pub async fn organizer_dashboard(
    State(state): State<AppState>,
    CurrentUser(identity): CurrentUser,
) -> Result<Json<Vec<EventWithStats>>> {
    Ok(Json(state.services.stats_service.dashboard(&identity).await?))
}
