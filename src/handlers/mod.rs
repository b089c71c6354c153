//! HTTP handlers module
//!
//! Route handlers grouped by resource, and the router that wires them together
//! with CORS and request logging.

pub mod events;
pub mod feedback;
pub mod registrations;
pub mod users;

use axum::extract::{FromRequest, State};
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderValue, Method, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, patch, post};
use axum::{Json, Router};
use serde_json::json;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tracing::warn;
use crate::middleware::log_requests;
use crate::state::AppState;
use crate::utils::errors::VolunteerHubError;

/// JSON body whose decoding failures become `VALIDATION_ERROR` responses
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(VolunteerHubError))]
pub struct ApiJson<T>(pub T);

/// Build the application router
pub fn router(state: AppState, cors_origins: &[String]) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/events", get(events::list_events).post(events::create_event))
        .route(
            "/events/:id",
            get(events::get_event)
                .put(events::update_event)
                .patch(events::update_event_status),
        )
        .route("/events/:id/join", post(events::join_event))
        .route("/events/:id/registrations", get(events::list_event_registrations))
        .route("/registrations/:id", patch(registrations::update_registration_status))
        .route("/feedbacks", get(feedback::list_feedbacks).post(feedback::create_feedback))
        .route("/feedbacks/:id", axum::routing::put(feedback::update_feedback))
        .route("/users/:id/bookmarks", get(users::list_bookmarks).post(users::toggle_bookmark))
        .route("/users/:id/badges", get(users::user_badges))
        .route("/organizers/dashboard", get(users::organizer_dashboard))
        .layer(axum::middleware::from_fn(log_requests))
        .layer(cors_layer(cors_origins))
        .with_state(state)
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([AUTHORIZATION, CONTENT_TYPE]);

    if origins.iter().any(|origin| origin == "*") {
        return layer.allow_origin(AllowOrigin::any());
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    layer.allow_origin(AllowOrigin::list(allowed)).allow_credentials(true)
}

/// GET /health
async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let status = state.services.health_check().await;
    let code = if status.is_healthy() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (
        code,
        Json(json!({
            "status": if status.is_healthy() { "ok" } else { "degraded" },
            "databaseHealthy": status.database_healthy,
            "issues": status.get_issues(),
        })),
    )
}
