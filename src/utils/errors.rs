//! Error handling for Volunteer Hub
//!
//! This module defines the main error type used throughout the application
//! and the mapping of error kinds onto HTTP responses.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

/// Main error type for Volunteer Hub
#[derive(Error, Debug)]
pub enum VolunteerHubError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Database migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Configuration loading error: {0}")]
    ConfigLoad(#[from] config::ConfigError),

    #[error("Event not found: {event_id}")]
    EventNotFound { event_id: String },

    #[error("Registration not found: {registration_id}")]
    RegistrationNotFound { registration_id: String },

    #[error("Feedback not found: {feedback_id}")]
    FeedbackNotFound { feedback_id: String },

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Event {event_id} is full ({max_volunteers} volunteers)")]
    CapacityExceeded { event_id: String, max_volunteers: i32 },

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Token error: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for Volunteer Hub operations
pub type Result<T> = std::result::Result<T, VolunteerHubError>;

/// Client-visible classification of an error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    Forbidden,
    Conflict,
    CapacityExceeded,
    Validation,
    Unauthorized,
    Internal,
}

impl ErrorKind {
    /// Stable code sent to clients in error bodies
    pub fn code(&self) -> &'static str {
        match self {
            ErrorKind::NotFound => "NOT_FOUND",
            ErrorKind::Forbidden => "FORBIDDEN",
            ErrorKind::Conflict => "CONFLICT",
            ErrorKind::CapacityExceeded => "CAPACITY_EXCEEDED",
            ErrorKind::Validation => "VALIDATION_ERROR",
            ErrorKind::Unauthorized => "UNAUTHORIZED",
            ErrorKind::Internal => "INTERNAL_ERROR",
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::Forbidden => StatusCode::FORBIDDEN,
            ErrorKind::Unauthorized => StatusCode::UNAUTHORIZED,
            ErrorKind::Conflict | ErrorKind::CapacityExceeded | ErrorKind::Validation => {
                StatusCode::BAD_REQUEST
            }
            ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl VolunteerHubError {
    /// Classify the error for callers
    pub fn kind(&self) -> ErrorKind {
        match self {
            VolunteerHubError::EventNotFound { .. }
            | VolunteerHubError::RegistrationNotFound { .. }
            | VolunteerHubError::FeedbackNotFound { .. } => ErrorKind::NotFound,
            VolunteerHubError::Forbidden(_) => ErrorKind::Forbidden,
            VolunteerHubError::Conflict(_) => ErrorKind::Conflict,
            VolunteerHubError::CapacityExceeded { .. } => ErrorKind::CapacityExceeded,
            VolunteerHubError::Validation(_) => ErrorKind::Validation,
            VolunteerHubError::Unauthorized(_) | VolunteerHubError::Jwt(_) => ErrorKind::Unauthorized,
            VolunteerHubError::Database(_)
            | VolunteerHubError::Migration(_)
            | VolunteerHubError::Config(_)
            | VolunteerHubError::ConfigLoad(_)
            | VolunteerHubError::Http(_)
            | VolunteerHubError::Serialization(_)
            | VolunteerHubError::Io(_) => ErrorKind::Internal,
        }
    }

    /// Check if the error is recoverable
    pub fn is_recoverable(&self) -> bool {
        match self {
            VolunteerHubError::Database(_) => false,
            VolunteerHubError::Migration(_) => false,
            VolunteerHubError::Config(_) => false,
            VolunteerHubError::ConfigLoad(_) => false,
            VolunteerHubError::EventNotFound { .. } => false,
            VolunteerHubError::RegistrationNotFound { .. } => false,
            VolunteerHubError::FeedbackNotFound { .. } => false,
            VolunteerHubError::Forbidden(_) => false,
            VolunteerHubError::Conflict(_) => false,
            VolunteerHubError::CapacityExceeded { .. } => false,
            VolunteerHubError::Validation(_) => false,
            VolunteerHubError::Unauthorized(_) => false,
            VolunteerHubError::Http(_) => true,
            VolunteerHubError::Jwt(_) => false,
            VolunteerHubError::Serialization(_) => false,
            VolunteerHubError::Io(_) => true,
        }
    }

    /// Get error severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            VolunteerHubError::Database(_) => ErrorSeverity::Critical,
            VolunteerHubError::Migration(_) => ErrorSeverity::Critical,
            VolunteerHubError::Config(_) => ErrorSeverity::Critical,
            VolunteerHubError::ConfigLoad(_) => ErrorSeverity::Critical,
            VolunteerHubError::Forbidden(_) => ErrorSeverity::Warning,
            VolunteerHubError::Unauthorized(_) => ErrorSeverity::Warning,
            VolunteerHubError::Jwt(_) => ErrorSeverity::Warning,
            VolunteerHubError::CapacityExceeded { .. } => ErrorSeverity::Info,
            VolunteerHubError::Conflict(_) => ErrorSeverity::Info,
            VolunteerHubError::Validation(_) => ErrorSeverity::Info,
            _ => ErrorSeverity::Error,
        }
    }

    /// Message safe to show to API clients
    fn public_message(&self) -> String {
        match self.kind() {
            ErrorKind::Internal => "An internal error occurred".to_string(),
            ErrorKind::Unauthorized => "Could not validate credentials".to_string(),
            _ => self.to_string(),
        }
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Info,
    Warning,
    Error,
    Critical,
}

impl std::fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorSeverity::Info => write!(f, "INFO"),
            ErrorSeverity::Warning => write!(f, "WARN"),
            ErrorSeverity::Error => write!(f, "ERROR"),
            ErrorSeverity::Critical => write!(f, "CRITICAL"),
        }
    }
}

impl From<JsonRejection> for VolunteerHubError {
    fn from(rejection: JsonRejection) -> Self {
        VolunteerHubError::Validation(rejection.body_text())
    }
}

/// JSON error body
#[derive(Debug, Serialize)]
struct ErrorBody {
    code: &'static str,
    message: String,
}

impl IntoResponse for VolunteerHubError {
    fn into_response(self) -> Response {
        let kind = self.kind();
        match kind {
            ErrorKind::Internal => {
                tracing::error!(
                    error = %self,
                    severity = %self.severity(),
                    recoverable = self.is_recoverable(),
                    "Request failed"
                );
            }
            ErrorKind::Unauthorized => {
                tracing::warn!(error = %self, "Rejected credentials");
            }
            _ => {
                tracing::debug!(error = %self, code = kind.code(), "Request rejected");
            }
        }

        let body = ErrorBody {
            code: kind.code(),
            message: self.public_message(),
        };

        (kind.status_code(), Json(body)).into_response()
    }
}
