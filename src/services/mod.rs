//! Services module
//!
//! This module contains business logic services

pub mod admission;
pub mod auth;
pub mod bookmarks;
pub mod events;
pub mod feedback;
pub mod registration;
pub mod stats;

// Re-export commonly used services
pub use admission::AdmissionController;
pub use auth::{Identity, IdentityVerifier, JwtVerifier};
pub use bookmarks::BookmarkService;
pub use events::EventService;
pub use feedback::FeedbackService;
pub use registration::RegistrationService;
pub use stats::{badge_summary, StatsService};

use std::sync::Arc;
use crate::database::DatabaseService;

/// Service factory for creating and managing all services
#[derive(Clone)]
pub struct ServiceFactory {
    db: DatabaseService,
    pub event_service: EventService,
    pub registration_service: RegistrationService<DatabaseService>,
    pub feedback_service: FeedbackService,
    pub bookmark_service: BookmarkService,
    pub stats_service: StatsService,
}

impl ServiceFactory {
    /// Create a new ServiceFactory with all services sharing one database service
    pub fn new(db: DatabaseService) -> Self {
        Self {
            event_service: EventService::new(db.clone()),
            registration_service: RegistrationService::new(Arc::new(db.clone())),
            feedback_service: FeedbackService::new(db.clone()),
            bookmark_service: BookmarkService::new(db.clone()),
            stats_service: StatsService::new(db.clone()),
            db,
        }
    }

    /// Health check for all services
    pub async fn health_check(&self) -> ServiceHealthStatus {
        let database_healthy = match self.db.health_check().await {
            Ok(()) => true,
            Err(e) => {
                tracing::error!(error = %e, "Database health check failed");
                false
            }
        };

        ServiceHealthStatus { database_healthy }
    }
}

/// Health status for all services
#[derive(Debug, Clone, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceHealthStatus {
    pub database_healthy: bool,
}

impl ServiceHealthStatus {
    /// Check if all critical services are healthy
    pub fn is_healthy(&self) -> bool {
        self.database_healthy
    }

    /// Get list of unhealthy services
    pub fn get_issues(&self) -> Vec<String> {
        let mut issues = Vec::new();

        if !self.database_healthy {
            issues.push("Database connection failed".to_string());
        }

        issues
    }
}
