//! Logging configuration and setup
//!
//! This module provides logging initialization and structured logging utilities
//! for the Volunteer Hub backend.

use std::path::Path;
use tracing::{debug, info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use crate::config::LoggingConfig;
use crate::models::RegistrationStatus;
use crate::utils::errors::{Result, VolunteerHubError};

/// Initialize logging based on configuration.
///
/// The returned guard flushes the file writer on drop and must be held for the
/// lifetime of the process.
pub fn init_logging(config: &LoggingConfig) -> Result<Option<WorkerGuard>> {
    let filter = EnvFilter::try_new(&config.level)
        .map_err(|e| VolunteerHubError::Config(format!("Invalid log filter '{}': {}", config.level, e)))?;

    let (file_layer, guard) = match config.file_path.as_deref() {
        Some(path) => {
            let path = Path::new(path);
            let directory = path.parent().filter(|p| !p.as_os_str().is_empty()).unwrap_or_else(|| Path::new("."));
            let file_name = path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_else(|| "volunteer-hub.log".to_string());
            let file_appender = tracing_appender::rolling::daily(directory, file_name);
            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
            let layer = fmt::layer().with_ansi(false).with_writer(non_blocking);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    let json_layer = config.json.then(|| fmt::layer().json().with_writer(std::io::stdout));
    let text_layer = (!config.json).then(|| fmt::layer().with_writer(std::io::stdout));

    tracing_subscriber::registry()
        .with(filter)
        .with(json_layer)
        .with(text_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| VolunteerHubError::Config(format!("Failed to install tracing subscriber: {}", e)))?;

    info!("Logging initialized with level: {}", config.level);
    Ok(guard)
}

/// Log event management actions
pub fn log_event_action(event_id: &str, action: &str, user_id: &str, details: Option<&str>) {
    info!(
        event_id = event_id,
        action = action,
        user_id = user_id,
        details = details,
        "Event action performed"
    );
}

/// Log a committed registration status change
pub fn log_registration_transition(
    registration_id: &str,
    event_id: &str,
    from: RegistrationStatus,
    to: RegistrationStatus,
    current_volunteers: Option<i32>,
) {
    info!(
        registration_id = registration_id,
        event_id = event_id,
        from = %from,
        to = %to,
        current_volunteers = current_volunteers,
        "Registration status changed"
    );
}

/// Log an admission refused because the event is full
pub fn log_admission_rejected(registration_id: &str, event_id: &str, max_volunteers: i32) {
    warn!(
        registration_id = registration_id,
        event_id = event_id,
        max_volunteers = max_volunteers,
        "Admission rejected: event is full"
    );
}

/// Log database operations
pub fn log_database_operation(operation: &str, table: &str, duration_ms: u64) {
    debug!(
        operation = operation,
        table = table,
        duration_ms = duration_ms,
        "Database operation completed"
    );
}
