//! Configuration validation module
//!
//! This module provides validation functions for application configuration
//! to ensure all required settings are properly configured.

use crate::utils::errors::{VolunteerHubError, Result};
use super::Settings;

/// Validate all configuration settings
pub fn validate_settings(settings: &Settings) -> Result<()> {
    validate_server_config(&settings.server)?;
    validate_database_config(&settings.database)?;
    validate_auth_config(&settings.auth)?;
    validate_logging_config(&settings.logging)?;

    Ok(())
}

/// Validate HTTP server configuration
fn validate_server_config(config: &super::ServerConfig) -> Result<()> {
    if config.host.is_empty() {
        return Err(VolunteerHubError::Config(
            "Server host is required".to_string()
        ));
    }

    for origin in &config.cors_origins {
        if origin != "*" {
            url::Url::parse(origin).map_err(|e| {
                VolunteerHubError::Config(format!("Invalid CORS origin '{}': {}", origin, e))
            })?;
        }
    }

    Ok(())
}

/// Validate database configuration
fn validate_database_config(config: &super::DatabaseConfig) -> Result<()> {
    if config.url.is_empty() {
        return Err(VolunteerHubError::Config(
            "Database URL is required".to_string()
        ));
    }

    if config.max_connections == 0 {
        return Err(VolunteerHubError::Config(
            "Max connections must be greater than 0".to_string()
        ));
    }

    if config.min_connections > config.max_connections {
        return Err(VolunteerHubError::Config(
            "Min connections cannot be greater than max connections".to_string()
        ));
    }

    Ok(())
}

/// Validate token verification configuration
fn validate_auth_config(config: &super::AuthConfig) -> Result<()> {
    if let Some(issuer) = &config.issuer {
        let parsed = url::Url::parse(issuer)
            .map_err(|e| VolunteerHubError::Config(format!("Invalid token issuer '{}': {}", issuer, e)))?;

        if parsed.scheme() != "https" && parsed.scheme() != "http" {
            return Err(VolunteerHubError::Config(
                format!("Token issuer must be an http(s) URL, got scheme '{}'", parsed.scheme())
            ));
        }
    }

    if config.jwks_cache_ttl_seconds == 0 {
        return Err(VolunteerHubError::Config(
            "JWKS cache TTL must be greater than 0".to_string()
        ));
    }

    Ok(())
}

/// Validate logging configuration
fn validate_logging_config(config: &super::LoggingConfig) -> Result<()> {
    if config.level.is_empty() {
        return Err(VolunteerHubError::Config(
            "Log level is required".to_string()
        ));
    }

    let valid_levels = ["trace", "debug", "info", "warn", "error"];
    if !valid_levels.contains(&config.level.as_str()) {
        return Err(VolunteerHubError::Config(
            format!("Invalid log level: {}. Valid levels: {:?}", config.level, valid_levels)
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_default_settings_are_valid() {
        assert!(validate_settings(&Settings::default()).is_ok());
    }

    #[test]
    fn test_rejects_inverted_pool_sizes() {
        let mut settings = Settings::default();
        settings.database.min_connections = 20;
        assert_matches!(validate_settings(&settings), Err(VolunteerHubError::Config(_)));
    }

    #[test]
    fn test_rejects_bad_issuer() {
        let mut settings = Settings::default();
        settings.auth.issuer = Some("not a url".to_string());
        assert!(validate_settings(&settings).is_err());

        settings.auth.issuer = Some("ftp://clerk.example.com".to_string());
        assert!(validate_settings(&settings).is_err());

        settings.auth.issuer = Some("https://clerk.example.com".to_string());
        assert!(validate_settings(&settings).is_ok());
    }

    #[test]
    fn test_rejects_unknown_log_level() {
        let mut settings = Settings::default();
        settings.logging.level = "verbose".to_string();
        assert!(validate_settings(&settings).is_err());
    }

    #[test]
    fn test_rejects_zero_jwks_ttl() {
        let mut settings = Settings::default();
        settings.auth.jwks_cache_ttl_seconds = 0;
        assert!(validate_settings(&settings).is_err());
    }
}
