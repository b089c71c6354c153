//! Application settings management
//!
//! This module defines the configuration structure and provides methods
//! for loading settings from TOML files and environment variables.

use std::path::Path;
use serde::{Deserialize, Deserializer, Serialize};

/// Main application configuration structure
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Settings {
    pub app: AppConfig,
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    pub logging: LoggingConfig,
}

/// Application identity
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    pub name: String,
    pub environment: String,
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    #[serde(deserialize_with = "deserialize_origins")]
    pub cors_origins: Vec<String>,
}

/// Database configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub acquire_timeout_seconds: u64,
}

/// Bearer token verification configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuthConfig {
    /// Token issuer; signatures are not verified when unset
    pub issuer: Option<String>,
    pub jwks_cache_ttl_seconds: u64,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    pub level: String,
    pub file_path: Option<String>,
    pub json: bool,
}

/// Accept either a list of origins or a single comma separated string
fn deserialize_origins<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Origins {
        List(Vec<String>),
        Csv(String),
    }

    let origins = match Origins::deserialize(deserializer)? {
        Origins::List(list) => list,
        Origins::Csv(csv) => csv.split(',').map(str::to_string).collect(),
    };

    Ok(origins
        .into_iter()
        .map(|origin| origin.trim().to_string())
        .filter(|origin| !origin.is_empty())
        .collect())
}

impl Settings {
    /// Load settings from `config.toml` (if present) and environment variables
    pub fn new() -> Result<Self, config::ConfigError> {
        Self::load(config::File::with_name("config").required(false))
    }

    /// Load settings from an explicit configuration file plus environment variables
    pub fn from_file(path: &Path) -> Result<Self, config::ConfigError> {
        Self::load(config::File::from(path))
    }

    fn load(file: config::File<config::FileSourceFile, config::FileFormat>) -> Result<Self, config::ConfigError> {
        let defaults = Settings::default();

        let settings = config::Config::builder()
            .set_default("app.name", defaults.app.name)?
            .set_default("app.environment", defaults.app.environment)?
            .set_default("server.host", defaults.server.host)?
            .set_default("server.port", i64::from(defaults.server.port))?
            .set_default("server.cors_origins", defaults.server.cors_origins)?
            .set_default("database.url", defaults.database.url)?
            .set_default("database.max_connections", i64::from(defaults.database.max_connections))?
            .set_default("database.min_connections", i64::from(defaults.database.min_connections))?
            .set_default("database.acquire_timeout_seconds", defaults.database.acquire_timeout_seconds as i64)?
            .set_default("auth.jwks_cache_ttl_seconds", defaults.auth.jwks_cache_ttl_seconds as i64)?
            .set_default("logging.level", defaults.logging.level)?
            .set_default("logging.json", defaults.logging.json)?
            .add_source(file)
            .add_source(config::Environment::with_prefix("VOLUNTEER").prefix_separator("_").separator("__"))
            // Bare variable names used by existing deployments
            .set_override_option("database.url", std::env::var("DATABASE_URL").ok())?
            .set_override_option("auth.issuer", std::env::var("CLERK_ISSUER").ok())?
            .set_override_option("server.host", std::env::var("HOST").ok())?
            .set_override_option("server.port", std::env::var("PORT").ok())?
            .set_override_option("server.cors_origins", std::env::var("CORS_ORIGINS").ok())?
            .build()?;

        settings.try_deserialize()
    }

    /// Validate configuration settings
    pub fn validate(&self) -> Result<(), crate::utils::errors::VolunteerHubError> {
        super::validation::validate_settings(self)
    }

    /// Socket address string the server binds to
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            app: AppConfig {
                name: "Volunteerism App Backend".to_string(),
                environment: "development".to_string(),
            },
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 8000,
                cors_origins: vec!["http://localhost:5173".to_string()],
            },
            database: DatabaseConfig {
                url: "postgresql://localhost/volunteer_hub".to_string(),
                max_connections: 10,
                min_connections: 1,
                acquire_timeout_seconds: 10,
            },
            auth: AuthConfig {
                issuer: None,
                jwks_cache_ttl_seconds: 300,
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                file_path: None,
                json: false,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::io::Write;

    #[test]
    fn test_cors_origins_from_csv_string() {
        let server: ServerConfig = serde_json::from_str(
            r#"{"host":"0.0.0.0","port":8000,"cors_origins":"http://a.test, ,http://b.test "}"#,
        )
        .unwrap();
        assert_eq!(server.cors_origins, vec!["http://a.test", "http://b.test"]);
    }

    #[test]
    fn test_cors_origins_from_list() {
        let server: ServerConfig = serde_json::from_str(
            r#"{"host":"0.0.0.0","port":8000,"cors_origins":["http://a.test"]}"#,
        )
        .unwrap();
        assert_eq!(server.cors_origins, vec!["http://a.test"]);
    }

    #[test]
    #[serial]
    fn test_load_from_file_with_defaults() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            r#"
[server]
port = 9090

[database]
url = "postgresql://db.internal/volunteers"

[auth]
issuer = "https://clerk.example.com"
"#
        )
        .unwrap();

        let settings = Settings::from_file(file.path()).unwrap();
        assert_eq!(settings.server.port, 9090);
        assert_eq!(settings.server.host, "0.0.0.0");
        assert_eq!(settings.database.max_connections, 10);
        assert_eq!(settings.auth.issuer.as_deref(), Some("https://clerk.example.com"));
        assert_eq!(settings.logging.level, "info");
        assert_eq!(settings.bind_address(), "0.0.0.0:9090");
    }
}
