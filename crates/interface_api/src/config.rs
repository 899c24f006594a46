//! API configuration

use serde::Deserialize;

use domain_crew::StatusServiceConfig;
use infra_db::DatabaseConfig;

const DEFAULT_DATABASE_URL: &str = "postgres://localhost/crew_management";

/// API configuration
///
/// Loaded from `API_`-prefixed environment variables, e.g. `API_PORT=9000`.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    /// Base URL of the crew status service
    pub status_service_url: String,
    pub status_service_timeout_secs: u64,
    /// Shared key required on `/api` routes; `None` lets every request through
    #[serde(default)]
    pub api_key: Option<String>,
    pub log_level: String,
    /// Emit logs as JSON lines
    pub log_json: bool,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            database_url: DEFAULT_DATABASE_URL.to_string(),
            status_service_url: "http://localhost:7071".to_string(),
            status_service_timeout_secs: 30,
            api_key: None,
            log_level: "info".to_string(),
            log_json: false,
        }
    }
}

impl ApiConfig {
    /// Loads configuration from the environment, falling back to defaults
    ///
    /// A bare `DATABASE_URL` is honoured when `API_DATABASE_URL` is unset.
    pub fn from_env() -> Result<Self, config::ConfigError> {
        let defaults = Self::default();
        let database_url =
            std::env::var("DATABASE_URL").unwrap_or_else(|_| defaults.database_url.clone());

        config::Config::builder()
            .set_default("host", defaults.host)?
            .set_default("port", i64::from(defaults.port))?
            .set_default("database_url", database_url)?
            .set_default("status_service_url", defaults.status_service_url)?
            .set_default(
                "status_service_timeout_secs",
                defaults.status_service_timeout_secs as i64,
            )?
            .set_default("log_level", defaults.log_level)?
            .set_default("log_json", defaults.log_json)?
            .add_source(config::Environment::with_prefix("API"))
            .build()?
            .try_deserialize()
    }

    /// Returns the server address
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn database_config(&self) -> DatabaseConfig {
        DatabaseConfig::new(self.database_url.clone())
    }

    pub fn status_service_config(&self) -> StatusServiceConfig {
        StatusServiceConfig {
            base_url: self.status_service_url.clone(),
            timeout_secs: self.status_service_timeout_secs,
        }
    }

    /// Treats an empty key as no key
    pub fn required_api_key(&self) -> Option<&str> {
        self.api_key.as_deref().filter(|key| !key.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ApiConfig::default();

        assert_eq!(config.server_addr(), "0.0.0.0:8080");
        assert_eq!(config.status_service_config().timeout_secs, 30);
        assert!(config.required_api_key().is_none());
    }

    #[test]
    fn test_empty_api_key_is_pass_through() {
        let config = ApiConfig {
            api_key: Some(String::new()),
            ..ApiConfig::default()
        };
        assert!(config.required_api_key().is_none());

        let config = ApiConfig {
            api_key: Some("secret".to_string()),
            ..ApiConfig::default()
        };
        assert_eq!(config.required_api_key(), Some("secret"));
    }
}
