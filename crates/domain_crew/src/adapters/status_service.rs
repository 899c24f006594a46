//! Status Service Adapter
//!
//! Implements [`StatusResolver`] by calling the sibling status service over
//! HTTP:
//!
//! ```text
//! GET {base_url}/api/crew-members/status?certificationDate=yyyy-MM-dd&birthday=yyyy-MM-dd
//! -> 200 {"status": 0, "statusDescription": "..."}
//! ```
//!
//! # Error Handling
//!
//! - Non-2xx response -> `ExternalServiceError::BadStatusCode`
//! - Empty or unparseable 2xx body -> `ExternalServiceError::InvalidResponseBody`
//! - Transport failure or timeout -> `ExternalServiceError::Network`
//!
//! Requests are never retried.

use async_trait::async_trait;
use chrono::NaiveDate;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, instrument, warn};

use core_kernel::{format_date, DomainPort};

use crate::dto::CrewMemberStatusDto;
use crate::error::ExternalServiceError;
use crate::ports::StatusResolver;

const STATUS_PATH: &str = "/api/crew-members/status";

/// Configuration for the status service client
#[derive(Debug, Clone)]
pub struct StatusServiceConfig {
    /// Base URL of the status service (e.g., "http://localhost:7071")
    pub base_url: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for StatusServiceConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:7071".to_string(),
            timeout_secs: 30,
        }
    }
}

/// Status resolver backed by the status service REST API
#[derive(Debug, Clone)]
pub struct HttpStatusResolver {
    config: StatusServiceConfig,
    client: reqwest::Client,
}

impl HttpStatusResolver {
    /// Creates a resolver with its own connection pool
    pub fn new(config: StatusServiceConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self { config, client })
    }

    /// Creates a resolver sharing an existing client
    pub fn with_client(config: StatusServiceConfig, client: reqwest::Client) -> Self {
        Self { config, client }
    }

    pub fn config(&self) -> &StatusServiceConfig {
        &self.config
    }

    fn status_url(&self) -> String {
        format!("{}{}", self.config.base_url.trim_end_matches('/'), STATUS_PATH)
    }
}

impl DomainPort for HttpStatusResolver {}

#[async_trait]
impl StatusResolver for HttpStatusResolver {
    #[instrument(skip(self), fields(base_url = %self.config.base_url))]
    async fn resolve(
        &self,
        birthday: NaiveDate,
        certification_date: NaiveDate,
    ) -> Result<CrewMemberStatusDto, ExternalServiceError> {
        let response = self
            .client
            .get(self.status_url())
            .query(&[
                ("certificationDate", format_date(certification_date)),
                ("birthday", format_date(birthday)),
            ])
            .send()
            .await
            .map_err(network_error)?;

        let status = response.status();
        if !status.is_success() {
            warn!(status = status.as_u16(), "Status service returned bad status code");
            return Err(ExternalServiceError::BadStatusCode(status.as_u16()));
        }

        let body = response.bytes().await.map_err(network_error)?;
        if body.is_empty() {
            warn!("Status service returned an empty body");
            return Err(ExternalServiceError::invalid_body());
        }

        let dto: CrewMemberStatusDto = serde_json::from_slice(&body).map_err(|e| {
            warn!(error = %e, "Status service returned an invalid body");
            ExternalServiceError::InvalidResponseBody {
                source: Some(Arc::new(e)),
            }
        })?;

        debug!(status = dto.status.code(), "Resolved crew member status");
        Ok(dto)
    }
}

fn network_error(error: reqwest::Error) -> ExternalServiceError {
    warn!(error = %error, "Status service unreachable");
    ExternalServiceError::Network {
        detail: error.to_string(),
        source: Some(Arc::new(error)),
    }
}
