//! Crew domain errors
//!
//! Every expected failure of a crew operation is a variant of [`CrewError`];
//! the HTTP boundary matches on it to pick a status code. Anything that is not
//! one of the four expected kinds ends up in [`CrewError::Persistence`].

use std::sync::Arc;
use thiserror::Error;

use core_kernel::PortError;

use crate::validation::ValidationErrors;

/// Failure of the external status service
#[derive(Debug, Clone, Error)]
pub enum ExternalServiceError {
    /// The service answered with a non-success HTTP status
    #[error("bad status code {0}")]
    BadStatusCode(u16),

    /// The service answered 2xx but the body was empty or not a status
    #[error("invalid response body")]
    InvalidResponseBody {
        #[source]
        source: Option<Arc<dyn std::error::Error + Send + Sync>>,
    },

    /// The service could not be reached
    #[error("network error: {detail}")]
    Network {
        detail: String,
        #[source]
        source: Option<Arc<dyn std::error::Error + Send + Sync>>,
    },
}

impl ExternalServiceError {
    pub fn invalid_body() -> Self {
        ExternalServiceError::InvalidResponseBody { source: None }
    }

    pub fn network(detail: impl Into<String>) -> Self {
        ExternalServiceError::Network {
            detail: detail.into(),
            source: None,
        }
    }
}

/// Errors that can occur in the crew domain
#[derive(Debug, Error)]
pub enum CrewError {
    /// One or more field violations; nothing was persisted
    #[error("validation failed: {0}")]
    Validation(ValidationErrors),

    /// A referenced entity does not exist
    #[error("entity not found: {0}")]
    EntityNotFound(String),

    /// A unique field is already taken
    #[error("duplicate entity: {0}")]
    DuplicateEntity(String),

    /// The status service failed
    #[error("external service error: {0}")]
    ExternalService(#[from] ExternalServiceError),

    /// Unexpected storage failure
    #[error("persistence error: {0}")]
    Persistence(#[from] PortError),
}

impl CrewError {
    /// Creates an EntityNotFound error for the given entity kind
    pub fn not_found(entity: impl Into<String>) -> Self {
        CrewError::EntityNotFound(entity.into())
    }

    /// Creates a DuplicateEntity error for the given field
    pub fn duplicate(field: impl Into<String>) -> Self {
        CrewError::DuplicateEntity(field.into())
    }

    /// Creates a validation failure with a single violation
    pub fn invalid(field: impl Into<String>, message: impl Into<String>) -> Self {
        CrewError::Validation(ValidationErrors::single(field, message))
    }
}

impl From<ValidationErrors> for CrewError {
    fn from(errors: ValidationErrors) -> Self {
        CrewError::Validation(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_external_messages_are_distinguishable() {
        let bad_status = CrewError::from(ExternalServiceError::BadStatusCode(503));
        let bad_body = CrewError::from(ExternalServiceError::invalid_body());
        let network = CrewError::from(ExternalServiceError::network("connection refused"));

        assert_eq!(bad_status.to_string(), "external service error: bad status code 503");
        assert_eq!(bad_body.to_string(), "external service error: invalid response body");
        assert_eq!(
            network.to_string(),
            "external service error: network error: connection refused"
        );
    }

    #[test]
    fn test_not_found_and_duplicate_messages() {
        assert_eq!(CrewError::not_found("License").to_string(), "entity not found: License");
        assert_eq!(
            CrewError::duplicate("Crew.Email").to_string(),
            "duplicate entity: Crew.Email"
        );
    }

    #[test]
    fn test_validation_message_counts_errors() {
        let error = CrewError::invalid("Status", "Crew member is retired");
        assert!(error.to_string().starts_with("validation failed: 1 error(s)"));
    }
}
