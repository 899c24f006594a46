//! API error handling
//!
//! Service errors are matched here and turned into status codes and bodies.
//! Anything unexpected is logged and answered with an opaque 500.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use tracing::{error, warn};

use domain_crew::{CrewError, ValidationErrors};

/// API error types
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Validation failed: {0}")]
    Validation(ValidationErrors),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("External service error: {0}")]
    ExternalService(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Internal server error: {0}")]
    Internal(String),
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct NotFoundBody<'a> {
    entity_name: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct DuplicateBody<'a> {
    duplicate_entity: &'a str,
}

/// Body for errors described by a single message
#[derive(Debug, Serialize)]
pub struct MessageBody {
    pub message: String,
}

impl MessageBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Validation(errors) => (StatusCode::BAD_REQUEST, Json(errors)).into_response(),
            ApiError::NotFound(entity) => (
                StatusCode::NOT_FOUND,
                Json(NotFoundBody {
                    entity_name: &entity,
                }),
            )
                .into_response(),
            ApiError::Duplicate(field) => (
                StatusCode::CONFLICT,
                Json(DuplicateBody {
                    duplicate_entity: &field,
                }),
            )
                .into_response(),
            ApiError::ExternalService(message) | ApiError::BadRequest(message) => {
                (StatusCode::BAD_REQUEST, Json(MessageBody::new(message))).into_response()
            }
            ApiError::Unauthorized => {
                (StatusCode::UNAUTHORIZED, Json(MessageBody::new("Unauthorized"))).into_response()
            }
            ApiError::Internal(detail) => {
                error!(%detail, "Unhandled error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(MessageBody::new("An unexpected error occurred.")),
                )
                    .into_response()
            }
        }
    }
}

impl From<CrewError> for ApiError {
    fn from(err: CrewError) -> Self {
        match err {
            CrewError::Validation(errors) => ApiError::Validation(errors),
            CrewError::EntityNotFound(entity) => ApiError::NotFound(entity),
            CrewError::DuplicateEntity(field) => ApiError::Duplicate(field),
            CrewError::ExternalService(e) => {
                warn!(error = ?e, "Status service call failed");
                ApiError::ExternalService(e.to_string())
            }
            CrewError::Persistence(e) => ApiError::Internal(format!("{:?}", e)),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_kernel::PortError;
    use domain_crew::ExternalServiceError;

    fn status_of(err: CrewError) -> StatusCode {
        ApiError::from(err).into_response().status()
    }

    #[test]
    fn test_crew_errors_map_to_statuses() {
        assert_eq!(status_of(CrewError::invalid("Name", "Name is missing")), StatusCode::BAD_REQUEST);
        assert_eq!(status_of(CrewError::not_found("License")), StatusCode::NOT_FOUND);
        assert_eq!(status_of(CrewError::duplicate("Crew.Email")), StatusCode::CONFLICT);
        assert_eq!(
            status_of(CrewError::ExternalService(ExternalServiceError::BadStatusCode(503))),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(CrewError::Persistence(PortError::internal("disk on fire"))),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_external_message_keeps_status_code() {
        let err = ApiError::from(CrewError::ExternalService(ExternalServiceError::BadStatusCode(503)));
        assert!(matches!(err, ApiError::ExternalService(ref m) if m.contains("503")));
    }
}
