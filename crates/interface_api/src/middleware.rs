//! API middleware

use axum::{
    body::Body,
    extract::{Query, State},
    http::Request,
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::collections::HashMap;
use std::time::Instant;
use tracing::{info, warn};

use crate::error::ApiError;
use crate::AppState;

/// Header carrying the API key
pub const API_KEY_HEADER: &str = "x-functions-key";

/// Query parameter carrying the API key
pub const API_KEY_QUERY: &str = "code";

/// API key middleware
///
/// When a key is configured, the request must present it in the
/// `x-functions-key` header or the `code` query parameter.
pub async fn api_key_middleware(
    State(state): State<AppState>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let Some(expected) = state.config.required_api_key() else {
        return next.run(request).await;
    };

    let from_header = request
        .headers()
        .get(API_KEY_HEADER)
        .and_then(|h| h.to_str().ok())
        .map(str::to_string);

    let presented = from_header.or_else(|| {
        Query::<HashMap<String, String>>::try_from_uri(request.uri())
            .ok()
            .and_then(|Query(mut params)| params.remove(API_KEY_QUERY))
    });

    match presented {
        Some(key) if keys_match(&key, expected) => next.run(request).await,
        Some(_) => {
            warn!(uri = %request.uri().path(), "Invalid API key");
            ApiError::Unauthorized.into_response()
        }
        None => {
            warn!(uri = %request.uri().path(), "Missing API key");
            ApiError::Unauthorized.into_response()
        }
    }
}

/// Compares keys without stopping at the first differing byte
fn keys_match(presented: &str, expected: &str) -> bool {
    let (presented, expected) = (presented.as_bytes(), expected.as_bytes());
    presented.len() == expected.len()
        && presented
            .iter()
            .zip(expected)
            .fold(0u8, |diff, (a, b)| diff | (a ^ b))
            == 0
}

/// Audit logging middleware
///
/// Logs method, path, status and duration of every API request
pub async fn audit_middleware(request: Request<Body>, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    let start = Instant::now();

    let response = next.run(request).await;

    info!(
        method = %method,
        path = %path,
        status = %response.status().as_u16(),
        duration_ms = start.elapsed().as_millis() as u64,
        "API request"
    );

    response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keys_match_only_on_identical_bytes() {
        assert!(keys_match("secret-key", "secret-key"));
        assert!(!keys_match("secret-kez", "secret-key"));
        assert!(!keys_match("secret", "secret-key"));
        assert!(!keys_match("", "secret-key"));
    }
}
