//! HTTP API Layer
//!
//! This crate provides the REST API of the crew management service using Axum.
//!
//! # Architecture
//!
//! - **Handlers**: Request handlers for crew members, reference data and health
//! - **Middleware**: API key check and audit logging
//! - **DTOs**: Query strings and acknowledgements owned by the HTTP layer
//! - **Error Handling**: Service errors mapped to status codes and bodies
//!
//! The router knows nothing about storage; it is handed ready services in
//! [`AppState`], so tests can wire it to in-memory adapters.
//!
//! # Example
//!
//! ```rust,ignore
//! use interface_api::{create_router, AppState};
//!
//! let app = create_router(state);
//! axum::serve(listener, app).await?;
//! ```

pub mod config;
pub mod error;
pub mod middleware;
pub mod handlers;
pub mod dto;

use axum::{
    middleware as axum_middleware,
    routing::{get, patch},
    Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

use core_kernel::HealthCheckable;
use domain_crew::{CrewMemberService, ReferenceDataService};

use crate::config::ApiConfig;
use crate::handlers::{crew_members, health, reference};
use crate::middleware::{api_key_middleware, audit_middleware};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub crew_service: Arc<CrewMemberService>,
    pub reference_service: Arc<ReferenceDataService>,
    /// Probed by the readiness endpoint
    pub health: Arc<dyn HealthCheckable>,
    pub config: ApiConfig,
}

/// Creates the main API router
pub fn create_router(state: AppState) -> Router {
    // Public routes (no API key required)
    let public_routes = Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check));

    let crew_member_routes = Router::new()
        .route(
            "/",
            get(crew_members::list_crew_members).post(crew_members::create_crew_member),
        )
        .route(
            "/:id",
            get(crew_members::get_crew_member)
                .patch(crew_members::update_crew_member)
                .delete(crew_members::delete_crew_member),
        )
        .route("/:id/license/renew", patch(crew_members::renew_license));

    let api_routes = Router::new()
        .nest("/crew-members", crew_member_routes)
        .route("/licenses", get(reference::list_licenses))
        .route("/member-types", get(reference::list_member_types))
        .route("/countries", get(reference::list_countries))
        .layer(axum_middleware::from_fn(audit_middleware))
        .layer(axum_middleware::from_fn_with_state(state.clone(), api_key_middleware));

    Router::new()
        .merge(public_routes)
        .nest("/api", api_routes)
        // The id is set before tracing so request spans carry it
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                .layer(TraceLayer::new_for_http())
                .layer(PropagateRequestIdLayer::x_request_id()),
        )
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
