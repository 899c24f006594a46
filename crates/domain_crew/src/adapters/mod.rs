//! External Adapters for the Crew Domain
//!
//! # Available Adapters
//!
//! - **HttpStatusResolver**: Resolves crew member status through the status service REST API
//! - **MockStatusResolver**: Canned resolver for testing (re-exported from the ports module)
//!
//! # Usage
//!
//! ```rust,ignore
//! use domain_crew::adapters::{HttpStatusResolver, StatusServiceConfig};
//! use domain_crew::StatusResolver;
//! use std::sync::Arc;
//!
//! let resolver = HttpStatusResolver::new(StatusServiceConfig {
//!     base_url: "http://localhost:7071".to_string(),
//!     timeout_secs: 30,
//! })?;
//! let port: Arc<dyn StatusResolver> = Arc::new(resolver);
//! ```

pub mod status_service;

pub use status_service::{HttpStatusResolver, StatusServiceConfig};

#[cfg(any(test, feature = "mock"))]
pub use crate::ports::mock::MockStatusResolver;
