//! Repository Adapters
//!
//! PostgreSQL implementations of the `domain_crew` repository ports.
//!
//! # Architecture
//!
//! Each adapter:
//! - Implements `Repository<E>` (and `CrewMemberRepository` for crew members)
//! - Translates between domain records and table rows
//! - Maps `DatabaseError` to `PortError`
//! - Reports database reachability through `HealthCheckable`
//!
//! # Usage
//!
//! ```rust,ignore
//! use infra_db::adapters::PostgresCrewMemberAdapter;
//! use domain_crew::CrewMemberRepository;
//! use std::sync::Arc;
//!
//! let crew_members: Arc<dyn CrewMemberRepository> =
//!     Arc::new(PostgresCrewMemberAdapter::new(pool));
//! ```

pub mod crew_member;
pub mod reference;

pub use crew_member::PostgresCrewMemberAdapter;
pub use reference::{PostgresLicenseAdapter, PostgresMemberTypeAdapter};

use chrono::Utc;
use sqlx::PgPool;

use core_kernel::{AdapterHealth, HealthCheckResult};

/// Runs `SELECT 1` against the pool and reports the outcome
pub(crate) async fn check_pool(pool: &PgPool, adapter_id: &str) -> HealthCheckResult {
    let start = std::time::Instant::now();

    let result = sqlx::query_scalar::<_, i32>("SELECT 1").fetch_one(pool).await;

    let latency_ms = start.elapsed().as_millis() as u64;

    match result {
        Ok(_) => HealthCheckResult {
            adapter_id: adapter_id.to_string(),
            status: AdapterHealth::Healthy,
            latency_ms,
            message: None,
            checked_at: Utc::now(),
        },
        Err(e) => HealthCheckResult {
            adapter_id: adapter_id.to_string(),
            status: AdapterHealth::Unhealthy,
            latency_ms,
            message: Some(format!("Database error: {}", e)),
            checked_at: Utc::now(),
        },
    }
}
