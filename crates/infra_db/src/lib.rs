//! Infrastructure Database Layer
//!
//! This crate provides the PostgreSQL persistence for the crew management
//! service using SQLx.
//!
//! # Architecture
//!
//! The crate is split in two layers:
//! - `repositories`: table gateways that run SQL and return plain rows
//! - `adapters`: implementations of the `domain_crew` repository ports that
//!   convert rows to domain records and database errors to `PortError`
//!
//! The schema lives in the workspace `migrations/` directory and is embedded
//! into the binary; [`run_migrations`] applies it at startup.
//!
//! # Example
//!
//! ```rust,ignore
//! use infra_db::{create_pool, run_migrations, DatabaseConfig, PostgresCrewMemberAdapter};
//!
//! let pool = create_pool(DatabaseConfig::new("postgres://localhost/crew_management")).await?;
//! run_migrations(&pool).await?;
//! let crew_members = PostgresCrewMemberAdapter::new(pool);
//! ```

pub mod pool;
pub mod error;
pub mod repositories;
pub mod adapters;

pub use pool::{create_pool, ping, run_migrations, DatabaseConfig, DatabasePool};
pub use error::DatabaseError;
pub use adapters::{PostgresCrewMemberAdapter, PostgresLicenseAdapter, PostgresMemberTypeAdapter};
