//! Core Kernel - Foundational types and utilities for crew management
//!
//! This crate provides the fundamental building blocks used across the workspace:
//! - Strongly-typed identifiers for crew members and reference data
//! - Strict `yyyy-MM-dd` calendar date handling and the date provider
//! - Port and adapter abstractions shared by persistence and external services

pub mod identifiers;
pub mod dates;
pub mod ports;

pub use identifiers::{CrewMemberId, LicenseId, MemberTypeId};
pub use dates::{
    DATE_FORMAT, DateError, DateProvider, SystemDateProvider, FixedDateProvider,
    parse_date, format_date, add_years,
};
pub use ports::{PortError, DomainPort, AdapterHealth, HealthCheckResult, HealthCheckable};
