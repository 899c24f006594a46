//! Request/response shapes owned by the HTTP layer
//!
//! Payload bodies reuse the `domain_crew` DTOs; this module only adds the
//! query strings and the create acknowledgement.

pub mod crew_members;

pub use crew_members::{CreatedResponse, ListCrewMembersQuery, RenewLicenseQuery};
