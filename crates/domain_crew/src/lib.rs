//! Crew Management Domain
//!
//! This crate manages airline crew member records together with the
//! reference data they point at (licenses and member types).
//!
//! # Crew Member Lifecycle
//!
//! - **Create**: validated, checked against reference data and the email
//!   index, then stored with a status computed by the status service
//! - **Update**: edits name, email, country, image, license and member type;
//!   the status is left as it was
//! - **Renew license**: records a new certification date and re-resolves the
//!   status; retired crew members are rejected
//! - **Delete**: removes the record
//!
//! # Examples
//!
//! ```rust
//! use domain_crew::{CrewMemberValidator, IsoCountryLookup, CrewMemberFields};
//! use core_kernel::FixedDateProvider;
//! use chrono::NaiveDate;
//! use std::sync::Arc;
//!
//! let validator = CrewMemberValidator::new(
//!     Arc::new(IsoCountryLookup::new()),
//!     Arc::new(FixedDateProvider(NaiveDate::from_ymd_opt(2024, 8, 17).unwrap())),
//! );
//!
//! let result = validator.validate_fields(&CrewMemberFields {
//!     name: String::new(),
//!     email: "not-an-email".to_string(),
//!     country_code: "XX".to_string(),
//!     profile_image_url: String::new(),
//! });
//!
//! // Every violation is reported, not just the first one
//! assert_eq!(result.errors().len(), 3);
//! ```

pub mod crew_member;
pub mod license;
pub mod member_type;
pub mod country;
pub mod dto;
pub mod error;
pub mod validation;
pub mod pagination;
pub mod ports;
pub mod services;
pub mod adapters;

pub use crew_member::{CrewMember, CrewMemberStatus, UnknownStatusCode};
pub use license::{License, ATP_LICENSE_ID, CABIN_CREW_LICENSE_ID};
pub use member_type::{
    MemberType, MemberTypeKind, UnknownMemberTypeCode,
    PILOT_MEMBER_TYPE_ID, REGULAR_MEMBER_TYPE_ID, STEWARD_MEMBER_TYPE_ID,
};
pub use country::{CountryLookup, IsoCountryLookup};
pub use dto::{
    CrewMemberFields, CreateCrewMemberRequest, UpdateCrewMemberRequest,
    CrewMemberStatusDto, CrewMemberResponse, CrewMemberPage,
    LicenseSummary, MemberTypeSummary, CountryDto,
};
pub use error::{CrewError, ExternalServiceError};
pub use validation::{CrewMemberValidator, ValidationError, ValidationErrors, ValidationResult};
pub use pagination::{PageRequest, PageWindow};
pub use ports::{Entity, ReadRepository, Repository, CrewMemberRepository, StatusResolver};
#[cfg(any(test, feature = "mock"))]
pub use ports::mock::{InMemoryRepository, MockStatusResolver};
pub use services::{CrewMemberService, ReferenceDataService, EMAIL_UNIQUE_FIELD};
pub use adapters::{HttpStatusResolver, StatusServiceConfig};
