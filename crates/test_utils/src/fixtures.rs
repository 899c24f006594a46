//! Pre-built Test Fixtures
//!
//! Consistent, predictable crew data for unit and integration tests. The
//! clock is pinned to [`DateFixtures::today`] so age and future checks
//! never drift.

use chrono::NaiveDate;
use std::sync::Arc;

use core_kernel::{FixedDateProvider, LicenseId, MemberTypeId};
use domain_crew::{
    CreateCrewMemberRequest, CrewMemberFields, CrewMemberStatus, CrewMemberStatusDto,
    CrewMemberValidator, IsoCountryLookup, UpdateCrewMemberRequest, ATP_LICENSE_ID,
    CABIN_CREW_LICENSE_ID, PILOT_MEMBER_TYPE_ID, STEWARD_MEMBER_TYPE_ID,
};

/// Fixture for calendar dates
pub struct DateFixtures;

impl DateFixtures {
    /// The pinned "today" used by fixture validators
    pub fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 8, 17).unwrap()
    }

    /// A birthday comfortably over 18 on [`Self::today`]
    pub fn adult_birthday() -> NaiveDate {
        NaiveDate::from_ymd_opt(1990, 1, 1).unwrap()
    }

    pub fn certification_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
    }

    pub fn renewal_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 8, 1).unwrap()
    }

    /// Date provider pinned to [`Self::today`]
    pub fn provider() -> FixedDateProvider {
        FixedDateProvider(Self::today())
    }
}

/// Fixture for the seeded reference ids
pub struct ReferenceFixtures;

impl ReferenceFixtures {
    pub fn pilot_license() -> LicenseId {
        ATP_LICENSE_ID
    }

    pub fn cabin_license() -> LicenseId {
        CABIN_CREW_LICENSE_ID
    }

    pub fn pilot() -> MemberTypeId {
        PILOT_MEMBER_TYPE_ID
    }

    pub fn steward() -> MemberTypeId {
        STEWARD_MEMBER_TYPE_ID
    }

    /// An id no seeded license uses
    pub fn unknown_license() -> LicenseId {
        LicenseId::new()
    }

    /// An id no seeded member type uses
    pub fn unknown_member_type() -> MemberTypeId {
        MemberTypeId::new()
    }
}

/// Fixture for crew member requests
pub struct CrewFixtures;

impl CrewFixtures {
    pub fn fields() -> CrewMemberFields {
        Self::fields_with_email("john@doe.com")
    }

    pub fn fields_with_email(email: &str) -> CrewMemberFields {
        CrewMemberFields {
            name: "John Doe".to_string(),
            email: email.to_string(),
            country_code: "BGR".to_string(),
            profile_image_url: "image".to_string(),
        }
    }

    /// A create request that passes validation on [`DateFixtures::today`]
    pub fn create_request() -> CreateCrewMemberRequest {
        CreateCrewMemberRequest {
            fields: Self::fields(),
            birthday: "1990-01-01".to_string(),
            last_certification_date: "2024-01-01".to_string(),
            license_id: ATP_LICENSE_ID,
            member_type_id: PILOT_MEMBER_TYPE_ID,
        }
    }

    pub fn update_request() -> UpdateCrewMemberRequest {
        UpdateCrewMemberRequest {
            fields: CrewMemberFields {
                name: "Jane Doe".to_string(),
                email: "jane@doe.com".to_string(),
                country_code: "DEU".to_string(),
                profile_image_url: "other-image".to_string(),
            },
            license_id: CABIN_CREW_LICENSE_ID,
            member_type_id: STEWARD_MEMBER_TYPE_ID,
        }
    }

    pub fn ok_status() -> CrewMemberStatusDto {
        CrewMemberStatusDto {
            status: CrewMemberStatus::Ok,
            status_description: "Ok".to_string(),
        }
    }

    pub fn retired_status() -> CrewMemberStatusDto {
        CrewMemberStatusDto {
            status: CrewMemberStatus::CrewRetired,
            status_description: "Crew member is retired".to_string(),
        }
    }

    /// Validator backed by the ISO country table and the pinned clock
    pub fn validator() -> CrewMemberValidator {
        CrewMemberValidator::new(
            Arc::new(IsoCountryLookup::new()),
            Arc::new(DateFixtures::provider()),
        )
    }
}
