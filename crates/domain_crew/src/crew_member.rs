//! Crew member aggregate
//!
//! A crew member is created with a status computed by the external status
//! service, edited through [`CrewMember::apply_update`] (which never touches
//! the status) and re-certified through [`CrewMember::renew_license`].

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use core_kernel::{CrewMemberId, LicenseId, MemberTypeId};

use crate::dto::{CrewMemberStatusDto, UpdateCrewMemberRequest};

/// Fitness-for-duty status of a crew member
///
/// Serialized as its integer code (`0`, `1`, `2`) on every wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum CrewMemberStatus {
    Ok,
    LicenseExpired,
    CrewRetired,
}

impl CrewMemberStatus {
    /// Returns the integer code of this status
    pub fn code(&self) -> u8 {
        match self {
            CrewMemberStatus::Ok => 0,
            CrewMemberStatus::LicenseExpired => 1,
            CrewMemberStatus::CrewRetired => 2,
        }
    }
}

impl From<CrewMemberStatus> for u8 {
    fn from(status: CrewMemberStatus) -> Self {
        status.code()
    }
}

impl TryFrom<u8> for CrewMemberStatus {
    type Error = UnknownStatusCode;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(CrewMemberStatus::Ok),
            1 => Ok(CrewMemberStatus::LicenseExpired),
            2 => Ok(CrewMemberStatus::CrewRetired),
            other => Err(UnknownStatusCode(other)),
        }
    }
}

impl TryFrom<i32> for CrewMemberStatus {
    type Error = UnknownStatusCode;

    fn try_from(code: i32) -> Result<Self, Self::Error> {
        u8::try_from(code)
            .map_err(|_| UnknownStatusCode(u8::MAX))
            .and_then(CrewMemberStatus::try_from)
    }
}

/// Raised when a status code outside 0..=2 is decoded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnknownStatusCode(pub u8);

impl fmt::Display for UnknownStatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown crew member status code {}", self.0)
    }
}

impl std::error::Error for UnknownStatusCode {}

/// A crew member record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrewMember {
    pub id: CrewMemberId,
    pub name: String,
    pub birthday: NaiveDate,
    /// Unique across all crew members, compared case-sensitively
    pub email: String,
    /// ISO-3166 alpha-3
    pub country_code: String,
    pub profile_image_url: String,
    pub last_certification_date: NaiveDate,
    pub status: CrewMemberStatus,
    pub status_description: String,
    pub license_id: LicenseId,
    pub member_type_id: MemberTypeId,
}

impl CrewMember {
    /// Returns true if the member can no longer renew a license
    pub fn is_retired(&self) -> bool {
        self.status == CrewMemberStatus::CrewRetired
    }

    /// Copies the editable fields from an update request
    ///
    /// Status, status description, birthday and certification date are
    /// left untouched.
    pub fn apply_update(&mut self, request: &UpdateCrewMemberRequest) {
        self.name = request.fields.name.clone();
        self.email = request.fields.email.clone();
        self.country_code = request.fields.country_code.clone();
        self.profile_image_url = request.fields.profile_image_url.clone();
        self.license_id = request.license_id;
        self.member_type_id = request.member_type_id;
    }

    /// Records a new certification date with its freshly resolved status
    pub fn renew_license(&mut self, certification_date: NaiveDate, status: CrewMemberStatusDto) {
        self.last_certification_date = certification_date;
        self.status = status.status;
        self.status_description = status.status_description;
    }
}
