//! Crew member query and acknowledgement DTOs

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use core_kernel::{parse_date, CrewMemberId};
use domain_crew::PageRequest;

/// Query string of `GET /api/crew-members`
///
/// Values are taken as text; anything that is not an integer counts as absent.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListCrewMembersQuery {
    pub page: Option<String>,
    pub page_size: Option<String>,
}

impl ListCrewMembersQuery {
    pub fn page_request(&self) -> PageRequest {
        PageRequest::new(parse_int(&self.page), parse_int(&self.page_size))
    }
}

fn parse_int(value: &Option<String>) -> Option<i64> {
    value.as_deref().and_then(|v| v.trim().parse().ok())
}

/// Query string of `PATCH /api/crew-members/{id}/license/renew`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenewLicenseQuery {
    pub new_certification_date: Option<String>,
}

impl RenewLicenseQuery {
    /// The strictly formatted date, `None` if missing or malformed
    pub fn certification_date(&self) -> Option<NaiveDate> {
        self.new_certification_date
            .as_deref()
            .and_then(|text| parse_date(text).ok())
    }
}

/// Body of a successful create
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedResponse {
    pub id: CrewMemberId,
}
