//! Request and response shapes of the crew services
//!
//! Create, update and response payloads share the [`CrewMemberFields`]
//! block, embedded with `#[serde(flatten)]` so the JSON stays flat.
//! All field names are camelCase on the wire.

use serde::{Deserialize, Deserializer, Serialize};

use core_kernel::{format_date, CrewMemberId, LicenseId, MemberTypeId};

use crate::crew_member::{CrewMember, CrewMemberStatus};
use crate::license::License;
use crate::member_type::{MemberType, MemberTypeKind};

/// Fields common to every crew member payload
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CrewMemberFields {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub email: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub country_code: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub profile_image_url: String,
}

/// Reads an explicit `null` as an empty string so it reaches the validator
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Payload for creating a crew member
///
/// Dates are kept as text so the validator can report a format error per
/// field instead of rejecting the whole body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCrewMemberRequest {
    #[serde(flatten)]
    pub fields: CrewMemberFields,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub birthday: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub last_certification_date: String,
    pub license_id: LicenseId,
    pub member_type_id: MemberTypeId,
}

/// Payload for updating a crew member
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCrewMemberRequest {
    #[serde(flatten)]
    pub fields: CrewMemberFields,
    pub license_id: LicenseId,
    pub member_type_id: MemberTypeId,
}

/// Status computed by the external status service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CrewMemberStatusDto {
    pub status: CrewMemberStatus,
    pub status_description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LicenseSummary {
    pub id: LicenseId,
    pub name: String,
    pub description: String,
}

impl From<&License> for LicenseSummary {
    fn from(license: &License) -> Self {
        Self {
            id: license.id,
            name: license.name.clone(),
            description: license.description.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberTypeSummary {
    pub id: MemberTypeId,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: MemberTypeKind,
}

impl From<&MemberType> for MemberTypeSummary {
    fn from(member_type: &MemberType) -> Self {
        Self {
            id: member_type.id,
            name: member_type.name.clone(),
            kind: member_type.kind,
        }
    }
}

/// A crew member projected with its license and member type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CrewMemberResponse {
    pub id: CrewMemberId,
    #[serde(flatten)]
    pub fields: CrewMemberFields,
    pub birthday: String,
    pub last_certification_date: String,
    pub status: CrewMemberStatus,
    pub status_description: String,
    pub license: LicenseSummary,
    pub member_type: MemberTypeSummary,
}

impl CrewMemberResponse {
    pub fn project(member: &CrewMember, license: &License, member_type: &MemberType) -> Self {
        Self {
            id: member.id,
            fields: CrewMemberFields {
                name: member.name.clone(),
                email: member.email.clone(),
                country_code: member.country_code.clone(),
                profile_image_url: member.profile_image_url.clone(),
            },
            birthday: format_date(member.birthday),
            last_certification_date: format_date(member.last_certification_date),
            status: member.status,
            status_description: member.status_description.clone(),
            license: LicenseSummary::from(license),
            member_type: MemberTypeSummary::from(member_type),
        }
    }
}

/// One page of crew members
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CrewMemberPage {
    /// Count over the whole, unpaged, set
    pub total_count: u64,
    pub total_pages: u64,
    pub crew_members: Vec<CrewMemberResponse>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountryDto {
    /// ISO-3166 alpha-3
    pub code: String,
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_create_request_is_flat_camel_case() {
        let license_id = LicenseId::new();
        let member_type_id = MemberTypeId::new();
        let body = json!({
            "name": "John Doe",
            "email": "john@doe.com",
            "countryCode": "BGR",
            "profileImageUrl": "image",
            "birthday": "1990-01-01",
            "lastCertificationDate": "2024-01-01",
            "licenseId": license_id,
            "memberTypeId": member_type_id,
        });

        let request: CreateCrewMemberRequest = serde_json::from_value(body).unwrap();
        assert_eq!(request.fields.name, "John Doe");
        assert_eq!(request.fields.country_code, "BGR");
        assert_eq!(request.last_certification_date, "2024-01-01");
        assert_eq!(request.license_id, license_id);
    }

    #[test]
    fn test_missing_text_fields_default_to_empty() {
        let body = json!({
            "licenseId": LicenseId::new(),
            "memberTypeId": MemberTypeId::new(),
        });

        let request: UpdateCrewMemberRequest = serde_json::from_value(body).unwrap();
        assert_eq!(request.fields, CrewMemberFields::default());
    }

    #[test]
    fn test_null_text_fields_read_as_empty() {
        let body = json!({
            "name": null,
            "email": null,
            "countryCode": null,
            "profileImageUrl": null,
            "birthday": null,
            "lastCertificationDate": null,
            "licenseId": LicenseId::new(),
            "memberTypeId": MemberTypeId::new(),
        });

        let request: CreateCrewMemberRequest = serde_json::from_value(body).unwrap();
        assert_eq!(request.fields, CrewMemberFields::default());
        assert!(request.birthday.is_empty());
        assert!(request.last_certification_date.is_empty());
    }

    #[test]
    fn test_status_dto_wire_shape() {
        let dto: CrewMemberStatusDto =
            serde_json::from_str(r#"{"status":1,"statusDescription":"License expired"}"#).unwrap();
        assert_eq!(dto.status, CrewMemberStatus::LicenseExpired);
        assert_eq!(dto.status_description, "License expired");
    }

    #[test]
    fn test_member_type_summary_uses_type_key() {
        let summary = MemberTypeSummary::from(&MemberType::seeded()[2]);
        let value = serde_json::to_value(&summary).unwrap();
        assert_eq!(value["type"], json!(2));
        assert_eq!(value["name"], json!("Steward"));
    }
}
