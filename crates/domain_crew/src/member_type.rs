//! Member type reference data

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use core_kernel::MemberTypeId;

pub const PILOT_MEMBER_TYPE_ID: MemberTypeId =
    MemberTypeId::from_uuid(Uuid::from_u128(0xf3b3b3b3_3b3b_3b3b_3b3b_3b3b3b3b3b3b));
pub const REGULAR_MEMBER_TYPE_ID: MemberTypeId =
    MemberTypeId::from_uuid(Uuid::from_u128(0xf3b3b3b3_3b3b_3b3b_3b3b_3b3b3b3b3b3c));
pub const STEWARD_MEMBER_TYPE_ID: MemberTypeId =
    MemberTypeId::from_uuid(Uuid::from_u128(0xf3b3b3b3_3b3b_3b3b_3b3b_3b3b3b3b3b3d));

/// Role category of a crew member, serialized as its integer code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum MemberTypeKind {
    Pilot,
    Regular,
    Steward,
}

impl MemberTypeKind {
    pub fn code(&self) -> u8 {
        match self {
            MemberTypeKind::Pilot => 0,
            MemberTypeKind::Regular => 1,
            MemberTypeKind::Steward => 2,
        }
    }
}

impl From<MemberTypeKind> for u8 {
    fn from(kind: MemberTypeKind) -> Self {
        kind.code()
    }
}

impl TryFrom<u8> for MemberTypeKind {
    type Error = UnknownMemberTypeCode;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(MemberTypeKind::Pilot),
            1 => Ok(MemberTypeKind::Regular),
            2 => Ok(MemberTypeKind::Steward),
            other => Err(UnknownMemberTypeCode(other)),
        }
    }
}

impl TryFrom<i32> for MemberTypeKind {
    type Error = UnknownMemberTypeCode;

    fn try_from(code: i32) -> Result<Self, Self::Error> {
        u8::try_from(code)
            .map_err(|_| UnknownMemberTypeCode(u8::MAX))
            .and_then(MemberTypeKind::try_from)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnknownMemberTypeCode(pub u8);

impl fmt::Display for UnknownMemberTypeCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown member type code {}", self.0)
    }
}

impl std::error::Error for UnknownMemberTypeCode {}

/// The role category a crew member belongs to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberType {
    pub id: MemberTypeId,
    pub name: String,
    pub kind: MemberTypeKind,
}

impl MemberType {
    /// The three member types every deployment is seeded with
    pub fn seeded() -> Vec<MemberType> {
        vec![
            MemberType {
                id: PILOT_MEMBER_TYPE_ID,
                name: "Pilot".to_string(),
                kind: MemberTypeKind::Pilot,
            },
            MemberType {
                id: REGULAR_MEMBER_TYPE_ID,
                name: "Regular".to_string(),
                kind: MemberTypeKind::Regular,
            },
            MemberType {
                id: STEWARD_MEMBER_TYPE_ID,
                name: "Steward".to_string(),
                kind: MemberTypeKind::Steward,
            },
        ]
    }
}
