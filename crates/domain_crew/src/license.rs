//! License reference data

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use core_kernel::LicenseId;

/// Airline transport pilot license
pub const ATP_LICENSE_ID: LicenseId =
    LicenseId::from_uuid(Uuid::from_u128(0xead47c5e_c268_44ea_8837_30ff16e0ee10));

/// Cabin crew attestation
pub const CABIN_CREW_LICENSE_ID: LicenseId =
    LicenseId::from_uuid(Uuid::from_u128(0x09917044_4413_43a4_82bf_4689ba49d2a2));

/// A credential type a crew member holds
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct License {
    pub id: LicenseId,
    pub name: String,
    pub description: String,
}

impl License {
    /// The two licenses every deployment is seeded with
    pub fn seeded() -> Vec<License> {
        vec![
            License {
                id: ATP_LICENSE_ID,
                name: "Airline transport pilot (ATP) license".to_string(),
                description: "Pilots with an ATP certificate are eligible to fly for an airline \
                    and will meet the hiring minimums of most regional airline pilot jobs."
                    .to_string(),
            },
            License {
                id: CABIN_CREW_LICENSE_ID,
                name: "Cabin crew license".to_string(),
                description: "An individual wishing to work as a cabin crewmember in commercial \
                    air transport within an EC member State must hold a valid cabin crew \
                    attestation (CCA)."
                    .to_string(),
            },
        ]
    }
}
