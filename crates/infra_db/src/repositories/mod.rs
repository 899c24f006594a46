//! Table gateways
//!
//! Each gateway owns the SQL for one table and speaks in plain row structs;
//! conversion to domain records happens in the adapters. Queries are built
//! at runtime so the crate compiles without a live database.

pub mod crew_member;
pub mod license;
pub mod member_type;

pub use crew_member::{CrewMemberRow, CrewMemberTable};
pub use license::{LicenseRow, LicenseTable};
pub use member_type::{MemberTypeRow, MemberTypeTable};

use domain_crew::PageWindow;

use crate::error::DatabaseError;

/// Converts a page window into `LIMIT` and `OFFSET` binds
///
/// Without a window every row is returned. Values past `i64::MAX` are clamped.
pub(crate) fn limit_offset(window: Option<PageWindow>) -> (Option<i64>, i64) {
    match window {
        Some(PageWindow { offset, limit }) => (
            Some(i64::try_from(limit).unwrap_or(i64::MAX)),
            i64::try_from(offset).unwrap_or(i64::MAX),
        ),
        None => (None, 0),
    }
}

/// Converts a `COUNT(*)` result to the unsigned count the ports report
pub(crate) fn to_count(count: i64) -> Result<u64, DatabaseError> {
    u64::try_from(count).map_err(|_| DatabaseError::InvalidData(format!("negative row count {count}")))
}
