//! PostgreSQL Crew Member Adapter
//!
//! Implements the crew member repository ports on top of [`CrewMemberTable`].
//! The unique index on `email` backs the uniqueness the service checks
//! up front, so a racing insert surfaces as `PortError::Conflict`.

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{debug, instrument};

use core_kernel::{CrewMemberId, DomainPort, HealthCheckResult, HealthCheckable, PortError};
use domain_crew::{
    CrewMember, CrewMemberRepository, CrewMemberStatus, PageWindow, ReadRepository, Repository,
};

use super::check_pool;
use crate::error::DatabaseError;
use crate::repositories::{limit_offset, to_count, CrewMemberRow, CrewMemberTable};

/// PostgreSQL-backed crew member repository
#[derive(Debug, Clone)]
pub struct PostgresCrewMemberAdapter {
    table: CrewMemberTable,
    pool: PgPool,
}

impl PostgresCrewMemberAdapter {
    pub fn new(pool: PgPool) -> Self {
        Self {
            table: CrewMemberTable::new(pool.clone()),
            pool,
        }
    }

    /// Returns the underlying table gateway
    pub fn table(&self) -> &CrewMemberTable {
        &self.table
    }
}

impl DomainPort for PostgresCrewMemberAdapter {}

#[async_trait]
impl HealthCheckable for PostgresCrewMemberAdapter {
    async fn health_check(&self) -> HealthCheckResult {
        check_pool(&self.pool, "postgres-crew-member-adapter").await
    }
}

#[async_trait]
impl ReadRepository<CrewMember> for PostgresCrewMemberAdapter {
    #[instrument(skip(self), fields(crew_member_id = %id))]
    async fn find(&self, id: CrewMemberId) -> Result<Option<CrewMember>, PortError> {
        debug!("Fetching crew member by ID");

        let row = self.table.get(id.into()).await?;
        Ok(row.map(row_to_crew_member).transpose()?)
    }

    async fn exists(&self, id: CrewMemberId) -> Result<bool, PortError> {
        Ok(self.table.exists(id.into()).await?)
    }

    #[instrument(skip(self))]
    async fn list(&self, window: Option<PageWindow>) -> Result<Vec<CrewMember>, PortError> {
        let (limit, offset) = limit_offset(window);
        debug!(?limit, offset, "Listing crew members");

        let rows = self.table.list(limit, offset).await?;
        rows.into_iter()
            .map(|row| row_to_crew_member(row).map_err(PortError::from))
            .collect()
    }

    async fn count(&self) -> Result<u64, PortError> {
        Ok(to_count(self.table.count().await?)?)
    }
}

#[async_trait]
impl Repository<CrewMember> for PostgresCrewMemberAdapter {
    #[instrument(skip(self, entity), fields(crew_member_id = %entity.id))]
    async fn add(&self, entity: CrewMember) -> Result<(), PortError> {
        debug!("Inserting crew member");
        Ok(self.table.insert(&crew_member_to_row(&entity)).await?)
    }

    #[instrument(skip(self, entity), fields(crew_member_id = %entity.id))]
    async fn update(&self, entity: CrewMember) -> Result<(), PortError> {
        debug!("Updating crew member");
        Ok(self.table.update(&crew_member_to_row(&entity)).await?)
    }

    #[instrument(skip(self), fields(crew_member_id = %id))]
    async fn delete(&self, id: CrewMemberId) -> Result<(), PortError> {
        debug!("Deleting crew member");
        Ok(self.table.delete(id.into()).await?)
    }
}

#[async_trait]
impl CrewMemberRepository for PostgresCrewMemberAdapter {
    #[instrument(skip(self, email))]
    async fn email_in_use(
        &self,
        email: &str,
        excluding: Option<CrewMemberId>,
    ) -> Result<bool, PortError> {
        Ok(self.table.email_in_use(email, excluding.map(Into::into)).await?)
    }
}

fn row_to_crew_member(row: CrewMemberRow) -> Result<CrewMember, DatabaseError> {
    let status = CrewMemberStatus::try_from(row.status)
        .map_err(|e| DatabaseError::InvalidData(format!("crew member {}: {}", row.id, e)))?;

    Ok(CrewMember {
        id: row.id.into(),
        name: row.name,
        birthday: row.birthday,
        email: row.email,
        country_code: row.country_code,
        profile_image_url: row.profile_image_url,
        last_certification_date: row.last_certification_date,
        status,
        status_description: row.status_description,
        license_id: row.license_id.into(),
        member_type_id: row.member_type_id.into(),
    })
}

fn crew_member_to_row(member: &CrewMember) -> CrewMemberRow {
    CrewMemberRow {
        id: member.id.into(),
        name: member.name.clone(),
        birthday: member.birthday,
        email: member.email.clone(),
        country_code: member.country_code.clone(),
        profile_image_url: member.profile_image_url.clone(),
        last_certification_date: member.last_certification_date,
        status: i32::from(member.status.code()),
        status_description: member.status_description.clone(),
        license_id: member.license_id.into(),
        member_type_id: member.member_type_id.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use domain_crew::{ATP_LICENSE_ID, PILOT_MEMBER_TYPE_ID};

    fn member() -> CrewMember {
        CrewMember {
            id: CrewMemberId::new_v7(),
            name: "John Doe".to_string(),
            birthday: NaiveDate::from_ymd_opt(1990, 1, 1).unwrap(),
            email: "john@doe.com".to_string(),
            country_code: "BGR".to_string(),
            profile_image_url: "image".to_string(),
            last_certification_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            status: CrewMemberStatus::CrewRetired,
            status_description: "Retired".to_string(),
            license_id: ATP_LICENSE_ID,
            member_type_id: PILOT_MEMBER_TYPE_ID,
        }
    }

    #[test]
    fn test_row_conversion_preserves_member() {
        let member = member();
        let row = crew_member_to_row(&member);

        assert_eq!(row.status, 2);
        assert_eq!(row_to_crew_member(row).unwrap(), member);
    }

    #[test]
    fn test_unknown_stored_status_is_invalid_data() {
        let mut row = crew_member_to_row(&member());
        row.status = 5;

        let error = row_to_crew_member(row).unwrap_err();

        assert!(matches!(error, DatabaseError::InvalidData(_)));
    }
}
