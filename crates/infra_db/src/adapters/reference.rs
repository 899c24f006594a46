//! PostgreSQL adapters for the seeded reference data

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{debug, instrument};

use core_kernel::{DomainPort, HealthCheckResult, HealthCheckable, LicenseId, MemberTypeId, PortError};
use domain_crew::{License, MemberType, MemberTypeKind, PageWindow, ReadRepository, Repository};

use super::check_pool;
use crate::error::DatabaseError;
use crate::repositories::{
    limit_offset, to_count, LicenseRow, LicenseTable, MemberTypeRow, MemberTypeTable,
};

/// PostgreSQL-backed license repository
#[derive(Debug, Clone)]
pub struct PostgresLicenseAdapter {
    table: LicenseTable,
    pool: PgPool,
}

impl PostgresLicenseAdapter {
    pub fn new(pool: PgPool) -> Self {
        Self {
            table: LicenseTable::new(pool.clone()),
            pool,
        }
    }
}

impl DomainPort for PostgresLicenseAdapter {}

#[async_trait]
impl HealthCheckable for PostgresLicenseAdapter {
    async fn health_check(&self) -> HealthCheckResult {
        check_pool(&self.pool, "postgres-license-adapter").await
    }
}

#[async_trait]
impl ReadRepository<License> for PostgresLicenseAdapter {
    #[instrument(skip(self), fields(license_id = %id))]
    async fn find(&self, id: LicenseId) -> Result<Option<License>, PortError> {
        debug!("Fetching license by ID");
        Ok(self.table.get(id.into()).await?.map(row_to_license))
    }

    async fn exists(&self, id: LicenseId) -> Result<bool, PortError> {
        Ok(self.table.exists(id.into()).await?)
    }

    async fn list(&self, window: Option<PageWindow>) -> Result<Vec<License>, PortError> {
        let (limit, offset) = limit_offset(window);
        let rows = self.table.list(limit, offset).await?;
        Ok(rows.into_iter().map(row_to_license).collect())
    }

    async fn count(&self) -> Result<u64, PortError> {
        Ok(to_count(self.table.count().await?)?)
    }
}

#[async_trait]
impl Repository<License> for PostgresLicenseAdapter {
    async fn add(&self, entity: License) -> Result<(), PortError> {
        Ok(self.table.insert(&license_to_row(&entity)).await?)
    }

    async fn update(&self, entity: License) -> Result<(), PortError> {
        Ok(self.table.update(&license_to_row(&entity)).await?)
    }

    async fn delete(&self, id: LicenseId) -> Result<(), PortError> {
        Ok(self.table.delete(id.into()).await?)
    }
}

fn row_to_license(row: LicenseRow) -> License {
    License {
        id: row.id.into(),
        name: row.name,
        description: row.description,
    }
}

fn license_to_row(license: &License) -> LicenseRow {
    LicenseRow {
        id: license.id.into(),
        name: license.name.clone(),
        description: license.description.clone(),
    }
}

/// PostgreSQL-backed member type repository
#[derive(Debug, Clone)]
pub struct PostgresMemberTypeAdapter {
    table: MemberTypeTable,
    pool: PgPool,
}

impl PostgresMemberTypeAdapter {
    pub fn new(pool: PgPool) -> Self {
        Self {
            table: MemberTypeTable::new(pool.clone()),
            pool,
        }
    }
}

impl DomainPort for PostgresMemberTypeAdapter {}

#[async_trait]
impl HealthCheckable for PostgresMemberTypeAdapter {
    async fn health_check(&self) -> HealthCheckResult {
        check_pool(&self.pool, "postgres-member-type-adapter").await
    }
}

#[async_trait]
impl ReadRepository<MemberType> for PostgresMemberTypeAdapter {
    #[instrument(skip(self), fields(member_type_id = %id))]
    async fn find(&self, id: MemberTypeId) -> Result<Option<MemberType>, PortError> {
        debug!("Fetching member type by ID");
        let row = self.table.get(id.into()).await?;
        Ok(row.map(row_to_member_type).transpose()?)
    }

    async fn exists(&self, id: MemberTypeId) -> Result<bool, PortError> {
        Ok(self.table.exists(id.into()).await?)
    }

    async fn list(&self, window: Option<PageWindow>) -> Result<Vec<MemberType>, PortError> {
        let (limit, offset) = limit_offset(window);
        let rows = self.table.list(limit, offset).await?;
        rows.into_iter()
            .map(|row| row_to_member_type(row).map_err(PortError::from))
            .collect()
    }

    async fn count(&self) -> Result<u64, PortError> {
        Ok(to_count(self.table.count().await?)?)
    }
}

#[async_trait]
impl Repository<MemberType> for PostgresMemberTypeAdapter {
    async fn add(&self, entity: MemberType) -> Result<(), PortError> {
        Ok(self.table.insert(&member_type_to_row(&entity)).await?)
    }

    async fn update(&self, entity: MemberType) -> Result<(), PortError> {
        Ok(self.table.update(&member_type_to_row(&entity)).await?)
    }

    async fn delete(&self, id: MemberTypeId) -> Result<(), PortError> {
        Ok(self.table.delete(id.into()).await?)
    }
}

fn row_to_member_type(row: MemberTypeRow) -> Result<MemberType, DatabaseError> {
    let kind = MemberTypeKind::try_from(row.kind)
        .map_err(|e| DatabaseError::InvalidData(format!("member type {}: {}", row.id, e)))?;

    Ok(MemberType {
        id: row.id.into(),
        name: row.name,
        kind,
    })
}

fn member_type_to_row(member_type: &MemberType) -> MemberTypeRow {
    MemberTypeRow {
        id: member_type.id.into(),
        name: member_type.name.clone(),
        kind: i32::from(member_type.kind.code()),
    }
}
