//! Crew member table access
//!
//! Listing is ordered by `name COLLATE "C"` so names sort by their bytes,
//! the same order the in-memory repository produces.

use chrono::NaiveDate;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::DatabaseError;

const SELECT_COLUMNS: &str = r#"
    SELECT id, name, birthday, email, country_code, profile_image_url,
           last_certification_date, status, status_description,
           license_id, member_type_id
    FROM crew_members
"#;

/// A row of the `crew_members` table
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct CrewMemberRow {
    pub id: Uuid,
    pub name: String,
    pub birthday: NaiveDate,
    pub email: String,
    pub country_code: String,
    pub profile_image_url: String,
    pub last_certification_date: NaiveDate,
    pub status: i32,
    pub status_description: String,
    pub license_id: Uuid,
    pub member_type_id: Uuid,
}

/// Table gateway for crew members
#[derive(Debug, Clone)]
pub struct CrewMemberTable {
    pool: PgPool,
}

impl CrewMemberTable {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn get(&self, id: Uuid) -> Result<Option<CrewMemberRow>, DatabaseError> {
        let row = sqlx::query_as::<_, CrewMemberRow>(&format!("{SELECT_COLUMNS} WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    /// Lists rows by name then id
    ///
    /// A `None` limit returns every row from `offset` on.
    pub async fn list(
        &self,
        limit: Option<i64>,
        offset: i64,
    ) -> Result<Vec<CrewMemberRow>, DatabaseError> {
        let rows = sqlx::query_as::<_, CrewMemberRow>(&format!(
            r#"{SELECT_COLUMNS} ORDER BY name COLLATE "C", id LIMIT $1 OFFSET $2"#
        ))
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn count(&self) -> Result<i64, DatabaseError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM crew_members")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    pub async fn exists(&self, id: Uuid) -> Result<bool, DatabaseError> {
        let exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM crew_members WHERE id = $1)")
                .bind(id)
                .fetch_one(&self.pool)
                .await?;
        Ok(exists)
    }

    /// Checks the email against every row except `excluding`
    pub async fn email_in_use(
        &self,
        email: &str,
        excluding: Option<Uuid>,
    ) -> Result<bool, DatabaseError> {
        let in_use = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM crew_members
                WHERE email = $1 AND ($2::uuid IS NULL OR id <> $2)
            )
            "#,
        )
        .bind(email)
        .bind(excluding)
        .fetch_one(&self.pool)
        .await?;
        Ok(in_use)
    }

    pub async fn insert(&self, row: &CrewMemberRow) -> Result<(), DatabaseError> {
        sqlx::query(
            r#"
            INSERT INTO crew_members (
                id, name, birthday, email, country_code, profile_image_url,
                last_certification_date, status, status_description,
                license_id, member_type_id
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            "#,
        )
        .bind(row.id)
        .bind(&row.name)
        .bind(row.birthday)
        .bind(&row.email)
        .bind(&row.country_code)
        .bind(&row.profile_image_url)
        .bind(row.last_certification_date)
        .bind(row.status)
        .bind(&row.status_description)
        .bind(row.license_id)
        .bind(row.member_type_id)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// Overwrites every column but the id
    ///
    /// Returns `DatabaseError::NotFound` if no row has the id.
    pub async fn update(&self, row: &CrewMemberRow) -> Result<(), DatabaseError> {
        let result = sqlx::query(
            r#"
            UPDATE crew_members SET
                name = $2,
                birthday = $3,
                email = $4,
                country_code = $5,
                profile_image_url = $6,
                last_certification_date = $7,
                status = $8,
                status_description = $9,
                license_id = $10,
                member_type_id = $11
            WHERE id = $1
            "#,
        )
        .bind(row.id)
        .bind(&row.name)
        .bind(row.birthday)
        .bind(&row.email)
        .bind(&row.country_code)
        .bind(&row.profile_image_url)
        .bind(row.last_certification_date)
        .bind(row.status)
        .bind(&row.status_description)
        .bind(row.license_id)
        .bind(row.member_type_id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::not_found("CrewMember", row.id));
        }
        Ok(())
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), DatabaseError> {
        let result = sqlx::query("DELETE FROM crew_members WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::not_found("CrewMember", id));
        }
        Ok(())
    }
}
