//! License table access

use sqlx::PgPool;
use uuid::Uuid;

use crate::error::DatabaseError;

/// A row of the `licenses` table
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct LicenseRow {
    pub id: Uuid,
    pub name: String,
    pub description: String,
}

/// Table gateway for licenses
#[derive(Debug, Clone)]
pub struct LicenseTable {
    pool: PgPool,
}

impl LicenseTable {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn get(&self, id: Uuid) -> Result<Option<LicenseRow>, DatabaseError> {
        let row = sqlx::query_as::<_, LicenseRow>(
            "SELECT id, name, description FROM licenses WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    pub async fn list(&self, limit: Option<i64>, offset: i64) -> Result<Vec<LicenseRow>, DatabaseError> {
        let rows = sqlx::query_as::<_, LicenseRow>(
            r#"
            SELECT id, name, description FROM licenses
            ORDER BY name COLLATE "C", id
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn count(&self) -> Result<i64, DatabaseError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM licenses")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    pub async fn exists(&self, id: Uuid) -> Result<bool, DatabaseError> {
        let exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM licenses WHERE id = $1)")
                .bind(id)
                .fetch_one(&self.pool)
                .await?;
        Ok(exists)
    }

    pub async fn insert(&self, row: &LicenseRow) -> Result<(), DatabaseError> {
        sqlx::query("INSERT INTO licenses (id, name, description) VALUES ($1, $2, $3)")
            .bind(row.id)
            .bind(&row.name)
            .bind(&row.description)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    pub async fn update(&self, row: &LicenseRow) -> Result<(), DatabaseError> {
        let result = sqlx::query("UPDATE licenses SET name = $2, description = $3 WHERE id = $1")
            .bind(row.id)
            .bind(&row.name)
            .bind(&row.description)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::not_found("License", row.id));
        }
        Ok(())
    }

    /// Deleting a license cascades to the crew members holding it
    pub async fn delete(&self, id: Uuid) -> Result<(), DatabaseError> {
        let result = sqlx::query("DELETE FROM licenses WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::not_found("License", id));
        }
        Ok(())
    }
}
