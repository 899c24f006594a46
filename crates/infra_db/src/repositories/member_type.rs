//! Member type table access

use sqlx::PgPool;
use uuid::Uuid;

use crate::error::DatabaseError;

/// A row of the `member_types` table
///
/// `kind` maps the `type` column: 0 Pilot, 1 Regular, 2 Steward.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct MemberTypeRow {
    pub id: Uuid,
    pub name: String,
    #[sqlx(rename = "type")]
    pub kind: i32,
}

/// Table gateway for member types
#[derive(Debug, Clone)]
pub struct MemberTypeTable {
    pool: PgPool,
}

impl MemberTypeTable {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn get(&self, id: Uuid) -> Result<Option<MemberTypeRow>, DatabaseError> {
        let row = sqlx::query_as::<_, MemberTypeRow>(
            "SELECT id, name, type FROM member_types WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    pub async fn list(
        &self,
        limit: Option<i64>,
        offset: i64,
    ) -> Result<Vec<MemberTypeRow>, DatabaseError> {
        let rows = sqlx::query_as::<_, MemberTypeRow>(
            r#"
            SELECT id, name, type FROM member_types
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
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM member_types")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    pub async fn exists(&self, id: Uuid) -> Result<bool, DatabaseError> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM member_types WHERE id = $1)",
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }

    pub async fn insert(&self, row: &MemberTypeRow) -> Result<(), DatabaseError> {
        sqlx::query("INSERT INTO member_types (id, name, type) VALUES ($1, $2, $3)")
            .bind(row.id)
            .bind(&row.name)
            .bind(row.kind)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    pub async fn update(&self, row: &MemberTypeRow) -> Result<(), DatabaseError> {
        let result = sqlx::query("UPDATE member_types SET name = $2, type = $3 WHERE id = $1")
            .bind(row.id)
            .bind(&row.name)
            .bind(row.kind)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::not_found("MemberType", row.id));
        }
        Ok(())
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), DatabaseError> {
        let result = sqlx::query("DELETE FROM member_types WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::not_found("MemberType", id));
        }
        Ok(())
    }
}
