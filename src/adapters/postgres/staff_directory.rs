//! PostgreSQL implementation of StaffDirectory.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::foundation::{DomainError, ErrorCode, StaffId};
use crate::domain::staff::{StaffProfile, StaffRole};
use crate::ports::StaffDirectory;

/// PostgreSQL implementation of the StaffDirectory port.
pub struct PostgresStaffDirectory {
    pool: PgPool,
}

impl PostgresStaffDirectory {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct StaffRow {
    id: Uuid,
    role: String,
    is_active: bool,
}

fn parse_role(s: &str) -> Result<StaffRole, DomainError> {
    match s {
        "admin" => Ok(StaffRole::Admin),
        "photographer" => Ok(StaffRole::Photographer),
        "videography" => Ok(StaffRole::Videography),
        "staff" => Ok(StaffRole::Staff),
        _ => Err(DomainError::new(
            ErrorCode::DatabaseError,
            format!("Invalid staff role value: {}", s),
        )),
    }
}

#[async_trait]
impl StaffDirectory for PostgresStaffDirectory {
    async fn get(&self, id: &StaffId) -> Result<Option<StaffProfile>, DomainError> {
        let row: Option<StaffRow> = sqlx::query_as(
            "SELECT id, role, is_active FROM staff_profiles WHERE id = $1",
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to look up staff member: {}", e),
            )
        })?;

        row.map(|row| {
            Ok(StaffProfile {
                id: StaffId::from_uuid(row.id),
                role: parse_role(&row.role)?,
                is_active: row.is_active,
            })
        })
        .transpose()
    }
}
