//! PostgreSQL implementation of CohortRepository.

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::foundation::{CohortId, DomainError, ErrorCode, Timestamp};
use crate::domain::training::Cohort;
use crate::ports::CohortRepository;

/// PostgreSQL implementation of the CohortRepository port.
pub struct PostgresCohortRepository {
    pool: PgPool,
}

impl PostgresCohortRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Database row representation of a cohort.
#[derive(Debug, sqlx::FromRow)]
struct CohortRow {
    id: Uuid,
    name: String,
    start_date: NaiveDate,
    end_date: NaiveDate,
    max_students: i32,
    current_enrollment: i32,
    cancelled: bool,
    created_at: NaiveDateTime,
    updated_at: NaiveDateTime,
}

impl TryFrom<CohortRow> for Cohort {
    type Error = DomainError;

    fn try_from(row: CohortRow) -> Result<Self, Self::Error> {
        let max_students = u32::try_from(row.max_students).map_err(|_| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Invalid max_students value: {}", row.max_students),
            )
        })?;
        let current_enrollment = u32::try_from(row.current_enrollment).map_err(|_| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Invalid current_enrollment value: {}", row.current_enrollment),
            )
        })?;

        Ok(Cohort::reconstitute(
            CohortId::from_uuid(row.id),
            row.name,
            row.start_date,
            row.end_date,
            max_students,
            current_enrollment,
            row.cancelled,
            Timestamp::from_naive(row.created_at),
            Timestamp::from_naive(row.updated_at),
        ))
    }
}

#[async_trait]
impl CohortRepository for PostgresCohortRepository {
    async fn save(&self, cohort: &Cohort) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO cohorts (
                id, name, start_date, end_date, max_students,
                current_enrollment, cancelled, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(cohort.id().as_uuid())
        .bind(cohort.name())
        .bind(cohort.start_date())
        .bind(cohort.end_date())
        .bind(cohort.max_students() as i32)
        .bind(cohort.current_enrollment() as i32)
        .bind(cohort.is_cancelled())
        .bind(*cohort.created_at().as_naive())
        .bind(*cohort.updated_at().as_naive())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(ErrorCode::DatabaseError, format!("Failed to save cohort: {}", e))
        })?;

        Ok(())
    }

    async fn find_by_id(&self, id: &CohortId) -> Result<Option<Cohort>, DomainError> {
        let row: Option<CohortRow> = sqlx::query_as(
            r#"
            SELECT id, name, start_date, end_date, max_students,
                   current_enrollment, cancelled, created_at, updated_at
            FROM cohorts
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(ErrorCode::DatabaseError, format!("Failed to find cohort: {}", e))
        })?;

        row.map(Cohort::try_from).transpose()
    }

    async fn update_details(&self, cohort: &Cohort) -> Result<(), DomainError> {
        // Deliberately leaves current_enrollment out of the SET list; the
        // seat counter moves only inside the enrollment repository's
        // transactional commits.
        let result = sqlx::query(
            r#"
            UPDATE cohorts SET
                name = $2,
                start_date = $3,
                end_date = $4,
                max_students = $5,
                cancelled = $6,
                updated_at = $7
            WHERE id = $1
            "#,
        )
        .bind(cohort.id().as_uuid())
        .bind(cohort.name())
        .bind(cohort.start_date())
        .bind(cohort.end_date())
        .bind(cohort.max_students() as i32)
        .bind(cohort.is_cancelled())
        .bind(*cohort.updated_at().as_naive())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(ErrorCode::DatabaseError, format!("Failed to update cohort: {}", e))
        })?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::CohortNotFound,
                format!("Cohort not found: {}", cohort.id()),
            ));
        }
        Ok(())
    }
}
