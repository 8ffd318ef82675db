//! PostgreSQL implementation of EnrollmentRepository.
//!
//! The seat commits run inside a transaction: the cohort's seat counter is
//! moved with a guarded single-row UPDATE, then the enrollment's status is
//! compare-and-set against what the caller read. Either both rows change or
//! neither does.

use async_trait::async_trait;
use chrono::NaiveDateTime;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::foundation::{
    CohortId, ContactInfo, DomainError, EnrollmentId, ErrorCode, StaffId, Timestamp,
};
use crate::domain::training::{Enrollment, EnrollmentStatus};
use crate::ports::{EnrollmentRepository, SeatCommit};

/// PostgreSQL implementation of the EnrollmentRepository port.
pub struct PostgresEnrollmentRepository {
    pool: PgPool,
}

impl PostgresEnrollmentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Database row representation of an enrollment.
#[derive(Debug, sqlx::FromRow)]
struct EnrollmentRow {
    id: Uuid,
    student_name: String,
    student_email: String,
    student_phone: String,
    experience_level: Option<String>,
    has_own_camera: bool,
    learning_goals: Option<String>,
    preferred_intake: Option<String>,
    cohort_id: Option<Uuid>,
    status: String,
    registration_fee_paid: bool,
    payment_reference: Option<String>,
    reviewed_by: Option<Uuid>,
    created_at: NaiveDateTime,
    updated_at: NaiveDateTime,
}

impl TryFrom<EnrollmentRow> for Enrollment {
    type Error = DomainError;

    fn try_from(row: EnrollmentRow) -> Result<Self, Self::Error> {
        let status = parse_status(&row.status)?;
        Ok(Enrollment::reconstitute(
            EnrollmentId::from_uuid(row.id),
            ContactInfo::reconstitute(row.student_name, row.student_email, row.student_phone),
            row.experience_level,
            row.has_own_camera,
            row.learning_goals,
            row.preferred_intake,
            row.cohort_id.map(CohortId::from_uuid),
            status,
            row.registration_fee_paid,
            row.payment_reference,
            row.reviewed_by.map(StaffId::from_uuid),
            Timestamp::from_naive(row.created_at),
            Timestamp::from_naive(row.updated_at),
        ))
    }
}

fn status_to_string(status: EnrollmentStatus) -> &'static str {
    match status {
        EnrollmentStatus::Pending => "pending",
        EnrollmentStatus::InterviewScheduled => "interview_scheduled",
        EnrollmentStatus::Accepted => "accepted",
        EnrollmentStatus::Rejected => "rejected",
        EnrollmentStatus::Enrolled => "enrolled",
        EnrollmentStatus::Withdrawn => "withdrawn",
        EnrollmentStatus::Completed => "completed",
    }
}

fn parse_status(s: &str) -> Result<EnrollmentStatus, DomainError> {
    match s {
        "pending" => Ok(EnrollmentStatus::Pending),
        "interview_scheduled" => Ok(EnrollmentStatus::InterviewScheduled),
        "accepted" => Ok(EnrollmentStatus::Accepted),
        "rejected" => Ok(EnrollmentStatus::Rejected),
        "enrolled" => Ok(EnrollmentStatus::Enrolled),
        "withdrawn" => Ok(EnrollmentStatus::Withdrawn),
        "completed" => Ok(EnrollmentStatus::Completed),
        _ => Err(DomainError::new(
            ErrorCode::DatabaseError,
            format!("Invalid enrollment status value: {}", s),
        )),
    }
}

const SELECT_COLUMNS: &str = r#"
    SELECT id, student_name, student_email, student_phone, experience_level,
           has_own_camera, learning_goals, preferred_intake, cohort_id, status,
           registration_fee_paid, payment_reference, reviewed_by,
           created_at, updated_at
    FROM enrollments
"#;

#[async_trait]
impl EnrollmentRepository for PostgresEnrollmentRepository {
    async fn save(&self, enrollment: &Enrollment) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO enrollments (
                id, student_name, student_email, student_phone, experience_level,
                has_own_camera, learning_goals, preferred_intake, cohort_id, status,
                registration_fee_paid, payment_reference, reviewed_by,
                created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)
            "#,
        )
        .bind(enrollment.id().as_uuid())
        .bind(enrollment.contact().name())
        .bind(enrollment.contact().email())
        .bind(enrollment.contact().phone())
        .bind(enrollment.experience_level())
        .bind(enrollment.has_own_camera())
        .bind(enrollment.learning_goals())
        .bind(enrollment.preferred_intake())
        .bind(enrollment.cohort_id().map(|id| *id.as_uuid()))
        .bind(status_to_string(enrollment.status()))
        .bind(enrollment.registration_fee_paid())
        .bind(enrollment.payment_reference())
        .bind(enrollment.reviewed_by().map(|id| *id.as_uuid()))
        .bind(*enrollment.created_at().as_naive())
        .bind(*enrollment.updated_at().as_naive())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to save enrollment: {}", e),
            )
        })?;

        Ok(())
    }

    async fn find_by_id(&self, id: &EnrollmentId) -> Result<Option<Enrollment>, DomainError> {
        let row: Option<EnrollmentRow> =
            sqlx::query_as(&format!("{} WHERE id = $1", SELECT_COLUMNS))
                .bind(id.as_uuid())
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| {
                    DomainError::new(
                        ErrorCode::DatabaseError,
                        format!("Failed to find enrollment: {}", e),
                    )
                })?;

        row.map(Enrollment::try_from).transpose()
    }

    async fn update_if_status(
        &self,
        enrollment: &Enrollment,
        expected: EnrollmentStatus,
    ) -> Result<bool, DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE enrollments SET
                status = $3,
                cohort_id = $4,
                registration_fee_paid = $5,
                payment_reference = $6,
                reviewed_by = $7,
                updated_at = $8
            WHERE id = $1 AND status = $2
            "#,
        )
        .bind(enrollment.id().as_uuid())
        .bind(status_to_string(expected))
        .bind(status_to_string(enrollment.status()))
        .bind(enrollment.cohort_id().map(|id| *id.as_uuid()))
        .bind(enrollment.registration_fee_paid())
        .bind(enrollment.payment_reference())
        .bind(enrollment.reviewed_by().map(|id| *id.as_uuid()))
        .bind(*enrollment.updated_at().as_naive())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to update enrollment: {}", e),
            )
        })?;

        if result.rows_affected() > 0 {
            return Ok(true);
        }

        // Distinguish a lost race from a missing row.
        let exists: Option<(Uuid,)> = sqlx::query_as("SELECT id FROM enrollments WHERE id = $1")
            .bind(enrollment.id().as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                DomainError::new(
                    ErrorCode::DatabaseError,
                    format!("Failed to check enrollment: {}", e),
                )
            })?;
        if exists.is_none() {
            return Err(DomainError::new(
                ErrorCode::EnrollmentNotFound,
                format!("Enrollment not found: {}", enrollment.id()),
            ));
        }
        Ok(false)
    }

    async fn commit_enrollment(
        &self,
        enrollment: &Enrollment,
        cohort: &CohortId,
        expected: EnrollmentStatus,
    ) -> Result<SeatCommit, DomainError> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to begin transaction: {}", e),
            )
        })?;

        // The guard clause keeps the counter below capacity no matter how
        // many writers race on this row.
        let seat = sqlx::query(
            r#"
            UPDATE cohorts SET
                current_enrollment = current_enrollment + 1,
                updated_at = $2
            WHERE id = $1 AND current_enrollment < max_students
            "#,
        )
        .bind(cohort.as_uuid())
        .bind(*Timestamp::now().as_naive())
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to claim cohort seat: {}", e),
            )
        })?;

        if seat.rows_affected() == 0 {
            let exists: Option<(Uuid,)> = sqlx::query_as("SELECT id FROM cohorts WHERE id = $1")
                .bind(cohort.as_uuid())
                .fetch_optional(&mut *tx)
                .await
                .map_err(|e| {
                    DomainError::new(
                        ErrorCode::DatabaseError,
                        format!("Failed to check cohort: {}", e),
                    )
                })?;
            tx.rollback().await.ok();
            if exists.is_none() {
                return Err(DomainError::new(
                    ErrorCode::CohortNotFound,
                    format!("Cohort not found: {}", cohort),
                ));
            }
            return Ok(SeatCommit::CohortFull);
        }

        let status = sqlx::query(
            r#"
            UPDATE enrollments SET
                status = $3,
                cohort_id = $4,
                updated_at = $5
            WHERE id = $1 AND status = $2
            "#,
        )
        .bind(enrollment.id().as_uuid())
        .bind(status_to_string(expected))
        .bind(status_to_string(enrollment.status()))
        .bind(cohort.as_uuid())
        .bind(*enrollment.updated_at().as_naive())
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to update enrollment: {}", e),
            )
        })?;

        if status.rows_affected() == 0 {
            let exists: Option<(Uuid,)> =
                sqlx::query_as("SELECT id FROM enrollments WHERE id = $1")
                    .bind(enrollment.id().as_uuid())
                    .fetch_optional(&mut *tx)
                    .await
                    .map_err(|e| {
                        DomainError::new(
                            ErrorCode::DatabaseError,
                            format!("Failed to check enrollment: {}", e),
                        )
                    })?;
            tx.rollback().await.ok();
            if exists.is_none() {
                return Err(DomainError::new(
                    ErrorCode::EnrollmentNotFound,
                    format!("Enrollment not found: {}", enrollment.id()),
                ));
            }
            return Ok(SeatCommit::StateChanged);
        }

        tx.commit().await.map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to commit enrollment: {}", e),
            )
        })?;
        Ok(SeatCommit::Committed)
    }

    async fn commit_withdrawal(
        &self,
        enrollment: &Enrollment,
        cohort: &CohortId,
        expected: EnrollmentStatus,
    ) -> Result<SeatCommit, DomainError> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to begin transaction: {}", e),
            )
        })?;

        let seat = sqlx::query(
            r#"
            UPDATE cohorts SET
                current_enrollment = current_enrollment - 1,
                updated_at = $2
            WHERE id = $1 AND current_enrollment > 0
            "#,
        )
        .bind(cohort.as_uuid())
        .bind(*Timestamp::now().as_naive())
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to release cohort seat: {}", e),
            )
        })?;

        if seat.rows_affected() == 0 {
            let exists: Option<(Uuid,)> = sqlx::query_as("SELECT id FROM cohorts WHERE id = $1")
                .bind(cohort.as_uuid())
                .fetch_optional(&mut *tx)
                .await
                .map_err(|e| {
                    DomainError::new(
                        ErrorCode::DatabaseError,
                        format!("Failed to check cohort: {}", e),
                    )
                })?;
            tx.rollback().await.ok();
            if exists.is_none() {
                return Err(DomainError::new(
                    ErrorCode::CohortNotFound,
                    format!("Cohort not found: {}", cohort),
                ));
            }
            return Err(DomainError::new(
                ErrorCode::InternalError,
                format!("Cohort {} has no seats to release", cohort),
            ));
        }

        let status = sqlx::query(
            r#"
            UPDATE enrollments SET
                status = $3,
                updated_at = $4
            WHERE id = $1 AND status = $2
            "#,
        )
        .bind(enrollment.id().as_uuid())
        .bind(status_to_string(expected))
        .bind(status_to_string(enrollment.status()))
        .bind(*enrollment.updated_at().as_naive())
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to update enrollment: {}", e),
            )
        })?;

        if status.rows_affected() == 0 {
            let exists: Option<(Uuid,)> =
                sqlx::query_as("SELECT id FROM enrollments WHERE id = $1")
                    .bind(enrollment.id().as_uuid())
                    .fetch_optional(&mut *tx)
                    .await
                    .map_err(|e| {
                        DomainError::new(
                            ErrorCode::DatabaseError,
                            format!("Failed to check enrollment: {}", e),
                        )
                    })?;
            tx.rollback().await.ok();
            if exists.is_none() {
                return Err(DomainError::new(
                    ErrorCode::EnrollmentNotFound,
                    format!("Enrollment not found: {}", enrollment.id()),
                ));
            }
            return Ok(SeatCommit::StateChanged);
        }

        tx.commit().await.map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to commit withdrawal: {}", e),
            )
        })?;
        Ok(SeatCommit::Committed)
    }
}
