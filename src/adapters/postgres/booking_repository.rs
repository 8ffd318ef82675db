//! PostgreSQL implementation of BookingRepository.

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::booking::{Booking, BookingStatus};
use crate::domain::foundation::{
    BookingId, ContactInfo, DomainError, ErrorCode, StaffId, Timestamp,
};
use crate::ports::BookingRepository;

/// PostgreSQL implementation of the BookingRepository port.
pub struct PostgresBookingRepository {
    pool: PgPool,
}

impl PostgresBookingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Database row representation of a booking.
#[derive(Debug, sqlx::FromRow)]
struct BookingRow {
    id: Uuid,
    client_name: String,
    client_email: String,
    client_phone: String,
    service_type: String,
    preferred_date: NaiveDate,
    preferred_time: Option<NaiveTime>,
    location: Option<String>,
    budget_range: Option<String>,
    additional_notes: Option<String>,
    status: String,
    assigned_to: Option<Uuid>,
    cancellation_reason: Option<String>,
    cancelled_at: Option<NaiveDateTime>,
    created_at: NaiveDateTime,
    updated_at: NaiveDateTime,
    confirmed_at: Option<NaiveDateTime>,
    completed_at: Option<NaiveDateTime>,
}

impl TryFrom<BookingRow> for Booking {
    type Error = DomainError;

    fn try_from(row: BookingRow) -> Result<Self, Self::Error> {
        let status = parse_status(&row.status)?;
        Ok(Booking::reconstitute(
            BookingId::from_uuid(row.id),
            ContactInfo::reconstitute(row.client_name, row.client_email, row.client_phone),
            row.service_type,
            row.preferred_date,
            row.preferred_time,
            row.location,
            row.budget_range,
            row.additional_notes,
            status,
            row.assigned_to.map(StaffId::from_uuid),
            row.cancellation_reason,
            row.cancelled_at.map(Timestamp::from_naive),
            Timestamp::from_naive(row.created_at),
            Timestamp::from_naive(row.updated_at),
            row.confirmed_at.map(Timestamp::from_naive),
            row.completed_at.map(Timestamp::from_naive),
        ))
    }
}

pub(super) fn status_to_string(status: BookingStatus) -> &'static str {
    match status {
        BookingStatus::Pending => "pending",
        BookingStatus::Confirmed => "confirmed",
        BookingStatus::Cancelled => "cancelled",
        BookingStatus::Completed => "completed",
    }
}

pub(super) fn parse_status(s: &str) -> Result<BookingStatus, DomainError> {
    match s {
        "pending" => Ok(BookingStatus::Pending),
        "confirmed" => Ok(BookingStatus::Confirmed),
        "cancelled" => Ok(BookingStatus::Cancelled),
        "completed" => Ok(BookingStatus::Completed),
        _ => Err(DomainError::new(
            ErrorCode::DatabaseError,
            format!("Invalid booking status value: {}", s),
        )),
    }
}

const SELECT_COLUMNS: &str = r#"
    SELECT id, client_name, client_email, client_phone, service_type,
           preferred_date, preferred_time, location, budget_range,
           additional_notes, status, assigned_to, cancellation_reason,
           cancelled_at, created_at, updated_at, confirmed_at, completed_at
    FROM bookings
"#;

#[async_trait]
impl BookingRepository for PostgresBookingRepository {
    async fn save(&self, booking: &Booking) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO bookings (
                id, client_name, client_email, client_phone, service_type,
                preferred_date, preferred_time, location, budget_range,
                additional_notes, status, assigned_to, cancellation_reason,
                cancelled_at, created_at, updated_at, confirmed_at, completed_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17, $18)
            "#,
        )
        .bind(booking.id().as_uuid())
        .bind(booking.contact().name())
        .bind(booking.contact().email())
        .bind(booking.contact().phone())
        .bind(booking.service_type())
        .bind(booking.preferred_date())
        .bind(booking.preferred_time())
        .bind(booking.location())
        .bind(booking.budget_range())
        .bind(booking.additional_notes())
        .bind(status_to_string(booking.status()))
        .bind(booking.assigned_to().map(|id| *id.as_uuid()))
        .bind(booking.cancellation_reason())
        .bind(booking.cancelled_at().map(|ts| *ts.as_naive()))
        .bind(*booking.created_at().as_naive())
        .bind(*booking.updated_at().as_naive())
        .bind(booking.confirmed_at().map(|ts| *ts.as_naive()))
        .bind(booking.completed_at().map(|ts| *ts.as_naive()))
        .execute(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(ErrorCode::DatabaseError, format!("Failed to save booking: {}", e))
        })?;

        Ok(())
    }

    async fn find_by_id(&self, id: &BookingId) -> Result<Option<Booking>, DomainError> {
        let row: Option<BookingRow> =
            sqlx::query_as(&format!("{} WHERE id = $1", SELECT_COLUMNS))
                .bind(id.as_uuid())
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| {
                    DomainError::new(
                        ErrorCode::DatabaseError,
                        format!("Failed to find booking: {}", e),
                    )
                })?;

        row.map(Booking::try_from).transpose()
    }

    async fn update_if_status(
        &self,
        booking: &Booking,
        expected: BookingStatus,
    ) -> Result<bool, DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE bookings SET
                status = $3,
                assigned_to = $4,
                cancellation_reason = $5,
                cancelled_at = $6,
                updated_at = $7,
                confirmed_at = $8,
                completed_at = $9
            WHERE id = $1 AND status = $2
            "#,
        )
        .bind(booking.id().as_uuid())
        .bind(status_to_string(expected))
        .bind(status_to_string(booking.status()))
        .bind(booking.assigned_to().map(|id| *id.as_uuid()))
        .bind(booking.cancellation_reason())
        .bind(booking.cancelled_at().map(|ts| *ts.as_naive()))
        .bind(*booking.updated_at().as_naive())
        .bind(booking.confirmed_at().map(|ts| *ts.as_naive()))
        .bind(booking.completed_at().map(|ts| *ts.as_naive()))
        .execute(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(ErrorCode::DatabaseError, format!("Failed to update booking: {}", e))
        })?;

        if result.rows_affected() > 0 {
            return Ok(true);
        }

        // Distinguish a lost race from a missing row.
        let exists: Option<(Uuid,)> = sqlx::query_as("SELECT id FROM bookings WHERE id = $1")
            .bind(booking.id().as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                DomainError::new(
                    ErrorCode::DatabaseError,
                    format!("Failed to check booking: {}", e),
                )
            })?;
        if exists.is_none() {
            return Err(DomainError::new(
                ErrorCode::BookingNotFound,
                format!("Booking not found: {}", booking.id()),
            ));
        }
        Ok(false)
    }
}
