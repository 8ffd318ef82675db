//! PostgreSQL implementation of ScheduleIndex.

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveTime};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::foundation::{BookingId, DomainError, ErrorCode};
use crate::ports::{ScheduleIndex, ScheduledBooking};

use super::booking_repository::parse_status;

/// PostgreSQL implementation of the ScheduleIndex port.
///
/// Reads the bookings table directly; only pending and confirmed rows hold
/// calendar slots, so everything else is filtered out in SQL.
pub struct PostgresScheduleIndex {
    pool: PgPool,
}

impl PostgresScheduleIndex {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct SlotRow {
    id: Uuid,
    preferred_time: Option<NaiveTime>,
    status: String,
}

#[async_trait]
impl ScheduleIndex for PostgresScheduleIndex {
    async fn list_committed(&self, date: NaiveDate) -> Result<Vec<ScheduledBooking>, DomainError> {
        let rows: Vec<SlotRow> = sqlx::query_as(
            r#"
            SELECT id, preferred_time, status
            FROM bookings
            WHERE preferred_date = $1 AND status IN ('pending', 'confirmed')
            ORDER BY preferred_time NULLS FIRST
            "#,
        )
        .bind(date)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to list scheduled bookings: {}", e),
            )
        })?;

        rows.into_iter()
            .map(|row| {
                Ok(ScheduledBooking {
                    id: BookingId::from_uuid(row.id),
                    time: row.preferred_time,
                    status: parse_status(&row.status)?,
                })
            })
            .collect()
    }
}
