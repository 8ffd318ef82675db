//! PostgreSQL implementation of NotificationLog.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::foundation::{DomainError, ErrorCode};
use crate::ports::{NotificationLog, NotificationRecord, RelatedEntity};

/// PostgreSQL implementation of the NotificationLog port.
pub struct PostgresNotificationLog {
    pool: PgPool,
}

impl PostgresNotificationLog {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn related_parts(related: &RelatedEntity) -> (&'static str, Uuid) {
    match related {
        RelatedEntity::Booking(id) => ("booking", *id.as_uuid()),
        RelatedEntity::Quote(id) => ("quote", *id.as_uuid()),
        RelatedEntity::Enrollment(id) => ("enrollment", *id.as_uuid()),
    }
}

#[async_trait]
impl NotificationLog for PostgresNotificationLog {
    async fn record(&self, record: &NotificationRecord) -> Result<(), DomainError> {
        let (related_type, related_id) = related_parts(&record.related);

        sqlx::query(
            r#"
            INSERT INTO notification_log (
                id, recipient, subject, template, related_type, related_id,
                outcome, recorded_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&record.recipient)
        .bind(&record.subject)
        .bind(&record.template)
        .bind(related_type)
        .bind(related_id)
        .bind(record.outcome.as_str())
        .bind(*record.recorded_at.as_naive())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to record notification: {}", e),
            )
        })?;

        Ok(())
    }
}
