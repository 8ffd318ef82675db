//! PostgreSQL implementation of QuoteRepository.

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::foundation::{ContactInfo, DomainError, ErrorCode, QuoteId, StaffId, Timestamp};
use crate::domain::quote::{ConflictCheck, QuoteRequest, QuoteStatus, SelectedServices};
use crate::ports::QuoteRepository;

/// PostgreSQL implementation of the QuoteRepository port.
pub struct PostgresQuoteRepository {
    pool: PgPool,
}

impl PostgresQuoteRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Database row representation of a quote request.
///
/// The selected services live in a JSONB column; the conflict flag and its
/// check time share the row so they can never drift apart.
#[derive(Debug, sqlx::FromRow)]
struct QuoteRow {
    id: Uuid,
    client_name: String,
    client_email: String,
    client_phone: String,
    company_name: Option<String>,
    selected_services: sqlx::types::Json<Vec<String>>,
    event_date: Option<NaiveDate>,
    event_time: Option<NaiveTime>,
    event_location: Option<String>,
    project_description: Option<String>,
    status: String,
    has_conflict: Option<bool>,
    conflict_checked_at: Option<NaiveDateTime>,
    quoted_amount_cents: Option<i64>,
    quote_sent_at: Option<NaiveDateTime>,
    valid_until: Option<NaiveDate>,
    assigned_to: Option<Uuid>,
    created_at: NaiveDateTime,
    updated_at: NaiveDateTime,
}

impl TryFrom<QuoteRow> for QuoteRequest {
    type Error = DomainError;

    fn try_from(row: QuoteRow) -> Result<Self, Self::Error> {
        let status = parse_status(&row.status)?;
        let conflict_check = match (row.has_conflict, row.conflict_checked_at) {
            (Some(has_conflict), Some(checked_at)) => Some(ConflictCheck {
                has_conflict,
                checked_at: Timestamp::from_naive(checked_at),
            }),
            (None, None) => None,
            _ => {
                return Err(DomainError::new(
                    ErrorCode::DatabaseError,
                    "Conflict flag and check time must be set together",
                ))
            }
        };
        let selected_services = SelectedServices::new(row.selected_services.0)?;

        Ok(QuoteRequest::reconstitute(
            QuoteId::from_uuid(row.id),
            ContactInfo::reconstitute(row.client_name, row.client_email, row.client_phone),
            row.company_name,
            selected_services,
            row.event_date,
            row.event_time,
            row.event_location,
            row.project_description,
            status,
            conflict_check,
            row.quoted_amount_cents,
            row.quote_sent_at.map(Timestamp::from_naive),
            row.valid_until,
            row.assigned_to.map(StaffId::from_uuid),
            Timestamp::from_naive(row.created_at),
            Timestamp::from_naive(row.updated_at),
        ))
    }
}

fn status_to_string(status: QuoteStatus) -> &'static str {
    match status {
        QuoteStatus::Pending => "pending",
        QuoteStatus::Sent => "sent",
        QuoteStatus::Accepted => "accepted",
        QuoteStatus::Rejected => "rejected",
        QuoteStatus::Cancelled => "cancelled",
    }
}

fn parse_status(s: &str) -> Result<QuoteStatus, DomainError> {
    match s {
        "pending" => Ok(QuoteStatus::Pending),
        "sent" => Ok(QuoteStatus::Sent),
        "accepted" => Ok(QuoteStatus::Accepted),
        "rejected" => Ok(QuoteStatus::Rejected),
        "cancelled" => Ok(QuoteStatus::Cancelled),
        _ => Err(DomainError::new(
            ErrorCode::DatabaseError,
            format!("Invalid quote status value: {}", s),
        )),
    }
}

const SELECT_COLUMNS: &str = r#"
    SELECT id, client_name, client_email, client_phone, company_name,
           selected_services, event_date, event_time, event_location,
           project_description, status, has_conflict, conflict_checked_at,
           quoted_amount_cents, quote_sent_at, valid_until, assigned_to,
           created_at, updated_at
    FROM quote_requests
"#;

#[async_trait]
impl QuoteRepository for PostgresQuoteRepository {
    async fn save(&self, quote: &QuoteRequest) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO quote_requests (
                id, client_name, client_email, client_phone, company_name,
                selected_services, event_date, event_time, event_location,
                project_description, status, has_conflict, conflict_checked_at,
                quoted_amount_cents, quote_sent_at, valid_until, assigned_to,
                created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17, $18, $19)
            "#,
        )
        .bind(quote.id().as_uuid())
        .bind(quote.contact().name())
        .bind(quote.contact().email())
        .bind(quote.contact().phone())
        .bind(quote.company_name())
        .bind(sqlx::types::Json(quote.selected_services().as_slice()))
        .bind(quote.event_date())
        .bind(quote.event_time())
        .bind(quote.event_location())
        .bind(quote.project_description())
        .bind(status_to_string(quote.status()))
        .bind(quote.conflict_check().map(|c| c.has_conflict))
        .bind(quote.conflict_check().map(|c| *c.checked_at.as_naive()))
        .bind(quote.quoted_amount_cents())
        .bind(quote.quote_sent_at().map(|ts| *ts.as_naive()))
        .bind(quote.valid_until())
        .bind(quote.assigned_to().map(|id| *id.as_uuid()))
        .bind(*quote.created_at().as_naive())
        .bind(*quote.updated_at().as_naive())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(ErrorCode::DatabaseError, format!("Failed to save quote: {}", e))
        })?;

        Ok(())
    }

    async fn find_by_id(&self, id: &QuoteId) -> Result<Option<QuoteRequest>, DomainError> {
        let row: Option<QuoteRow> = sqlx::query_as(&format!("{} WHERE id = $1", SELECT_COLUMNS))
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                DomainError::new(ErrorCode::DatabaseError, format!("Failed to find quote: {}", e))
            })?;

        row.map(QuoteRequest::try_from).transpose()
    }

    async fn update_if_status(
        &self,
        quote: &QuoteRequest,
        expected: QuoteStatus,
    ) -> Result<bool, DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE quote_requests SET
                status = $3,
                has_conflict = $4,
                conflict_checked_at = $5,
                quoted_amount_cents = $6,
                quote_sent_at = $7,
                valid_until = $8,
                assigned_to = $9,
                updated_at = $10
            WHERE id = $1 AND status = $2
            "#,
        )
        .bind(quote.id().as_uuid())
        .bind(status_to_string(expected))
        .bind(status_to_string(quote.status()))
        .bind(quote.conflict_check().map(|c| c.has_conflict))
        .bind(quote.conflict_check().map(|c| *c.checked_at.as_naive()))
        .bind(quote.quoted_amount_cents())
        .bind(quote.quote_sent_at().map(|ts| *ts.as_naive()))
        .bind(quote.valid_until())
        .bind(quote.assigned_to().map(|id| *id.as_uuid()))
        .bind(*quote.updated_at().as_naive())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(ErrorCode::DatabaseError, format!("Failed to update quote: {}", e))
        })?;

        if result.rows_affected() > 0 {
            return Ok(true);
        }

        let exists: Option<(Uuid,)> = sqlx::query_as("SELECT id FROM quote_requests WHERE id = $1")
            .bind(quote.id().as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                DomainError::new(ErrorCode::DatabaseError, format!("Failed to check quote: {}", e))
            })?;
        if exists.is_none() {
            return Err(DomainError::new(
                ErrorCode::QuoteNotFound,
                format!("Quote not found: {}", quote.id()),
            ));
        }
        Ok(false)
    }
}
