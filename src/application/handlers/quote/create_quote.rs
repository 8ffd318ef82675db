//! CreateQuoteHandler - intake of a new quote request.

use std::sync::Arc;

use chrono::{NaiveDate, NaiveTime};

use crate::domain::foundation::{ContactInfo, DomainError, QuoteId};
use crate::domain::quote::{QuoteError, QuoteRequest, SelectedServices};
use crate::domain::scheduling::ConflictDetector;
use crate::ports::{
    NotificationLog, NotificationOutcome, NotificationRecord, QuoteRepository, RelatedEntity,
};

/// Command to record a new quote request.
#[derive(Debug, Clone)]
pub struct CreateQuoteCommand {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub company_name: Option<String>,
    pub selected_services: Vec<String>,
    pub event_date: Option<NaiveDate>,
    pub event_time: Option<NaiveTime>,
    pub event_location: Option<String>,
    pub project_description: Option<String>,
}

/// Handler for quote intake.
///
/// If the request names an event date, an advisory conflict check runs at
/// intake and its result is recorded on the quote. A conflict never blocks
/// intake; it informs the staff member pricing the request.
pub struct CreateQuoteHandler {
    quotes: Arc<dyn QuoteRepository>,
    conflicts: Arc<ConflictDetector>,
    notifications: Arc<dyn NotificationLog>,
}

impl CreateQuoteHandler {
    pub fn new(
        quotes: Arc<dyn QuoteRepository>,
        conflicts: Arc<ConflictDetector>,
        notifications: Arc<dyn NotificationLog>,
    ) -> Self {
        Self {
            quotes,
            conflicts,
            notifications,
        }
    }

    pub async fn handle(&self, cmd: CreateQuoteCommand) -> Result<QuoteRequest, QuoteError> {
        let contact =
            ContactInfo::new(cmd.name, cmd.email, cmd.phone).map_err(DomainError::from)?;
        let services = SelectedServices::new(cmd.selected_services)?;
        let mut quote = QuoteRequest::new(
            QuoteId::new(),
            contact,
            services,
            cmd.event_date,
            cmd.event_time,
        )?
        .with_company_name(cmd.company_name)
        .with_event_location(cmd.event_location)
        .with_project_description(cmd.project_description);

        if let Some(date) = quote.event_date() {
            let report = self
                .conflicts
                .check(date, quote.event_time(), None)
                .await?;
            quote.record_conflict_check(report.has_conflict());
        }

        self.quotes.save(&quote).await?;

        let record = NotificationRecord::new(
            quote.contact().email(),
            "We received your quote request",
            "quote_request_received",
            RelatedEntity::Quote(*quote.id()),
            NotificationOutcome::Pending,
        );
        if let Err(err) = self.notifications.record(&record).await {
            tracing::warn!(error = %err, quote_id = %quote.id(), "failed to record notification");
        }

        Ok(quote)
    }
}
