//! SendQuoteHandler - prices a quote and sends it to the client.

use std::sync::Arc;

use chrono::NaiveDate;

use crate::domain::foundation::{QuoteId, Timestamp};
use crate::domain::quote::{QuoteError, QuoteRequest, QuoteStatus};
use crate::domain::scheduling::ConflictDetector;
use crate::ports::{
    NotificationLog, NotificationOutcome, NotificationRecord, QuoteRepository, RelatedEntity,
};

/// Command to send a priced quote.
///
/// `valid_until` defaults to the handler's configured validity window when
/// absent.
#[derive(Debug, Clone)]
pub struct SendQuoteCommand {
    pub quote_id: QuoteId,
    pub amount_cents: Option<i64>,
    pub valid_until: Option<NaiveDate>,
}

/// Handler for sending a quote.
///
/// The conflict check is recomputed and recorded on the quote before the
/// send commits, but a conflict does not block sending; the slot is only
/// contested when the client accepts.
pub struct SendQuoteHandler {
    quotes: Arc<dyn QuoteRepository>,
    conflicts: Arc<ConflictDetector>,
    notifications: Arc<dyn NotificationLog>,
    default_validity_days: i64,
}

impl SendQuoteHandler {
    pub fn new(
        quotes: Arc<dyn QuoteRepository>,
        conflicts: Arc<ConflictDetector>,
        notifications: Arc<dyn NotificationLog>,
        default_validity_days: i64,
    ) -> Self {
        Self {
            quotes,
            conflicts,
            notifications,
            default_validity_days,
        }
    }

    pub async fn handle(&self, cmd: SendQuoteCommand) -> Result<QuoteRequest, QuoteError> {
        let amount_cents = cmd.amount_cents.ok_or(QuoteError::MissingAmount)?;

        let mut quote = self
            .quotes
            .find_by_id(&cmd.quote_id)
            .await?
            .ok_or_else(|| QuoteError::not_found(cmd.quote_id))?;

        if let Some(date) = quote.event_date() {
            let report = self
                .conflicts
                .check(date, quote.event_time(), None)
                .await?;
            quote.record_conflict_check(report.has_conflict());
        }

        let valid_until = cmd.valid_until.unwrap_or_else(|| {
            Timestamp::today() + chrono::Duration::days(self.default_validity_days)
        });
        quote.send(amount_cents, valid_until)?;

        let committed = self
            .quotes
            .update_if_status(&quote, QuoteStatus::Pending)
            .await?;
        if !committed {
            let current = self
                .quotes
                .find_by_id(&cmd.quote_id)
                .await?
                .ok_or_else(|| QuoteError::not_found(cmd.quote_id))?;
            return Err(QuoteError::invalid_transition(format!(
                "Quote was concurrently moved to {:?}",
                current.status()
            )));
        }

        let record = NotificationRecord::new(
            quote.contact().email(),
            "Your quote is ready",
            "quote_sent",
            RelatedEntity::Quote(*quote.id()),
            NotificationOutcome::Pending,
        );
        if let Err(err) = self.notifications.record(&record).await {
            tracing::warn!(error = %err, quote_id = %quote.id(), "failed to record notification");
        }

        Ok(quote)
    }
}
