//! CloseQuoteHandler - rejection and cancellation of quotes.

use std::sync::Arc;

use crate::domain::foundation::QuoteId;
use crate::domain::quote::{QuoteError, QuoteRequest};
use crate::ports::{
    NotificationLog, NotificationOutcome, NotificationRecord, QuoteRepository, RelatedEntity,
};

/// How the quote is being closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuoteResolution {
    /// The client declined the sent quote.
    Rejected,
    /// The studio or client called the request off before a decision.
    Cancelled,
}

/// Command to close a quote without acceptance.
#[derive(Debug, Clone)]
pub struct CloseQuoteCommand {
    pub quote_id: QuoteId,
    pub resolution: QuoteResolution,
}

/// Handler for quote rejection and cancellation.
pub struct CloseQuoteHandler {
    quotes: Arc<dyn QuoteRepository>,
    notifications: Arc<dyn NotificationLog>,
}

impl CloseQuoteHandler {
    pub fn new(quotes: Arc<dyn QuoteRepository>, notifications: Arc<dyn NotificationLog>) -> Self {
        Self {
            quotes,
            notifications,
        }
    }

    pub async fn handle(&self, cmd: CloseQuoteCommand) -> Result<QuoteRequest, QuoteError> {
        let mut quote = self
            .quotes
            .find_by_id(&cmd.quote_id)
            .await?
            .ok_or_else(|| QuoteError::not_found(cmd.quote_id))?;

        let expected = quote.status();
        match cmd.resolution {
            QuoteResolution::Rejected => quote.reject()?,
            QuoteResolution::Cancelled => quote.cancel()?,
        }

        let committed = self.quotes.update_if_status(&quote, expected).await?;
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

        let (subject, template) = match cmd.resolution {
            QuoteResolution::Rejected => ("Quote declined", "quote_rejected"),
            QuoteResolution::Cancelled => ("Quote request cancelled", "quote_cancelled"),
        };
        let record = NotificationRecord::new(
            quote.contact().email(),
            subject,
            template,
            RelatedEntity::Quote(*quote.id()),
            NotificationOutcome::Pending,
        );
        if let Err(err) = self.notifications.record(&record).await {
            tracing::warn!(error = %err, quote_id = %quote.id(), "failed to record notification");
        }

        Ok(quote)
    }
}
