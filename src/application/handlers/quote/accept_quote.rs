//! AcceptQuoteHandler - client acceptance and the booking it produces.

use std::sync::Arc;

use crate::domain::booking::Booking;
use crate::domain::foundation::{BookingId, ErrorCode, QuoteId};
use crate::domain::quote::{QuoteError, QuoteRequest, QuoteStatus};
use crate::domain::scheduling::ConflictDetector;
use crate::ports::{
    BookingRepository, NotificationLog, NotificationOutcome, NotificationRecord, QuoteRepository,
    RelatedEntity,
};

/// Command to accept a sent quote.
#[derive(Debug, Clone)]
pub struct AcceptQuoteCommand {
    pub quote_id: QuoteId,
}

/// Result of a successful acceptance.
#[derive(Debug, Clone)]
pub struct AcceptQuoteResult {
    pub quote: QuoteRequest,
    /// The pending booking created for the quote's event slot, when the
    /// quote names an event date.
    pub booking: Option<Booking>,
}

/// Handler for quote acceptance.
///
/// Acceptance is the gating transition: a fresh conflict check against the
/// day's committed holds, pending and confirmed alike, must pass before the
/// state change commits. On success the quote's event slot becomes a pending
/// booking of its own.
pub struct AcceptQuoteHandler {
    quotes: Arc<dyn QuoteRepository>,
    bookings: Arc<dyn BookingRepository>,
    conflicts: Arc<ConflictDetector>,
    notifications: Arc<dyn NotificationLog>,
}

impl AcceptQuoteHandler {
    pub fn new(
        quotes: Arc<dyn QuoteRepository>,
        bookings: Arc<dyn BookingRepository>,
        conflicts: Arc<ConflictDetector>,
        notifications: Arc<dyn NotificationLog>,
    ) -> Self {
        Self {
            quotes,
            bookings,
            conflicts,
            notifications,
        }
    }

    pub async fn handle(&self, cmd: AcceptQuoteCommand) -> Result<AcceptQuoteResult, QuoteError> {
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
            if report.has_conflict() {
                return Err(QuoteError::scheduling_conflict(
                    report.conflicting_booking_ids,
                ));
            }
        }

        quote.accept().map_err(|err| match err.code {
            ErrorCode::QuoteExpired => QuoteError::Expired(cmd.quote_id),
            _ => err.into(),
        })?;

        let committed = self
            .quotes
            .update_if_status(&quote, QuoteStatus::Sent)
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

        let booking = if quote.event_date().is_some() {
            let booking = quote.to_booking(BookingId::new())?;
            self.bookings.save(&booking).await?;
            Some(booking)
        } else {
            None
        };

        let record = NotificationRecord::new(
            quote.contact().email(),
            "Thank you for accepting your quote",
            "quote_accepted",
            RelatedEntity::Quote(*quote.id()),
            NotificationOutcome::Pending,
        );
        if let Err(err) = self.notifications.record(&record).await {
            tracing::warn!(error = %err, quote_id = %quote.id(), "failed to record notification");
        }

        Ok(AcceptQuoteResult { quote, booking })
    }
}
