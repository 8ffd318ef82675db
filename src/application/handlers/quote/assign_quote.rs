//! AssignQuoteHandler - routes a quote to an eligible staff member.

use std::sync::Arc;

use crate::domain::foundation::{ErrorCode, QuoteId, StaffId};
use crate::domain::quote::{QuoteError, QuoteRequest};
use crate::domain::staff::{AssignmentResolver, ServiceCategory};
use crate::ports::QuoteRepository;

/// Command to assign a staff member to a quote.
#[derive(Debug, Clone)]
pub struct AssignQuoteCommand {
    pub quote_id: QuoteId,
    pub staff_id: StaffId,
}

/// Handler for quote assignment.
pub struct AssignQuoteHandler {
    quotes: Arc<dyn QuoteRepository>,
    resolver: Arc<AssignmentResolver>,
}

impl AssignQuoteHandler {
    pub fn new(quotes: Arc<dyn QuoteRepository>, resolver: Arc<AssignmentResolver>) -> Self {
        Self { quotes, resolver }
    }

    pub async fn handle(&self, cmd: AssignQuoteCommand) -> Result<QuoteRequest, QuoteError> {
        let mut quote = self
            .quotes
            .find_by_id(&cmd.quote_id)
            .await?
            .ok_or_else(|| QuoteError::not_found(cmd.quote_id))?;

        let category = ServiceCategory::infer(&quote.selected_services().as_service_type());
        self.resolver
            .resolve(category, &cmd.staff_id)
            .await
            .map_err(|err| match err.code {
                ErrorCode::StaffNotFound => QuoteError::StaffNotFound(cmd.staff_id),
                ErrorCode::IneligibleAssignee => {
                    QuoteError::ineligible_assignee(cmd.staff_id, err.message)
                }
                _ => err.into(),
            })?;

        let expected = quote.status();
        quote.assign(cmd.staff_id)?;

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

        Ok(quote)
    }
}
