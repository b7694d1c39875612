//! Routes a parsed query to the handler for its intent.

use std::sync::Arc;

use tracing::{info, warn};

use crate::config::QueryConfig;
use crate::core::{
    handlers::{self, HandlerContext},
    time::Clock,
};
use crate::domain::{Intent, ParsedQuery, QueryResult, UserId};
use crate::errors::QueryOutcome;
use crate::ledger::LedgerAccess;

pub struct QueryDispatcher {
    ledger: Arc<dyn LedgerAccess>,
    clock: Arc<dyn Clock>,
    config: QueryConfig,
}

impl QueryDispatcher {
    pub fn new(ledger: Arc<dyn LedgerAccess>, clock: Arc<dyn Clock>, config: QueryConfig) -> Self {
        Self {
            ledger,
            clock,
            config,
        }
    }

    fn context(&self) -> HandlerContext<'_> {
        HandlerContext {
            ledger: self.ledger.as_ref(),
            clock: self.clock.as_ref(),
            config: &self.config,
        }
    }

    /// Runs the handler for `query.intent`; `Unknown` goes to the general
    /// filter handler. Ledger failures surface as
    /// [`crate::errors::QueryError::LedgerUnavailable`].
    pub fn execute_query(
        &self,
        query: &ParsedQuery,
        user_id: UserId,
    ) -> QueryOutcome<QueryResult> {
        let ctx = self.context();
        info!(user_id, intent = %query.intent, query = %query.original_text, "executing query");

        let outcome = match query.intent {
            Intent::TotalAmount => {
                handlers::total_amount(&ctx, query, user_id).map(QueryResult::TotalAmount)
            }
            Intent::CategoryAmount => {
                handlers::category_amount(&ctx, query, user_id).map(QueryResult::CategoryAmount)
            }
            Intent::TimeAmount => {
                handlers::time_amount(&ctx, query, user_id).map(QueryResult::TimeAmount)
            }
            Intent::MerchantAmount => {
                handlers::merchant_amount(&ctx, query, user_id).map(QueryResult::MerchantAmount)
            }
            Intent::Trend => handlers::trend(&ctx, query, user_id).map(QueryResult::Trend),
            Intent::Comparison => {
                handlers::comparison(&ctx, query, user_id).map(QueryResult::Comparison)
            }
            Intent::Unknown => handlers::general(&ctx, query, user_id).map(QueryResult::General),
        };

        match &outcome {
            Ok(result) => info!(
                user_id,
                intent = %query.intent,
                total_amount = result.total_amount(),
                count = result.count(),
                "query executed"
            ),
            Err(err) => warn!(user_id, intent = %query.intent, error = %err, "query failed"),
        }
        outcome
    }

    /// The fallback handler regardless of intent.
    pub fn execute_general(
        &self,
        query: &ParsedQuery,
        user_id: UserId,
    ) -> QueryOutcome<QueryResult> {
        handlers::general(&self.context(), query, user_id).map(QueryResult::General)
    }
}
