//! Facade wiring the parser and the dispatcher behind one handle.

use std::sync::Arc;

use crate::config::QueryConfig;
use crate::core::{dispatcher::QueryDispatcher, parser::QueryParser, time::Clock};
use crate::domain::{ParsedQuery, QueryResult, UserId};
use crate::errors::QueryOutcome;
use crate::ledger::LedgerAccess;

/// Entry point for callers: parse free text, execute parsed queries, or do
/// both in one call. Shareable across threads behind an `Arc`.
pub struct BillQueryService {
    parser: QueryParser,
    dispatcher: QueryDispatcher,
}

impl BillQueryService {
    pub fn new(config: QueryConfig, ledger: Arc<dyn LedgerAccess>, clock: Arc<dyn Clock>) -> Self {
        let parser = QueryParser::new(&config, Arc::clone(&clock));
        let dispatcher = QueryDispatcher::new(ledger, clock, config);
        Self { parser, dispatcher }
    }

    pub fn parse_query(&self, text: &str) -> ParsedQuery {
        self.parser.parse_query(text)
    }

    pub fn execute_query(
        &self,
        query: &ParsedQuery,
        user_id: UserId,
    ) -> QueryOutcome<QueryResult> {
        self.dispatcher.execute_query(query, user_id)
    }

    pub fn execute_general(
        &self,
        query: &ParsedQuery,
        user_id: UserId,
    ) -> QueryOutcome<QueryResult> {
        self.dispatcher.execute_general(query, user_id)
    }

    /// Parse then execute.
    pub fn ask(&self, text: &str, user_id: UserId) -> QueryOutcome<(ParsedQuery, QueryResult)> {
        let parsed = self.parse_query(text);
        let result = self.execute_query(&parsed, user_id)?;
        Ok((parsed, result))
    }
}
