//! Read-only access to the ledger collaborator.
//!
//! The query core never writes through this interface; every call is an
//! independent snapshot read.

pub mod memory;

use std::collections::BTreeMap;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::{AmountCount, Category, LedgerRecord, MonthlyTotal, PaymentMethod, UserId};
use crate::errors::LedgerResult;

pub use memory::InMemoryLedger;

/// Pre-aggregated spending for a user over an optional window.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct LedgerSummary {
    pub total_amount: f64,
    pub count: usize,
    pub average: f64,
    pub category_breakdown: BTreeMap<Category, AmountCount>,
    pub payment_method_breakdown: BTreeMap<PaymentMethod, AmountCount>,
}

impl LedgerSummary {
    pub fn from_records<'a>(records: impl IntoIterator<Item = &'a LedgerRecord>) -> Self {
        let mut summary = LedgerSummary::default();
        let mut totals = AmountCount::default();
        for record in records {
            totals.add(record.amount);
            summary
                .category_breakdown
                .entry(record.category)
                .or_default()
                .add(record.amount);
            summary
                .payment_method_breakdown
                .entry(record.payment_method)
                .or_default()
                .add(record.amount);
        }
        summary.total_amount = totals.amount;
        summary.count = totals.count;
        summary.average = totals.average();
        summary
    }

    pub fn totals(&self) -> AmountCount {
        AmountCount {
            amount: self.total_amount,
            count: self.count,
        }
    }
}

/// Read interface consumed from the ledger owner.
///
/// Failures are reported as [`crate::errors::LedgerError`]; the query core
/// does not retry.
pub trait LedgerAccess: Send + Sync {
    /// Most recent first, paged by `limit`/`offset`.
    fn get_records(
        &self,
        user_id: UserId,
        limit: usize,
        offset: usize,
    ) -> LedgerResult<Vec<LedgerRecord>>;

    /// Records with `start <= timestamp <= end`, most recent first.
    fn get_records_in_range(
        &self,
        user_id: UserId,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> LedgerResult<Vec<LedgerRecord>>;

    fn get_records_by_category(
        &self,
        user_id: UserId,
        category: Category,
    ) -> LedgerResult<Vec<LedgerRecord>>;

    /// Records whose merchant contains `merchant_substring`.
    fn get_records_by_merchant(
        &self,
        user_id: UserId,
        merchant_substring: &str,
    ) -> LedgerResult<Vec<LedgerRecord>>;

    /// One entry per month of `year` that has at least one record, ascending.
    fn get_monthly_totals(&self, user_id: UserId, year: i32) -> LedgerResult<Vec<MonthlyTotal>>;

    fn get_summary(
        &self,
        user_id: UserId,
        start: Option<NaiveDateTime>,
        end: Option<NaiveDateTime>,
    ) -> LedgerResult<LedgerSummary>;
}
