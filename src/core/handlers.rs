//! One handler per intent. Handlers are stateless: everything they need is
//! the parsed query, the user id and the read-only ledger.

use std::cmp::Ordering;

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime};

use crate::config::QueryConfig;
use crate::core::time::Clock;
use crate::domain::slots::{range_label, start_of_day};
use crate::domain::{
    average, AmountCount, AppliedFilters, CategoryAmountResult, CategoryTotal, ComparisonResult,
    GeneralResult, LedgerRecord, MerchantAmountResult, ParsedQuery, PeriodTotals,
    TimeAmountResult, TimeWindow, TotalAmountResult, TrendResult, UserId,
};
use crate::errors::QueryOutcome;
use crate::ledger::LedgerAccess;

/// Borrowed collaborators shared by every handler invocation.
#[derive(Clone, Copy)]
pub struct HandlerContext<'a> {
    pub ledger: &'a dyn LedgerAccess,
    pub clock: &'a dyn Clock,
    pub config: &'a QueryConfig,
}

impl<'a> HandlerContext<'a> {
    /// Records inside `window`, or the most recent page when there is none.
    fn base_records(
        &self,
        user_id: UserId,
        window: Option<TimeWindow>,
    ) -> QueryOutcome<Vec<LedgerRecord>> {
        let records = match window {
            Some(window) => {
                self.ledger
                    .get_records_in_range(user_id, window.start(), window.end())?
            }
            None => self
                .ledger
                .get_records(user_id, self.config.record_scan_limit, 0)?,
        };
        Ok(records)
    }
}

fn keep_in_window(records: Vec<LedgerRecord>, window: Option<TimeWindow>) -> Vec<LedgerRecord> {
    match window {
        Some(window) => records
            .into_iter()
            .filter(|record| window.contains(record.timestamp))
            .collect(),
        None => records,
    }
}

/// Summary totals for the window are only a baseline; the reported numbers
/// come from the category/merchant filtered record set.
pub fn total_amount(
    ctx: &HandlerContext<'_>,
    query: &ParsedQuery,
    user_id: UserId,
) -> QueryOutcome<TotalAmountResult> {
    let window = query.time_slot.window();
    let baseline = ctx
        .ledger
        .get_summary(user_id, query.time_slot.start(), query.time_slot.end())?
        .totals();

    let category = query.category_slot.category;
    let merchant = query.merchant_slot.merchant.clone();
    let records: Vec<LedgerRecord> = ctx
        .base_records(user_id, window)?
        .into_iter()
        .filter(|record| category.map_or(true, |category| record.category == category))
        .filter(|record| {
            merchant
                .as_deref()
                .map_or(true, |merchant| record.merchant_contains(merchant))
        })
        .collect();
    let totals = AmountCount::of(&records);

    Ok(TotalAmountResult {
        total_amount: totals.amount,
        count: totals.count,
        avg_amount: totals.average(),
        window,
        time_range: range_label(query.time_slot.start(), query.time_slot.end()),
        filters: AppliedFilters {
            window,
            category,
            merchant,
            amount: None,
        },
        baseline,
    })
}

pub fn category_amount(
    ctx: &HandlerContext<'_>,
    query: &ParsedQuery,
    user_id: UserId,
) -> QueryOutcome<CategoryAmountResult> {
    let window = query.time_slot.window();

    if let Some(category) = query.category_slot.category {
        let records = keep_in_window(
            ctx.ledger.get_records_by_category(user_id, category)?,
            window,
        );
        let totals = AmountCount::of(&records);
        return Ok(CategoryAmountResult {
            category: Some(category),
            total_amount: totals.amount,
            count: totals.count,
            avg_amount: totals.average(),
            breakdown: Vec::new(),
        });
    }

    let summary = ctx
        .ledger
        .get_summary(user_id, query.time_slot.start(), query.time_slot.end())?;
    let mut breakdown: Vec<CategoryTotal> = summary
        .category_breakdown
        .into_iter()
        .map(|(category, bucket)| CategoryTotal::from_bucket(category, bucket))
        .collect();
    breakdown.sort_by(|a, b| {
        b.total_amount
            .partial_cmp(&a.total_amount)
            .unwrap_or(Ordering::Equal)
    });
    let total_amount: f64 = breakdown.iter().map(|entry| entry.total_amount).sum();
    let count: usize = breakdown.iter().map(|entry| entry.count).sum();

    Ok(CategoryAmountResult {
        category: None,
        total_amount,
        count,
        avg_amount: average(total_amount, count),
        breakdown,
    })
}

/// Falls back to the trailing `default_window_days` when no period was named.
pub fn time_amount(
    ctx: &HandlerContext<'_>,
    query: &ParsedQuery,
    user_id: UserId,
) -> QueryOutcome<TimeAmountResult> {
    let (window, defaulted) = match query.time_slot.window() {
        Some(window) => (window, false),
        None => (
            TimeWindow::trailing_days(ctx.clock.now(), ctx.config.default_window_days),
            true,
        ),
    };
    let records = ctx
        .ledger
        .get_records_in_range(user_id, window.start(), window.end())?;
    let totals = AmountCount::of(&records);

    Ok(TimeAmountResult {
        total_amount: totals.amount,
        count: totals.count,
        avg_amount: totals.average(),
        window,
        time_range: window.label(),
        defaulted,
    })
}

pub fn merchant_amount(
    ctx: &HandlerContext<'_>,
    query: &ParsedQuery,
    user_id: UserId,
) -> QueryOutcome<MerchantAmountResult> {
    let Some(merchant) = query.merchant_slot.merchant.as_deref() else {
        return Ok(MerchantAmountResult::not_found());
    };
    let records = keep_in_window(
        ctx.ledger.get_records_by_merchant(user_id, merchant)?,
        query.time_slot.window(),
    );
    let totals = AmountCount::of(&records);

    Ok(MerchantAmountResult {
        merchant: Some(merchant.to_string()),
        total_amount: totals.amount,
        count: totals.count,
        avg_amount: totals.average(),
        message: None,
    })
}

/// Months of the current year that have spending, in calendar order.
pub fn trend(
    ctx: &HandlerContext<'_>,
    _query: &ParsedQuery,
    user_id: UserId,
) -> QueryOutcome<TrendResult> {
    let year = ctx.clock.now().year();
    let mut months = ctx.ledger.get_monthly_totals(user_id, year)?;
    months.sort_by_key(|entry| entry.month);
    let total_amount: f64 = months.iter().map(|entry| entry.total_amount).sum();
    let count: usize = months.iter().map(|entry| entry.count).sum();

    Ok(TrendResult {
        year,
        avg_monthly: average(total_amount, months.len()),
        months,
        total_amount,
        count,
    })
}

/// Current calendar month to date against the whole previous month.
pub fn comparison(
    ctx: &HandlerContext<'_>,
    _query: &ParsedQuery,
    user_id: UserId,
) -> QueryOutcome<ComparisonResult> {
    let now = ctx.clock.now();
    let (current_start, previous_start) = month_starts(now);
    let previous_end = current_start - Duration::microseconds(1);

    let current = ctx
        .ledger
        .get_summary(user_id, Some(current_start), Some(now))?;
    let previous = ctx
        .ledger
        .get_summary(user_id, Some(previous_start), Some(previous_end))?;

    let change_amount = current.total_amount - previous.total_amount;
    let change_percent = if previous.total_amount > 0.0 {
        change_amount / previous.total_amount * 100.0
    } else {
        0.0
    };

    Ok(ComparisonResult {
        current_month: PeriodTotals {
            amount: current.total_amount,
            count: current.count,
        },
        previous_month: PeriodTotals {
            amount: previous.total_amount,
            count: previous.count,
        },
        change_amount,
        change_percent,
        total_amount: current.total_amount,
        count: current.count,
    })
}

/// First instants of the month containing `now` and of the month before.
fn month_starts(now: NaiveDateTime) -> (NaiveDateTime, NaiveDateTime) {
    let first = now.date().with_day(1).unwrap_or_else(|| now.date());
    let (year, month) = if first.month() == 1 {
        (first.year() - 1, 12)
    } else {
        (first.year(), first.month() - 1)
    };
    let previous = NaiveDate::from_ymd_opt(year, month, 1).unwrap_or(first);
    (start_of_day(first), start_of_day(previous))
}

/// Fallback for `Unknown` intent: every extracted slot becomes a filter.
pub fn general(
    ctx: &HandlerContext<'_>,
    query: &ParsedQuery,
    user_id: UserId,
) -> QueryOutcome<GeneralResult> {
    let window = query.time_slot.window();
    let category = query.category_slot.category;
    let merchant = query.merchant_slot.merchant.clone();
    let amount = query.amount_slot.constraint;

    let filtered: Vec<LedgerRecord> = ctx
        .base_records(user_id, window)?
        .into_iter()
        .filter(|record| category.map_or(true, |category| record.category == category))
        .filter(|record| {
            merchant
                .as_deref()
                .map_or(true, |merchant| record.merchant_contains(merchant))
        })
        .filter(|record| amount.map_or(true, |amount| amount.matches(record.amount)))
        .collect();
    let totals = AmountCount::of(&filtered);
    let records = filtered
        .into_iter()
        .take(ctx.config.sample_limit)
        .collect();

    Ok(GeneralResult {
        total_amount: totals.amount,
        count: totals.count,
        avg_amount: totals.average(),
        records,
        filters: AppliedFilters {
            window,
            category,
            merchant,
            amount,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(10, 0, 0)
            .unwrap()
    }

    #[test]
    fn month_starts_roll_back_across_years() {
        let (current, previous) = month_starts(at(2024, 1, 15));
        assert_eq!(current.to_string(), "2024-01-01 00:00:00");
        assert_eq!(previous.to_string(), "2023-12-01 00:00:00");
    }

    #[test]
    fn month_starts_mid_year() {
        let (current, previous) = month_starts(at(2024, 7, 31));
        assert_eq!(current.to_string(), "2024-07-01 00:00:00");
        assert_eq!(previous.to_string(), "2024-06-01 00:00:00");
    }
}
