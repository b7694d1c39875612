#![allow(dead_code)]

use std::sync::Arc;

use bill_query::{
    config::QueryConfig,
    core::{BillQueryService, FixedClock},
    domain::{Category, LedgerRecord, MonthlyTotal, PaymentMethod, UserId},
    errors::{LedgerError, LedgerResult},
    ledger::{InMemoryLedger, LedgerAccess, LedgerSummary},
};
use chrono::{NaiveDate, NaiveDateTime};

pub const USER: UserId = 1;
pub const OTHER_USER: UserId = 2;

pub fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(h, min, 0)
        .unwrap()
}

/// Frozen evaluation time for every fixture: Monday 2024-05-20 12:00.
pub fn now() -> NaiveDateTime {
    at(2024, 5, 20, 12, 0)
}

pub fn clock() -> Arc<FixedClock> {
    Arc::new(FixedClock(now()))
}

fn record(
    id: u64,
    user_id: UserId,
    timestamp: NaiveDateTime,
    amount: f64,
    merchant: &str,
    category: Category,
) -> LedgerRecord {
    LedgerRecord::new(id, user_id, timestamp, amount, merchant, category)
}

/// Nine records for [`USER`] (1444.00 in total) and one for [`OTHER_USER`].
///
/// May 2024 to date: 549.00 over 5 records. April: 245.00 over 2.
/// March: 150.00. December 2023: 500.00.
pub fn fixture_records() -> Vec<LedgerRecord> {
    vec![
        record(1, USER, at(2024, 5, 20, 8, 30), 32.0, "星巴克(国贸店)", Category::Dining)
            .with_payment_method(PaymentMethod::WeChat),
        record(2, USER, at(2024, 5, 20, 9, 15), 18.0, "滴滴出行", Category::Transport)
            .with_payment_method(PaymentMethod::Alipay),
        record(3, USER, at(2024, 5, 19, 19, 0), 120.0, "海底捞", Category::Dining),
        record(4, USER, at(2024, 5, 10, 14, 0), 299.0, "优衣库", Category::Shopping)
            .with_payment_method(PaymentMethod::BankCard),
        record(5, USER, at(2024, 5, 3, 20, 0), 80.0, "万达影城", Category::Entertainment),
        record(6, USER, at(2024, 4, 15, 12, 30), 45.0, "星巴克(三里屯店)", Category::Dining),
        record(7, USER, at(2024, 4, 2, 9, 0), 200.0, "协和医院", Category::Medical),
        record(8, USER, at(2024, 3, 8, 10, 0), 150.0, "新东方", Category::Education)
            .with_description("英语课程"),
        record(9, USER, at(2023, 12, 24, 18, 0), 500.0, "京东", Category::Shopping),
        record(10, OTHER_USER, at(2024, 5, 20, 10, 0), 999.0, "星巴克(国贸店)", Category::Dining),
    ]
}

pub fn fixture_ledger() -> InMemoryLedger {
    InMemoryLedger::from_records(fixture_records()).expect("fixture records are valid")
}

pub fn service_with(config: QueryConfig, ledger: Arc<dyn LedgerAccess>) -> BillQueryService {
    BillQueryService::new(config, ledger, clock())
}

pub fn service() -> BillQueryService {
    service_with(QueryConfig::default(), Arc::new(fixture_ledger()))
}

pub fn approx(left: f64, right: f64) -> bool {
    (left - right).abs() < 1e-9
}

/// A ledger whose every read fails.
pub struct UnavailableLedger;

fn down<T>() -> LedgerResult<T> {
    Err(LedgerError::Unavailable("connection refused".to_string()))
}

impl LedgerAccess for UnavailableLedger {
    fn get_records(&self, _: UserId, _: usize, _: usize) -> LedgerResult<Vec<LedgerRecord>> {
        down()
    }

    fn get_records_in_range(
        &self,
        _: UserId,
        _: NaiveDateTime,
        _: NaiveDateTime,
    ) -> LedgerResult<Vec<LedgerRecord>> {
        down()
    }

    fn get_records_by_category(&self, _: UserId, _: Category) -> LedgerResult<Vec<LedgerRecord>> {
        down()
    }

    fn get_records_by_merchant(&self, _: UserId, _: &str) -> LedgerResult<Vec<LedgerRecord>> {
        down()
    }

    fn get_monthly_totals(&self, _: UserId, _: i32) -> LedgerResult<Vec<MonthlyTotal>> {
        down()
    }

    fn get_summary(
        &self,
        _: UserId,
        _: Option<NaiveDateTime>,
        _: Option<NaiveDateTime>,
    ) -> LedgerResult<LedgerSummary> {
        down()
    }
}
