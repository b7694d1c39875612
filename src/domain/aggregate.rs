//! Aggregated totals shared by the ledger interface and query results.

use serde::{Deserialize, Serialize};

use crate::domain::{
    category::Category,
    common::average,
    record::LedgerRecord,
};

/// Running sum and count of a bucket of records.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct AmountCount {
    pub amount: f64,
    pub count: usize,
}

impl AmountCount {
    pub fn add(&mut self, amount: f64) {
        self.amount += amount;
        self.count += 1;
    }

    pub fn average(&self) -> f64 {
        average(self.amount, self.count)
    }

    pub fn of(records: &[LedgerRecord]) -> Self {
        records.iter().fold(Self::default(), |mut acc, record| {
            acc.add(record.amount);
            acc
        })
    }
}

/// Totals for one calendar month of a year (`month` is 1-based).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct MonthlyTotal {
    pub month: u32,
    pub total_amount: f64,
    pub count: usize,
    pub avg_amount: f64,
}

impl MonthlyTotal {
    pub fn from_bucket(month: u32, bucket: AmountCount) -> Self {
        Self {
            month,
            total_amount: bucket.amount,
            count: bucket.count,
            avg_amount: bucket.average(),
        }
    }
}

/// Totals for one category.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct CategoryTotal {
    pub category: Category,
    pub total_amount: f64,
    pub count: usize,
    pub avg_amount: f64,
}

impl CategoryTotal {
    pub fn from_bucket(category: Category, bucket: AmountCount) -> Self {
        Self {
            category,
            total_amount: bucket.amount,
            count: bucket.count,
            avg_amount: bucket.average(),
        }
    }
}
