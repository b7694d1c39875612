//! Typed results of executed queries, one variant per intent.

use serde::{Deserialize, Serialize};

use crate::domain::{
    aggregate::{AmountCount, CategoryTotal, MonthlyTotal},
    category::Category,
    intent::Intent,
    record::LedgerRecord,
    slots::{AmountConstraint, TimeWindow},
};

pub const MERCHANT_NOT_FOUND: &str = "未找到商家信息";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "query_type", rename_all = "snake_case")]
pub enum QueryResult {
    TotalAmount(TotalAmountResult),
    CategoryAmount(CategoryAmountResult),
    TimeAmount(TimeAmountResult),
    MerchantAmount(MerchantAmountResult),
    #[serde(rename = "trend_analysis")]
    Trend(TrendResult),
    Comparison(ComparisonResult),
    General(GeneralResult),
}

impl QueryResult {
    /// Intent whose handler produced this result; `General` maps to `Unknown`.
    pub fn intent(&self) -> Intent {
        match self {
            QueryResult::TotalAmount(_) => Intent::TotalAmount,
            QueryResult::CategoryAmount(_) => Intent::CategoryAmount,
            QueryResult::TimeAmount(_) => Intent::TimeAmount,
            QueryResult::MerchantAmount(_) => Intent::MerchantAmount,
            QueryResult::Trend(_) => Intent::Trend,
            QueryResult::Comparison(_) => Intent::Comparison,
            QueryResult::General(_) => Intent::Unknown,
        }
    }

    pub fn total_amount(&self) -> f64 {
        match self {
            QueryResult::TotalAmount(result) => result.total_amount,
            QueryResult::CategoryAmount(result) => result.total_amount,
            QueryResult::TimeAmount(result) => result.total_amount,
            QueryResult::MerchantAmount(result) => result.total_amount,
            QueryResult::Trend(result) => result.total_amount,
            QueryResult::Comparison(result) => result.total_amount,
            QueryResult::General(result) => result.total_amount,
        }
    }

    pub fn count(&self) -> usize {
        match self {
            QueryResult::TotalAmount(result) => result.count,
            QueryResult::CategoryAmount(result) => result.count,
            QueryResult::TimeAmount(result) => result.count,
            QueryResult::MerchantAmount(result) => result.count,
            QueryResult::Trend(result) => result.count,
            QueryResult::Comparison(result) => result.count,
            QueryResult::General(result) => result.count,
        }
    }
}

/// Filters actually applied by a handler.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AppliedFilters {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub window: Option<TimeWindow>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub merchant: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<AmountConstraint>,
}

impl AppliedFilters {
    pub fn is_empty(&self) -> bool {
        self.window.is_none()
            && self.category.is_none()
            && self.merchant.is_none()
            && self.amount.is_none()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TotalAmountResult {
    pub total_amount: f64,
    pub count: usize,
    pub avg_amount: f64,
    pub window: Option<TimeWindow>,
    pub time_range: String,
    pub filters: AppliedFilters,
    /// Pre-aggregated ledger summary for the window, before category and
    /// merchant filtering.
    pub baseline: AmountCount,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CategoryAmountResult {
    /// `None` when no category was named and the breakdown is returned.
    pub category: Option<Category>,
    pub total_amount: f64,
    pub count: usize,
    pub avg_amount: f64,
    /// Per-category totals, descending by amount. Empty for a single category.
    pub breakdown: Vec<CategoryTotal>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TimeAmountResult {
    pub total_amount: f64,
    pub count: usize,
    pub avg_amount: f64,
    pub window: TimeWindow,
    pub time_range: String,
    /// True when no window was extracted and the trailing default was used.
    pub defaulted: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MerchantAmountResult {
    pub merchant: Option<String>,
    pub total_amount: f64,
    pub count: usize,
    pub avg_amount: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl MerchantAmountResult {
    pub fn not_found() -> Self {
        Self {
            merchant: None,
            total_amount: 0.0,
            count: 0,
            avg_amount: 0.0,
            message: Some(MERCHANT_NOT_FOUND.to_string()),
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.merchant.is_none()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TrendResult {
    pub year: i32,
    pub months: Vec<MonthlyTotal>,
    pub total_amount: f64,
    pub count: usize,
    pub avg_monthly: f64,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct PeriodTotals {
    pub amount: f64,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ComparisonResult {
    pub current_month: PeriodTotals,
    pub previous_month: PeriodTotals,
    pub change_amount: f64,
    /// `0.0` when the previous month has no spending.
    pub change_percent: f64,
    /// Mirrors the current month.
    pub total_amount: f64,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GeneralResult {
    pub total_amount: f64,
    /// Size of the full filtered set, not of `records`.
    pub count: usize,
    pub avg_amount: f64,
    /// Leading sample of the filtered set.
    pub records: Vec<LedgerRecord>,
    pub filters: AppliedFilters,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn result_is_tagged_with_query_type() {
        let result = QueryResult::MerchantAmount(MerchantAmountResult::not_found());
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["query_type"], "merchant_amount");
        assert_eq!(json["message"], MERCHANT_NOT_FOUND);
        assert_eq!(result.count(), 0);
        assert_eq!(result.total_amount(), 0.0);
    }

    #[test]
    fn trend_uses_trend_analysis_tag() {
        let result = QueryResult::Trend(TrendResult {
            year: 2024,
            months: Vec::new(),
            total_amount: 0.0,
            count: 0,
            avg_monthly: 0.0,
        });
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["query_type"], "trend_analysis");
        assert_eq!(result.intent(), Intent::Trend);
    }
}
