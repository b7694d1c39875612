use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDateTime};
use tracing::debug;

use crate::domain::{AmountCount, Category, LedgerRecord, MonthlyTotal, UserId};
use crate::errors::{LedgerError, LedgerResult};

use super::{LedgerAccess, LedgerSummary};

/// Ledger held entirely in memory, typically loaded from a JSON snapshot.
#[derive(Debug, Clone, Default)]
pub struct InMemoryLedger {
    records: Vec<LedgerRecord>,
}

impl InMemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a ledger, rejecting records with non-positive or non-finite
    /// amounts and duplicate ids.
    pub fn from_records(records: Vec<LedgerRecord>) -> LedgerResult<Self> {
        let mut ledger = Self::new();
        for record in records {
            ledger.insert(record)?;
        }
        Ok(ledger)
    }

    pub fn insert(&mut self, record: LedgerRecord) -> LedgerResult<()> {
        if !record.amount.is_finite() || record.amount <= 0.0 {
            return Err(LedgerError::InvalidRecord(format!(
                "record {} has non-positive amount {}",
                record.id, record.amount
            )));
        }
        if self.records.iter().any(|existing| existing.id == record.id) {
            return Err(LedgerError::InvalidRecord(format!(
                "duplicate record id {}",
                record.id
            )));
        }
        self.records.push(record);
        Ok(())
    }

    pub fn records(&self) -> &[LedgerRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn select<F>(&self, user_id: UserId, predicate: F) -> Vec<LedgerRecord>
    where
        F: Fn(&LedgerRecord) -> bool,
    {
        let mut selected: Vec<LedgerRecord> = self
            .records
            .iter()
            .filter(|record| record.user_id == user_id && predicate(record))
            .cloned()
            .collect();
        sort_most_recent_first(&mut selected);
        selected
    }
}

fn sort_most_recent_first(records: &mut [LedgerRecord]) {
    records.sort_by(|a, b| b.timestamp.cmp(&a.timestamp).then(b.id.cmp(&a.id)));
}

fn within(
    record: &LedgerRecord,
    start: Option<NaiveDateTime>,
    end: Option<NaiveDateTime>,
) -> bool {
    start.map_or(true, |start| record.timestamp >= start)
        && end.map_or(true, |end| record.timestamp <= end)
}

impl LedgerAccess for InMemoryLedger {
    fn get_records(
        &self,
        user_id: UserId,
        limit: usize,
        offset: usize,
    ) -> LedgerResult<Vec<LedgerRecord>> {
        let records = self.select(user_id, |_| true);
        Ok(records.into_iter().skip(offset).take(limit).collect())
    }

    fn get_records_in_range(
        &self,
        user_id: UserId,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> LedgerResult<Vec<LedgerRecord>> {
        Ok(self.select(user_id, |record| within(record, Some(start), Some(end))))
    }

    fn get_records_by_category(
        &self,
        user_id: UserId,
        category: Category,
    ) -> LedgerResult<Vec<LedgerRecord>> {
        Ok(self.select(user_id, |record| record.category == category))
    }

    fn get_records_by_merchant(
        &self,
        user_id: UserId,
        merchant_substring: &str,
    ) -> LedgerResult<Vec<LedgerRecord>> {
        Ok(self.select(user_id, |record| {
            record.merchant_contains(merchant_substring)
        }))
    }

    fn get_monthly_totals(&self, user_id: UserId, year: i32) -> LedgerResult<Vec<MonthlyTotal>> {
        let mut buckets: BTreeMap<u32, AmountCount> = BTreeMap::new();
        for record in self
            .records
            .iter()
            .filter(|record| record.user_id == user_id && record.timestamp.year() == year)
        {
            buckets
                .entry(record.timestamp.month())
                .or_default()
                .add(record.amount);
        }
        debug!(user_id, year, months = buckets.len(), "monthly totals computed");
        Ok(buckets
            .into_iter()
            .map(|(month, bucket)| MonthlyTotal::from_bucket(month, bucket))
            .collect())
    }

    fn get_summary(
        &self,
        user_id: UserId,
        start: Option<NaiveDateTime>,
        end: Option<NaiveDateTime>,
    ) -> LedgerResult<LedgerSummary> {
        Ok(LedgerSummary::from_records(self.records.iter().filter(
            |record| record.user_id == user_id && within(record, start, end),
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(y: i32, m: u32, d: u32, h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, 0, 0)
            .unwrap()
    }

    fn sample_ledger() -> InMemoryLedger {
        InMemoryLedger::from_records(vec![
            LedgerRecord::new(1, 1, at(2024, 1, 5, 9), 30.0, "星巴克", Category::Dining),
            LedgerRecord::new(2, 1, at(2024, 1, 20, 18), 45.5, "滴滴出行", Category::Transport),
            LedgerRecord::new(3, 1, at(2024, 3, 2, 12), 120.0, "淘宝", Category::Shopping),
            LedgerRecord::new(4, 2, at(2024, 3, 2, 12), 999.0, "星巴克", Category::Dining),
        ])
        .expect("valid records")
    }

    #[test]
    fn records_are_paged_most_recent_first() {
        let ledger = sample_ledger();
        let page = ledger.get_records(1, 2, 0).unwrap();
        assert_eq!(page.iter().map(|r| r.id).collect::<Vec<_>>(), vec![3, 2]);
        let next = ledger.get_records(1, 2, 2).unwrap();
        assert_eq!(next.iter().map(|r| r.id).collect::<Vec<_>>(), vec![1]);
    }

    #[test]
    fn range_bounds_are_inclusive() {
        let ledger = sample_ledger();
        let records = ledger
            .get_records_in_range(1, at(2024, 1, 5, 9), at(2024, 1, 20, 18))
            .unwrap();
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn merchant_lookup_matches_substrings_for_owner_only() {
        let ledger = sample_ledger();
        let records = ledger.get_records_by_merchant(1, "滴滴").unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(ledger.get_records_by_merchant(1, "星巴克").unwrap().len(), 1);
    }

    #[test]
    fn monthly_totals_skip_empty_months() {
        let ledger = sample_ledger();
        let months = ledger.get_monthly_totals(1, 2024).unwrap();
        assert_eq!(months.len(), 2);
        assert_eq!(months[0].month, 1);
        assert_eq!(months[0].count, 2);
        assert!((months[0].total_amount - 75.5).abs() < 1e-9);
        assert_eq!(months[1].month, 3);
    }

    #[test]
    fn summary_breaks_down_by_category() {
        let ledger = sample_ledger();
        let summary = ledger.get_summary(1, None, None).unwrap();
        assert_eq!(summary.count, 3);
        assert_eq!(summary.category_breakdown.len(), 3);
        assert_eq!(summary.category_breakdown[&Category::Shopping].count, 1);
    }

    #[test]
    fn insert_rejects_non_positive_amounts_and_duplicates() {
        let mut ledger = sample_ledger();
        let zero = LedgerRecord::new(9, 1, at(2024, 1, 1, 0), 0.0, "x", Category::Other);
        assert!(matches!(
            ledger.insert(zero),
            Err(LedgerError::InvalidRecord(_))
        ));
        let dup = LedgerRecord::new(1, 1, at(2024, 1, 1, 0), 5.0, "x", Category::Other);
        assert!(ledger.insert(dup).is_err());
    }
}
