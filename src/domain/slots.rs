//! Typed slot values extracted from free text.
//!
//! Every slot has an explicit empty state; extraction never fails.

use std::fmt;

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::domain::{category::Category, common::AMOUNT_EPSILON};

pub const CATEGORY_MATCH_CONFIDENCE: f64 = 1.0;
pub const MERCHANT_MATCH_CONFIDENCE: f64 = 0.8;

/// Inclusive timestamp range with `start <= end`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(try_from = "RawWindow")]
pub struct TimeWindow {
    start: NaiveDateTime,
    end: NaiveDateTime,
}

#[derive(Deserialize)]
struct RawWindow {
    start: NaiveDateTime,
    end: NaiveDateTime,
}

impl TryFrom<RawWindow> for TimeWindow {
    type Error = TimeWindowError;

    fn try_from(raw: RawWindow) -> Result<Self, Self::Error> {
        TimeWindow::new(raw.start, raw.end)
    }
}

impl TimeWindow {
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Result<Self, TimeWindowError> {
        if end < start {
            return Err(TimeWindowError::InvertedRange);
        }
        Ok(Self { start, end })
    }

    /// Spans `date` from 00:00:00.000000 to 23:59:59.999999.
    pub fn whole_day(date: NaiveDate) -> Self {
        Self {
            start: start_of_day(date),
            end: end_of_day(date),
        }
    }

    /// Spans `first` 00:00 through the end of `last`, swapping inverted input.
    pub fn whole_days(first: NaiveDate, last: NaiveDate) -> Self {
        let (first, last) = if last < first {
            (last, first)
        } else {
            (first, last)
        };
        Self {
            start: start_of_day(first),
            end: end_of_day(last),
        }
    }

    /// The `days` days leading up to `now`. Spans too large for the
    /// calendar start at the earliest representable instant.
    pub fn trailing_days(now: NaiveDateTime, days: i64) -> Self {
        let start = Duration::try_days(days.max(0))
            .and_then(|span| now.checked_sub_signed(span))
            .unwrap_or(NaiveDateTime::MIN);
        Self { start, end: now }
    }

    pub fn start(&self) -> NaiveDateTime {
        self.start
    }

    pub fn end(&self) -> NaiveDateTime {
        self.end
    }

    pub fn contains(&self, timestamp: NaiveDateTime) -> bool {
        timestamp >= self.start && timestamp <= self.end
    }

    /// `YYYY-MM-DD 到 YYYY-MM-DD`.
    pub fn label(&self) -> String {
        range_label(Some(self.start), Some(self.end))
    }
}

/// Renders an optionally open range; missing ends read `全部` / `现在`.
pub fn range_label(start: Option<NaiveDateTime>, end: Option<NaiveDateTime>) -> String {
    let start = start
        .map(|ts| ts.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "全部".to_string());
    let end = end
        .map(|ts| ts.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "现在".to_string());
    format!("{start} 到 {end}")
}

pub fn start_of_day(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::MIN)
}

pub fn end_of_day(date: NaiveDate) -> NaiveDateTime {
    start_of_day(date) + Duration::days(1) - Duration::microseconds(1)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Errors that can occur when constructing [`TimeWindow`] values.
pub enum TimeWindowError {
    InvertedRange,
    MissingBound,
}

impl fmt::Display for TimeWindowError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimeWindowError::InvertedRange => f.write_str("time window end must not precede start"),
            TimeWindowError::MissingBound => {
                f.write_str("time slot with a kind needs both start and end")
            }
        }
    }
}

impl std::error::Error for TimeWindowError {}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TimeSlotKind {
    None,
    SingleDay,
    Range,
    Month,
}

/// Time constraint of a query. A window is present exactly when the kind
/// is not [`TimeSlotKind::None`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(try_from = "RawTimeSlot", into = "RawTimeSlot")]
pub struct TimeSlot {
    kind: TimeSlotKind,
    window: Option<TimeWindow>,
}

#[derive(Serialize, Deserialize)]
struct RawTimeSlot {
    kind: TimeSlotKind,
    #[serde(default)]
    start: Option<NaiveDateTime>,
    #[serde(default)]
    end: Option<NaiveDateTime>,
}

impl TryFrom<RawTimeSlot> for TimeSlot {
    type Error = TimeWindowError;

    fn try_from(raw: RawTimeSlot) -> Result<Self, Self::Error> {
        match (raw.kind, raw.start, raw.end) {
            (TimeSlotKind::None, _, _) => Ok(TimeSlot::none()),
            (kind, Some(start), Some(end)) => Ok(TimeSlot {
                kind,
                window: Some(TimeWindow::new(start, end)?),
            }),
            _ => Err(TimeWindowError::MissingBound),
        }
    }
}

impl From<TimeSlot> for RawTimeSlot {
    fn from(slot: TimeSlot) -> Self {
        RawTimeSlot {
            kind: slot.kind,
            start: slot.start(),
            end: slot.end(),
        }
    }
}

impl TimeSlot {
    pub fn none() -> Self {
        Self {
            kind: TimeSlotKind::None,
            window: None,
        }
    }

    pub fn single_day(window: TimeWindow) -> Self {
        Self::with_kind(TimeSlotKind::SingleDay, window)
    }

    pub fn range(window: TimeWindow) -> Self {
        Self::with_kind(TimeSlotKind::Range, window)
    }

    pub fn month(window: TimeWindow) -> Self {
        Self::with_kind(TimeSlotKind::Month, window)
    }

    fn with_kind(kind: TimeSlotKind, window: TimeWindow) -> Self {
        Self {
            kind,
            window: Some(window),
        }
    }

    pub fn kind(&self) -> TimeSlotKind {
        self.kind
    }

    pub fn window(&self) -> Option<TimeWindow> {
        self.window
    }

    pub fn start(&self) -> Option<NaiveDateTime> {
        self.window.map(|window| window.start())
    }

    pub fn end(&self) -> Option<NaiveDateTime> {
        self.window.map(|window| window.end())
    }

    pub fn is_empty(&self) -> bool {
        self.window.is_none()
    }
}

impl Default for TimeSlot {
    fn default() -> Self {
        Self::none()
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct CategorySlot {
    pub category: Option<Category>,
    pub confidence: f64,
}

impl CategorySlot {
    pub fn empty() -> Self {
        Self {
            category: None,
            confidence: 0.0,
        }
    }

    pub fn matched(category: Category) -> Self {
        Self {
            category: Some(category),
            confidence: CATEGORY_MATCH_CONFIDENCE,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.category.is_none()
    }
}

impl Default for CategorySlot {
    fn default() -> Self {
        Self::empty()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MerchantSlot {
    pub merchant: Option<String>,
    pub confidence: f64,
}

impl MerchantSlot {
    pub fn empty() -> Self {
        Self {
            merchant: None,
            confidence: 0.0,
        }
    }

    pub fn matched(merchant: impl Into<String>) -> Self {
        Self {
            merchant: Some(merchant.into()),
            confidence: MERCHANT_MATCH_CONFIDENCE,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.merchant.is_none()
    }
}

impl Default for MerchantSlot {
    fn default() -> Self {
        Self::empty()
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AmountOperator {
    Equal,
    GreaterThan,
    LessThan,
    Range,
}

/// A numeric constraint on record amounts. Each variant carries exactly the
/// bounds its operator needs.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(tag = "operator", rename_all = "snake_case")]
pub enum AmountConstraint {
    Equal { value: f64 },
    GreaterThan { min: f64 },
    LessThan { max: f64 },
    Range { min: f64, max: f64 },
}

impl AmountConstraint {
    pub fn operator(&self) -> AmountOperator {
        match self {
            AmountConstraint::Equal { .. } => AmountOperator::Equal,
            AmountConstraint::GreaterThan { .. } => AmountOperator::GreaterThan,
            AmountConstraint::LessThan { .. } => AmountOperator::LessThan,
            AmountConstraint::Range { .. } => AmountOperator::Range,
        }
    }

    /// Equality uses [`AMOUNT_EPSILON`]; bounds of a range are inclusive.
    pub fn matches(&self, amount: f64) -> bool {
        match *self {
            AmountConstraint::Equal { value } => (amount - value).abs() < AMOUNT_EPSILON,
            AmountConstraint::GreaterThan { min } => amount > min,
            AmountConstraint::LessThan { max } => amount < max,
            AmountConstraint::Range { min, max } => amount >= min && amount <= max,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct AmountSlot {
    #[serde(flatten, default)]
    pub constraint: Option<AmountConstraint>,
}

impl AmountSlot {
    pub fn empty() -> Self {
        Self { constraint: None }
    }

    pub fn with(constraint: AmountConstraint) -> Self {
        Self {
            constraint: Some(constraint),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.constraint.is_none()
    }

    pub fn operator(&self) -> Option<AmountOperator> {
        self.constraint.map(|constraint| constraint.operator())
    }

    pub fn value(&self) -> Option<f64> {
        match self.constraint {
            Some(AmountConstraint::Equal { value }) => Some(value),
            _ => None,
        }
    }

    pub fn min(&self) -> Option<f64> {
        match self.constraint {
            Some(AmountConstraint::GreaterThan { min }) | Some(AmountConstraint::Range { min, .. }) => {
                Some(min)
            }
            _ => None,
        }
    }

    pub fn max(&self) -> Option<f64> {
        match self.constraint {
            Some(AmountConstraint::LessThan { max }) | Some(AmountConstraint::Range { max, .. }) => {
                Some(max)
            }
            _ => None,
        }
    }
}
