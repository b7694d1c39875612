use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::domain::{TimeSlot, TimeWindow};

/// Keyword to day offset relative to now. Zero is today, negative values
/// name a single past day, positive values a trailing range ending now.
/// Scanned in order; the first keyword contained in the text wins.
pub const TIME_KEYWORDS: &[(&str, i64)] = &[
    ("今天", 0),
    ("昨天", -1),
    ("前天", -2),
    ("这周", 7),
    ("上周", 14),
    ("本月", 30),
    ("上个月", 60),
    ("今年", 365),
    ("去年", 730),
];

static MONTH_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d{1,2})月").expect("month pattern is valid"));

#[derive(Debug, Clone, Copy, Default)]
pub struct TimeExtractor;

impl TimeExtractor {
    pub fn new() -> Self {
        Self
    }

    /// An explicit `<N>月` overrides any keyword match.
    pub fn extract(&self, text: &str, now: NaiveDateTime) -> TimeSlot {
        month_slot(text, now.year())
            .or_else(|| keyword_slot(text, now))
            .unwrap_or_default()
    }
}

fn keyword_slot(text: &str, now: NaiveDateTime) -> Option<TimeSlot> {
    let (_, offset) = TIME_KEYWORDS
        .iter()
        .find(|(keyword, _)| text.contains(keyword))?;
    let slot = match *offset {
        0 => TimeSlot::single_day(TimeWindow::whole_day(now.date())),
        days if days < 0 => {
            TimeSlot::single_day(TimeWindow::whole_day(now.date() + Duration::days(days)))
        }
        days => TimeSlot::range(TimeWindow::trailing_days(now, days)),
    };
    Some(slot)
}

fn month_slot(text: &str, year: i32) -> Option<TimeSlot> {
    MONTH_PATTERN
        .captures_iter(text)
        .filter_map(|caps| caps[1].parse::<u32>().ok())
        .find(|month| (1..=12).contains(month))
        .and_then(|month| month_window(year, month))
        .map(TimeSlot::month)
}

/// First through last calendar day of `month`.
pub fn month_window(year: i32, month: u32) -> Option<TimeWindow> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let next_first = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)?
    };
    Some(TimeWindow::whole_days(first, next_first - Duration::days(1)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TimeSlotKind;

    fn at(y: i32, m: u32, d: u32, h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, 30, 0)
            .unwrap()
    }

    #[test]
    fn today_spans_the_whole_day() {
        let now = at(2024, 5, 20, 15);
        let slot = TimeExtractor::new().extract("今天花了多少", now);
        assert_eq!(slot.kind(), TimeSlotKind::SingleDay);
        assert_eq!(slot.start().unwrap().to_string(), "2024-05-20 00:00:00");
        assert_eq!(slot.end().unwrap().to_string(), "2024-05-20 23:59:59.999999");
    }

    #[test]
    fn day_before_yesterday_is_a_single_past_day() {
        let slot = TimeExtractor::new().extract("前天吃饭", at(2024, 3, 1, 9));
        assert_eq!(slot.kind(), TimeSlotKind::SingleDay);
        assert_eq!(slot.start().unwrap().date(), NaiveDate::from_ymd_opt(2024, 2, 28).unwrap());
    }

    #[test]
    fn trailing_keywords_end_now() {
        let now = at(2024, 5, 20, 15);
        let slot = TimeExtractor::new().extract("上个月消费", now);
        assert_eq!(slot.kind(), TimeSlotKind::Range);
        assert_eq!(slot.end(), Some(now));
        assert_eq!(slot.start(), Some(now - Duration::days(60)));
    }

    #[test]
    fn first_keyword_in_table_order_wins() {
        let now = at(2024, 5, 20, 15);
        let slot = TimeExtractor::new().extract("去年和今天", now);
        assert_eq!(slot.kind(), TimeSlotKind::SingleDay);
    }

    #[test]
    fn explicit_month_overrides_keywords() {
        let now = at(2024, 5, 20, 15);
        let slot = TimeExtractor::new().extract("今天看看3月花了多少", now);
        assert_eq!(slot.kind(), TimeSlotKind::Month);
        assert_eq!(slot.start().unwrap().to_string(), "2024-03-01 00:00:00");
        assert_eq!(slot.end().unwrap().to_string(), "2024-03-31 23:59:59.999999");
    }

    #[test]
    fn december_ends_on_new_years_eve() {
        let slot = TimeExtractor::new().extract("12月的支出", at(2024, 5, 20, 15));
        assert_eq!(slot.start().unwrap().to_string(), "2024-12-01 00:00:00");
        assert_eq!(slot.end().unwrap().to_string(), "2024-12-31 23:59:59.999999");
    }

    #[test]
    fn february_respects_leap_years() {
        let window = month_window(2024, 2).unwrap();
        assert_eq!(window.end().date(), NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
    }

    #[test]
    fn out_of_range_month_is_ignored() {
        let slot = TimeExtractor::new().extract("13月", at(2024, 5, 20, 15));
        assert!(slot.is_empty());
        assert_eq!(slot.kind(), TimeSlotKind::None);
    }

    #[test]
    fn no_time_expression_yields_empty_slot() {
        assert!(TimeExtractor::new()
            .extract("星巴克花了多少", at(2024, 5, 20, 15))
            .is_empty());
    }
}
