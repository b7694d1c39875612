use once_cell::sync::Lazy;
use regex::Regex;

use crate::domain::{AmountConstraint, AmountSlot};

const GREATER_MARKERS: &[&str] = &["超过", "大于", ">"];
const LESS_MARKERS: &[&str] = &["少于", "小于", "<"];
const RANGE_MARKERS: &[&str] = &["到", "-", "~"];

static AMOUNT_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\d+(?:\.\d+)?").expect("amount pattern is valid"));

#[derive(Debug, Clone, Copy, Default)]
pub struct AmountExtractor;

impl AmountExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Operator precedence: greater-than, less-than, range, then equality
    /// with the first number.
    pub fn extract(&self, text: &str) -> AmountSlot {
        let amounts: Vec<f64> = AMOUNT_PATTERN
            .find_iter(text)
            .filter_map(|found| found.as_str().parse::<f64>().ok())
            .collect();
        let Some(&first) = amounts.first() else {
            return AmountSlot::empty();
        };
        let min = amounts.iter().copied().fold(f64::INFINITY, f64::min);
        let max = amounts.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let has_any = |markers: &[&str]| markers.iter().any(|marker| text.contains(marker));

        let constraint = if has_any(GREATER_MARKERS) {
            AmountConstraint::GreaterThan { min: max }
        } else if has_any(LESS_MARKERS) {
            AmountConstraint::LessThan { max: min }
        } else if has_any(RANGE_MARKERS) {
            AmountConstraint::Range { min, max }
        } else {
            AmountConstraint::Equal { value: first }
        };
        AmountSlot::with(constraint)
    }
}
