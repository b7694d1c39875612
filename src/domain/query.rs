use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::{
    intent::Intent,
    slots::{AmountSlot, CategorySlot, MerchantSlot, TimeSlot},
    token::Token,
};

/// Structured interpretation of one free-text query.
///
/// Built once by the parser and only ever read afterwards; handlers take it
/// by shared reference.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ParsedQuery {
    pub original_text: String,
    pub tokens: Vec<Token>,
    pub intent: Intent,
    pub time_slot: TimeSlot,
    pub category_slot: CategorySlot,
    pub merchant_slot: MerchantSlot,
    pub amount_slot: AmountSlot,
    pub parsed_at: NaiveDateTime,
}

impl ParsedQuery {
    /// A query carrying no signal at all: `Unknown` intent, every slot empty.
    pub fn empty(original_text: impl Into<String>, parsed_at: NaiveDateTime) -> Self {
        Self {
            original_text: original_text.into(),
            tokens: Vec::new(),
            intent: Intent::Unknown,
            time_slot: TimeSlot::none(),
            category_slot: CategorySlot::empty(),
            merchant_slot: MerchantSlot::empty(),
            amount_slot: AmountSlot::empty(),
            parsed_at,
        }
    }

    /// Copy of this query routed to a different intent.
    pub fn with_intent(&self, intent: Intent) -> Self {
        Self {
            intent,
            ..self.clone()
        }
    }

    pub fn has_any_slot(&self) -> bool {
        !(self.time_slot.is_empty()
            && self.category_slot.is_empty()
            && self.merchant_slot.is_empty()
            && self.amount_slot.is_empty())
    }
}
