//! Free text to [`ParsedQuery`]: segmentation, intent and slot extraction.

use std::sync::Arc;

use tracing::debug;

use crate::config::QueryConfig;
use crate::core::{
    classifier::IntentClassifier,
    extractors::{AmountExtractor, CategoryExtractor, MerchantExtractor, TimeExtractor},
    segmenter::Segmenter,
    time::Clock,
};
use crate::domain::ParsedQuery;

/// Parses queries. Holds only immutable models, so one instance can serve
/// concurrent callers.
pub struct QueryParser {
    segmenter: Arc<Segmenter>,
    classifier: IntentClassifier,
    time: TimeExtractor,
    category: CategoryExtractor,
    merchant: MerchantExtractor,
    amount: AmountExtractor,
    clock: Arc<dyn Clock>,
}

impl QueryParser {
    pub fn new(config: &QueryConfig, clock: Arc<dyn Clock>) -> Self {
        let segmenter = Arc::new(Segmenter::with_user_words(&config.user_lexicon));
        let classifier = IntentClassifier::new(
            config.corpus_or_default(),
            Arc::clone(&segmenter),
            config.similarity_threshold,
        );
        Self {
            segmenter,
            classifier,
            time: TimeExtractor::new(),
            category: CategoryExtractor::new(),
            merchant: MerchantExtractor::new(),
            amount: AmountExtractor::new(),
            clock,
        }
    }

    /// Never fails: text the models cannot interpret comes back as an
    /// `Unknown` query with empty slots.
    pub fn parse_query(&self, text: &str) -> ParsedQuery {
        let text = text.trim();
        let now = self.clock.now();
        if text.is_empty() {
            return ParsedQuery::empty(text, now);
        }

        let tokens = self.segmenter.segment(text);
        let intent = self.classifier.classify_tokens(&tokens);
        let time_slot = self.time.extract(text, now);
        let category_slot = self.category.extract(text);
        let merchant_slot = self.merchant.extract(&tokens);
        let amount_slot = self.amount.extract(text);

        debug!(
            query = text,
            intent = %intent,
            tokens = tokens.len(),
            time = ?time_slot.kind(),
            category = ?category_slot.category,
            merchant = ?merchant_slot.merchant,
            amount = ?amount_slot.operator(),
            "query parsed"
        );

        ParsedQuery {
            original_text: text.to_string(),
            tokens,
            intent,
            time_slot,
            category_slot,
            merchant_slot,
            amount_slot,
            parsed_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::time::FixedClock;
    use crate::domain::{Category, Intent, TimeSlotKind};
    use chrono::NaiveDate;

    fn parser() -> QueryParser {
        let now = NaiveDate::from_ymd_opt(2024, 5, 20)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap();
        QueryParser::new(&QueryConfig::default(), Arc::new(FixedClock(now)))
    }

    #[test]
    fn trims_input_before_parsing() {
        let parsed = parser().parse_query("  今天花了多少  ");
        assert_eq!(parsed.original_text, "今天花了多少");
        assert_eq!(parsed.intent, Intent::TimeAmount);
        assert_eq!(parsed.time_slot.kind(), TimeSlotKind::SingleDay);
    }

    #[test]
    fn blank_input_is_an_empty_unknown_query() {
        let parsed = parser().parse_query("   ");
        assert_eq!(parsed.intent, Intent::Unknown);
        assert!(parsed.tokens.is_empty());
        assert!(!parsed.has_any_slot());
    }

    #[test]
    fn slots_are_filled_independently() {
        let parsed = parser().parse_query("上个月在星巴克喝咖啡超过30元");
        assert_eq!(parsed.time_slot.kind(), TimeSlotKind::Range);
        assert_eq!(parsed.category_slot.category, Some(Category::Dining));
        assert_eq!(parsed.merchant_slot.merchant.as_deref(), Some("星巴克"));
        assert_eq!(parsed.amount_slot.min(), Some(30.0));
    }

    #[test]
    fn user_lexicon_feeds_merchant_extraction() {
        let config = QueryConfig {
            user_lexicon: vec![crate::core::segmenter::LexiconEntry::new(
                "太二酸菜鱼",
                crate::domain::PosTag::Organization,
            )],
            ..QueryConfig::default()
        };
        let now = NaiveDate::from_ymd_opt(2024, 5, 20)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap();
        let parser = QueryParser::new(&config, Arc::new(FixedClock(now)));
        let parsed = parser.parse_query("太二酸菜鱼花了多少");
        assert_eq!(parsed.merchant_slot.merchant.as_deref(), Some("太二酸菜鱼"));
    }
}
