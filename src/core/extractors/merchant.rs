use crate::domain::{MerchantSlot, Token};

/// Nouns that describe the query itself rather than a counterparty.
pub const MERCHANT_STOPLIST: &[&str] = &["时间", "金额", "消费", "支出", "费用"];

/// Picks the first noun-like token longer than one character that is not
/// a stoplisted word.
#[derive(Debug, Clone, Copy, Default)]
pub struct MerchantExtractor;

impl MerchantExtractor {
    pub fn new() -> Self {
        Self
    }

    pub fn extract(&self, tokens: &[Token]) -> MerchantSlot {
        tokens
            .iter()
            .find(|token| {
                token.pos.is_noun_like()
                    && token.char_len() > 1
                    && !MERCHANT_STOPLIST.contains(&token.word.as_str())
            })
            .map(|token| MerchantSlot::matched(token.word.clone()))
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::segmenter::Segmenter;
    use crate::domain::PosTag;

    #[test]
    fn organization_token_becomes_merchant() {
        let tokens = Segmenter::new().segment("上个月在星巴克花了多少");
        let slot = MerchantExtractor::new().extract(&tokens);
        assert_eq!(slot.merchant.as_deref(), Some("星巴克"));
        assert_eq!(slot.confidence, 0.8);
    }

    #[test]
    fn stoplisted_and_short_nouns_are_skipped() {
        let tokens = vec![
            Token::new("钱", PosTag::Noun),
            Token::new("费用", PosTag::Noun),
            Token::new("金额", PosTag::Noun),
            Token::new("麦当劳", PosTag::Organization),
        ];
        let slot = MerchantExtractor::new().extract(&tokens);
        assert_eq!(slot.merchant.as_deref(), Some("麦当劳"));
    }

    #[test]
    fn time_words_are_not_merchants() {
        let tokens = Segmenter::new().segment("今天花了多少钱");
        assert!(MerchantExtractor::new().extract(&tokens).is_empty());
    }
}
