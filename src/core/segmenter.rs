//! Dictionary-driven word segmentation with coarse part-of-speech tags.
//!
//! Forward maximum matching over grapheme clusters: at each position the
//! longest lexicon entry wins. ASCII digit runs become numerals, ASCII
//! letter runs become `eng` tokens, and anything else that the lexicon does
//! not cover degrades to a single-grapheme token tagged unknown.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use unicode_segmentation::UnicodeSegmentation;

use crate::domain::{PosTag, Token};

/// A user-supplied lexicon word.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LexiconEntry {
    pub word: String,
    pub pos: PosTag,
}

impl LexiconEntry {
    pub fn new(word: impl Into<String>, pos: PosTag) -> Self {
        Self {
            word: word.into(),
            pos,
        }
    }
}

use PosTag::*;

const BUILTIN_LEXICON: &[(&str, PosTag)] = &[
    // time expressions
    ("今天", Time),
    ("昨天", Time),
    ("前天", Time),
    ("这周", Time),
    ("本周", Time),
    ("上周", Time),
    ("本月", Time),
    ("这个月", Time),
    ("上个月", Time),
    ("今年", Time),
    ("去年", Time),
    ("最近", Time),
    ("周末", Time),
    ("月", Time),
    ("时间", Noun),
    // spending vocabulary
    ("花", Verb),
    ("花费", Verb),
    ("消费", VerbalNoun),
    ("支出", Verb),
    ("费用", Noun),
    ("金额", Noun),
    ("总额", Noun),
    ("总共", Adverb),
    ("一共", Adverb),
    ("总", Adjective),
    ("多少", Numeral),
    ("钱", Noun),
    ("元", Quantifier),
    ("块", Quantifier),
    ("笔", Quantifier),
    ("趋势", Noun),
    ("变化", VerbalNoun),
    ("分析", VerbalNoun),
    ("统计", Verb),
    ("报告", Noun),
    ("对比", Verb),
    ("比较", Adverb),
    ("相比", Verb),
    ("环比", Adverb),
    ("同比", Adverb),
    ("超过", Verb),
    ("大于", Verb),
    ("少于", Verb),
    ("小于", Verb),
    ("到", Verb),
    ("之间", Localizer),
    ("以上", Localizer),
    ("以下", Localizer),
    ("查询", Verb),
    ("查", Verb),
    ("看看", Verb),
    // function words
    ("了", Particle),
    ("的", Particle),
    ("在", Preposition),
    ("和", Preposition),
    ("我", Pronoun),
    ("我们", Pronoun),
    ("是", Verb),
    ("有", Verb),
    // category vocabulary
    ("餐饮", Noun),
    ("吃饭", Verb),
    ("餐厅", Noun),
    ("外卖", Noun),
    ("咖啡", Noun),
    ("奶茶", Noun),
    ("快餐", Noun),
    ("美食", Noun),
    ("交通", Noun),
    ("交通费", Noun),
    ("打车", Verb),
    ("地铁", Noun),
    ("公交", Noun),
    ("加油", Verb),
    ("停车", Verb),
    ("出行", Verb),
    ("出租车", Noun),
    ("购物", Verb),
    ("超市", Noun),
    ("商场", Noun),
    ("网购", Verb),
    ("衣服", Noun),
    ("日用品", Noun),
    ("商品", Noun),
    ("娱乐", VerbalNoun),
    ("电影", Noun),
    ("游戏", Noun),
    ("KTV", English),
    ("旅游", VerbalNoun),
    ("休闲", VerbalNoun),
    ("医疗", Noun),
    ("医院", Noun),
    ("药店", Noun),
    ("体检", VerbalNoun),
    ("看病", Verb),
    ("教育", VerbalNoun),
    ("培训", VerbalNoun),
    ("学习", Verb),
    ("书籍", Noun),
    ("课程", Noun),
    // merchants
    ("星巴克", Organization),
    ("瑞幸", Organization),
    ("喜茶", Organization),
    ("麦当劳", Organization),
    ("肯德基", Organization),
    ("淘宝", Organization),
    ("天猫", Organization),
    ("京东", Organization),
    ("拼多多", Organization),
    ("滴滴", Organization),
    ("美团", Organization),
    ("饿了么", Organization),
    ("盒马", Organization),
    ("沃尔玛", Organization),
    ("家乐福", Organization),
    ("优衣库", Organization),
    // places
    ("北京", PlaceName),
    ("上海", PlaceName),
    ("广州", PlaceName),
    ("深圳", PlaceName),
];

const CJK_PUNCTUATION: &str = "，。？！、；：“”‘’（）《》【】～…—·￥";

/// Splits text into `(word, pos)` tokens. Immutable once built; safe to
/// share across threads.
#[derive(Debug, Clone)]
pub struct Segmenter {
    words: HashMap<String, PosTag>,
    max_word_len: usize,
}

impl Default for Segmenter {
    fn default() -> Self {
        Self::new()
    }
}

impl Segmenter {
    /// Segmenter over the built-in lexicon.
    pub fn new() -> Self {
        let mut segmenter = Self {
            words: HashMap::with_capacity(BUILTIN_LEXICON.len()),
            max_word_len: 1,
        };
        for (word, pos) in BUILTIN_LEXICON {
            segmenter.insert(word, *pos);
        }
        segmenter
    }

    /// Built-in lexicon extended with `entries`; user words override
    /// built-in tags.
    pub fn with_user_words(entries: &[LexiconEntry]) -> Self {
        let mut segmenter = Self::new();
        for entry in entries {
            segmenter.insert(&entry.word, entry.pos);
        }
        segmenter
    }

    fn insert(&mut self, word: &str, pos: PosTag) {
        let word = word.trim();
        if word.is_empty() {
            return;
        }
        self.max_word_len = self.max_word_len.max(word.graphemes(true).count());
        self.words.insert(word.to_string(), pos);
    }

    pub fn lookup(&self, word: &str) -> Option<PosTag> {
        self.words.get(word).copied()
    }

    pub fn segment(&self, text: &str) -> Vec<Token> {
        let graphemes: Vec<&str> = text.graphemes(true).collect();
        let mut tokens = Vec::new();
        let mut idx = 0;

        while idx < graphemes.len() {
            let current = graphemes[idx];
            if current.chars().all(char::is_whitespace) {
                idx += 1;
                continue;
            }
            if let Some((len, pos)) = self.longest_match(&graphemes, idx) {
                tokens.push(Token::new(graphemes[idx..idx + len].concat(), pos));
                idx += len;
                continue;
            }
            let (len, pos) = if is_ascii_digit(current) {
                (numeral_len(&graphemes, idx), Numeral)
            } else if is_ascii_alpha(current) {
                (run_len(&graphemes, idx, is_ascii_alnum), English)
            } else if is_punctuation(current) {
                (1, Punctuation)
            } else {
                (1, PosTag::Unknown)
            };
            tokens.push(Token::new(graphemes[idx..idx + len].concat(), pos));
            idx += len;
        }

        tokens
    }

    fn longest_match(&self, graphemes: &[&str], start: usize) -> Option<(usize, PosTag)> {
        let longest = self.max_word_len.min(graphemes.len() - start);
        (1..=longest).rev().find_map(|len| {
            let candidate = graphemes[start..start + len].concat();
            self.lookup(&candidate).map(|pos| (len, pos))
        })
    }
}

fn is_ascii_digit(grapheme: &str) -> bool {
    grapheme.len() == 1 && grapheme.as_bytes()[0].is_ascii_digit()
}

fn is_ascii_alpha(grapheme: &str) -> bool {
    grapheme.len() == 1 && grapheme.as_bytes()[0].is_ascii_alphabetic()
}

fn is_ascii_alnum(grapheme: &str) -> bool {
    grapheme.len() == 1 && grapheme.as_bytes()[0].is_ascii_alphanumeric()
}

fn is_punctuation(grapheme: &str) -> bool {
    grapheme
        .chars()
        .all(|ch| ch.is_ascii_punctuation() || CJK_PUNCTUATION.contains(ch))
}

fn run_len(graphemes: &[&str], start: usize, accept: fn(&str) -> bool) -> usize {
    graphemes[start..]
        .iter()
        .take_while(|grapheme| accept(grapheme))
        .count()
}

/// Digits with at most one fractional part, e.g. `12` or `12.50`.
fn numeral_len(graphemes: &[&str], start: usize) -> usize {
    let mut len = run_len(graphemes, start, is_ascii_digit);
    let dot = start + len;
    if graphemes.get(dot) == Some(&".")
        && graphemes.get(dot + 1).map_or(false, |next| is_ascii_digit(next))
    {
        len += 1 + run_len(graphemes, dot + 1, is_ascii_digit);
    }
    len
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(tokens: &[Token]) -> Vec<&str> {
        tokens.iter().map(|token| token.word.as_str()).collect()
    }

    #[test]
    fn splits_spending_question() {
        let tokens = Segmenter::new().segment("今天花了多少钱");
        assert_eq!(words(&tokens), vec!["今天", "花", "了", "多少", "钱"]);
        assert_eq!(tokens[0].pos, PosTag::Time);
        assert_eq!(tokens[3].pos, PosTag::Numeral);
    }

    #[test]
    fn prefers_longest_lexicon_entry() {
        let tokens = Segmenter::new().segment("上个月花费");
        assert_eq!(words(&tokens), vec!["上个月", "花费"]);
    }

    #[test]
    fn numbers_and_symbols_become_their_own_tokens() {
        let tokens = Segmenter::new().segment("超过100.5元 >20");
        assert_eq!(words(&tokens), vec!["超过", "100.5", "元", ">", "20"]);
        assert_eq!(tokens[1].pos, PosTag::Numeral);
        assert_eq!(tokens[3].pos, PosTag::Punctuation);
    }

    #[test]
    fn unknown_text_degrades_to_single_graphemes() {
        let tokens = Segmenter::new().segment("囧槑");
        assert_eq!(words(&tokens), vec!["囧", "槑"]);
        assert!(tokens.iter().all(|token| token.pos == PosTag::Unknown));
    }

    #[test]
    fn latin_runs_are_grouped() {
        let tokens = Segmenter::new().segment("hello world");
        assert_eq!(words(&tokens), vec!["hello", "world"]);
        assert!(tokens.iter().all(|token| token.pos == PosTag::English));
    }

    #[test]
    fn user_words_extend_the_lexicon() {
        let segmenter =
            Segmenter::with_user_words(&[LexiconEntry::new("太二酸菜鱼", PosTag::Organization)]);
        let tokens = segmenter.segment("在太二酸菜鱼吃饭");
        assert_eq!(words(&tokens), vec!["在", "太二酸菜鱼", "吃饭"]);
        assert_eq!(tokens[1].pos, PosTag::Organization);
    }

    #[test]
    fn segmentation_is_deterministic() {
        let segmenter = Segmenter::new();
        let text = "上个月在星巴克花了多少";
        assert_eq!(segmenter.segment(text), segmenter.segment(text));
    }

    #[test]
    fn empty_input_yields_no_tokens() {
        assert!(Segmenter::new().segment("   ").is_empty());
    }
}
