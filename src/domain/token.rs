//! Segmented words and their part-of-speech tags.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Coarse part-of-speech tags, using the jieba-style short codes on the wire.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum PosTag {
    #[serde(rename = "n")]
    Noun,
    #[serde(rename = "nr")]
    PersonName,
    #[serde(rename = "ns")]
    PlaceName,
    #[serde(rename = "nt")]
    Organization,
    #[serde(rename = "t")]
    Time,
    #[serde(rename = "v")]
    Verb,
    #[serde(rename = "vn")]
    VerbalNoun,
    #[serde(rename = "d")]
    Adverb,
    #[serde(rename = "a")]
    Adjective,
    #[serde(rename = "m")]
    Numeral,
    #[serde(rename = "q")]
    Quantifier,
    #[serde(rename = "r")]
    Pronoun,
    #[serde(rename = "p")]
    Preposition,
    #[serde(rename = "u")]
    Particle,
    #[serde(rename = "f")]
    Localizer,
    #[serde(rename = "eng")]
    English,
    #[serde(rename = "w")]
    Punctuation,
    #[serde(rename = "x")]
    Unknown,
}

impl PosTag {
    pub fn code(&self) -> &'static str {
        match self {
            PosTag::Noun => "n",
            PosTag::PersonName => "nr",
            PosTag::PlaceName => "ns",
            PosTag::Organization => "nt",
            PosTag::Time => "t",
            PosTag::Verb => "v",
            PosTag::VerbalNoun => "vn",
            PosTag::Adverb => "d",
            PosTag::Adjective => "a",
            PosTag::Numeral => "m",
            PosTag::Quantifier => "q",
            PosTag::Pronoun => "r",
            PosTag::Preposition => "p",
            PosTag::Particle => "u",
            PosTag::Localizer => "f",
            PosTag::English => "eng",
            PosTag::Punctuation => "w",
            PosTag::Unknown => "x",
        }
    }

    /// Common, person, place and organization nouns: the tags a merchant
    /// name can carry.
    pub fn is_noun_like(&self) -> bool {
        matches!(
            self,
            PosTag::Noun | PosTag::PersonName | PosTag::PlaceName | PosTag::Organization
        )
    }
}

impl fmt::Display for PosTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Token {
    pub word: String,
    pub pos: PosTag,
}

impl Token {
    pub fn new(word: impl Into<String>, pos: PosTag) -> Self {
        Self {
            word: word.into(),
            pos,
        }
    }

    /// Length in characters, not bytes.
    pub fn char_len(&self) -> usize {
        self.word.chars().count()
    }
}
