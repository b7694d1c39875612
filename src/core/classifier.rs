//! Intent classification by TF-IDF cosine similarity against a fixed bank
//! of labelled example phrases.

use std::{collections::BTreeMap, sync::Arc};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::segmenter::Segmenter;
use crate::domain::{Intent, PosTag, Token};

/// One labelled example phrase.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IntentExample {
    pub intent: Intent,
    pub phrase: String,
}

impl IntentExample {
    pub fn new(intent: Intent, phrase: impl Into<String>) -> Self {
        Self {
            intent,
            phrase: phrase.into(),
        }
    }
}

const BUILTIN_EXAMPLES: &[(Intent, &[&str])] = &[
    (
        Intent::TotalAmount,
        &["花了多少钱", "消费多少", "支出多少", "总共多少", "花了多少", "消费总额", "总支出"],
    ),
    (
        Intent::CategoryAmount,
        &["餐饮花了多少", "交通费多少", "购物花了多少", "娱乐消费", "医疗费用", "教育支出"],
    ),
    (
        Intent::TimeAmount,
        &["今天花了多少", "昨天消费", "这周支出", "本月花费", "上个月消费", "今年支出", "最近消费"],
    ),
    (
        Intent::MerchantAmount,
        &["星巴克花了多少", "麦当劳消费", "淘宝购物", "滴滴打车", "美团外卖"],
    ),
    (
        Intent::Trend,
        &["消费趋势", "支出变化", "消费分析", "花费统计", "消费报告", "支出分析"],
    ),
    (Intent::Comparison, &["对比", "比较", "相比", "环比", "同比"]),
];

/// Ordered example bank. Order matters: on equal similarity the earlier
/// example wins.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IntentCorpus {
    pub examples: Vec<IntentExample>,
}

impl Default for IntentCorpus {
    fn default() -> Self {
        let examples = BUILTIN_EXAMPLES
            .iter()
            .flat_map(|(intent, phrases)| {
                phrases
                    .iter()
                    .map(move |phrase| IntentExample::new(*intent, *phrase))
            })
            .collect();
        Self { examples }
    }
}

impl IntentCorpus {
    pub fn len(&self) -> usize {
        self.examples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.examples.is_empty()
    }
}

type SparseVector = BTreeMap<usize, f64>;

/// Term-frequency times smoothed inverse-document-frequency weighting,
/// fitted once over a document set and immutable afterwards.
#[derive(Debug, Clone)]
pub struct TfIdfVectorizer {
    vocabulary: BTreeMap<String, usize>,
    idf: Vec<f64>,
}

impl TfIdfVectorizer {
    pub fn fit(documents: &[Vec<String>]) -> Self {
        let mut document_frequency: BTreeMap<&str, usize> = BTreeMap::new();
        for document in documents {
            let mut seen: Vec<&str> = document.iter().map(String::as_str).collect();
            seen.sort_unstable();
            seen.dedup();
            for term in seen {
                *document_frequency.entry(term).or_insert(0) += 1;
            }
        }

        let n_docs = documents.len() as f64;
        let mut vocabulary = BTreeMap::new();
        let mut idf = Vec::with_capacity(document_frequency.len());
        for (column, (term, df)) in document_frequency.into_iter().enumerate() {
            vocabulary.insert(term.to_string(), column);
            idf.push(((1.0 + n_docs) / (1.0 + df as f64)).ln() + 1.0);
        }

        Self { vocabulary, idf }
    }

    pub fn vocabulary_len(&self) -> usize {
        self.vocabulary.len()
    }

    /// L2-normalised weights of the known terms of `terms`. Unknown terms
    /// are ignored; a document with no known term maps to the empty vector.
    pub fn transform(&self, terms: &[String]) -> SparseVector {
        let mut weights = SparseVector::new();
        for term in terms {
            if let Some(&column) = self.vocabulary.get(term) {
                *weights.entry(column).or_insert(0.0) += 1.0;
            }
        }
        for (column, weight) in weights.iter_mut() {
            *weight *= self.idf[*column];
        }

        let norm = weights.values().map(|w| w * w).sum::<f64>().sqrt();
        if norm == 0.0 {
            return SparseVector::new();
        }
        for weight in weights.values_mut() {
            *weight /= norm;
        }
        weights
    }
}

/// Cosine similarity of two already-normalised vectors.
fn cosine(left: &SparseVector, right: &SparseVector) -> f64 {
    let (small, large) = if left.len() <= right.len() {
        (left, right)
    } else {
        (right, left)
    };
    small
        .iter()
        .filter_map(|(column, weight)| large.get(column).map(|other| weight * other))
        .sum()
}

/// Best-matching example for a query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntentScore {
    pub example_index: usize,
    pub intent: Intent,
    pub similarity: f64,
}

/// Maps free text to an [`Intent`]. Built once and shared read-only.
#[derive(Debug, Clone)]
pub struct IntentClassifier {
    segmenter: Arc<Segmenter>,
    corpus: IntentCorpus,
    vectorizer: TfIdfVectorizer,
    example_vectors: Vec<SparseVector>,
    threshold: f64,
}

impl IntentClassifier {
    pub fn new(corpus: IntentCorpus, segmenter: Arc<Segmenter>, threshold: f64) -> Self {
        let documents: Vec<Vec<String>> = corpus
            .examples
            .iter()
            .map(|example| analyze(&segmenter.segment(&example.phrase)))
            .collect();
        let vectorizer = TfIdfVectorizer::fit(&documents);
        let example_vectors = documents
            .iter()
            .map(|document| vectorizer.transform(document))
            .collect();
        debug!(
            examples = corpus.len(),
            vocabulary = vectorizer.vocabulary_len(),
            "intent model fitted"
        );

        Self {
            segmenter,
            corpus,
            vectorizer,
            example_vectors,
            threshold,
        }
    }

    /// The most similar example, or `None` when the corpus is empty.
    pub fn scores(&self, text: &str) -> Option<IntentScore> {
        self.scores_tokens(&self.segmenter.segment(text))
    }

    pub fn scores_tokens(&self, tokens: &[Token]) -> Option<IntentScore> {
        let query = self.vectorizer.transform(&analyze(tokens));
        let mut best: Option<IntentScore> = None;
        for (index, vector) in self.example_vectors.iter().enumerate() {
            let similarity = cosine(&query, vector);
            if best.map_or(true, |current| similarity > current.similarity) {
                best = Some(IntentScore {
                    example_index: index,
                    intent: self.corpus.examples[index].intent,
                    similarity,
                });
            }
        }
        best
    }

    pub fn classify(&self, text: &str) -> Intent {
        self.classify_tokens(&self.segmenter.segment(text))
    }

    /// `Unknown` unless the best similarity reaches the threshold.
    pub fn classify_tokens(&self, tokens: &[Token]) -> Intent {
        match self.scores_tokens(tokens) {
            Some(score) if score.similarity > 0.0 && score.similarity >= self.threshold => {
                debug!(intent = %score.intent, similarity = score.similarity, "intent matched");
                score.intent
            }
            score => {
                debug!(
                    similarity = score.map_or(0.0, |score| score.similarity),
                    threshold = self.threshold,
                    "no intent above threshold"
                );
                Intent::Unknown
            }
        }
    }
}

fn analyze(tokens: &[Token]) -> Vec<String> {
    tokens
        .iter()
        .filter(|token| token.pos != PosTag::Punctuation)
        .map(|token| token.word.clone())
        .collect()
}
