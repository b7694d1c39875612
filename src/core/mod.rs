//! The query pipeline: segmentation, intent classification, slot
//! extraction, and dispatch to per-intent handlers.

pub mod classifier;
pub mod dispatcher;
pub mod extractors;
pub mod handlers;
pub mod parser;
pub mod segmenter;
pub mod service;
pub mod time;

pub use classifier::{IntentClassifier, IntentCorpus, IntentExample, IntentScore};
pub use dispatcher::QueryDispatcher;
pub use parser::QueryParser;
pub use segmenter::{LexiconEntry, Segmenter};
pub use service::BillQueryService;
pub use time::{Clock, FixedClock, SystemClock};
