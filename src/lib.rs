#![doc(test(attr(deny(warnings))))]

//! Bill Query interprets free-text spending questions ("上个月在星巴克花了多少")
//! and answers them from a read-only ledger of expense records.
//!
//! ```
//! use std::sync::Arc;
//!
//! use bill_query::{
//!     config::QueryConfig,
//!     core::{BillQueryService, SystemClock},
//!     domain::Intent,
//!     ledger::InMemoryLedger,
//! };
//!
//! let service = BillQueryService::new(
//!     QueryConfig::default(),
//!     Arc::new(InMemoryLedger::new()),
//!     Arc::new(SystemClock),
//! );
//! let parsed = service.parse_query("消费趋势");
//! assert_eq!(parsed.intent, Intent::Trend);
//! ```

pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod errors;
pub mod ledger;
pub mod utils;

pub use crate::core::{BillQueryService, QueryDispatcher, QueryParser};
pub use domain::{Intent, ParsedQuery, QueryResult};
pub use errors::{QueryError, QueryOutcome};

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Bill Query tracing initialized.");
    });
}
