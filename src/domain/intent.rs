use std::fmt;

use serde::{Deserialize, Serialize};

/// The coarse kind of question a query asks. `Unknown` is the explicit
/// "no confident match" state, not an error.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Intent {
    #[serde(rename = "query_amount")]
    TotalAmount,
    #[serde(rename = "query_category")]
    CategoryAmount,
    #[serde(rename = "query_time")]
    TimeAmount,
    #[serde(rename = "query_merchant")]
    MerchantAmount,
    #[serde(rename = "query_trend")]
    Trend,
    #[serde(rename = "query_comparison")]
    Comparison,
    #[serde(rename = "unknown")]
    Unknown,
}

impl Intent {
    pub const ALL: [Intent; 7] = [
        Intent::TotalAmount,
        Intent::CategoryAmount,
        Intent::TimeAmount,
        Intent::MerchantAmount,
        Intent::Trend,
        Intent::Comparison,
        Intent::Unknown,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            Intent::TotalAmount => "query_amount",
            Intent::CategoryAmount => "query_category",
            Intent::TimeAmount => "query_time",
            Intent::MerchantAmount => "query_merchant",
            Intent::Trend => "query_trend",
            Intent::Comparison => "query_comparison",
            Intent::Unknown => "unknown",
        }
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
