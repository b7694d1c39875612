//! Value types of the query core: ledger records, slots, parsed queries and
//! results.

pub mod aggregate;
pub mod category;
pub mod common;
pub mod intent;
pub mod query;
pub mod record;
pub mod result;
pub mod slots;
pub mod token;

pub use aggregate::{AmountCount, CategoryTotal, MonthlyTotal};
pub use category::{Category, PaymentMethod, UnknownLabel};
pub use common::{average, Displayable, RecordId, UserId, AMOUNT_EPSILON};
pub use intent::Intent;
pub use query::ParsedQuery;
pub use record::LedgerRecord;
pub use result::{
    AppliedFilters, CategoryAmountResult, ComparisonResult, GeneralResult, MerchantAmountResult,
    PeriodTotals, QueryResult, TimeAmountResult, TotalAmountResult, TrendResult,
};
pub use slots::{
    AmountConstraint, AmountOperator, AmountSlot, CategorySlot, MerchantSlot, TimeSlot,
    TimeSlotKind, TimeWindow, TimeWindowError,
};
pub use token::{PosTag, Token};
