//! Shared identifiers and numeric helpers for ledger-facing types.

/// Identifier of the user owning a ledger.
pub type UserId = u64;

/// Identifier of a single ledger record.
pub type RecordId = u64;

/// Absolute tolerance used when comparing currency amounts for equality.
pub const AMOUNT_EPSILON: f64 = 0.01;

/// Supplies a presentation-ready label for UI or logs.
pub trait Displayable {
    fn display_label(&self) -> String;
}

/// Mean of `total` over `count` items, `0.0` for an empty set.
pub fn average(total: f64, count: usize) -> f64 {
    if count == 0 {
        0.0
    } else {
        total / count as f64
    }
}
