//! Slot extractors. Each one turns query text (or its tokens) into a typed
//! slot and falls back to the slot's empty state instead of failing.

pub mod amount;
pub mod category;
pub mod merchant;
pub mod time;

pub use amount::AmountExtractor;
pub use category::CategoryExtractor;
pub use merchant::MerchantExtractor;
pub use time::TimeExtractor;
