//! Ledger records as exposed by the ledger collaborator.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::{
    category::{Category, PaymentMethod},
    common::{Displayable, RecordId, UserId},
};

/// A single spending entry. Owned by the ledger; the query core only reads it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LedgerRecord {
    pub id: RecordId,
    pub user_id: UserId,
    pub timestamp: NaiveDateTime,
    pub amount: f64,
    pub merchant: String,
    pub category: Category,
    #[serde(default)]
    pub payment_method: PaymentMethod,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl LedgerRecord {
    pub fn new(
        id: RecordId,
        user_id: UserId,
        timestamp: NaiveDateTime,
        amount: f64,
        merchant: impl Into<String>,
        category: Category,
    ) -> Self {
        Self {
            id,
            user_id,
            timestamp,
            amount,
            merchant: merchant.into(),
            category,
            payment_method: PaymentMethod::default(),
            description: None,
        }
    }

    pub fn with_payment_method(mut self, method: PaymentMethod) -> Self {
        self.payment_method = method;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Substring match of the merchant name, mirroring `LIKE %needle%`.
    pub fn merchant_contains(&self, needle: &str) -> bool {
        self.merchant.contains(needle)
    }
}

impl Displayable for LedgerRecord {
    fn display_label(&self) -> String {
        format!(
            "{} {} {:.2} ({})",
            self.timestamp.format("%Y-%m-%d %H:%M"),
            self.merchant,
            self.amount,
            self.category
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn serialized_record_uses_chinese_labels() {
        let timestamp = NaiveDate::from_ymd_opt(2024, 5, 20)
            .unwrap()
            .and_hms_opt(8, 30, 0)
            .unwrap();
        let record = LedgerRecord::new(1, 1, timestamp, 32.0, "星巴克", Category::Dining)
            .with_payment_method(PaymentMethod::WeChat);
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["category"], "餐饮");
        assert_eq!(json["payment_method"], "微信");
        assert!(json.get("description").is_none());
        assert_eq!(record.display_label(), "2024-05-20 08:30 星巴克 32.00 (餐饮)");
    }
}
