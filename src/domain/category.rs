//! Fixed spending categories and payment methods carried by ledger records.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// Closed set of spending categories a ledger record can belong to.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    #[serde(rename = "餐饮")]
    Dining,
    #[serde(rename = "交通")]
    Transport,
    #[serde(rename = "购物")]
    Shopping,
    #[serde(rename = "娱乐")]
    Entertainment,
    #[serde(rename = "医疗")]
    Medical,
    #[serde(rename = "教育")]
    Education,
    #[serde(rename = "其他")]
    Other,
}

impl Category {
    pub const ALL: [Category; 7] = [
        Category::Dining,
        Category::Transport,
        Category::Shopping,
        Category::Entertainment,
        Category::Medical,
        Category::Education,
        Category::Other,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Category::Dining => "餐饮",
            Category::Transport => "交通",
            Category::Shopping => "购物",
            Category::Entertainment => "娱乐",
            Category::Medical => "医疗",
            Category::Education => "教育",
            Category::Other => "其他",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|category| category.label() == label.trim())
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Error returned when a label does not name a known category or method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownLabel(pub String);

impl fmt::Display for UnknownLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown label `{}`", self.0)
    }
}

impl std::error::Error for UnknownLabel {}

impl FromStr for Category {
    type Err = UnknownLabel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_label(s).ok_or_else(|| UnknownLabel(s.to_string()))
    }
}

/// How a ledger record was paid.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PaymentMethod {
    #[serde(rename = "微信")]
    WeChat,
    #[serde(rename = "支付宝")]
    Alipay,
    #[serde(rename = "银行卡")]
    BankCard,
    #[serde(rename = "现金")]
    Cash,
    #[serde(rename = "其他")]
    Other,
}

impl PaymentMethod {
    pub const ALL: [PaymentMethod; 5] = [
        PaymentMethod::WeChat,
        PaymentMethod::Alipay,
        PaymentMethod::BankCard,
        PaymentMethod::Cash,
        PaymentMethod::Other,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            PaymentMethod::WeChat => "微信",
            PaymentMethod::Alipay => "支付宝",
            PaymentMethod::BankCard => "银行卡",
            PaymentMethod::Cash => "现金",
            PaymentMethod::Other => "其他",
        }
    }
}

impl Default for PaymentMethod {
    fn default() -> Self {
        PaymentMethod::Other
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for PaymentMethod {
    type Err = UnknownLabel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|method| method.label() == s.trim())
            .ok_or_else(|| UnknownLabel(s.to_string()))
    }
}
