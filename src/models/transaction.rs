use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A single recorded expense.
///
/// Field order is the persisted JSON key order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: i64,
    #[serde(with = "super::amount")]
    pub amount: Decimal,
    pub category: String,
    /// Format: "YYYY-MM"
    pub date: String,
}

impl Transaction {
    pub fn new(id: i64, amount: Decimal, category: String, date: String) -> Self {
        Self {
            id,
            amount,
            category,
            date,
        }
    }

    pub fn is_negative(&self) -> bool {
        self.amount < Decimal::ZERO
    }
}
