use chrono::Local;
use rust_decimal::Decimal;
use std::str::FromStr;

/// Current local month as a "YYYY-MM" key.
pub fn current_month() -> String {
    Local::now().format("%Y-%m").to_string()
}

/// The add-transaction form, as typed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionDraft {
    pub amount: String,
    pub category: String,
    pub date: String,
}

impl Default for TransactionDraft {
    fn default() -> Self {
        Self {
            amount: String::new(),
            category: String::new(),
            date: current_month(),
        }
    }
}

impl TransactionDraft {
    pub fn new(amount: impl Into<String>, category: impl Into<String>, date: impl Into<String>) -> Self {
        Self {
            amount: amount.into(),
            category: category.into(),
            date: date.into(),
        }
    }

    /// The parsed amount, if both presence checks pass and the number can be
    /// stored without changing.
    ///
    /// Category is kept verbatim: no trimming, no case folding.
    pub fn validated_amount(&self) -> Option<Decimal> {
        if self.amount.is_empty() || self.category.is_empty() {
            return None;
        }
        Decimal::from_str(self.amount.trim())
            .ok()
            .filter(|amount| super::amount::survives_json(*amount))
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
