//! Pure derivations over the transaction list: month filter, per-category
//! sums, totals.
//!
//! Inputs are `Option<&[Transaction]>`; `None` is treated as an empty list so
//! callers never need to special-case a store that has not loaded yet.

use rust_decimal::Decimal;
use std::collections::HashMap;

use crate::models::Transaction;

/// Whether `date` falls under the month key `month`.
///
/// An empty key selects everything. Otherwise the date must equal the key or
/// continue it with a `-`, so "2024-1" does not pick up "2024-10".
pub(crate) fn month_matches(date: &str, month: &str) -> bool {
    if month.is_empty() {
        return true;
    }
    match date.strip_prefix(month) {
        Some(rest) => rest.is_empty() || rest.starts_with('-'),
        None => false,
    }
}

pub(crate) fn filter_by_month<'a>(
    transactions: Option<&'a [Transaction]>,
    month: &str,
) -> Vec<&'a Transaction> {
    transactions
        .unwrap_or_default()
        .iter()
        .filter(|t| month_matches(&t.date, month))
        .collect()
}

/// Category label to summed amount, in first-seen order. Sums saturate like
/// [`total_of`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct CategoryTotals {
    entries: Vec<(String, Decimal)>,
    index: HashMap<String, usize>,
}

impl CategoryTotals {
    fn add(&mut self, category: &str, amount: Decimal) {
        match self.index.get(category) {
            Some(&i) => {
                let sum = &mut self.entries[i].1;
                *sum = sum.saturating_add(amount);
            }
            None => {
                self.index.insert(category.to_string(), self.entries.len());
                self.entries.push((category.to_string(), amount));
            }
        }
    }

    #[cfg(test)]
    pub(crate) fn get(&self, category: &str) -> Option<Decimal> {
        self.index.get(category).map(|&i| self.entries[i].1)
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = (&str, Decimal)> {
        self.entries.iter().map(|(name, amt)| (name.as_str(), *amt))
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

pub(crate) fn group_by_category<'a>(
    filtered: impl IntoIterator<Item = &'a Transaction>,
) -> CategoryTotals {
    let mut totals = CategoryTotals::default();
    for txn in filtered {
        totals.add(&txn.category, txn.amount);
    }
    totals
}

/// Sum of `amount`, pinned at `Decimal::MAX`/`MIN` instead of overflowing.
pub(crate) fn total_of<'a>(filtered: impl IntoIterator<Item = &'a Transaction>) -> Decimal {
    filtered
        .into_iter()
        .fold(Decimal::ZERO, |acc, t| acc.saturating_add(t.amount))
}

/// Distinct non-empty `date` values across the whole history, first-seen
/// order. The empty key is the "every month" filter, not a month.
pub(crate) fn distinct_months(transactions: Option<&[Transaction]>) -> Vec<String> {
    let mut months: Vec<String> = Vec::new();
    for txn in transactions.unwrap_or_default() {
        if !txn.date.is_empty() && !months.iter().any(|m| *m == txn.date) {
            months.push(txn.date.clone());
        }
    }
    months
}

/// Everything the views need for one month filter.
#[derive(Debug, Clone, Default)]
pub(crate) struct MonthSummary {
    pub(crate) month: String,
    pub(crate) transactions: Vec<Transaction>,
    pub(crate) by_category: CategoryTotals,
    pub(crate) total: Decimal,
}

impl MonthSummary {
    pub(crate) fn compute(transactions: Option<&[Transaction]>, month: &str) -> Self {
        let filtered = filter_by_month(transactions, month);
        Self {
            month: month.to_string(),
            by_category: group_by_category(filtered.iter().copied()),
            total: total_of(filtered.iter().copied()),
            transactions: filtered.into_iter().cloned().collect(),
        }
    }
}
