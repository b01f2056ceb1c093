use std::sync::Arc;

use crate::models::{Transaction, TransactionDraft};

/// Ordered, append-only list of transactions.
///
/// Every append swaps in a new `Arc`, so snapshots handed out earlier keep
/// seeing the list as it was.
#[derive(Debug, Clone, Default)]
pub(crate) struct TransactionStore {
    transactions: Arc<Vec<Transaction>>,
}

impl TransactionStore {
    pub(crate) fn new(transactions: Vec<Transaction>) -> Self {
        Self {
            transactions: Arc::new(transactions),
        }
    }

    pub(crate) fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    #[cfg(test)]
    pub(crate) fn snapshot(&self) -> Arc<Vec<Transaction>> {
        Arc::clone(&self.transactions)
    }

    pub(crate) fn len(&self) -> usize {
        self.transactions.len()
    }

    /// Append a transaction built from `draft`.
    ///
    /// Returns `None` and leaves the store untouched when the amount or
    /// category is empty, or the amount is not a number.
    pub(crate) fn append(&mut self, draft: &TransactionDraft) -> Option<&Transaction> {
        self.append_at(draft, chrono::Utc::now().timestamp_millis())
    }

    pub(crate) fn append_at(&mut self, draft: &TransactionDraft, now_ms: i64) -> Option<&Transaction> {
        let Some(amount) = draft.validated_amount() else {
            log::debug!("Rejected draft with empty or invalid amount/category");
            return None;
        };

        let id = match self.transactions.last() {
            Some(last) if last.id >= now_ms => last.id + 1,
            _ => now_ms,
        };
        let txn = Transaction::new(id, amount, draft.category.clone(), draft.date.clone());

        let mut next = Vec::with_capacity(self.transactions.len() + 1);
        next.extend_from_slice(&self.transactions);
        next.push(txn);
        self.transactions = Arc::new(next);

        log::info!("Appended transaction {id}");
        self.transactions.last()
    }
}
