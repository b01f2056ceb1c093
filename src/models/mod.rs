mod amount;
mod draft;
mod transaction;

pub use draft::{current_month, TransactionDraft};
pub use transaction::Transaction;
