use crate::aggregate::{distinct_months, MonthSummary};
use crate::models::TransactionDraft;
use crate::storage::TransactionStorage;
use crate::store::TransactionStore;

use super::util::{scroll_to_top, shift_month};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Screen {
    Dashboard,
    Transactions,
}

impl Screen {
    pub(crate) fn all() -> &'static [Screen] {
        &[Self::Dashboard, Self::Transactions]
    }
}

impl std::fmt::Display for Screen {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Dashboard => write!(f, "Dashboard"),
            Self::Transactions => write!(f, "Transactions"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum InputMode {
    Normal,
    Form,
    Command,
}

impl std::fmt::Display for InputMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Normal => write!(f, "NORMAL"),
            Self::Form => write!(f, "ADD"),
            Self::Command => write!(f, "COMMAND"),
        }
    }
}

/// Focused field of the add form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FormField {
    Amount,
    Category,
    Month,
}

impl FormField {
    pub(crate) fn all() -> &'static [FormField] {
        &[Self::Amount, Self::Category, Self::Month]
    }

    pub(crate) fn next(self) -> Self {
        match self {
            Self::Amount => Self::Category,
            Self::Category => Self::Month,
            Self::Month => Self::Amount,
        }
    }

    pub(crate) fn prev(self) -> Self {
        match self {
            Self::Amount => Self::Month,
            Self::Category => Self::Amount,
            Self::Month => Self::Category,
        }
    }

    pub(crate) fn label(self) -> &'static str {
        match self {
            Self::Amount => "Amount",
            Self::Category => "Category",
            Self::Month => "Month",
        }
    }
}

pub(crate) struct App {
    pub(crate) running: bool,
    pub(crate) screen: Screen,
    pub(crate) input_mode: InputMode,
    pub(crate) command_input: String,
    pub(crate) status_message: String,
    pub(crate) show_help: bool,

    pub(crate) store: TransactionStore,

    // Month filter; empty means every month
    pub(crate) month_filter: String,
    pub(crate) months: Vec<String>,
    pub(crate) summary: MonthSummary,

    // Add form
    pub(crate) draft: TransactionDraft,
    pub(crate) form_field: FormField,

    // Transactions list
    pub(crate) transaction_index: usize,
    pub(crate) transaction_scroll: usize,

    // Layout (updated each render frame)
    pub(crate) visible_rows: usize,
}

impl App {
    pub(crate) fn new(store: TransactionStore) -> Self {
        let mut app = Self {
            running: true,
            screen: Screen::Dashboard,
            input_mode: InputMode::Normal,
            command_input: String::new(),
            status_message: String::new(),
            show_help: false,

            store,

            month_filter: String::new(),
            months: Vec::new(),
            summary: MonthSummary::default(),

            draft: TransactionDraft::default(),
            form_field: FormField::Amount,

            transaction_index: 0,
            transaction_scroll: 0,

            visible_rows: 20,
        };
        app.refresh();
        app
    }

    /// Recompute everything derived from the store and the month filter.
    pub(crate) fn refresh(&mut self) {
        let txns = Some(self.store.transactions());
        self.months = distinct_months(txns);
        self.summary = MonthSummary::compute(txns, &self.month_filter);

        let len = self.summary.transactions.len();
        if self.transaction_index >= len {
            self.transaction_index = len.saturating_sub(1);
        }
        if self.transaction_scroll > self.transaction_index {
            self.transaction_scroll = self.transaction_index;
        }
    }

    /// Selector entries: "" (all months) followed by every month in the history.
    pub(crate) fn month_options(&self) -> Vec<&str> {
        std::iter::once("")
            .chain(self.months.iter().map(String::as_str))
            .collect()
    }

    pub(crate) fn set_month_filter(&mut self, month: &str) {
        self.month_filter = month.to_string();
        scroll_to_top(&mut self.transaction_index, &mut self.transaction_scroll);
        self.refresh();
    }

    /// Step through the selector options, wrapping at either end.
    pub(crate) fn cycle_month(&mut self, delta: isize) {
        let options = self.month_options();
        let len = options.len() as isize;
        let current = options
            .iter()
            .position(|m| *m == self.month_filter)
            .unwrap_or(0) as isize;
        let next = (current + delta).rem_euclid(len) as usize;
        let month = options[next].to_string();
        self.set_month_filter(&month);
    }

    pub(crate) fn month_label(&self) -> &str {
        if self.month_filter.is_empty() {
            "All months"
        } else {
            &self.month_filter
        }
    }

    pub(crate) fn open_form(&mut self) {
        self.input_mode = InputMode::Form;
        self.form_field = FormField::Amount;
        self.screen = Screen::Dashboard;
    }

    pub(crate) fn field_value(&self, field: FormField) -> &str {
        match field {
            FormField::Amount => &self.draft.amount,
            FormField::Category => &self.draft.category,
            FormField::Month => &self.draft.date,
        }
    }

    pub(crate) fn field_mut(&mut self, field: FormField) -> &mut String {
        match field {
            FormField::Amount => &mut self.draft.amount,
            FormField::Category => &mut self.draft.category,
            FormField::Month => &mut self.draft.date,
        }
    }

    /// Move the month field of the form by `delta` months.
    pub(crate) fn shift_draft_month(&mut self, delta: i32) {
        self.draft.date = shift_month(&self.draft.date, delta);
    }

    /// Append the draft and persist.
    ///
    /// A draft missing its amount or category is ignored without comment.
    /// Returns whether a transaction was added.
    pub(crate) fn submit_draft(&mut self, storage: &mut TransactionStorage) -> bool {
        let Some(txn) = self.store.append(&self.draft) else {
            return false;
        };
        let message = format!(
            "Added {} to {} for {}",
            super::util::format_amount(txn.amount),
            txn.category,
            txn.date
        );
        self.draft.clear();
        self.form_field = FormField::Amount;
        self.persist(storage, message);
        true
    }

    fn persist(&mut self, storage: &mut TransactionStorage, message: String) {
        match storage.save(self.store.transactions()) {
            Ok(()) => self.set_status(message),
            Err(e) => {
                log::error!("Save failed: {e:#}");
                self.set_status(format!("{message} (not saved: {e})"));
            }
        }
        self.refresh();
    }

    pub(crate) fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = msg.into();
    }
}
