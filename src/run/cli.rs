use anyhow::Result;
use std::io::Write;

use crate::aggregate::{distinct_months, MonthSummary};
use crate::config::Command;
use crate::models::{current_month, TransactionDraft};
use crate::storage::TransactionStorage;
use crate::store::TransactionStore;
use crate::ui::util::format_amount;

pub(crate) fn as_cli(command: Command, storage: &mut TransactionStorage) -> Result<()> {
    let mut out = std::io::stdout().lock();
    run_command(command, storage, &mut out)
}

pub(crate) fn run_command(
    command: Command,
    storage: &mut TransactionStorage,
    out: &mut impl Write,
) -> Result<()> {
    match command {
        Command::Add {
            amount,
            category,
            month,
        } => cli_add(&amount, &category, month, storage, out),
        Command::Summary { month } => cli_summary(month.as_deref().unwrap_or(""), storage, out),
        Command::List { month } => cli_list(month.as_deref().unwrap_or(""), storage, out),
        Command::Months => cli_months(storage, out),
    }
}

fn cli_add(
    amount: &str,
    category: &str,
    month: Option<String>,
    storage: &mut TransactionStorage,
    out: &mut impl Write,
) -> Result<()> {
    let month = month.unwrap_or_else(current_month);
    if !crate::ui::util::is_month_key(&month) {
        anyhow::bail!("Invalid month '{month}'. Use YYYY-MM (e.g. 2024-05)");
    }

    let mut store = TransactionStore::new(storage.load());
    let draft = TransactionDraft::new(amount, category, month);
    let Some(txn) = store.append(&draft) else {
        anyhow::bail!("Amount must be a number and category must not be empty");
    };
    let message = format!(
        "Added {} to {} for {}",
        format_amount(txn.amount),
        txn.category,
        txn.date
    );
    storage.save(store.transactions())?;
    writeln!(out, "{message}")?;
    Ok(())
}

fn month_title(month: &str) -> &str {
    if month.is_empty() {
        "All months"
    } else {
        month
    }
}

fn cli_summary(month: &str, storage: &TransactionStorage, out: &mut impl Write) -> Result<()> {
    let txns = storage.load();
    let summary = MonthSummary::compute(Some(txns.as_slice()), month);

    writeln!(out, "SpendTUI — {}", month_title(month))?;
    writeln!(out, "{}", "─".repeat(40))?;
    writeln!(out, "  Total:        {}", format_amount(summary.total))?;
    writeln!(out, "  Transactions: {}", summary.transactions.len())?;

    if !summary.by_category.is_empty() {
        writeln!(out)?;
        writeln!(out, "By Category:")?;
        for (name, amount) in summary.by_category.iter() {
            writeln!(out, "  {name:<24} {:>14}", format_amount(amount))?;
        }
    }
    Ok(())
}

fn cli_list(month: &str, storage: &TransactionStorage, out: &mut impl Write) -> Result<()> {
    let txns = storage.load();
    let summary = MonthSummary::compute(Some(txns.as_slice()), month);
    if summary.transactions.is_empty() {
        writeln!(out, "No transactions for {}", month_title(month))?;
        return Ok(());
    }

    writeln!(out, "{:<16} {:<8} {:<24} {:>14}", "ID", "Month", "Category", "Amount")?;
    writeln!(out, "{}", "─".repeat(65))?;
    for txn in &summary.transactions {
        writeln!(
            out,
            "{:<16} {:<8} {:<24} {:>14}",
            txn.id,
            txn.date,
            txn.category,
            format_amount(txn.amount)
        )?;
    }
    Ok(())
}

fn cli_months(storage: &TransactionStorage, out: &mut impl Write) -> Result<()> {
    let txns = storage.load();
    let months = distinct_months(Some(txns.as_slice()));
    if months.is_empty() {
        writeln!(out, "No transactions")?;
        return Ok(());
    }
    for month in months {
        writeln!(out, "{month}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests;
