use std::collections::HashMap;
use std::sync::LazyLock;

use super::app::{App, InputMode, Screen};
use super::util::is_month_key;
use crate::models::{current_month, TransactionDraft};
use crate::storage::TransactionStorage;

pub(crate) struct Command {
    pub(crate) description: &'static str,
    pub(crate) run: fn(&str, &mut App, &mut TransactionStorage) -> anyhow::Result<()>,
}

macro_rules! register_command {
    ($name:expr, $desc:expr, $func:expr, $registry:expr) => {{
        $registry.insert(
            $name,
            Command {
                description: $desc,
                run: $func,
            },
        );
    }};
}

pub(crate) static COMMANDS: LazyLock<HashMap<&str, Command>> = LazyLock::new(|| {
    let mut r: HashMap<&str, Command> = HashMap::new();

    register_command!("q", "Quit SpendTUI", cmd_quit, r);
    register_command!("quit", "Quit SpendTUI", cmd_quit, r);
    register_command!("d", "Go to Dashboard", cmd_dashboard, r);
    register_command!("dashboard", "Go to Dashboard", cmd_dashboard, r);
    register_command!("t", "Go to Transactions", cmd_transactions, r);
    register_command!("transactions", "Go to Transactions", cmd_transactions, r);
    register_command!("help", "Show available commands", cmd_help, r);
    register_command!("h", "Show available commands", cmd_help, r);
    register_command!(
        "add",
        "Add transaction (e.g. :add 12.50 Groceries 2024-05)",
        cmd_add,
        r
    );
    register_command!("a", "Add transaction (e.g. :a 4.50 Coffee)", cmd_add, r);
    register_command!("new", "Open the add form", cmd_new, r);
    register_command!("month", "Filter by month (e.g. :month 2024-05)", cmd_month, r);
    register_command!("m", "Filter by month (e.g. :m 2024-05)", cmd_month, r);
    register_command!("all", "Show all months", cmd_all, r);
    register_command!("next-month", "Select next month in the list", cmd_next_month, r);
    register_command!("prev-month", "Select previous month in the list", cmd_prev_month, r);

    r
});

pub(crate) fn handle_command(
    input: &str,
    app: &mut App,
    storage: &mut TransactionStorage,
) -> anyhow::Result<()> {
    let trimmed = input.trim();
    let mut parts = trimmed.splitn(2, ' ');
    let cmd_name = parts.next().unwrap_or("");
    let args = parts.next().unwrap_or("").trim();

    if let Some(cmd) = COMMANDS.get(cmd_name) {
        (cmd.run)(args, app, storage)?;
    } else {
        let suggestion = find_closest(cmd_name);
        app.set_status(format!(
            "Unknown command: :{cmd_name}. Did you mean :{suggestion}?"
        ));
    }

    Ok(())
}

fn find_closest(input: &str) -> String {
    COMMANDS
        .keys()
        .filter(|k| k.len() > 1) // skip single-letter aliases for suggestions
        .min_by_key(|k| (levenshtein(input, k), **k))
        .unwrap_or(&"help")
        .to_string()
}

fn levenshtein(a: &str, b: &str) -> usize {
    let (a, b) = (a.as_bytes(), b.as_bytes());
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];

    for i in 1..=a.len() {
        curr[0] = i;
        for j in 1..=b.len() {
            let cost = if a[i - 1] == b[j - 1] { 0 } else { 1 };
            curr[j] = (prev[j] + 1).min(curr[j - 1] + 1).min(prev[j - 1] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

/// Split `:add` arguments into a draft.
///
/// The first token is the amount. A trailing "YYYY-MM" token, when more than
/// two tokens are given, is the month; everything in between is the category.
pub(crate) fn parse_add_args(args: &str) -> TransactionDraft {
    let tokens: Vec<&str> = args.split_whitespace().collect();
    let Some((amount, rest)) = tokens.split_first() else {
        return TransactionDraft::new("", "", current_month());
    };

    let (category_tokens, month) = match rest.split_last() {
        Some((last, init)) if !init.is_empty() && is_month_key(last) => (init, last.to_string()),
        _ => (rest, current_month()),
    };

    TransactionDraft::new(*amount, category_tokens.join(" "), month)
}

// ── Command implementations ──────────────────────────────────

fn cmd_quit(_args: &str, app: &mut App, _storage: &mut TransactionStorage) -> anyhow::Result<()> {
    app.running = false;
    Ok(())
}

fn cmd_dashboard(_args: &str, app: &mut App, _storage: &mut TransactionStorage) -> anyhow::Result<()> {
    app.screen = Screen::Dashboard;
    Ok(())
}

fn cmd_transactions(
    _args: &str,
    app: &mut App,
    _storage: &mut TransactionStorage,
) -> anyhow::Result<()> {
    app.screen = Screen::Transactions;
    Ok(())
}

fn cmd_help(_args: &str, app: &mut App, _storage: &mut TransactionStorage) -> anyhow::Result<()> {
    app.show_help = true;
    Ok(())
}

fn cmd_new(_args: &str, app: &mut App, _storage: &mut TransactionStorage) -> anyhow::Result<()> {
    app.open_form();
    Ok(())
}

fn cmd_add(args: &str, app: &mut App, storage: &mut TransactionStorage) -> anyhow::Result<()> {
    if args.is_empty() {
        app.set_status("Usage: :add <amount> <category> [YYYY-MM]");
        return Ok(());
    }

    // The command line stands in for the form; the form keeps its own draft.
    let typed = std::mem::replace(&mut app.draft, parse_add_args(args));
    let added = app.submit_draft(storage);
    if !added {
        app.set_status("Usage: :add <amount> <category> [YYYY-MM]");
    }
    app.draft = typed;
    app.input_mode = InputMode::Normal;
    Ok(())
}

fn cmd_month(args: &str, app: &mut App, _storage: &mut TransactionStorage) -> anyhow::Result<()> {
    if args.is_empty() {
        app.set_month_filter("");
        app.set_status("Showing all months");
        return Ok(());
    }

    if is_month_key(args) {
        app.set_month_filter(args);
        app.set_status(format!("Switched to month: {args}"));
    } else {
        app.set_status("Invalid month format. Use YYYY-MM (e.g. 2024-05)");
    }
    Ok(())
}

fn cmd_all(_args: &str, app: &mut App, _storage: &mut TransactionStorage) -> anyhow::Result<()> {
    app.set_month_filter("");
    app.set_status("Showing all months");
    Ok(())
}

fn cmd_next_month(
    _args: &str,
    app: &mut App,
    _storage: &mut TransactionStorage,
) -> anyhow::Result<()> {
    app.cycle_month(1);
    let label = app.month_label().to_string();
    app.set_status(format!("Month: {label}"));
    Ok(())
}

fn cmd_prev_month(
    _args: &str,
    app: &mut App,
    _storage: &mut TransactionStorage,
) -> anyhow::Result<()> {
    app.cycle_month(-1);
    let label = app.month_label().to_string();
    app.set_status(format!("Month: {label}"));
    Ok(())
}
