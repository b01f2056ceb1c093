use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::{
    cursor, execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Write};

use crate::storage::TransactionStorage;
use crate::store::TransactionStore;
use crate::ui::app::{App, FormField, InputMode, Screen};
use crate::ui::commands;
use crate::ui::util::{scroll_down, scroll_to_bottom, scroll_to_top, scroll_up};

pub(crate) fn as_tui(storage: &mut TransactionStorage) -> Result<()> {
    let mut app = App::new(TransactionStore::new(storage.load()));

    let result = {
        let _guard = TerminalGuard::enter(io::stdout())?;
        Terminal::new(CrosstermBackend::new(io::stdout()))
            .map_err(anyhow::Error::from)
            .and_then(|mut terminal| run_app(&mut terminal, &mut app, storage))
    };

    if let Err(ref e) = result {
        log::error!("TUI exited with error: {e:#}");
        eprintln!("Error: {e:?}");
    }

    result
}

/// Raw mode plus the alternate screen, undone on drop whichever way the TUI
/// exits.
struct TerminalGuard<W: Write> {
    out: W,
    raw_mode: bool,
}

impl<W: Write> TerminalGuard<W> {
    fn enter(out: W) -> Result<Self> {
        enable_raw_mode()?;
        let mut guard = Self {
            out,
            raw_mode: true,
        };
        execute!(guard.out, EnterAlternateScreen)?;
        Ok(guard)
    }
}

impl<W: Write> Drop for TerminalGuard<W> {
    fn drop(&mut self) {
        if self.raw_mode {
            if let Err(e) = disable_raw_mode() {
                log::warn!("Failed to leave raw mode: {e}");
            }
        }
        if let Err(e) = execute!(self.out, LeaveAlternateScreen, cursor::Show) {
            log::warn!("Failed to restore terminal: {e}");
        }
    }
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    storage: &mut TransactionStorage,
) -> Result<()> {
    while app.running {
        terminal.draw(|f| {
            // tab + selector + status + command bars, table borders and header
            let content_height = f.area().height.saturating_sub(7) as usize;
            app.visible_rows = content_height.max(1);
            crate::ui::render::render(f, app);
        })?;

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            handle_key(key, app, storage)?;
        }
    }
    Ok(())
}

pub(crate) fn handle_key(
    key: KeyEvent,
    app: &mut App,
    storage: &mut TransactionStorage,
) -> Result<()> {
    if app.show_help {
        app.show_help = false;
        return Ok(());
    }
    match app.input_mode {
        InputMode::Normal => handle_normal_input(key, app, storage),
        InputMode::Form => {
            handle_form_input(key, app, storage);
            Ok(())
        }
        InputMode::Command => handle_command_input(key, app, storage),
    }
}

// ── Input handlers ───────────────────────────────────────────

fn handle_normal_input(
    key: KeyEvent,
    app: &mut App,
    storage: &mut TransactionStorage,
) -> Result<()> {
    match key.code {
        KeyCode::Char(':') => {
            app.input_mode = InputMode::Command;
            app.command_input.clear();
        }
        KeyCode::Char('q') | KeyCode::Char('c')
            if key.modifiers.contains(KeyModifiers::CONTROL) =>
        {
            app.running = false;
        }
        KeyCode::Char('a') | KeyCode::Char('n') => app.open_form(),
        KeyCode::Char('j') | KeyCode::Down => {
            let len = app.summary.transactions.len();
            scroll_down(
                &mut app.transaction_index,
                &mut app.transaction_scroll,
                len,
                app.visible_rows.max(1),
            );
        }
        KeyCode::Char('k') | KeyCode::Up => {
            scroll_up(&mut app.transaction_index, &mut app.transaction_scroll);
        }
        KeyCode::Char('g') => {
            scroll_to_top(&mut app.transaction_index, &mut app.transaction_scroll);
        }
        KeyCode::Char('G') => {
            let len = app.summary.transactions.len();
            scroll_to_bottom(
                &mut app.transaction_index,
                &mut app.transaction_scroll,
                len,
                app.visible_rows.max(1),
            );
        }
        KeyCode::Char('1') => app.screen = Screen::Dashboard,
        KeyCode::Char('2') => app.screen = Screen::Transactions,
        KeyCode::Tab | KeyCode::BackTab => {
            let screens = Screen::all();
            let idx = screens.iter().position(|s| *s == app.screen).unwrap_or(0);
            let step = if key.code == KeyCode::Tab { 1 } else { screens.len() - 1 };
            app.screen = screens[(idx + step) % screens.len()];
        }
        KeyCode::Char('H') | KeyCode::Char('[') => {
            commands::handle_command("prev-month", app, storage)?;
        }
        KeyCode::Char('L') | KeyCode::Char(']') => {
            commands::handle_command("next-month", app, storage)?;
        }
        KeyCode::Char('?') => {
            app.show_help = true;
        }
        KeyCode::Esc => {
            app.status_message.clear();
        }
        _ => {}
    }
    Ok(())
}

fn handle_form_input(key: KeyEvent, app: &mut App, storage: &mut TransactionStorage) {
    match key.code {
        KeyCode::Enter => {
            app.submit_draft(storage);
        }
        KeyCode::Esc => {
            app.input_mode = InputMode::Normal;
        }
        KeyCode::Tab | KeyCode::Down => {
            app.form_field = app.form_field.next();
        }
        KeyCode::BackTab | KeyCode::Up => {
            app.form_field = app.form_field.prev();
        }
        KeyCode::Left if app.form_field == FormField::Month => {
            app.shift_draft_month(-1);
        }
        KeyCode::Right if app.form_field == FormField::Month => {
            app.shift_draft_month(1);
        }
        KeyCode::Backspace => {
            let field = app.form_field;
            app.field_mut(field).pop();
        }
        KeyCode::Char(c) => {
            let field = app.form_field;
            app.field_mut(field).push(c);
        }
        _ => {}
    }
}

fn handle_command_input(
    key: KeyEvent,
    app: &mut App,
    storage: &mut TransactionStorage,
) -> Result<()> {
    match key.code {
        KeyCode::Enter => {
            let input = app.command_input.clone();
            app.input_mode = InputMode::Normal;
            app.command_input.clear();
            commands::handle_command(&input, app, storage)?;
        }
        KeyCode::Esc => {
            app.input_mode = InputMode::Normal;
            app.command_input.clear();
        }
        KeyCode::Backspace => {
            app.command_input.pop();
            if app.command_input.is_empty() {
                app.input_mode = InputMode::Normal;
            }
        }
        KeyCode::Char(c) => {
            app.command_input.push(c);
        }
        _ => {}
    }
    Ok(())
}

#[cfg(test)]
mod tests;
