use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Tabs},
    Frame,
};

use super::app::{App, InputMode, Screen};
use super::commands;
use super::theme;

pub(crate) fn render(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Tab bar
            Constraint::Length(1), // Month selector
            Constraint::Min(5),    // Main content
            Constraint::Length(1), // Status bar
            Constraint::Length(1), // Command bar
        ])
        .split(f.area());

    render_tab_bar(f, chunks[0], app);
    render_month_selector(f, chunks[1], app);
    render_screen(f, chunks[2], app);
    render_status_bar(f, chunks[3], app);
    render_command_bar(f, chunks[4], app);

    if app.show_help {
        render_help_overlay(f, f.area());
    }
}

fn render_tab_bar(f: &mut Frame, area: Rect, app: &App) {
    let screens = Screen::all();
    let titles = screens
        .iter()
        .enumerate()
        .map(|(i, s)| Line::from(format!("{}:{s}", i + 1)));
    let selected = screens.iter().position(|s| *s == app.screen).unwrap_or(0);

    let tabs = Tabs::new(titles)
        .select(selected)
        .style(Style::default().fg(theme::TEXT_DIM).bg(theme::HEADER_BG))
        .highlight_style(
            Style::default()
                .fg(theme::ACCENT)
                .add_modifier(Modifier::BOLD),
        )
        .divider(Span::styled(" | ", Style::default().fg(theme::OVERLAY)));

    f.render_widget(tabs, area);
}

/// "Month:" followed by every selectable month, the active one highlighted.
fn render_month_selector(f: &mut Frame, area: Rect, app: &App) {
    let mut spans = vec![Span::styled(" Month: ", theme::dim_style())];
    for (i, month) in app.month_options().into_iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" ", theme::dim_style()));
        }
        let label = if month.is_empty() { "All" } else { month };
        let style = if month == app.month_filter {
            theme::selected_style().add_modifier(Modifier::BOLD)
        } else {
            theme::normal_style()
        };
        spans.push(Span::styled(format!(" {label} "), style));
    }

    let selector = Paragraph::new(Line::from(spans)).style(Style::default().bg(theme::HEADER_BG));
    f.render_widget(selector, area);
}

fn render_screen(f: &mut Frame, area: Rect, app: &App) {
    match app.screen {
        Screen::Dashboard => super::screens::dashboard::render(f, area, app),
        Screen::Transactions => super::screens::transactions::render(f, area, app),
    }
}

fn render_status_bar(f: &mut Frame, area: Rect, app: &App) {
    let mode_label = format!(" {} ", app.input_mode);
    let mode_bg = match app.input_mode {
        InputMode::Normal => theme::ACCENT,
        InputMode::Form => theme::YELLOW,
        InputMode::Command => theme::GREEN,
    };
    let mode_style = Style::default()
        .fg(theme::HEADER_BG)
        .bg(mode_bg)
        .add_modifier(Modifier::BOLD);

    let info = format!(
        " {} | {} | {} txns",
        app.screen,
        app.month_label(),
        app.store.len()
    );

    let right = match app.input_mode {
        InputMode::Form => " Tab next field | Left/Right month | Enter add | Esc done ",
        _ => match app.screen {
            Screen::Dashboard => " a add | H/L month | ? help ",
            Screen::Transactions => " j/k move | H/L month | ? help ",
        },
    };

    let available = area.width as usize;
    let used = mode_label.len() + info.chars().count() + right.len();
    let pad = available.saturating_sub(used);

    let bar = Paragraph::new(Line::from(vec![
        Span::styled(&mode_label, mode_style),
        Span::styled(&info, theme::status_bar_style()),
        Span::styled(" ".repeat(pad), theme::status_bar_style()),
        Span::styled(right, theme::status_bar_style()),
    ]));
    f.render_widget(bar, area);
}

fn render_command_bar(f: &mut Frame, area: Rect, app: &App) {
    let (content, cursor_offset) = match app.input_mode {
        InputMode::Command => (
            Line::from(vec![
                Span::styled(":", Style::default().fg(theme::ACCENT)),
                Span::styled(&app.command_input, theme::command_bar_style()),
            ]),
            Some(1 + app.command_input.chars().count() as u16),
        ),
        InputMode::Normal | InputMode::Form => (
            if app.status_message.is_empty() {
                Line::from(Span::styled(
                    " Press a to add, : for commands, ? for help",
                    theme::dim_style(),
                ))
            } else {
                Line::from(Span::styled(
                    &app.status_message,
                    theme::command_bar_style(),
                ))
            },
            None,
        ),
    };

    let bar = Paragraph::new(content).style(Style::default().bg(theme::COMMAND_BG));
    f.render_widget(bar, area);

    if let Some(offset) = cursor_offset {
        f.set_cursor_position((area.x + offset, area.y));
    }
}

const KEY_HELP: &[(&str, &[(&str, &str)])] = &[
    (
        "Navigation",
        &[
            ("j/k, Up/Down", "Move cursor"),
            ("g/G", "Top/Bottom"),
            ("H/L, [/]", "Prev/Next month"),
            ("1-2, Tab", "Switch screen"),
            ("Ctrl-q", "Quit"),
        ],
    ),
    (
        "Add form",
        &[
            ("a", "Open form"),
            ("Tab/S-Tab", "Next/Prev field"),
            ("Left/Right", "Change month"),
            ("Enter", "Add transaction"),
            ("Esc", "Leave form"),
        ],
    ),
];

/// Long command names with their descriptions, one line per command.
fn command_help() -> Vec<(&'static str, &'static str)> {
    let mut lines: Vec<(&str, &str)> = commands::COMMANDS
        .iter()
        .filter(|(name, _)| name.len() > 2)
        .map(|(&name, cmd)| (name, cmd.description))
        .collect();
    lines.sort_unstable();
    lines
}

fn help_lines() -> Vec<Line<'static>> {
    let heading = Style::default()
        .fg(theme::YELLOW)
        .add_modifier(Modifier::BOLD);
    let mut lines = vec![
        Line::from(Span::styled(" SpendTUI Help ", theme::title_style())),
        Line::from(""),
    ];

    for (section, keys) in KEY_HELP {
        lines.push(Line::from(Span::styled(format!(" {section}"), heading)));
        lines.extend(keys.iter().map(|(key, action)| {
            Line::from(vec![
                Span::styled(format!("  {key:<14}"), Style::default().fg(theme::ACCENT)),
                Span::styled(*action, theme::normal_style()),
            ])
        }));
        lines.push(Line::from(""));
    }

    lines.push(Line::from(Span::styled(" Commands", heading)));
    lines.extend(command_help().into_iter().map(|(name, desc)| {
        Line::from(vec![
            Span::styled(format!("  :{name:<13}"), Style::default().fg(theme::ACCENT)),
            Span::styled(desc, theme::normal_style()),
        ])
    }));
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        " Press any key to close ",
        theme::dim_style(),
    )));
    lines
}

fn render_help_overlay(f: &mut Frame, area: Rect) {
    let lines = help_lines();
    let height = (lines.len() as u16 + 2).min(area.height.saturating_sub(2));
    let width = 64.min(area.width.saturating_sub(4));
    let popup = Rect::new(
        area.x + area.width.saturating_sub(width) / 2,
        area.y + area.height.saturating_sub(height) / 2,
        width,
        height,
    );

    f.render_widget(Clear, popup);
    f.render_widget(
        Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme::ACCENT))
                .style(Style::default().bg(theme::HEADER_BG)),
        ),
        popup,
    );
}
