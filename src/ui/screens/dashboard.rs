use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::{
        canvas::{Canvas, Points},
        Bar, BarChart, BarGroup, Block, Borders, Paragraph,
    },
    Frame,
};
use rust_decimal::Decimal;

use crate::ui::app::{App, FormField, InputMode};
use crate::ui::chart::{bar_height, pie_slices, rasterize};
use crate::ui::theme;
use crate::ui::util::{format_amount, truncate};

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5), // Form + total
            Constraint::Min(8),    // Charts
        ])
        .split(area);

    let top = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
        .split(chunks[0]);
    render_form(f, top[0], app);
    render_total_card(f, top[1], app);

    let charts = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(chunks[1]);
    render_bar_chart(f, charts[0], app);
    render_pie_chart(f, charts[1], app);
}

fn titled_block(title: &str, focused: bool) -> Block<'static> {
    let border = if focused { theme::ACCENT } else { theme::OVERLAY };
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border))
        .title(Span::styled(format!(" {title} "), theme::title_style()))
}

fn render_form(f: &mut Frame, area: Rect, app: &App) {
    let editing = app.input_mode == InputMode::Form;
    let block = titled_block("Add Transaction", editing);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(30),
            Constraint::Percentage(45),
            Constraint::Percentage(25),
        ])
        .split(inner);

    for (field, col) in FormField::all().iter().zip(columns.iter()) {
        let focused = editing && app.form_field == *field;
        let value = app.field_value(*field);
        let label_style = if focused {
            Style::default()
                .fg(theme::ACCENT)
                .add_modifier(Modifier::BOLD)
        } else {
            theme::dim_style()
        };
        let value_style = if focused {
            theme::selected_style()
        } else {
            theme::normal_style()
        };
        let shown = truncate(value, col.width.saturating_sub(3) as usize);
        let text = Paragraph::new(vec![
            Line::from(Span::styled(field.label(), label_style)),
            Line::from(Span::styled(format!(" {shown} "), value_style)),
        ]);
        f.render_widget(text, *col);

        if focused {
            let offset = 1 + shown.chars().count() as u16;
            f.set_cursor_position((col.x + offset.min(col.width.saturating_sub(1)), col.y + 1));
        }
    }

    if !editing {
        let hint_area = Rect::new(inner.x, inner.y + inner.height.saturating_sub(1), inner.width, 1);
        f.render_widget(
            Paragraph::new(Span::styled("press a to add", theme::dim_style())).right_aligned(),
            hint_area,
        );
    }
}

fn render_total_card(f: &mut Frame, area: Rect, app: &App) {
    let total = app.summary.total;
    let color = if total < Decimal::ZERO {
        theme::GREEN
    } else {
        theme::RED
    };
    let count = app.summary.transactions.len();
    let categories = app.summary.by_category.len();

    let text = Paragraph::new(vec![
        Line::from(Span::styled(
            format_amount(total),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            format!("{count} txns in {categories} categories"),
            theme::dim_style(),
        )),
    ])
    .centered()
    .block(titled_block(&format!("Total, {}", app.month_label()), false));

    f.render_widget(text, area);
}

fn render_empty_chart(f: &mut Frame, area: Rect, title: &str) {
    let msg = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(
            "No transactions for this month",
            theme::dim_style(),
        )),
    ])
    .centered()
    .block(titled_block(title, false));
    f.render_widget(msg, area);
}

fn render_bar_chart(f: &mut Frame, area: Rect, app: &App) {
    let totals = &app.summary.by_category;
    if totals.is_empty() {
        render_empty_chart(f, area, "By Category");
        return;
    }

    let count = totals.len() as u16;
    let inner_width = area.width.saturating_sub(2);
    let bar_width = (inner_width / count.max(1)).saturating_sub(1).clamp(3, 12);

    let bars: Vec<Bar> = totals
        .iter()
        .enumerate()
        .map(|(i, (name, amt))| {
            Bar::default()
                .value(bar_height(amt))
                .text_value(format_amount(amt))
                .label(Line::from(truncate(name, bar_width as usize)))
                .style(Style::default().fg(theme::palette_color(i)))
                .value_style(
                    Style::default()
                        .fg(theme::HEADER_BG)
                        .bg(theme::palette_color(i))
                        .add_modifier(Modifier::BOLD),
                )
        })
        .collect();

    let chart = BarChart::default()
        .block(titled_block("By Category", false))
        .data(BarGroup::default().bars(&bars))
        .bar_width(bar_width)
        .bar_gap(1);

    f.render_widget(chart, area);
}

fn render_pie_chart(f: &mut Frame, area: Rect, app: &App) {
    let slices = pie_slices(&app.summary.by_category);
    if slices.is_empty() {
        render_empty_chart(f, area, "Share");
        return;
    }

    let block = titled_block("Share", false);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let parts = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(inner);
    let pie_area = parts[0];

    // Braille cells are 2x4 dots; widen x so the disc stays round.
    let dots_wide = f64::from(pie_area.width.max(1)) * 2.0;
    let dots_high = f64::from(pie_area.height.max(1)) * 4.0;
    let (x_extent, y_extent) = if dots_wide >= dots_high {
        (dots_wide / dots_high, 1.0)
    } else {
        (1.0, dots_high / dots_wide)
    };
    let steps = (usize::from(pie_area.height.min(pie_area.width)) * 4).clamp(8, 160);
    let layers = rasterize(&slices, steps);

    let canvas = Canvas::default()
        .marker(Marker::Braille)
        .x_bounds([-x_extent, x_extent])
        .y_bounds([-y_extent, y_extent])
        .paint(|ctx| {
            for (slice, points) in slices.iter().zip(layers.iter()) {
                ctx.draw(&Points {
                    coords: points,
                    color: theme::palette_color(slice.index),
                });
            }
        });
    f.render_widget(canvas, pie_area);

    let label_width = usize::from(parts[1].width.saturating_sub(9));
    let legend: Vec<Line> = slices
        .iter()
        .flat_map(|s| {
            [
                Line::from(vec![
                    Span::styled("■ ", Style::default().fg(theme::palette_color(s.index))),
                    Span::styled(truncate(&s.label, label_width), theme::normal_style()),
                    Span::styled(
                        format!(" {:>3.0}%", s.fraction() * 100.0),
                        theme::dim_style(),
                    ),
                ]),
                Line::from(Span::styled(
                    format!("  {}", format_amount(s.amount)),
                    theme::dim_style(),
                )),
            ]
        })
        .collect();
    f.render_widget(Paragraph::new(legend), parts[1]);
}
