use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};
use rust_decimal::Decimal;

use crate::engine::{
    format_amount, format_one_decimal, format_percentage, AllocationStatus, Breakdown,
    REMAINDER_LABEL,
};
use crate::ui::app::{App, EditTarget, InputMode};
use crate::ui::theme;
use crate::ui::util::{progress_bar, truncate};

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let breakdown = Breakdown::compute(&app.allocation);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(area);

    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4), // Total + currency
            Constraint::Min(4),    // Category list
            Constraint::Length(6), // Allocation summary
        ])
        .split(columns[0]);

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(6), Constraint::Length(5)])
        .split(columns[1]);

    render_amount(f, left[0], app);
    render_categories(f, left[1], app, &breakdown);
    render_allocation(f, left[2], app, &breakdown);
    render_preview(f, right[0], app, &breakdown);
    render_export(f, right[1], &breakdown);
}

fn panel(title: &str) -> Block<'_> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::OVERLAY))
        .title(Span::styled(format!(" {title} "), theme::title_style()))
}

/// Edit buffer when `target` is being edited, else `fallback`.
fn editing_text(app: &App, target: &EditTarget, fallback: String) -> (String, bool) {
    if app.input_mode == InputMode::Editing && app.edit_target.as_ref() == Some(target) {
        (format!("{}▏", app.edit_input), true)
    } else {
        (fallback, false)
    }
}

fn render_amount(f: &mut Frame, area: Rect, app: &App) {
    let currency = app.allocation.currency;
    let (total, editing) = editing_text(
        app,
        &EditTarget::TotalAmount,
        format_amount(app.allocation.total_amount),
    );
    let total_style = if editing {
        Style::default().fg(theme::GREEN).add_modifier(Modifier::BOLD)
    } else {
        theme::amount_style()
    };

    let lines = vec![
        Line::from(vec![
            Span::styled(" Total Amount  ", theme::dim_style()),
            Span::styled(currency.symbol(), theme::amount_style()),
            Span::styled(total, total_style),
            Span::styled("   t edit", theme::dim_style()),
        ]),
        Line::from(vec![
            Span::styled(" Currency      ", theme::dim_style()),
            Span::styled(format!("{currency}"), theme::normal_style()),
            Span::styled("   c change", theme::dim_style()),
        ]),
    ];
    f.render_widget(Paragraph::new(lines).block(panel("Spend Breakdown")), area);
}

fn render_categories(f: &mut Frame, area: Rect, app: &App, breakdown: &Breakdown) {
    let title = format!("Categories ({})", breakdown.lines.len());

    if breakdown.lines.is_empty() {
        let msg = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled("No categories yet", theme::dim_style())),
            Line::from(Span::styled(
                "Press a or use :add <name> <percent>",
                theme::dim_style(),
            )),
        ])
        .centered()
        .block(panel(&title));
        f.render_widget(msg, area);
        return;
    }

    let symbol = app.allocation.currency.symbol();
    let name_width = (area.width as usize).saturating_sub(30).max(8);

    let items: Vec<ListItem> = breakdown
        .lines
        .iter()
        .enumerate()
        .skip(app.category_scroll)
        .take(area.height.saturating_sub(2) as usize)
        .map(|(i, line)| {
            let category = line.category;
            let style = if i == app.category_index {
                theme::selected_style()
            } else if i % 2 == 0 {
                theme::alt_row_style()
            } else {
                theme::normal_style()
            };

            let (name, _) = editing_text(
                app,
                &EditTarget::CategoryName(category.id.clone()),
                category.display_name().to_string(),
            );
            let (pct, _) = editing_text(
                app,
                &EditTarget::CategoryPercentage(category.id.clone()),
                format_percentage(category.percentage),
            );

            ListItem::new(Line::from(vec![
                Span::styled(
                    format!(" {:<name_width$}", truncate(&name, name_width)),
                    style,
                ),
                Span::styled(format!("{pct:>8}%"), style),
                Span::styled(
                    format!("{:>18} ", format!("{symbol}{}", format_amount(line.amount))),
                    style,
                ),
            ]))
        })
        .collect();

    f.render_widget(List::new(items).block(panel(&title)), area);
}

fn status_style(status: AllocationStatus) -> Style {
    match status {
        AllocationStatus::Complete => theme::positive_style(),
        AllocationStatus::Under(_) => theme::warning_style(),
        AllocationStatus::Over(_) => theme::negative_style(),
    }
}

fn render_allocation(f: &mut Frame, area: Rect, app: &App, breakdown: &Breakdown) {
    let style = status_style(breakdown.status);
    let bar_width = (area.width as usize).saturating_sub(4).min(40);
    let symbol = app.allocation.currency.symbol();

    let lines = vec![
        Line::from(vec![
            Span::styled(" Remaining Amount  ", theme::dim_style()),
            Span::styled(
                format!("{symbol}{}", format_amount(breakdown.remainder_amount)),
                theme::amount_style(),
            ),
            Span::styled(
                format!(" ({}%)", format_one_decimal(breakdown.remainder_percentage)),
                theme::dim_style(),
            ),
        ]),
        Line::from(vec![
            Span::styled(" Total Allocation: ", theme::dim_style()),
            Span::styled(
                format!("{}% / 100%", format_percentage(breakdown.total_percentage)),
                style.add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(Span::styled(
            format!(" {}", progress_bar(breakdown.progress(), bar_width)),
            style,
        )),
        Line::from(Span::styled(format!(" {}", breakdown.status.label()), style)),
    ];
    f.render_widget(Paragraph::new(lines).block(panel("Allocation")), area);
}

fn render_preview(f: &mut Frame, area: Rect, app: &App, breakdown: &Breakdown) {
    let symbol = app.allocation.currency.symbol();
    let width = area.width.saturating_sub(4) as usize;

    let row = |label: String, amount: Decimal, style: Style| {
        let amount = format!("{symbol}{}", format_amount(amount));
        let label_width = width.saturating_sub(amount.chars().count() + 1);
        Line::from(vec![
            Span::styled(
                format!(" {:<label_width$}", truncate(&label, label_width)),
                style,
            ),
            Span::styled(amount, style.add_modifier(Modifier::BOLD)),
        ])
    };

    let mut lines = vec![
        row("Total".into(), breakdown.total_amount, theme::header_style()),
        Line::from(""),
    ];

    if breakdown.remainder_percentage > Decimal::ZERO {
        lines.push(row(
            format!(
                "{REMAINDER_LABEL} ({}%)",
                format_one_decimal(breakdown.remainder_percentage)
            ),
            breakdown.remainder_amount,
            theme::positive_style(),
        ));
    }
    for line in &breakdown.lines {
        lines.push(row(
            format!(
                "{} ({}%)",
                line.category.display_name(),
                format_percentage(line.category.percentage)
            ),
            line.amount,
            theme::normal_style(),
        ));
    }

    f.render_widget(Paragraph::new(lines).block(panel("Live Breakdown")), area);
}

fn render_export(f: &mut Frame, area: Rect, breakdown: &Breakdown) {
    let lines = match breakdown.export_gate() {
        Ok(()) => vec![
            Line::from(Span::styled(
                " y copy   x export text   X export CSV",
                theme::normal_style(),
            )),
            Line::from(Span::styled(
                " :export <path>   :export-csv <path>",
                theme::dim_style(),
            )),
        ],
        Err(blocked) => vec![
            Line::from(Span::styled(format!(" {blocked}"), theme::warning_style())),
            Line::from(Span::styled(
                " Copy and export unlock at a complete allocation",
                theme::dim_style(),
            )),
        ],
    };
    f.render_widget(Paragraph::new(lines).block(panel("Export")), area);
}
