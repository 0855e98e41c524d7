use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

use crate::engine::{format_money, format_one_decimal, has_profit_data, ProfitSummary};
use crate::models::ProfitField;
use crate::ui::app::{App, EditTarget, InputMode};
use crate::ui::theme;

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    render_inputs(f, columns[0], app);

    if has_profit_data(&app.profit) {
        render_results(f, columns[1], app);
    } else {
        render_empty(f, columns[1]);
    }
}

fn render_inputs(f: &mut Frame, area: Rect, app: &App) {
    let currency = app.profit.currency;
    let mut items: Vec<ListItem> = ProfitField::all()
        .iter()
        .enumerate()
        .map(|(i, field)| {
            let editing = app.input_mode == InputMode::Editing
                && app.edit_target == Some(EditTarget::Profit(*field));
            let value = if editing {
                format!("{}{}▏", currency.symbol(), app.edit_input)
            } else {
                format_money(app.profit.get(*field), currency)
            };
            let style = if i == app.profit_field_index {
                theme::selected_style()
            } else {
                theme::normal_style()
            };
            ListItem::new(Line::from(vec![
                Span::styled(format!(" {:<22}", field.label()), style),
                Span::styled(format!("{value:>16} "), style),
            ]))
        })
        .collect();

    items.push(ListItem::new(""));
    items.push(ListItem::new(Line::from(vec![
        Span::styled(format!(" {:<22}", "Currency"), theme::dim_style()),
        Span::styled(format!("{currency}"), theme::normal_style()),
    ])));
    items.push(ListItem::new(""));
    items.push(ListItem::new(Span::styled(
        " Enter edit   c currency   C clear",
        theme::dim_style(),
    )));

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::OVERLAY))
            .title(Span::styled(" Profit Margin Calculator ", theme::title_style())),
    );
    f.render_widget(list, area);
}

fn render_results(f: &mut Frame, area: Rect, app: &App) {
    let currency = app.profit.currency;
    let summary = ProfitSummary::compute(&app.profit);
    let profit_style = if summary.is_profitable() {
        theme::positive_style()
    } else {
        theme::negative_style()
    };

    let mut lines = vec![
        Line::from(vec![
            Span::styled(format!(" {:<20}", "Profit"), theme::dim_style()),
            Span::styled(
                format_money(summary.profit, currency),
                profit_style.add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(vec![
            Span::styled(format!(" {:<20}", "Profit Margin"), theme::dim_style()),
            Span::styled(
                format!("{}%", format_one_decimal(summary.margin)),
                profit_style.add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(vec![
            Span::styled(format!(" {:<20}", "Total Cost"), theme::dim_style()),
            Span::styled(format_money(summary.total_cost, currency), theme::normal_style()),
        ]),
    ];

    let suggestions = summary.suggestions();
    if !suggestions.is_empty() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            " Suggested Prices",
            Style::default()
                .fg(theme::YELLOW)
                .add_modifier(Modifier::BOLD),
        )));
        for (margin, price) in suggestions {
            lines.push(Line::from(vec![
                Span::styled(format!("  {:<19}", format!("{margin}% margin")), theme::dim_style()),
                Span::styled(format_money(price, currency), theme::amount_style()),
            ]));
        }
    }

    let results = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::OVERLAY))
            .title(Span::styled(" Results ", theme::title_style())),
    );
    f.render_widget(results, area);
}

fn render_empty(f: &mut Frame, area: Rect) {
    let msg = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(
            "Enter a cost or selling price",
            theme::dim_style(),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Use :cost, :price and :expenses, or Enter on a field",
            theme::dim_style(),
        )),
    ])
    .centered()
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::OVERLAY))
            .title(Span::styled(" Results ", theme::title_style())),
    );
    f.render_widget(msg, area);
}
