use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::LazyLock;

use super::app::{App, EditTarget, Screen};
use crate::db::StateStore;
use crate::engine;
use crate::export::{ExportFormat, SystemClipboard};
use crate::models::{CategoryUpdate, Currency, ProfitField};

pub(crate) struct Command {
    pub(crate) description: &'static str,
    pub(crate) run: fn(&str, &mut App, &dyn StateStore) -> anyhow::Result<()>,
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

    register_command!("q", "Quit SpendSplit", cmd_quit, r);
    register_command!("quit", "Quit SpendSplit", cmd_quit, r);
    register_command!("b", "Go to Spend Breakdown", cmd_breakdown, r);
    register_command!("breakdown", "Go to Spend Breakdown", cmd_breakdown, r);
    register_command!("p", "Go to Profit Calculator", cmd_profit, r);
    register_command!("profit", "Go to Profit Calculator", cmd_profit, r);
    register_command!("help", "Show available commands", cmd_help, r);
    register_command!("h", "Show available commands", cmd_help, r);
    register_command!(
        "add",
        "Add category (e.g. :add Rent 30)",
        cmd_add,
        r
    );
    register_command!(
        "rename",
        "Rename selected category (e.g. :rename Supplies)",
        cmd_rename,
        r
    );
    register_command!(
        "set",
        "Set selected category percentage (e.g. :set 12.5)",
        cmd_set,
        r
    );
    register_command!("delete", "Delete selected category", cmd_delete, r);
    register_command!(
        "total",
        "Set total amount (e.g. :total 250000)",
        cmd_total,
        r
    );
    register_command!(
        "currency",
        "Set currency (e.g. :currency GHS)",
        cmd_currency,
        r
    );
    register_command!(
        "export",
        "Export breakdown as text (e.g. :export ~/split.txt)",
        cmd_export,
        r
    );
    register_command!(
        "export-csv",
        "Export breakdown as CSV table (e.g. :export-csv ~/split.csv)",
        cmd_export_csv,
        r
    );
    register_command!("copy", "Copy breakdown to clipboard", cmd_copy, r);
    register_command!("reset", "Clear total and all categories", cmd_reset, r);
    register_command!(
        "cost",
        "Set product cost (e.g. :cost 40)",
        cmd_cost,
        r
    );
    register_command!(
        "price",
        "Set selling price (e.g. :price 100)",
        cmd_price,
        r
    );
    register_command!(
        "expenses",
        "Set additional expenses (e.g. :expenses 10)",
        cmd_expenses,
        r
    );
    register_command!("clear", "Clear profit calculator inputs", cmd_clear, r);

    r
});

pub(crate) fn handle_command(
    input: &str,
    app: &mut App,
    store: &dyn StateStore,
) -> anyhow::Result<()> {
    let trimmed = input.trim();
    let mut parts = trimmed.splitn(2, ' ');
    let cmd_name = parts.next().unwrap_or("");
    let args = parts.next().unwrap_or("").trim();

    if let Some(cmd) = COMMANDS.get(cmd_name) {
        (cmd.run)(args, app, store)?;
    } else {
        // Try fuzzy match
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
        .min_by_key(|k| levenshtein(input, k))
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

// ── Command implementations ──────────────────────────────────

fn cmd_quit(_args: &str, app: &mut App, _store: &dyn StateStore) -> anyhow::Result<()> {
    app.running = false;
    Ok(())
}

fn cmd_breakdown(_args: &str, app: &mut App, _store: &dyn StateStore) -> anyhow::Result<()> {
    app.screen = Screen::Breakdown;
    app.set_status(format!("{}", Screen::Breakdown));
    Ok(())
}

fn cmd_profit(_args: &str, app: &mut App, _store: &dyn StateStore) -> anyhow::Result<()> {
    app.screen = Screen::Profit;
    app.set_status(format!("{}", Screen::Profit));
    Ok(())
}

fn cmd_help(_args: &str, app: &mut App, _store: &dyn StateStore) -> anyhow::Result<()> {
    app.show_help = true;
    Ok(())
}

/// `:add` alone opens the name editor; `:add Rent 30` fills both fields.
fn cmd_add(args: &str, app: &mut App, store: &dyn StateStore) -> anyhow::Result<()> {
    app.screen = Screen::Breakdown;
    let id = app.add_category(store);
    if args.is_empty() {
        return Ok(());
    }
    app.finish_edit();

    let (name, pct) = split_trailing_number(args);
    app.allocation
        .update_category(&id, CategoryUpdate::Name(name.to_string()));
    if let Some(pct) = pct {
        app.allocation.update_category(
            &id,
            CategoryUpdate::Percentage(engine::parse_percentage_input(pct)),
        );
    }
    app.persist_allocation(store);
    app.set_status(format!("Category added: {name}"));
    Ok(())
}

fn cmd_rename(args: &str, app: &mut App, store: &dyn StateStore) -> anyhow::Result<()> {
    let Some(id) = selected_id(app) else {
        app.set_status("No category selected");
        return Ok(());
    };
    if args.is_empty() {
        app.begin_edit(EditTarget::CategoryName(id));
        return Ok(());
    }
    app.allocation
        .update_category(&id, CategoryUpdate::Name(args.to_string()));
    app.persist_allocation(store);
    app.set_status(format!("Renamed to: {args}"));
    Ok(())
}

fn cmd_set(args: &str, app: &mut App, store: &dyn StateStore) -> anyhow::Result<()> {
    let Some(id) = selected_id(app) else {
        app.set_status("No category selected");
        return Ok(());
    };
    if args.is_empty() {
        app.begin_edit(EditTarget::CategoryPercentage(id));
        return Ok(());
    }
    let pct = engine::parse_percentage_input(args);
    app.allocation
        .update_category(&id, CategoryUpdate::Percentage(pct));
    app.persist_allocation(store);
    app.set_status(format!("Percentage set to {}%", engine::format_percentage(pct)));
    Ok(())
}

fn cmd_delete(_args: &str, app: &mut App, _store: &dyn StateStore) -> anyhow::Result<()> {
    app.screen = Screen::Breakdown;
    app.request_delete_selected();
    Ok(())
}

fn cmd_total(args: &str, app: &mut App, store: &dyn StateStore) -> anyhow::Result<()> {
    if args.is_empty() {
        app.screen = Screen::Breakdown;
        app.begin_edit(EditTarget::TotalAmount);
        return Ok(());
    }
    app.allocation
        .set_total_amount(engine::parse_amount_input(args));
    app.persist_allocation(store);
    app.set_status(format!(
        "Total amount: {}{}",
        app.allocation.currency.symbol(),
        engine::format_amount(app.allocation.total_amount)
    ));
    Ok(())
}

fn cmd_currency(args: &str, app: &mut App, store: &dyn StateStore) -> anyhow::Result<()> {
    if args.is_empty() {
        app.cycle_currency(store);
        return Ok(());
    }
    let choices = match app.screen {
        Screen::Breakdown => Currency::breakdown_choices(),
        Screen::Profit => Currency::profit_choices(),
    };
    match Currency::parse(args).filter(|c| choices.contains(c)) {
        Some(currency) => {
            match app.screen {
                Screen::Breakdown => {
                    app.allocation.currency = currency;
                    app.persist_allocation(store);
                }
                Screen::Profit => {
                    app.profit.currency = currency;
                    app.persist_profit(store);
                }
            }
            app.set_status(format!("Currency: {currency}"));
        }
        None => {
            let codes: Vec<&str> = choices.iter().map(|c| c.code()).collect();
            app.set_status(format!(
                "Unknown currency: {args}. Available: {}",
                codes.join(", ")
            ));
        }
    }
    Ok(())
}

fn cmd_export(args: &str, app: &mut App, _store: &dyn StateStore) -> anyhow::Result<()> {
    app.export(ExportFormat::Text, export_path(args));
    Ok(())
}

fn cmd_export_csv(args: &str, app: &mut App, _store: &dyn StateStore) -> anyhow::Result<()> {
    app.export(ExportFormat::Csv, export_path(args));
    Ok(())
}

fn cmd_copy(_args: &str, app: &mut App, _store: &dyn StateStore) -> anyhow::Result<()> {
    app.copy(&SystemClipboard);
    Ok(())
}

fn cmd_reset(_args: &str, app: &mut App, _store: &dyn StateStore) -> anyhow::Result<()> {
    app.screen = Screen::Breakdown;
    app.request_reset();
    Ok(())
}

fn cmd_cost(args: &str, app: &mut App, store: &dyn StateStore) -> anyhow::Result<()> {
    set_profit_field(ProfitField::Cost, args, app, store);
    Ok(())
}

fn cmd_price(args: &str, app: &mut App, store: &dyn StateStore) -> anyhow::Result<()> {
    set_profit_field(ProfitField::SellingPrice, args, app, store);
    Ok(())
}

fn cmd_expenses(args: &str, app: &mut App, store: &dyn StateStore) -> anyhow::Result<()> {
    set_profit_field(ProfitField::Expenses, args, app, store);
    Ok(())
}

fn cmd_clear(_args: &str, app: &mut App, _store: &dyn StateStore) -> anyhow::Result<()> {
    app.screen = Screen::Profit;
    app.request_clear_profit();
    Ok(())
}

// ── Helpers ──────────────────────────────────────────────────

fn selected_id(app: &App) -> Option<String> {
    app.selected_category().map(|c| c.id.clone())
}

fn export_path(args: &str) -> Option<PathBuf> {
    if args.is_empty() {
        None
    } else {
        Some(PathBuf::from(crate::run::shellexpand(args)))
    }
}

fn set_profit_field(field: ProfitField, args: &str, app: &mut App, store: &dyn StateStore) {
    app.screen = Screen::Profit;
    if let Some(idx) = ProfitField::all().iter().position(|f| *f == field) {
        app.profit_field_index = idx;
    }
    if args.is_empty() {
        app.begin_edit(EditTarget::Profit(field));
        return;
    }
    let value = engine::parse_amount_input(args);
    app.profit.set(field, value);
    app.persist_profit(store);
    app.set_status(format!(
        "{}: {}",
        field.label(),
        engine::format_money(app.profit.get(field), app.profit.currency)
    ));
}

/// `"Office Rent 30"` → `("Office Rent", Some("30"))`.
fn split_trailing_number(args: &str) -> (&str, Option<&str>) {
    match args.rsplit_once(' ') {
        Some((name, last))
            if !last.is_empty() && last.chars().all(|c| c.is_ascii_digit() || c == '.') =>
        {
            (name.trim_end(), Some(last))
        }
        _ => (args, None),
    }
}

#[cfg(test)]
#[path = "commands_tests.rs"]
mod commands_tests;
