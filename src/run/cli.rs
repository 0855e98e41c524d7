use anyhow::Result;
use std::path::PathBuf;

use crate::config::Config;
use crate::db::StateStore;
use crate::engine::{self, Breakdown, ProfitSummary};
use crate::export::{self, ExportFormat, SystemClipboard};
use crate::models::{AllocationState, CategoryUpdate, Currency};

pub(crate) fn as_cli(args: &[String], store: &dyn StateStore, config: &Config) -> Result<()> {
    tracing::debug!(command = %args[1], "cli command");
    match args[1].as_str() {
        "show" | "s" => cli_show(store, config),
        "total" => cli_total(&args[2..], store, config),
        "currency" => cli_currency(&args[2..], store, config),
        "add" => cli_add(&args[2..], store, config),
        "rename" => cli_rename(&args[2..], store, config),
        "set" => cli_set(&args[2..], store, config),
        "delete" | "rm" => cli_delete(&args[2..], store, config),
        "reset" => cli_reset(store),
        "export" => cli_export(&args[2..], store, config),
        "copy" => cli_copy(store, config),
        "profit" => cli_profit(&args[2..], store),
        "--help" | "-h" | "help" => {
            print_usage();
            Ok(())
        }
        "--version" | "-V" | "version" => {
            println!("spendsplit {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        other => {
            print_usage();
            anyhow::bail!("Unknown command: {other}");
        }
    }
}

fn print_usage() {
    println!("SpendSplit - local-only spend breakdown calculator");
    println!();
    println!("Usage: spendsplit [command]");
    println!();
    println!("Commands:");
    println!("  (none)                        Launch interactive TUI");
    println!("  show                          Print the current breakdown");
    println!("  total <amount>                Set the total amount");
    println!("  currency <NGN|GHS>            Set the display currency");
    println!("  add <name> [percentage]       Add an expense category");
    println!("  rename <position> <name>      Rename a category");
    println!("  set <position> <percentage>   Change a category's percentage");
    println!("  delete <position>             Remove a category");
    println!("  reset                         Clear the total and all categories");
    println!("  export [path]                 Export the breakdown (needs 100% allocation)");
    println!("    --format <text|csv>         File format (default: from extension, else text)");
    println!("  copy                          Copy the breakdown to the clipboard");
    println!("  profit [cost price [expenses]] Profit margin calculator");
    println!("    --currency <code>           USD, EUR, GBP, NGN or GHS");
    println!("  --help, -h                    Show this help");
    println!("  --version, -V                 Show version");
}

fn load(store: &dyn StateStore, config: &Config) -> Result<AllocationState> {
    crate::load_allocation(store, config)
}

fn cli_show(store: &dyn StateStore, config: &Config) -> Result<()> {
    let state = load(store, config)?;
    print_breakdown(&state);
    Ok(())
}

fn print_breakdown(state: &AllocationState) {
    let breakdown = Breakdown::compute(state);
    let symbol = state.currency.symbol();

    println!("SpendSplit - {}", state.currency);
    println!("{}", "─".repeat(48));
    println!(
        "  Total:  {symbol}{}",
        engine::format_amount(breakdown.total_amount)
    );

    if breakdown.lines.is_empty() {
        println!();
        println!("  No expense categories yet. Add one with: spendsplit add <name> <percentage>");
        return;
    }

    println!();
    if breakdown.remainder_percentage > rust_decimal::Decimal::ZERO {
        println!(
            "     {:<24} {:>7}  {symbol}{}",
            "Remaining Amount",
            format!("{}%", engine::format_one_decimal(breakdown.remainder_percentage)),
            engine::format_amount(breakdown.remainder_amount)
        );
    }
    for (i, line) in breakdown.lines.iter().enumerate() {
        println!(
            "  {:>2}. {:<24} {:>7}  {symbol}{}",
            i + 1,
            line.category.display_name(),
            format!("{}%", engine::format_percentage(line.category.percentage)),
            engine::format_amount(line.amount)
        );
    }

    println!("{}", "─".repeat(48));
    println!(
        "  Total Allocation: {}% / 100%",
        engine::format_percentage(breakdown.total_percentage)
    );
    println!("  {}", breakdown.status.label());
    if let Err(blocked) = breakdown.export_gate() {
        println!("  {blocked}");
    }
}

fn save_and_show(state: &AllocationState, store: &dyn StateStore) -> Result<()> {
    state.save(store)?;
    print_breakdown(state);
    Ok(())
}

fn cli_total(args: &[String], store: &dyn StateStore, config: &Config) -> Result<()> {
    let Some(raw) = args.first() else {
        anyhow::bail!("Usage: spendsplit total <amount>");
    };
    let mut state = load(store, config)?;
    state.set_total_amount(engine::parse_amount_input(raw));
    save_and_show(&state, store)
}

fn cli_currency(args: &[String], store: &dyn StateStore, config: &Config) -> Result<()> {
    let code = args
        .first()
        .ok_or_else(|| anyhow::anyhow!("Usage: spendsplit currency <NGN|GHS>"))?;
    let currency = Currency::parse(code)
        .filter(|c| Currency::breakdown_choices().contains(c))
        .ok_or_else(|| anyhow::anyhow!("Unsupported currency: {code} (choose NGN or GHS)"))?;
    let mut state = load(store, config)?;
    state.currency = currency;
    save_and_show(&state, store)
}

fn cli_add(args: &[String], store: &dyn StateStore, config: &Config) -> Result<()> {
    if args.is_empty() {
        anyhow::bail!("Usage: spendsplit add <name> [percentage]");
    }
    // A trailing number is the percentage; everything before it is the name.
    let (name_parts, pct) = match args.split_last() {
        Some((last, rest)) if !rest.is_empty() && looks_numeric(last) => {
            (rest, engine::parse_percentage_input(last.trim_end_matches('%')))
        }
        _ => (args, rust_decimal::Decimal::ZERO),
    };

    let mut state = load(store, config)?;
    let id = state.add_category();
    state.update_category(&id, CategoryUpdate::Name(name_parts.join(" ")));
    state.update_category(&id, CategoryUpdate::Percentage(pct));
    save_and_show(&state, store)
}

fn looks_numeric(s: &str) -> bool {
    let s = s.trim_end_matches('%');
    !s.is_empty() && s.chars().all(|c| c.is_ascii_digit() || c == '.')
}

/// 1-based list position to category id.
fn category_at(state: &AllocationState, raw: &str) -> Result<String> {
    let pos: usize = raw
        .parse()
        .map_err(|_| anyhow::anyhow!("Invalid position: {raw}"))?;
    pos.checked_sub(1)
        .and_then(|i| state.categories.get(i))
        .map(|c| c.id.clone())
        .ok_or_else(|| anyhow::anyhow!("No category at position {pos}"))
}

fn cli_rename(args: &[String], store: &dyn StateStore, config: &Config) -> Result<()> {
    let [pos, name @ ..] = args else {
        anyhow::bail!("Usage: spendsplit rename <position> <name>");
    };
    let mut state = load(store, config)?;
    let id = category_at(&state, pos)?;
    state.update_category(&id, CategoryUpdate::Name(name.join(" ")));
    save_and_show(&state, store)
}

fn cli_set(args: &[String], store: &dyn StateStore, config: &Config) -> Result<()> {
    let [pos, pct, ..] = args else {
        anyhow::bail!("Usage: spendsplit set <position> <percentage>");
    };
    let mut state = load(store, config)?;
    let id = category_at(&state, pos)?;
    let pct = engine::parse_percentage_input(pct.trim_end_matches('%'));
    state.update_category(&id, CategoryUpdate::Percentage(pct));
    save_and_show(&state, store)
}

fn cli_delete(args: &[String], store: &dyn StateStore, config: &Config) -> Result<()> {
    let Some(pos) = args.first() else {
        anyhow::bail!("Usage: spendsplit delete <position>");
    };
    let mut state = load(store, config)?;
    let id = category_at(&state, pos)?;
    if let Some(removed) = state.delete_category(&id) {
        println!("Category removed: {}", removed.display_name());
    }
    save_and_show(&state, store)
}

fn cli_reset(store: &dyn StateStore) -> Result<()> {
    AllocationState::forget(store)?;
    println!("Reset complete: all data has been cleared");
    Ok(())
}

fn cli_export(args: &[String], store: &dyn StateStore, config: &Config) -> Result<()> {
    let format_flag = args
        .windows(2)
        .find(|w| w[0] == "--format")
        .map(|w| w[1].as_str());
    let explicit_format = match format_flag {
        Some(f) => Some(
            ExportFormat::parse(f).ok_or_else(|| anyhow::anyhow!("Unknown export format: {f}"))?,
        ),
        None => None,
    };

    // Output path is the first argument that is neither a flag nor a flag value
    let output = args
        .iter()
        .enumerate()
        .find(|(i, a)| !a.starts_with('-') && (*i == 0 || args[i - 1] != "--format"))
        .map(|(_, a)| PathBuf::from(shellexpand(a)));

    let (path, format) = match (output, explicit_format) {
        (Some(path), Some(format)) => (path, format),
        (Some(path), None) => {
            let format = ExportFormat::from_path(&path);
            (path, format)
        }
        (None, format) => {
            let format = format.unwrap_or(ExportFormat::Text);
            (export::default_export_path(&config.export_dir(), format), format)
        }
    };

    let state = load(store, config)?;
    export::export_to_file(&state, format, &path)?;
    println!("Breakdown exported to {}", path.display());
    Ok(())
}

fn cli_copy(store: &dyn StateStore, config: &Config) -> Result<()> {
    let state = load(store, config)?;
    export::copy_to_clipboard(&state, &SystemClipboard)?;
    println!("Breakdown copied to clipboard");
    Ok(())
}

fn cli_profit(args: &[String], store: &dyn StateStore) -> Result<()> {
    let mut inputs = crate::load_profit(store)?;

    let currency_flag = args
        .windows(2)
        .find(|w| w[0] == "--currency")
        .map(|w| w[1].as_str());
    if let Some(code) = currency_flag {
        inputs.currency = Currency::parse(code)
            .ok_or_else(|| anyhow::anyhow!("Unsupported currency: {code}"))?;
    }

    let numbers: Vec<&String> = args
        .iter()
        .enumerate()
        .filter(|(i, a)| !a.starts_with('-') && (*i == 0 || args[i - 1] != "--currency"))
        .map(|(_, a)| a)
        .collect();
    match numbers.as_slice() {
        [] => {}
        [cost, price] => {
            inputs.cost = engine::parse_amount_input(cost);
            inputs.selling_price = engine::parse_amount_input(price);
            inputs.expenses = rust_decimal::Decimal::ZERO;
        }
        [cost, price, expenses] => {
            inputs.cost = engine::parse_amount_input(cost);
            inputs.selling_price = engine::parse_amount_input(price);
            inputs.expenses = engine::parse_amount_input(expenses);
        }
        _ => anyhow::bail!("Usage: spendsplit profit [cost price [expenses]] [--currency <code>]"),
    }
    inputs.save(store)?;

    let summary = ProfitSummary::compute(&inputs);
    let money = |v| engine::format_money(v, inputs.currency);

    println!("Profit Calculator - {}", inputs.currency);
    println!("{}", "─".repeat(40));
    if !engine::has_profit_data(&inputs) {
        println!("  Enter product information to see results");
        println!("  e.g. spendsplit profit 50 80 5");
        return Ok(());
    }
    println!("  Cost:          {}", money(inputs.cost));
    println!("  Selling price: {}", money(inputs.selling_price));
    println!("  Expenses:      {}", money(inputs.expenses));
    println!();
    println!(
        "  Profit:        {}{}",
        money(summary.profit),
        if summary.is_profitable() { "" } else { "  (not profitable)" }
    );
    println!("  Margin:        {}%", engine::format_one_decimal(summary.margin));
    println!("  Total cost:    {}", money(summary.total_cost));

    let suggestions = summary.suggestions();
    if !suggestions.is_empty() {
        println!();
        println!("Suggested prices:");
        for (margin, price) in suggestions {
            println!("  {margin}% margin:    {}", money(price));
        }
    }
    Ok(())
}

pub(crate) fn shellexpand(path: &str) -> String {
    if let Some(rest) = path.strip_prefix("~/") {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
        format!("{home}/{rest}")
    } else {
        path.to_string()
    }
}
