use rust_decimal::{Decimal, RoundingStrategy};
use std::str::FromStr;

use super::Breakdown;
use crate::models::{AllocationState, Currency};

/// Label of the remainder row in exports.
pub(crate) const REMAINDER_LABEL: &str = "My Profit";

/// Group thousands and keep at most two decimals, dropping trailing zeros.
/// e.g. `1234567.891` → `"1,234,567.89"`, `30000.00` → `"30,000"`
pub(crate) fn format_amount(val: Decimal) -> String {
    let rounded = val
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
        .normalize();
    let body = group_thousands(&rounded.abs().to_string());
    if rounded < Decimal::ZERO {
        format!("-{body}")
    } else {
        body
    }
}

/// Symbol-prefixed amount with exactly two decimals, as the profit
/// calculator shows money. e.g. `-12.5` → `"-$12.50"`
pub(crate) fn format_money(val: Decimal, currency: Currency) -> String {
    let rounded = val.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let body = group_thousands(&format!("{:.2}", rounded.abs()));
    if rounded < Decimal::ZERO {
        format!("-{}{body}", currency.symbol())
    } else {
        format!("{}{body}", currency.symbol())
    }
}

fn group_thousands(plain: &str) -> String {
    let (int_part, frac_part) = match plain.split_once('.') {
        Some((int_part, frac)) => (int_part, Some(frac)),
        None => (plain, None),
    };

    let with_commas: String = int_part
        .as_bytes()
        .rchunks(3)
        .rev()
        .map(|chunk| std::str::from_utf8(chunk).unwrap_or(""))
        .collect::<Vec<_>>()
        .join(",");

    match frac_part {
        Some(frac) => format!("{with_commas}.{frac}"),
        None => with_commas,
    }
}

/// Category percentages display as entered: `30`, `12.5`.
pub(crate) fn format_percentage(pct: Decimal) -> String {
    pct.normalize().to_string()
}

/// One fixed decimal: `50` → `"50.0"`.
pub(crate) fn format_one_decimal(val: Decimal) -> String {
    let rounded = val.round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero);
    format!("{rounded:.1}")
}

/// `(label, amount)` rows of a breakdown: the remainder first when there is
/// one, then every category in list order. Labels use the raw category name.
pub(crate) fn breakdown_lines(state: &AllocationState) -> Vec<(String, String)> {
    let breakdown = Breakdown::compute(state);
    let symbol = state.currency.symbol();
    let mut rows = Vec::with_capacity(breakdown.lines.len() + 1);

    if breakdown.remainder_percentage > Decimal::ZERO {
        rows.push((
            format!(
                "{REMAINDER_LABEL} ({}%)",
                format_one_decimal(breakdown.remainder_percentage)
            ),
            format!("{symbol}{}", format_amount(breakdown.remainder_amount)),
        ));
    }

    for line in &breakdown.lines {
        rows.push((
            format!(
                "{} ({}%)",
                line.category.name,
                format_percentage(line.category.percentage)
            ),
            format!("{symbol}{}", format_amount(line.amount)),
        ));
    }

    rows
}

/// Line-per-category summary, `name (pct%): <symbol><amount>`.
pub(crate) fn format_breakdown(state: &AllocationState) -> String {
    breakdown_lines(state)
        .into_iter()
        .map(|(label, amount)| format!("{label}: {amount}"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Full export text shared by the text file and the clipboard.
pub(crate) fn breakdown_text(state: &AllocationState) -> String {
    let mut text = format!(
        "Total: {}{}\nBreakdown:\n",
        state.currency.symbol(),
        format_amount(state.total_amount)
    );
    for line in format_breakdown(state).lines() {
        text.push_str(&format!("- {line}\n"));
    }
    text
}

/// Total amount fields accept digits only.
pub(crate) fn sanitize_amount_input(input: &str) -> String {
    input.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Lenient amount parse: grouping commas, symbols and spaces are ignored,
/// anything unparsable is zero.
pub(crate) fn parse_amount_input(input: &str) -> Decimal {
    let cleaned: String = input
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    Decimal::from_str(cleaned.trim_end_matches('.'))
        .unwrap_or(Decimal::ZERO)
        .max(Decimal::ZERO)
}

/// Percentage fields accept digits and a single decimal point.
pub(crate) fn sanitize_percentage_input(input: &str) -> String {
    let mut seen_dot = false;
    input
        .chars()
        .filter(|c| {
            if *c == '.' {
                let keep = !seen_dot;
                seen_dot = true;
                keep
            } else {
                c.is_ascii_digit()
            }
        })
        .collect()
}

/// Empty or unparsable percentages are zero.
pub(crate) fn parse_percentage_input(input: &str) -> Decimal {
    Decimal::from_str(input.trim().trim_end_matches('.'))
        .unwrap_or(Decimal::ZERO)
        .max(Decimal::ZERO)
}
