//! Allocation engine: pure derivations from an [`AllocationState`].
//!
//! Nothing here performs I/O or mutates its inputs. Every function is cheap
//! enough to re-run on each keystroke.

mod format;
mod profit;

use rust_decimal::Decimal;

use crate::models::{AllocationState, Category};

pub(crate) use format::{
    breakdown_lines, breakdown_text, format_amount, format_money, format_one_decimal,
    format_percentage, parse_amount_input, parse_percentage_input, sanitize_amount_input,
    sanitize_percentage_input, REMAINDER_LABEL,
};
pub(crate) use profit::{has_profit_data, ProfitSummary};

const HUNDRED: Decimal = Decimal::ONE_HUNDRED;

/// Sum of every category percentage. Not clamped, but saturates at
/// `Decimal::MAX` instead of overflowing.
pub(crate) fn total_percentage(categories: &[Category]) -> Decimal {
    categories.iter().fold(Decimal::ZERO, |acc, c| {
        acc.checked_add(c.percentage).unwrap_or(Decimal::MAX)
    })
}

/// Unallocated share, floored at zero.
pub(crate) fn remainder(total_percentage: Decimal) -> Decimal {
    (HUNDRED - total_percentage).max(Decimal::ZERO)
}

/// `total_amount × percentage / 100`, saturating at `Decimal::MAX`.
pub(crate) fn category_amount(total_amount: Decimal, percentage: Decimal) -> Decimal {
    total_amount
        .checked_mul(percentage)
        .map(|product| product / HUNDRED)
        .or_else(|| (total_amount / HUNDRED).checked_mul(percentage))
        .unwrap_or(Decimal::MAX)
}

pub(crate) fn remainder_amount(total_amount: Decimal, remainder_percentage: Decimal) -> Decimal {
    category_amount(total_amount, remainder_percentage)
}

/// Strict equality with 100; there is no tolerance band.
pub(crate) fn is_allocation_valid(total_percentage: Decimal) -> bool {
    total_percentage == HUNDRED
}

/// How far the categories are from a complete allocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum AllocationStatus {
    Complete,
    Under(Decimal),
    Over(Decimal),
}

impl AllocationStatus {
    pub(crate) fn from_total(total_percentage: Decimal) -> Self {
        let difference = HUNDRED - total_percentage;
        if difference.is_zero() {
            Self::Complete
        } else if difference > Decimal::ZERO {
            Self::Under(difference)
        } else {
            Self::Over(difference.abs())
        }
    }

    pub(crate) fn label(&self) -> String {
        match self {
            Self::Complete => "Perfect! All percentages allocated".into(),
            Self::Under(remaining) => format!("{}% remaining", format_one_decimal(*remaining)),
            Self::Over(excess) => format!("Over by {}%", format_one_decimal(*excess)),
        }
    }
}

/// Why export is unavailable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub(crate) enum ExportBlocked {
    #[error("Enter a total amount to enable export")]
    NoAmount,
    #[error("Complete 100% allocation to enable export")]
    Incomplete,
}

/// Export needs a positive total and a valid allocation.
pub(crate) fn export_gate(total_amount: Decimal, is_valid: bool) -> Result<(), ExportBlocked> {
    if total_amount <= Decimal::ZERO {
        Err(ExportBlocked::NoAmount)
    } else if !is_valid {
        Err(ExportBlocked::Incomplete)
    } else {
        Ok(())
    }
}

/// One category with its derived amount.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct CategoryLine<'a> {
    pub(crate) category: &'a Category,
    pub(crate) amount: Decimal,
}

/// Every derived value for one state, computed in a single pass.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Breakdown<'a> {
    pub(crate) total_amount: Decimal,
    pub(crate) total_percentage: Decimal,
    pub(crate) remainder_percentage: Decimal,
    pub(crate) remainder_amount: Decimal,
    pub(crate) lines: Vec<CategoryLine<'a>>,
    pub(crate) is_valid: bool,
    pub(crate) status: AllocationStatus,
}

impl<'a> Breakdown<'a> {
    pub(crate) fn compute(state: &'a AllocationState) -> Self {
        let total_amount = state.total_amount;
        let total_percentage = total_percentage(&state.categories);
        let remainder_percentage = remainder(total_percentage);
        let lines = state
            .categories
            .iter()
            .map(|category| CategoryLine {
                category,
                amount: category_amount(total_amount, category.percentage),
            })
            .collect();

        Self {
            total_amount,
            total_percentage,
            remainder_percentage,
            remainder_amount: remainder_amount(total_amount, remainder_percentage),
            lines,
            is_valid: is_allocation_valid(total_percentage),
            status: AllocationStatus::from_total(total_percentage),
        }
    }

    pub(crate) fn export_gate(&self) -> Result<(), ExportBlocked> {
        export_gate(self.total_amount, self.is_valid)
    }

    pub(crate) fn can_export(&self) -> bool {
        self.export_gate().is_ok()
    }

    /// Progress toward 100%, capped at 100.
    pub(crate) fn progress(&self) -> Decimal {
        self.total_percentage.min(HUNDRED)
    }
}
