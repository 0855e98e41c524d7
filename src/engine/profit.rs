use rust_decimal::Decimal;

use crate::models::ProfitInputs;

/// Margins the calculator suggests prices for.
pub(crate) const TARGET_MARGINS: [u32; 3] = [30, 40, 50];

/// Derived figures of the profit margin calculator.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ProfitSummary {
    pub(crate) profit: Decimal,
    /// Percentage of the selling price; zero when there is no price.
    pub(crate) margin: Decimal,
    pub(crate) total_cost: Decimal,
}

impl ProfitSummary {
    pub(crate) fn compute(inputs: &ProfitInputs) -> Self {
        let total_cost = inputs
            .cost
            .checked_add(inputs.expenses)
            .unwrap_or(Decimal::MAX);
        let profit = inputs
            .selling_price
            .checked_sub(total_cost)
            .unwrap_or(Decimal::MIN);
        let margin = if inputs.selling_price > Decimal::ZERO {
            profit
                .checked_div(inputs.selling_price)
                .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
                .unwrap_or(if profit < Decimal::ZERO {
                    Decimal::MIN
                } else {
                    Decimal::MAX
                })
        } else {
            Decimal::ZERO
        };
        Self {
            profit,
            margin,
            total_cost,
        }
    }

    pub(crate) fn is_profitable(&self) -> bool {
        self.profit > Decimal::ZERO
    }

    /// Price at which `total_cost` leaves `margin_pct` percent of the price
    /// as profit.
    pub(crate) fn suggested_price(&self, margin_pct: u32) -> Option<Decimal> {
        let keep = Decimal::ONE_HUNDRED - Decimal::from(margin_pct);
        if keep <= Decimal::ZERO {
            return None;
        }
        let price = match self.total_cost.checked_mul(Decimal::ONE_HUNDRED) {
            Some(scaled) => scaled / keep,
            None => (self.total_cost / keep)
                .checked_mul(Decimal::ONE_HUNDRED)
                .unwrap_or(Decimal::MAX),
        };
        Some(price)
    }

    /// Suggestions only make sense once some cost is known.
    pub(crate) fn suggestions(&self) -> Vec<(u32, Decimal)> {
        if self.total_cost <= Decimal::ZERO {
            return Vec::new();
        }
        TARGET_MARGINS
            .iter()
            .filter_map(|&m| self.suggested_price(m).map(|price| (m, price)))
            .collect()
    }
}

/// Whether any input has been filled in.
pub(crate) fn has_profit_data(inputs: &ProfitInputs) -> bool {
    inputs.cost > Decimal::ZERO
        || inputs.selling_price > Decimal::ZERO
        || inputs.expenses > Decimal::ZERO
}
