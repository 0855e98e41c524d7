use anyhow::Result;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::Currency;
use crate::db::{self, StateStore};

/// Inputs of the profit margin calculator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfitInputs {
    pub cost: Decimal,
    pub selling_price: Decimal,
    pub expenses: Decimal,
    pub currency: Currency,
}

impl Default for ProfitInputs {
    fn default() -> Self {
        Self {
            cost: Decimal::ZERO,
            selling_price: Decimal::ZERO,
            expenses: Decimal::ZERO,
            currency: Currency::Usd,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfitField {
    Cost,
    SellingPrice,
    Expenses,
}

impl ProfitField {
    pub fn all() -> &'static [ProfitField] {
        &[Self::Cost, Self::SellingPrice, Self::Expenses]
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Cost => "Product Cost",
            Self::SellingPrice => "Selling Price",
            Self::Expenses => "Additional Expenses",
        }
    }
}

impl ProfitInputs {
    pub const STORAGE_KEY: &'static str = "profitCalculatorData";

    pub fn load(store: &dyn StateStore) -> Result<Option<Self>> {
        db::load_json(store, Self::STORAGE_KEY)
    }

    pub fn save(&self, store: &dyn StateStore) -> Result<()> {
        db::save_json(store, Self::STORAGE_KEY, self)
    }

    pub fn get(&self, field: ProfitField) -> Decimal {
        match field {
            ProfitField::Cost => self.cost,
            ProfitField::SellingPrice => self.selling_price,
            ProfitField::Expenses => self.expenses,
        }
    }

    pub fn set(&mut self, field: ProfitField, value: Decimal) {
        let value = value.max(Decimal::ZERO);
        match field {
            ProfitField::Cost => self.cost = value,
            ProfitField::SellingPrice => self.selling_price = value,
            ProfitField::Expenses => self.expenses = value,
        }
    }

    /// Zero every input, keeping the currency.
    pub fn clear(&mut self) {
        self.cost = Decimal::ZERO;
        self.selling_price = Decimal::ZERO;
        self.expenses = Decimal::ZERO;
    }
}
