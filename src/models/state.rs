use anyhow::Result;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{Category, CategoryUpdate, Currency};
use crate::db::{self, StateStore};

/// Everything the spend breakdown persists between sessions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AllocationState {
    pub total_amount: Decimal,
    pub categories: Vec<Category>,
    pub currency: Currency,
}

impl Default for AllocationState {
    fn default() -> Self {
        Self {
            total_amount: Decimal::from(100_000),
            categories: Vec::new(),
            currency: Currency::Ngn,
        }
    }
}

impl AllocationState {
    pub const STORAGE_KEY: &'static str = "spend-breakdown-data";

    /// Start state when nothing usable is stored.
    pub fn with_defaults(total_amount: Decimal, currency: Currency) -> Self {
        Self {
            total_amount: total_amount.max(Decimal::ZERO),
            categories: Vec::new(),
            currency,
        }
    }

    /// Stored state, or `None` when the key is absent or holds a different shape.
    pub fn load(store: &dyn StateStore) -> Result<Option<Self>> {
        db::load_json(store, Self::STORAGE_KEY)
    }

    pub fn save(&self, store: &dyn StateStore) -> Result<()> {
        db::save_json(store, Self::STORAGE_KEY, self)
    }

    /// Append an empty category and return its id.
    pub fn add_category(&mut self) -> String {
        self.add_category_at(chrono::Utc::now().timestamp_millis())
    }

    /// Ids are creation timestamps in milliseconds, bumped past the newest
    /// existing id so two adds within the same millisecond stay unique.
    pub fn add_category_at(&mut self, now_millis: i64) -> String {
        let newest = self
            .categories
            .iter()
            .filter_map(|c| c.id.parse::<i64>().ok())
            .max();
        let id = match newest {
            Some(n) if n >= now_millis => n + 1,
            _ => now_millis,
        }
        .to_string();
        self.categories.push(Category::new(id.clone()));
        id
    }

    /// Returns false when no category has `id`.
    pub fn update_category(&mut self, id: &str, update: CategoryUpdate) -> bool {
        match self.categories.iter_mut().find(|c| c.id == id) {
            Some(category) => {
                update.apply(category);
                true
            }
            None => false,
        }
    }

    pub fn delete_category(&mut self, id: &str) -> Option<Category> {
        let idx = self.categories.iter().position(|c| c.id == id)?;
        Some(self.categories.remove(idx))
    }

    pub fn set_total_amount(&mut self, amount: Decimal) {
        self.total_amount = amount.max(Decimal::ZERO);
    }

    /// Clear the total and every category. The currency choice survives.
    pub fn reset(&mut self) {
        self.total_amount = Decimal::ZERO;
        self.categories.clear();
    }

    /// Remove the persisted copy so the next start begins fresh.
    pub fn forget(store: &dyn StateStore) -> Result<()> {
        store.remove_item(Self::STORAGE_KEY)
    }
}
