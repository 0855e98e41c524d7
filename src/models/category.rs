use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A named percentage slice of the total amount.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
    pub percentage: Decimal,
}

impl Category {
    /// New categories start unnamed at 0%.
    pub fn new(id: String) -> Self {
        Self {
            id,
            name: String::new(),
            percentage: Decimal::ZERO,
        }
    }

    /// Label shown in the live preview. Exports use the raw name instead.
    pub fn display_name(&self) -> &str {
        if self.name.is_empty() {
            "Unnamed"
        } else {
            &self.name
        }
    }

    /// Find a category by ID in a slice.
    pub fn find_by_id<'a>(categories: &'a [Category], id: &str) -> Option<&'a Category> {
        categories.iter().find(|c| c.id == id)
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// A single-field edit to a category.
#[derive(Debug, Clone, PartialEq)]
pub enum CategoryUpdate {
    Name(String),
    Percentage(Decimal),
}

impl CategoryUpdate {
    pub fn apply(self, category: &mut Category) {
        match self {
            Self::Name(name) => category.name = name,
            Self::Percentage(pct) => category.percentage = pct.max(Decimal::ZERO),
        }
    }
}
