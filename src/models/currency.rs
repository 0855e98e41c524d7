use serde::{Deserialize, Serialize};

/// Display-only currency lookup. No conversion happens anywhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Currency {
    #[serde(rename = "NGN")]
    Ngn,
    #[serde(rename = "GHS")]
    Ghs,
    #[serde(rename = "USD")]
    Usd,
    #[serde(rename = "EUR")]
    Eur,
    #[serde(rename = "GBP")]
    Gbp,
}

impl Currency {
    pub fn code(&self) -> &'static str {
        match self {
            Self::Ngn => "NGN",
            Self::Ghs => "GHS",
            Self::Usd => "USD",
            Self::Eur => "EUR",
            Self::Gbp => "GBP",
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Ngn => "₦",
            Self::Ghs => "GH₵",
            Self::Usd => "$",
            Self::Eur => "€",
            Self::Gbp => "£",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Ngn => "Nigerian Naira",
            Self::Ghs => "Ghanaian Cedi",
            Self::Usd => "US Dollar",
            Self::Eur => "Euro",
            Self::Gbp => "British Pound",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().as_str() {
            "NGN" | "NAIRA" => Some(Self::Ngn),
            "GHS" | "CEDI" => Some(Self::Ghs),
            "USD" | "DOLLAR" => Some(Self::Usd),
            "EUR" | "EURO" => Some(Self::Eur),
            "GBP" | "POUND" => Some(Self::Gbp),
            _ => None,
        }
    }

    /// Currencies offered by the spend breakdown.
    pub fn breakdown_choices() -> &'static [Currency] {
        &[Self::Ngn, Self::Ghs]
    }

    /// Currencies offered by the profit calculator.
    pub fn profit_choices() -> &'static [Currency] {
        &[Self::Usd, Self::Eur, Self::Gbp, Self::Ngn, Self::Ghs]
    }

    /// The entry after `self` in `choices`, wrapping around.
    pub fn cycle(&self, choices: &[Currency]) -> Currency {
        let idx = choices.iter().position(|c| c == self);
        match idx {
            Some(i) => choices[(i + 1) % choices.len()],
            None => choices.first().copied().unwrap_or(*self),
        }
    }
}

impl std::fmt::Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.symbol(), self.name())
    }
}
