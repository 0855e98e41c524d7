mod category;
mod currency;
mod profit;
mod state;

pub use category::{Category, CategoryUpdate};
pub use currency::Currency;
pub use profit::{ProfitField, ProfitInputs};
pub use state::AllocationState;

#[cfg(test)]
mod tests;
