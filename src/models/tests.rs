#![allow(clippy::unwrap_used)]

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::*;

fn category(id: &str, name: &str, pct: Decimal) -> Category {
    Category {
        id: id.into(),
        name: name.into(),
        percentage: pct,
    }
}

// ── Category ──────────────────────────────────────────────────

#[test]
fn test_new_category_is_blank() {
    let cat = Category::new("1700000000000".into());
    assert_eq!(cat.name, "");
    assert_eq!(cat.percentage, Decimal::ZERO);
    assert_eq!(cat.display_name(), "Unnamed");
}

#[test]
fn test_display_name_uses_name_when_set() {
    let cat = category("1", "Rent", dec!(30));
    assert_eq!(cat.display_name(), "Rent");
    assert_eq!(cat.to_string(), "Rent");
}

#[test]
fn test_find_by_id() {
    let cats = vec![category("1", "Rent", dec!(30)), category("2", "Fuel", dec!(10))];
    assert_eq!(Category::find_by_id(&cats, "2").unwrap().name, "Fuel");
    assert!(Category::find_by_id(&cats, "3").is_none());
}

#[test]
fn test_update_percentage_clamps_negative() {
    let mut cat = category("1", "Rent", dec!(30));
    CategoryUpdate::Percentage(dec!(-5)).apply(&mut cat);
    assert_eq!(cat.percentage, Decimal::ZERO);
}

#[test]
fn test_update_percentage_allows_over_hundred() {
    let mut cat = category("1", "Rent", dec!(30));
    CategoryUpdate::Percentage(dec!(120)).apply(&mut cat);
    assert_eq!(cat.percentage, dec!(120));
}

#[test]
fn test_update_name_keeps_percentage() {
    let mut cat = category("1", "Rent", dec!(30));
    CategoryUpdate::Name("Office Rent".into()).apply(&mut cat);
    assert_eq!(cat.name, "Office Rent");
    assert_eq!(cat.percentage, dec!(30));
}

// ── Currency ──────────────────────────────────────────────────

#[test]
fn test_currency_symbols() {
    assert_eq!(Currency::Ngn.symbol(), "₦");
    assert_eq!(Currency::Ghs.symbol(), "GH₵");
    assert_eq!(Currency::Usd.symbol(), "$");
    assert_eq!(Currency::Eur.symbol(), "€");
    assert_eq!(Currency::Gbp.symbol(), "£");
}

#[test]
fn test_currency_parse() {
    assert_eq!(Currency::parse("ngn"), Some(Currency::Ngn));
    assert_eq!(Currency::parse(" GHS "), Some(Currency::Ghs));
    assert_eq!(Currency::parse("euro"), Some(Currency::Eur));
    assert_eq!(Currency::parse("JPY"), None);
}

#[test]
fn test_currency_cycle_wraps() {
    let choices = Currency::breakdown_choices();
    assert_eq!(Currency::Ngn.cycle(choices), Currency::Ghs);
    assert_eq!(Currency::Ghs.cycle(choices), Currency::Ngn);
}

#[test]
fn test_currency_cycle_outside_choices_starts_over() {
    assert_eq!(
        Currency::Usd.cycle(Currency::breakdown_choices()),
        Currency::Ngn
    );
}

#[test]
fn test_currency_serializes_as_code() {
    assert_eq!(serde_json::to_string(&Currency::Ghs).unwrap(), "\"GHS\"");
    let parsed: Currency = serde_json::from_str("\"NGN\"").unwrap();
    assert_eq!(parsed, Currency::Ngn);
}

#[test]
fn test_currency_display() {
    assert_eq!(Currency::Ngn.to_string(), "₦ Nigerian Naira");
}

// ── AllocationState ───────────────────────────────────────────

#[test]
fn test_default_state() {
    let state = AllocationState::default();
    assert_eq!(state.total_amount, dec!(100000));
    assert_eq!(state.currency, Currency::Ngn);
    assert!(state.categories.is_empty());
}

#[test]
fn test_with_defaults_clamps_negative_total() {
    let state = AllocationState::with_defaults(dec!(-10), Currency::Ghs);
    assert_eq!(state.total_amount, Decimal::ZERO);
    assert_eq!(state.currency, Currency::Ghs);
}

#[test]
fn test_add_category_uses_timestamp_id() {
    let mut state = AllocationState::default();
    let id = state.add_category_at(1_700_000_000_000);
    assert_eq!(id, "1700000000000");
    assert_eq!(state.categories.len(), 1);
    assert_eq!(state.categories[0].display_name(), "Unnamed");
}

#[test]
fn test_add_category_same_millisecond_stays_unique() {
    let mut state = AllocationState::default();
    let a = state.add_category_at(5000);
    let b = state.add_category_at(5000);
    let c = state.add_category_at(4000);
    assert_eq!(a, "5000");
    assert_eq!(b, "5001");
    assert_eq!(c, "5002");
}

#[test]
fn test_add_category_appends_in_order() {
    let mut state = AllocationState::default();
    let first = state.add_category_at(1);
    let second = state.add_category_at(2);
    let ids: Vec<&str> = state.categories.iter().map(|c| c.id.as_str()).collect();
    assert_eq!(ids, vec![first.as_str(), second.as_str()]);
}

#[test]
fn test_update_category_unknown_id_is_noop() {
    let mut state = AllocationState::default();
    state.add_category_at(1);
    let before = state.clone();
    assert!(!state.update_category("nope", CategoryUpdate::Name("X".into())));
    assert_eq!(state, before);
}

#[test]
fn test_update_category_only_touches_target() {
    let mut state = AllocationState::default();
    let a = state.add_category_at(1);
    let b = state.add_category_at(2);
    assert!(state.update_category(&b, CategoryUpdate::Percentage(dec!(20))));
    assert_eq!(
        Category::find_by_id(&state.categories, &a).unwrap().percentage,
        Decimal::ZERO
    );
    assert_eq!(
        Category::find_by_id(&state.categories, &b).unwrap().percentage,
        dec!(20)
    );
}

#[test]
fn test_delete_category() {
    let mut state = AllocationState::default();
    let a = state.add_category_at(1);
    let b = state.add_category_at(2);
    let removed = state.delete_category(&a).unwrap();
    assert_eq!(removed.id, a);
    assert_eq!(state.categories.len(), 1);
    assert_eq!(state.categories[0].id, b);
    assert!(state.delete_category(&a).is_none());
}

#[test]
fn test_set_total_amount_clamps_negative() {
    let mut state = AllocationState::default();
    state.set_total_amount(dec!(-1));
    assert_eq!(state.total_amount, Decimal::ZERO);
    state.set_total_amount(dec!(250000));
    assert_eq!(state.total_amount, dec!(250000));
}

#[test]
fn test_reset_keeps_currency() {
    let mut state = AllocationState::with_defaults(dec!(5000), Currency::Ghs);
    state.add_category_at(1);
    state.reset();
    assert_eq!(state.total_amount, Decimal::ZERO);
    assert!(state.categories.is_empty());
    assert_eq!(state.currency, Currency::Ghs);
}

#[test]
fn test_state_json_shape() {
    let mut state = AllocationState::default();
    let id = state.add_category_at(1);
    state.update_category(&id, CategoryUpdate::Name("Rent".into()));
    state.update_category(&id, CategoryUpdate::Percentage(dec!(12.5)));

    let json: serde_json::Value = serde_json::to_value(&state).unwrap();
    assert_eq!(json["totalAmount"], "100000");
    assert_eq!(json["currency"], "NGN");
    assert_eq!(json["categories"][0]["id"], "1");
    assert_eq!(json["categories"][0]["name"], "Rent");
    assert_eq!(json["categories"][0]["percentage"], "12.5");
}

#[test]
fn test_state_round_trip_keeps_exact_percentages() {
    let mut state = AllocationState::default();
    for (i, pct) in [
        dec!(33.33333333333333333),
        dec!(33.33333333333333333),
        dec!(33.33333333333333334),
    ]
    .into_iter()
    .enumerate()
    {
        let id = state.add_category_at(i as i64 + 1);
        state.update_category(&id, CategoryUpdate::Percentage(pct));
    }
    assert!(crate::engine::Breakdown::compute(&state).is_valid);

    let json = serde_json::to_string(&state).unwrap();
    let reloaded: AllocationState = serde_json::from_str(&json).unwrap();
    assert_eq!(reloaded, state);
    assert!(crate::engine::Breakdown::compute(&reloaded).is_valid);
}

#[test]
fn test_state_reads_browser_shaped_json() {
    let raw = r#"{"totalAmount":100000,"categories":[{"id":"1712","name":"Rent","percentage":30}],"currency":"GHS"}"#;
    let state: AllocationState = serde_json::from_str(raw).unwrap();
    assert_eq!(state.total_amount, dec!(100000));
    assert_eq!(state.currency, Currency::Ghs);
    assert_eq!(state.categories[0].percentage, dec!(30));
}

#[test]
fn test_state_reads_string_total() {
    let raw = r#"{"totalAmount":"100000","categories":[{"id":"1712","name":"Rent","percentage":12.5}],"currency":"NGN"}"#;
    let state: AllocationState = serde_json::from_str(raw).unwrap();
    assert_eq!(state.total_amount, dec!(100000));
    assert_eq!(state.categories[0].percentage, dec!(12.5));
}

// ── ProfitInputs ──────────────────────────────────────────────

#[test]
fn test_profit_defaults() {
    let inputs = ProfitInputs::default();
    assert_eq!(inputs.currency, Currency::Usd);
    for field in ProfitField::all() {
        assert_eq!(inputs.get(*field), Decimal::ZERO);
    }
}

#[test]
fn test_profit_set_and_get() {
    let mut inputs = ProfitInputs::default();
    inputs.set(ProfitField::SellingPrice, dec!(100));
    inputs.set(ProfitField::Cost, dec!(-3));
    assert_eq!(inputs.selling_price, dec!(100));
    assert_eq!(inputs.cost, Decimal::ZERO);
}

#[test]
fn test_profit_clear_keeps_currency() {
    let mut inputs = ProfitInputs {
        cost: dec!(40),
        selling_price: dec!(100),
        expenses: dec!(10),
        currency: Currency::Gbp,
    };
    inputs.clear();
    assert_eq!(inputs, ProfitInputs {
        currency: Currency::Gbp,
        ..ProfitInputs::default()
    });
}

#[test]
fn test_profit_json_shape() {
    let inputs = ProfitInputs {
        cost: dec!(40),
        selling_price: dec!(100),
        expenses: dec!(10),
        currency: Currency::Eur,
    };
    let json: serde_json::Value = serde_json::to_value(&inputs).unwrap();
    assert_eq!(json["sellingPrice"], "100");
    assert_eq!(json["currency"], "EUR");
}

#[test]
fn test_profit_reads_numeric_json() {
    let raw = r#"{"cost":40,"sellingPrice":99.5,"expenses":0,"currency":"USD"}"#;
    let inputs: ProfitInputs = serde_json::from_str(raw).unwrap();
    assert_eq!(inputs.selling_price, dec!(99.5));
    assert_eq!(inputs.cost, dec!(40));
}

#[test]
fn test_profit_field_labels() {
    assert_eq!(ProfitField::Cost.label(), "Product Cost");
    assert_eq!(ProfitField::SellingPrice.label(), "Selling Price");
    assert_eq!(ProfitField::Expenses.label(), "Additional Expenses");
}
