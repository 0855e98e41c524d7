#![allow(clippy::unwrap_used)]

use super::*;
use crate::models::{AllocationState, CategoryUpdate, Currency, ProfitInputs};
use rust_decimal_macros::dec;

// ── Key/value store ───────────────────────────────────────────

#[test]
fn test_missing_key_is_none() {
    let db = Database::open_in_memory().unwrap();
    assert_eq!(db.get_item("nothing-here").unwrap(), None);
}

#[test]
fn test_set_then_get() {
    let db = Database::open_in_memory().unwrap();
    db.set_item("k", "v1").unwrap();
    assert_eq!(db.get_item("k").unwrap().as_deref(), Some("v1"));
}

#[test]
fn test_set_overwrites() {
    let db = Database::open_in_memory().unwrap();
    db.set_item("k", "v1").unwrap();
    db.set_item("k", "v2").unwrap();
    assert_eq!(db.get_item("k").unwrap().as_deref(), Some("v2"));
}

#[test]
fn test_remove_item() {
    let db = Database::open_in_memory().unwrap();
    db.set_item("k", "v").unwrap();
    db.remove_item("k").unwrap();
    assert_eq!(db.get_item("k").unwrap(), None);
    // Removing again is not an error
    db.remove_item("k").unwrap();
}

#[test]
fn test_reopen_file_keeps_data() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("spendsplit.db");
    {
        let db = Database::open(&path).unwrap();
        db.set_item("k", "persisted").unwrap();
    }
    let db = Database::open(&path).unwrap();
    assert_eq!(db.get_item("k").unwrap().as_deref(), Some("persisted"));
}

#[test]
fn test_migrate_is_idempotent() {
    let mut db = Database::open_in_memory().unwrap();
    db.set_item("k", "v").unwrap();
    db.migrate().unwrap();
    assert_eq!(db.get_item("k").unwrap().as_deref(), Some("v"));
}

// ── JSON helpers ──────────────────────────────────────────────

#[test]
fn test_allocation_state_save_and_load() {
    let db = Database::open_in_memory().unwrap();
    let mut state = AllocationState::with_defaults(dec!(100000), Currency::Ghs);
    let id = state.add_category_at(1);
    state.update_category(&id, CategoryUpdate::Name("Rent".into()));
    state.update_category(&id, CategoryUpdate::Percentage(dec!(30)));
    state.save(&db).unwrap();

    let loaded = AllocationState::load(&db).unwrap().unwrap();
    assert_eq!(loaded, state);
}

#[test]
fn test_load_absent_state() {
    let db = Database::open_in_memory().unwrap();
    assert!(AllocationState::load(&db).unwrap().is_none());
    assert!(ProfitInputs::load(&db).unwrap().is_none());
}

#[test]
fn test_malformed_json_is_treated_as_absent() {
    let db = Database::open_in_memory().unwrap();
    db.set_item(AllocationState::STORAGE_KEY, "{ not json").unwrap();
    assert!(AllocationState::load(&db).unwrap().is_none());
}

#[test]
fn test_wrong_shape_is_treated_as_absent() {
    let db = Database::open_in_memory().unwrap();
    db.set_item(AllocationState::STORAGE_KEY, r#"{"totalAmount":"lots"}"#)
        .unwrap();
    assert!(AllocationState::load(&db).unwrap().is_none());
}

#[test]
fn test_forget_removes_saved_state() {
    let db = Database::open_in_memory().unwrap();
    AllocationState::default().save(&db).unwrap();
    AllocationState::forget(&db).unwrap();
    assert!(db.get_item(AllocationState::STORAGE_KEY).unwrap().is_none());
}

#[test]
fn test_profit_inputs_use_their_own_key() {
    let db = Database::open_in_memory().unwrap();
    let inputs = ProfitInputs {
        cost: dec!(40),
        selling_price: dec!(100),
        expenses: dec!(10),
        currency: Currency::Gbp,
    };
    inputs.save(&db).unwrap();
    AllocationState::forget(&db).unwrap();

    assert!(db.get_item("profitCalculatorData").unwrap().is_some());
    assert_eq!(ProfitInputs::load(&db).unwrap().unwrap(), inputs);
}
