#![allow(clippy::unwrap_used)]

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::*;
use crate::db::Database;
use crate::export::SystemClipboard;
use crate::models::{AllocationState, Currency, ProfitField, ProfitInputs};

fn new_app() -> (App, Database) {
    let db = Database::open_in_memory().unwrap();
    let dir = std::env::temp_dir();
    let app = App::new(AllocationState::default(), ProfitInputs::default(), dir);
    (app, db)
}

/// Reads succeed, every write or removal fails.
struct ReadOnlyStore;

impl StateStore for ReadOnlyStore {
    fn get_item(&self, _key: &str) -> anyhow::Result<Option<String>> {
        Ok(None)
    }
    fn set_item(&self, _key: &str, _value: &str) -> anyhow::Result<()> {
        anyhow::bail!("disk is read-only")
    }
    fn remove_item(&self, _key: &str) -> anyhow::Result<()> {
        anyhow::bail!("disk is read-only")
    }
}

fn type_text(app: &mut App, store: &dyn StateStore, text: &str) {
    for c in text.chars() {
        app.edit_push(c, store);
    }
}

// ── Editing ───────────────────────────────────────────────────

#[test]
fn test_add_category_starts_name_edit() {
    let (mut app, db) = new_app();
    let id = app.add_category(&db);
    assert_eq!(app.input_mode, InputMode::Editing);
    assert_eq!(app.edit_target, Some(EditTarget::CategoryName(id)));
    assert_eq!(app.category_index, 0);
}

#[test]
fn test_typing_updates_and_saves_live() {
    let (mut app, db) = new_app();
    app.add_category(&db);
    type_text(&mut app, &db, "Rent");
    app.edit_next_field();
    type_text(&mut app, &db, "30");
    app.finish_edit();

    assert_eq!(app.input_mode, InputMode::Normal);
    let saved = AllocationState::load(&db).unwrap().unwrap();
    assert_eq!(saved.categories[0].name, "Rent");
    assert_eq!(saved.categories[0].percentage, dec!(30));
}

#[test]
fn test_percentage_edit_filters_input() {
    let (mut app, db) = new_app();
    let id = app.add_category(&db);
    app.begin_edit(EditTarget::CategoryPercentage(id));
    type_text(&mut app, &db, "1a2.5.0");
    assert_eq!(app.edit_input, "12.50");
    assert_eq!(app.allocation.categories[0].percentage, dec!(12.5));
}

#[test]
fn test_backspace_to_empty_is_zero() {
    let (mut app, db) = new_app();
    let id = app.add_category(&db);
    app.begin_edit(EditTarget::CategoryPercentage(id));
    type_text(&mut app, &db, "5");
    app.edit_pop(&db);
    assert_eq!(app.edit_input, "");
    assert_eq!(app.allocation.categories[0].percentage, Decimal::ZERO);
}

#[test]
fn test_total_edit_digits_only() {
    let (mut app, db) = new_app();
    app.begin_edit(EditTarget::TotalAmount);
    assert_eq!(app.edit_input, "100000");
    app.set_edit_input(String::new(), &db);
    type_text(&mut app, &db, "25,000.5");
    assert_eq!(app.edit_input, "250005");
    assert_eq!(app.allocation.total_amount, dec!(250005));
}

#[test]
fn test_begin_edit_blank_for_zero() {
    let (mut app, db) = new_app();
    let id = app.add_category(&db);
    app.begin_edit(EditTarget::CategoryPercentage(id));
    assert_eq!(app.edit_input, "");
}

#[test]
fn test_profit_edit_saves() {
    let (mut app, db) = new_app();
    app.begin_edit(EditTarget::Profit(ProfitField::SellingPrice));
    type_text(&mut app, &db, "99.5");
    app.finish_edit();
    let saved = ProfitInputs::load(&db).unwrap().unwrap();
    assert_eq!(saved.selling_price, dec!(99.5));
}

// ── Confirmations ─────────────────────────────────────────────

#[test]
fn test_delete_requires_confirmation() {
    let (mut app, db) = new_app();
    app.add_category(&db);
    app.finish_edit();
    app.request_delete_selected();
    assert_eq!(app.input_mode, InputMode::Confirm);
    assert_eq!(app.confirm_message, "Delete 'Unnamed'?");

    app.confirm(&db);
    assert!(app.allocation.categories.is_empty());
    assert!(AllocationState::load(&db).unwrap().unwrap().categories.is_empty());
}

#[test]
fn test_delete_with_nothing_selected() {
    let (mut app, _db) = new_app();
    app.request_delete_selected();
    assert_eq!(app.input_mode, InputMode::Normal);
    assert_eq!(app.status_message, "No category selected");
}

#[test]
fn test_delete_last_moves_selection_up() {
    let (mut app, db) = new_app();
    app.add_category(&db);
    app.add_category(&db);
    app.finish_edit();
    assert_eq!(app.category_index, 1);
    app.request_delete_selected();
    app.confirm(&db);
    assert_eq!(app.category_index, 0);
}

#[test]
fn test_cancel_keeps_data() {
    let (mut app, db) = new_app();
    app.add_category(&db);
    app.finish_edit();
    app.request_delete_selected();
    app.cancel_confirm();
    assert!(app.pending_action.is_none());
    assert_eq!(app.allocation.categories.len(), 1);
}

#[test]
fn test_reset_clears_storage() {
    let (mut app, db) = new_app();
    app.add_category(&db);
    app.finish_edit();
    app.request_reset();
    app.confirm(&db);

    assert_eq!(app.allocation.total_amount, Decimal::ZERO);
    assert!(app.allocation.categories.is_empty());
    assert!(db.get_item(AllocationState::STORAGE_KEY).unwrap().is_none());
    assert_eq!(app.status_message, "Reset complete: all data has been cleared");
}

#[test]
fn test_reset_survives_storage_failure() {
    let (mut app, db) = new_app();
    app.add_category(&db);
    app.finish_edit();
    app.request_reset();
    app.confirm(&ReadOnlyStore);

    assert!(app.running);
    assert!(app.pending_action.is_none());
    assert!(app.allocation.categories.is_empty());
    assert_eq!(
        app.status_message,
        "Reset, but saved data could not be removed: disk is read-only"
    );
}

#[test]
fn test_failed_save_is_reported() {
    let (mut app, _db) = new_app();
    app.add_category(&ReadOnlyStore);
    assert_eq!(app.allocation.categories.len(), 1);
    assert_eq!(app.status_message, "Could not save: disk is read-only");
}

#[test]
fn test_clear_profit_without_data_skips_confirm() {
    let (mut app, _db) = new_app();
    app.request_clear_profit();
    assert_eq!(app.input_mode, InputMode::Normal);
    assert_eq!(app.status_message, "Nothing to clear");
}

// ── Currency ──────────────────────────────────────────────────

#[test]
fn test_cycle_currency_per_screen() {
    let (mut app, db) = new_app();
    app.cycle_currency(&db);
    assert_eq!(app.allocation.currency, Currency::Ghs);

    app.screen = Screen::Profit;
    app.cycle_currency(&db);
    assert_eq!(app.profit.currency, Currency::Eur);
    assert_eq!(app.allocation.currency, Currency::Ghs);
}

// ── Export ────────────────────────────────────────────────────

#[test]
fn test_export_blocked_shows_reason() {
    let (mut app, _db) = new_app();
    app.export(crate::export::ExportFormat::Text, None);
    assert_eq!(
        app.status_message,
        "Error: Complete 100% allocation to enable export"
    );
}

#[test]
fn test_export_writes_file() {
    let (mut app, db) = new_app();
    let dir = tempfile::tempdir().unwrap();
    let id = app.add_category(&db);
    type_text(&mut app, &db, "All");
    app.begin_edit(EditTarget::CategoryPercentage(id));
    type_text(&mut app, &db, "100");
    app.finish_edit();

    let path = dir.path().join("split.txt");
    app.export(crate::export::ExportFormat::Text, Some(path.clone()));
    assert!(app.status_message.starts_with("Downloaded!"));
    assert!(std::fs::read_to_string(path)
        .unwrap()
        .contains("- All (100%): ₦100,000"));
}

#[test]
fn test_copy_blocked_becomes_status() {
    let (mut app, db) = new_app();
    app.add_category(&db);
    app.finish_edit();

    app.copy(&SystemClipboard);
    assert_eq!(
        app.status_message,
        "Error: Complete 100% allocation to enable export"
    );
}
