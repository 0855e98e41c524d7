use rust_decimal::Decimal;
use std::path::PathBuf;

use crate::db::StateStore;
use crate::engine;
use crate::export::{self, ClipboardWriter, ExportFormat};
use crate::models::{AllocationState, Category, CategoryUpdate, Currency, ProfitField, ProfitInputs};
use crate::ui::util::{scroll_down, scroll_to_bottom, scroll_to_top, scroll_up};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Screen {
    Breakdown,
    Profit,
}

impl Screen {
    pub(crate) fn all() -> &'static [Screen] {
        &[Self::Breakdown, Self::Profit]
    }
}

impl std::fmt::Display for Screen {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Breakdown => write!(f, "Spend Breakdown"),
            Self::Profit => write!(f, "Profit Calculator"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum InputMode {
    Normal,
    Command,
    Editing,
    Confirm,
}

impl std::fmt::Display for InputMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Normal => write!(f, "NORMAL"),
            Self::Command => write!(f, "COMMAND"),
            Self::Editing => write!(f, "EDIT"),
            Self::Confirm => write!(f, "CONFIRM"),
        }
    }
}

/// Field currently receiving keystrokes in [`InputMode::Editing`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum EditTarget {
    CategoryName(String),
    CategoryPercentage(String),
    TotalAmount,
    Profit(ProfitField),
}

impl EditTarget {
    pub(crate) fn prompt(&self) -> &'static str {
        match self {
            Self::CategoryName(_) => "name> ",
            Self::CategoryPercentage(_) => "percent> ",
            Self::TotalAmount => "total> ",
            Self::Profit(ProfitField::Cost) => "cost> ",
            Self::Profit(ProfitField::SellingPrice) => "price> ",
            Self::Profit(ProfitField::Expenses) => "expenses> ",
        }
    }
}

/// Pending action that requires user confirmation.
#[derive(Debug, Clone)]
pub(crate) enum PendingAction {
    DeleteCategory { id: String, name: String },
    Reset,
    ClearProfit,
}

pub(crate) struct App {
    pub(crate) running: bool,
    pub(crate) screen: Screen,
    pub(crate) input_mode: InputMode,
    pub(crate) command_input: String,
    pub(crate) status_message: String,
    pub(crate) show_help: bool,

    // Spend breakdown
    pub(crate) allocation: AllocationState,
    pub(crate) category_index: usize,
    pub(crate) category_scroll: usize,

    // Profit calculator
    pub(crate) profit: ProfitInputs,
    pub(crate) profit_field_index: usize,

    // Editing
    pub(crate) edit_target: Option<EditTarget>,
    pub(crate) edit_input: String,

    // Confirmation
    pub(crate) pending_action: Option<PendingAction>,
    pub(crate) confirm_message: String,

    pub(crate) export_dir: PathBuf,

    // Layout (updated each render frame)
    pub(crate) visible_rows: usize,
}

impl App {
    pub(crate) fn new(allocation: AllocationState, profit: ProfitInputs, export_dir: PathBuf) -> Self {
        Self {
            running: true,
            screen: Screen::Breakdown,
            input_mode: InputMode::Normal,
            command_input: String::new(),
            status_message: String::new(),
            show_help: false,

            allocation,
            category_index: 0,
            category_scroll: 0,

            profit,
            profit_field_index: 0,

            edit_target: None,
            edit_input: String::new(),

            pending_action: None,
            confirm_message: String::new(),

            export_dir,

            visible_rows: 10,
        }
    }

    pub(crate) fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = msg.into();
    }

    pub(crate) fn selected_category(&self) -> Option<&Category> {
        self.allocation.categories.get(self.category_index)
    }

    pub(crate) fn selected_profit_field(&self) -> ProfitField {
        ProfitField::all()
            .get(self.profit_field_index)
            .copied()
            .unwrap_or(ProfitField::Cost)
    }

    // ── Persistence ──────────────────────────────────────────

    /// Saving is best effort: a failed write is logged and shown, never fatal.
    pub(crate) fn persist_allocation(&mut self, store: &dyn StateStore) {
        if let Err(e) = self.allocation.save(store) {
            tracing::warn!(error = %e, "failed to save spend breakdown");
            self.set_status(format!("Could not save: {e}"));
        }
    }

    pub(crate) fn persist_profit(&mut self, store: &dyn StateStore) {
        if let Err(e) = self.profit.save(store) {
            tracing::warn!(error = %e, "failed to save profit calculator");
            self.set_status(format!("Could not save: {e}"));
        }
    }

    // ── Category list ────────────────────────────────────────

    pub(crate) fn move_down(&mut self) {
        match self.screen {
            Screen::Breakdown => scroll_down(
                &mut self.category_index,
                &mut self.category_scroll,
                self.allocation.categories.len(),
                self.visible_rows.max(1),
            ),
            Screen::Profit => {
                if self.profit_field_index + 1 < ProfitField::all().len() {
                    self.profit_field_index += 1;
                }
            }
        }
    }

    pub(crate) fn move_up(&mut self) {
        match self.screen {
            Screen::Breakdown => scroll_up(&mut self.category_index, &mut self.category_scroll),
            Screen::Profit => {
                self.profit_field_index = self.profit_field_index.saturating_sub(1);
            }
        }
    }

    pub(crate) fn goto_top(&mut self) {
        match self.screen {
            Screen::Breakdown => scroll_to_top(&mut self.category_index, &mut self.category_scroll),
            Screen::Profit => self.profit_field_index = 0,
        }
    }

    pub(crate) fn goto_bottom(&mut self) {
        match self.screen {
            Screen::Breakdown => scroll_to_bottom(
                &mut self.category_index,
                &mut self.category_scroll,
                self.allocation.categories.len(),
                self.visible_rows.max(1),
            ),
            Screen::Profit => self.profit_field_index = ProfitField::all().len() - 1,
        }
    }

    fn clamp_selection(&mut self) {
        let len = self.allocation.categories.len();
        if self.category_index >= len {
            self.category_index = len.saturating_sub(1);
        }
        if self.category_scroll > self.category_index {
            self.category_scroll = self.category_index;
        }
    }

    /// Add an empty category, select it and start editing its name.
    pub(crate) fn add_category(&mut self, store: &dyn StateStore) -> String {
        let id = self.allocation.add_category();
        self.persist_allocation(store);
        scroll_to_bottom(
            &mut self.category_index,
            &mut self.category_scroll,
            self.allocation.categories.len(),
            self.visible_rows.max(1),
        );
        self.begin_edit(EditTarget::CategoryName(id.clone()));
        id
    }

    pub(crate) fn request_delete_selected(&mut self) {
        let Some(category) = self.selected_category() else {
            self.set_status("No category selected");
            return;
        };
        let id = category.id.clone();
        let name = category.display_name().to_string();
        self.confirm_message = format!("Delete '{name}'?");
        self.pending_action = Some(PendingAction::DeleteCategory { id, name });
        self.input_mode = InputMode::Confirm;
    }

    pub(crate) fn request_reset(&mut self) {
        self.confirm_message = "Reset the total and all categories?".into();
        self.pending_action = Some(PendingAction::Reset);
        self.input_mode = InputMode::Confirm;
    }

    pub(crate) fn request_clear_profit(&mut self) {
        if !engine::has_profit_data(&self.profit) {
            self.set_status("Nothing to clear");
            return;
        }
        self.confirm_message = "Clear all profit calculator inputs?".into();
        self.pending_action = Some(PendingAction::ClearProfit);
        self.input_mode = InputMode::Confirm;
    }

    /// Run the confirmed action.
    pub(crate) fn confirm(&mut self, store: &dyn StateStore) {
        let Some(action) = self.pending_action.take() else {
            return;
        };
        match action {
            PendingAction::DeleteCategory { id, name } => {
                if self.allocation.delete_category(&id).is_some() {
                    self.clamp_selection();
                    self.persist_allocation(store);
                    self.set_status(format!("Category removed: {name}"));
                }
            }
            PendingAction::Reset => {
                self.allocation.reset();
                self.category_index = 0;
                self.category_scroll = 0;
                match AllocationState::forget(store) {
                    Ok(()) => {
                        tracing::info!("spend breakdown reset");
                        self.set_status("Reset complete: all data has been cleared");
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, "failed to remove saved spend breakdown");
                        self.set_status(format!("Reset, but saved data could not be removed: {e}"));
                    }
                }
            }
            PendingAction::ClearProfit => {
                self.profit.clear();
                self.persist_profit(store);
                self.set_status("Profit calculator cleared");
            }
        }
    }

    pub(crate) fn cancel_confirm(&mut self) {
        self.pending_action = None;
        self.confirm_message.clear();
        self.set_status("Cancelled");
    }

    // ── Editing ──────────────────────────────────────────────

    /// Enter editing mode with the field's current value in the buffer.
    pub(crate) fn begin_edit(&mut self, target: EditTarget) {
        self.edit_input = match &target {
            EditTarget::CategoryName(id) => Category::find_by_id(&self.allocation.categories, id)
                .map(|c| c.name.clone())
                .unwrap_or_default(),
            EditTarget::CategoryPercentage(id) => {
                Category::find_by_id(&self.allocation.categories, id)
                    .map(|c| blank_if_zero(c.percentage))
                    .unwrap_or_default()
            }
            EditTarget::TotalAmount => blank_if_zero(self.allocation.total_amount.trunc()),
            EditTarget::Profit(field) => blank_if_zero(self.profit.get(*field)),
        };
        self.edit_target = Some(target);
        self.input_mode = InputMode::Editing;
    }

    pub(crate) fn edit_push(&mut self, c: char, store: &dyn StateStore) {
        let mut next = self.edit_input.clone();
        next.push(c);
        self.set_edit_input(next, store);
    }

    pub(crate) fn edit_pop(&mut self, store: &dyn StateStore) {
        let mut next = self.edit_input.clone();
        next.pop();
        self.set_edit_input(next, store);
    }

    /// Replace the buffer, filter it for the field type and apply it live.
    pub(crate) fn set_edit_input(&mut self, raw: String, store: &dyn StateStore) {
        let Some(target) = self.edit_target.clone() else {
            return;
        };
        match target {
            EditTarget::CategoryName(id) => {
                self.edit_input = raw;
                self.allocation
                    .update_category(&id, CategoryUpdate::Name(self.edit_input.clone()));
                self.persist_allocation(store);
            }
            EditTarget::CategoryPercentage(id) => {
                self.edit_input = engine::sanitize_percentage_input(&raw);
                let pct = engine::parse_percentage_input(&self.edit_input);
                self.allocation
                    .update_category(&id, CategoryUpdate::Percentage(pct));
                self.persist_allocation(store);
            }
            EditTarget::TotalAmount => {
                self.edit_input = engine::sanitize_amount_input(&raw);
                self.allocation
                    .set_total_amount(engine::parse_amount_input(&self.edit_input));
                self.persist_allocation(store);
            }
            EditTarget::Profit(field) => {
                self.edit_input = engine::sanitize_percentage_input(&raw);
                self.profit
                    .set(field, engine::parse_amount_input(&self.edit_input));
                self.persist_profit(store);
            }
        }
    }

    /// Name → percentage of the same category; other fields just finish.
    pub(crate) fn edit_next_field(&mut self) {
        match self.edit_target.clone() {
            Some(EditTarget::CategoryName(id)) => {
                self.begin_edit(EditTarget::CategoryPercentage(id));
            }
            _ => self.finish_edit(),
        }
    }

    pub(crate) fn finish_edit(&mut self) {
        self.edit_target = None;
        self.edit_input.clear();
        self.input_mode = InputMode::Normal;
    }

    // ── Currency ─────────────────────────────────────────────

    pub(crate) fn cycle_currency(&mut self, store: &dyn StateStore) {
        match self.screen {
            Screen::Breakdown => {
                self.allocation.currency = self
                    .allocation
                    .currency
                    .cycle(Currency::breakdown_choices());
                self.persist_allocation(store);
                self.set_status(format!("Currency: {}", self.allocation.currency));
            }
            Screen::Profit => {
                self.profit.currency = self.profit.currency.cycle(Currency::profit_choices());
                self.persist_profit(store);
                self.set_status(format!("Currency: {}", self.profit.currency));
            }
        }
    }

    // ── Export ───────────────────────────────────────────────

    /// Export failures become a status message; the app keeps running.
    pub(crate) fn export(&mut self, format: ExportFormat, path: Option<PathBuf>) {
        let path = path.unwrap_or_else(|| export::default_export_path(&self.export_dir, format));
        match export::export_to_file(&self.allocation, format, &path) {
            Ok(()) => self.set_status(format!("Downloaded! Breakdown exported to {}", path.display())),
            Err(e) => {
                tracing::warn!(error = %e, "export failed");
                self.set_status(format!("Error: {e}"));
            }
        }
    }

    pub(crate) fn copy(&mut self, clipboard: &dyn ClipboardWriter) {
        match export::copy_to_clipboard(&self.allocation, clipboard) {
            Ok(()) => self.set_status("Copied! Breakdown copied to clipboard"),
            Err(e) => {
                tracing::warn!(error = %format!("{e:#}"), "clipboard copy failed");
                self.set_status(format!("Error: {e}"));
            }
        }
    }
}

/// Edit buffers start empty rather than showing a bare `0`.
fn blank_if_zero(val: Decimal) -> String {
    if val.is_zero() {
        String::new()
    } else {
        val.normalize().to_string()
    }
}

#[cfg(test)]
#[path = "app_tests.rs"]
mod app_tests;
