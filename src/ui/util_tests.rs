#![allow(clippy::unwrap_used)]

use rust_decimal_macros::dec;

use super::util::*;

// ── truncate ──────────────────────────────────────────────────

#[test]
fn test_truncate_short_string() {
    assert_eq!(truncate("Rent", 10), "Rent");
}

#[test]
fn test_truncate_exact_length() {
    assert_eq!(truncate("hello", 5), "hello");
}

#[test]
fn test_truncate_long_string() {
    assert_eq!(truncate("Office Supplies", 7), "Office…");
}

#[test]
fn test_truncate_empty() {
    assert_eq!(truncate("", 5), "");
}

#[test]
fn test_truncate_zero_max() {
    assert_eq!(truncate("hello", 0), "");
}

#[test]
fn test_truncate_unicode() {
    assert_eq!(truncate("café résumé", 5), "café…");
}

#[test]
fn test_truncate_one_char() {
    assert_eq!(truncate("hello", 1), "…");
}

// ── progress_bar ─────────────────────────────────────────────

#[test]
fn test_progress_bar_half() {
    assert_eq!(progress_bar(dec!(50), 10), "[█████░░░░░]");
}

#[test]
fn test_progress_bar_empty() {
    assert_eq!(progress_bar(dec!(0), 4), "[░░░░]");
}

#[test]
fn test_progress_bar_full() {
    assert_eq!(progress_bar(dec!(100), 4), "[████]");
}

#[test]
fn test_progress_bar_clamps_over_allocation() {
    assert_eq!(progress_bar(dec!(120), 4), "[████]");
}

#[test]
fn test_progress_bar_fractional_rounds_down() {
    assert_eq!(progress_bar(dec!(99.9), 10), "[█████████░]");
}

// ── scrolling ────────────────────────────────────────────────

#[test]
fn test_scroll_down_moves_window() {
    let (mut index, mut scroll) = (2, 0);
    scroll_down(&mut index, &mut scroll, 10, 3);
    assert_eq!(index, 3);
    assert_eq!(scroll, 1);
}

#[test]
fn test_scroll_down_stops_at_end() {
    let (mut index, mut scroll) = (4, 2);
    scroll_down(&mut index, &mut scroll, 5, 3);
    assert_eq!(index, 4);
    assert_eq!(scroll, 2);
}

#[test]
fn test_scroll_up_pulls_window() {
    let (mut index, mut scroll) = (3, 3);
    scroll_up(&mut index, &mut scroll);
    assert_eq!(index, 2);
    assert_eq!(scroll, 2);
}

#[test]
fn test_scroll_up_at_top() {
    let (mut index, mut scroll) = (0, 0);
    scroll_up(&mut index, &mut scroll);
    assert_eq!((index, scroll), (0, 0));
}

#[test]
fn test_scroll_to_bottom_and_top() {
    let (mut index, mut scroll) = (0, 0);
    scroll_to_bottom(&mut index, &mut scroll, 8, 3);
    assert_eq!((index, scroll), (7, 5));
    scroll_to_top(&mut index, &mut scroll);
    assert_eq!((index, scroll), (0, 0));
}

#[test]
fn test_scroll_to_bottom_empty_list() {
    let (mut index, mut scroll) = (0, 0);
    scroll_to_bottom(&mut index, &mut scroll, 0, 3);
    assert_eq!((index, scroll), (0, 0));
}
