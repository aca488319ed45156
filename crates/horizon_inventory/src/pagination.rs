//! Per-player page cursors and the pagination widget.
//!
//! [`PaginationState`] only stores cursors; it never validates them. Bounds
//! are the widget's concern: [`Pagination::contents`] clamps a cursor that
//! points past the last page.

use crate::view::ItemStack;
use dashmap::DashMap;
use horizon_plugin_core::PlayerId;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Names one pageable widget, e.g. `"shop:weapons"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PaginationKey(pub String);

impl PaginationKey {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }
}

impl From<&str> for PaginationKey {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

/// Page cursors for every player and widget.
///
/// Entries survive view close events; they are only removed by [`clear`](Self::clear).
#[derive(Debug, Default)]
pub struct PaginationState {
    pages: DashMap<PlayerId, HashMap<PaginationKey, usize>>,
}

impl PaginationState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current page of `key` for `player`, 0 when never set.
    pub fn page(&self, player: PlayerId, key: &PaginationKey) -> usize {
        self.pages
            .get(&player)
            .and_then(|pages| pages.get(key).copied())
            .unwrap_or(0)
    }

    pub fn set_page(&self, player: PlayerId, key: PaginationKey, page: usize) {
        self.pages.entry(player).or_default().insert(key, page);
    }

    /// Advances the cursor by one page and returns the new page.
    pub fn next_page(&self, player: PlayerId, key: &PaginationKey) -> usize {
        let mut pages = self.pages.entry(player).or_default();
        let page = pages.entry(key.clone()).or_insert(0);
        *page = page.saturating_add(1);
        *page
    }

    /// Moves the cursor back by one page, stopping at 0.
    pub fn previous_page(&self, player: PlayerId, key: &PaginationKey) -> usize {
        let mut pages = self.pages.entry(player).or_default();
        let page = pages.entry(key.clone()).or_insert(0);
        *page = page.saturating_sub(1);
        *page
    }

    /// Snapshot of all cursors held for `player`.
    pub fn pages_of(&self, player: PlayerId) -> HashMap<PaginationKey, usize> {
        self.pages
            .get(&player)
            .map(|pages| pages.clone())
            .unwrap_or_default()
    }

    /// Drops every cursor of `player`, returning how many were held.
    pub fn clear(&self, player: PlayerId) -> usize {
        self.pages
            .remove(&player)
            .map(|(_, pages)| pages.len())
            .unwrap_or(0)
    }

    pub fn player_count(&self) -> usize {
        self.pages.len()
    }
}

/// A widget spreading `items` over a fixed set of slots, one page at a time.
#[derive(Debug, Clone)]
pub struct Pagination {
    key: PaginationKey,
    slots: Vec<u16>,
    items: Vec<ItemStack>,
}

impl Pagination {
    pub fn new(key: impl Into<PaginationKey>, slots: Vec<u16>, items: Vec<ItemStack>) -> Self {
        Self {
            key: key.into(),
            slots,
            items,
        }
    }

    pub fn key(&self) -> &PaginationKey {
        &self.key
    }

    /// Number of pages, never less than 1.
    pub fn page_count(&self) -> usize {
        if self.slots.is_empty() {
            return 1;
        }
        self.items.len().div_ceil(self.slots.len()).max(1)
    }

    /// Items of the player's current page mapped onto the widget slots.
    pub fn contents(&self, player: PlayerId, state: &PaginationState) -> Vec<(u16, ItemStack)> {
        if self.slots.is_empty() {
            return Vec::new();
        }
        let page = state.page(player, &self.key).min(self.page_count() - 1);

        self.items
            .chunks(self.slots.len())
            .nth(page)
            .map(|chunk| self.slots.iter().copied().zip(chunk.iter().cloned()).collect())
            .unwrap_or_default()
    }
}

impl From<String> for PaginationKey {
    fn from(name: String) -> Self {
        Self(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn items(count: usize) -> Vec<ItemStack> {
        (0..count).map(|i| ItemStack::new(format!("ITEM_{i}"))).collect()
    }

    #[test]
    fn test_cursor_defaults_and_moves() {
        let state = PaginationState::new();
        let player = PlayerId::new();
        let key = PaginationKey::new("shop");

        assert_eq!(state.page(player, &key), 0);
        assert_eq!(state.previous_page(player, &key), 0);
        assert_eq!(state.next_page(player, &key), 1);
        assert_eq!(state.next_page(player, &key), 2);
        assert_eq!(state.previous_page(player, &key), 1);

        state.set_page(player, key.clone(), 7);
        assert_eq!(state.page(player, &key), 7);
    }

    #[test]
    fn test_cursors_are_scoped_per_player() {
        let state = PaginationState::new();
        let alice = PlayerId::new();
        let bob = PlayerId::new();
        let key = PaginationKey::new("shop");

        state.set_page(alice, key.clone(), 3);
        assert_eq!(state.page(bob, &key), 0);
        assert_eq!(state.pages_of(alice).len(), 1);

        assert_eq!(state.clear(alice), 1);
        assert_eq!(state.page(alice, &key), 0);
        assert_eq!(state.clear(alice), 0);
    }

    #[test]
    fn test_widget_pages() {
        let state = PaginationState::new();
        let player = PlayerId::new();
        let widget = Pagination::new("list", vec![10, 11, 12], items(7));

        assert_eq!(widget.page_count(), 3);

        let first = widget.contents(player, &state);
        assert_eq!(first.len(), 3);
        assert_eq!(first[0], (10, ItemStack::new("ITEM_0")));

        state.set_page(player, widget.key().clone(), 2);
        let last = widget.contents(player, &state);
        assert_eq!(last, vec![(10, ItemStack::new("ITEM_6"))]);
    }

    #[test]
    fn test_widget_clamps_out_of_range_cursor() {
        let state = PaginationState::new();
        let player = PlayerId::new();
        let widget = Pagination::new("list", vec![0, 1], items(3));

        state.set_page(player, widget.key().clone(), 40);
        assert_eq!(widget.contents(player, &state), vec![(0, ItemStack::new("ITEM_2"))]);
    }

    #[test]
    fn test_empty_widget() {
        let state = PaginationState::new();
        let widget = Pagination::new("empty", vec![0, 1], Vec::new());
        assert_eq!(widget.page_count(), 1);
        assert!(widget.contents(PlayerId::new(), &state).is_empty());
    }
}
