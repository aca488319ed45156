//! Rendering and display collaborator contracts.
//!
//! The renderer turns a [`TrackedView`] into a [`RenderedInventory`], the
//! host-displayable window description; the display hands it to the host.

use crate::view::{ItemStack, TrackedView};
use horizon_plugin_core::PlayerId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::warn;

/// Number of slots in one inventory row.
pub const SLOTS_PER_ROW: u16 = 9;

/// Largest row count hosts accept for a chest-style window.
pub const MAX_ROWS: u8 = 6;

/// A fully rendered inventory window for one player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderedInventory {
    pub player: PlayerId,
    pub title: String,
    /// Total slot count, always a multiple of [`SLOTS_PER_ROW`]
    pub size: u16,
    pub slots: BTreeMap<u16, ItemStack>,
}

/// Produces a host-displayable object for a view.
pub trait InventoryRenderer: Send + Sync {
    fn render(&self, view: &TrackedView, player: PlayerId) -> RenderedInventory;
}

/// Shows a rendered inventory to a player.
pub trait InventoryDisplay: Send + Sync {
    fn show(&self, player: PlayerId, inventory: RenderedInventory);
}

/// Default renderer placing view contents into a grid of `rows * 9` slots.
#[derive(Debug, Clone)]
pub struct SlotRenderer {
    max_rows: u8,
}

impl SlotRenderer {
    /// Creates a renderer that clamps views to at most `max_rows` rows
    /// (itself clamped to `1..=MAX_ROWS`).
    pub fn new(max_rows: u8) -> Self {
        Self {
            max_rows: max_rows.clamp(1, MAX_ROWS),
        }
    }
}

impl Default for SlotRenderer {
    fn default() -> Self {
        Self::new(MAX_ROWS)
    }
}

impl InventoryRenderer for SlotRenderer {
    fn render(&self, view: &TrackedView, player: PlayerId) -> RenderedInventory {
        let rows = view.rows().clamp(1, self.max_rows);
        let size = rows as u16 * SLOTS_PER_ROW;

        let mut slots = BTreeMap::new();
        for (slot, item) in view.contents(player) {
            if slot >= size {
                warn!(
                    "⚠️ View '{}' placed an item in slot {} outside its {} slots - dropped",
                    view.title(),
                    slot,
                    size
                );
                continue;
            }
            slots.insert(slot, item);
        }

        RenderedInventory {
            player,
            title: view.title(),
            size,
            slots,
        }
    }
}
