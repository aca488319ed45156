//! View contracts and the tracked-view sum type.
//!
//! A view describes what a player sees in an inventory window. Plain views
//! are drawn once per open; animated views additionally run a periodic
//! update process for as long as they stay open.

use horizon_plugin_core::PlayerId;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use std::sync::Arc;
use uuid::Uuid;

/// Unique identifier of a view instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ViewId(pub Uuid);

impl ViewId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ViewId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ViewId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single stack of items placed in an inventory slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemStack {
    /// Host material name, e.g. `"DIAMOND_SWORD"`
    pub material: String,
    pub amount: u8,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub lore: Vec<String>,
}

impl ItemStack {
    pub fn new(material: impl Into<String>) -> Self {
        Self {
            material: material.into(),
            amount: 1,
            display_name: None,
            lore: Vec::new(),
        }
    }

    pub fn amount(mut self, amount: u8) -> Self {
        self.amount = amount;
        self
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self
    }

    pub fn lore_line(mut self, line: impl Into<String>) -> Self {
        self.lore.push(line.into());
        self
    }
}

/// The serializable description of a view carried by notifications.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewSummary {
    pub id: ViewId,
    pub title: String,
    pub animated: bool,
}

/// A UI description that can be shown to a player.
pub trait InventoryView: Send + Sync + Debug {
    fn id(&self) -> ViewId;

    /// Window title as currently shown.
    fn title(&self) -> String;

    /// Number of 9-slot rows in the window.
    fn rows(&self) -> u8 {
        3
    }

    /// Slot contents for `player`, as `(slot, item)` pairs.
    fn contents(&self, player: PlayerId) -> Vec<(u16, ItemStack)>;

    /// Recomputes the view for `player` after its state changed.
    fn update(&self, player: PlayerId);
}

/// A view that refreshes itself on a timer while it is open.
///
/// One instance may be open for several players at once, so implementations
/// keep one update process per player: stopping it for one player must leave
/// the others running.
///
/// Implementations must not call back into the session tracker from
/// `start_periodic_update`/`stop_periodic_update`: the tracker invokes them
/// while holding the player's session entry.
pub trait AnimatedView: InventoryView {
    /// Starts the periodic update process bound to `player`.
    fn start_periodic_update(&self, player: PlayerId);

    /// Stops the process bound to `player`. Safe to call when nothing runs.
    fn stop_periodic_update(&self, player: PlayerId);
}

/// A view as tracked per player: either plain or animated.
#[derive(Debug, Clone)]
pub enum TrackedView {
    Plain(Arc<dyn InventoryView>),
    Animated(Arc<dyn AnimatedView>),
}

impl TrackedView {
    pub fn plain(view: impl InventoryView + 'static) -> Self {
        Self::Plain(Arc::new(view))
    }

    pub fn animated(view: impl AnimatedView + 'static) -> Self {
        Self::Animated(Arc::new(view))
    }

    pub fn is_animated(&self) -> bool {
        matches!(self, Self::Animated(_))
    }

    pub fn id(&self) -> ViewId {
        match self {
            Self::Plain(view) => view.id(),
            Self::Animated(view) => view.id(),
        }
    }

    pub fn title(&self) -> String {
        match self {
            Self::Plain(view) => view.title(),
            Self::Animated(view) => view.title(),
        }
    }

    pub fn rows(&self) -> u8 {
        match self {
            Self::Plain(view) => view.rows(),
            Self::Animated(view) => view.rows(),
        }
    }

    pub fn contents(&self, player: PlayerId) -> Vec<(u16, ItemStack)> {
        match self {
            Self::Plain(view) => view.contents(player),
            Self::Animated(view) => view.contents(player),
        }
    }

    pub fn update(&self, player: PlayerId) {
        match self {
            Self::Plain(view) => view.update(player),
            Self::Animated(view) => view.update(player),
        }
    }

    pub fn summary(&self) -> ViewSummary {
        ViewSummary {
            id: self.id(),
            title: self.title(),
            animated: self.is_animated(),
        }
    }

    /// The animation handle, present only for the animated variant.
    pub fn animation(&self) -> Option<Arc<dyn AnimatedView>> {
        match self {
            Self::Plain(_) => None,
            Self::Animated(view) => Some(view.clone()),
        }
    }
}
