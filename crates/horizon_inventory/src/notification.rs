//! Lifecycle notifications returned by tracker operations.
//!
//! The tracker never publishes anything itself; callers dispatch these values
//! (see [`InventoryService`](crate::InventoryService)).

use crate::view::ViewSummary;
use horizon_plugin_core::PlayerId;
use serde::{Deserialize, Serialize};

pub const INVENTORY_OPENED: &str = "inventory_opened";
pub const INVENTORY_CLOSED: &str = "inventory_closed";
pub const INVENTORY_NOTHING_OPEN: &str = "inventory_nothing_open";
pub const INVENTORY_UPDATED: &str = "inventory_updated";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum InventoryNotification {
    /// A view was shown to a player
    Opened { player: PlayerId, view: ViewSummary },
    /// A tracked view was closed
    Closed { player: PlayerId, view: ViewSummary },
    /// A close was requested but no view was tracked for the player
    NothingOpen { player: PlayerId },
    /// A tracked view redrew itself
    Updated { player: PlayerId, view: ViewSummary },
}

impl InventoryNotification {
    /// Bus event name this notification is published under.
    pub fn event_name(&self) -> &'static str {
        match self {
            Self::Opened { .. } => INVENTORY_OPENED,
            Self::Closed { .. } => INVENTORY_CLOSED,
            Self::NothingOpen { .. } => INVENTORY_NOTHING_OPEN,
            Self::Updated { .. } => INVENTORY_UPDATED,
        }
    }

    pub fn player(&self) -> PlayerId {
        match self {
            Self::Opened { player, .. }
            | Self::Closed { player, .. }
            | Self::NothingOpen { player }
            | Self::Updated { player, .. } => *player,
        }
    }

    pub fn view(&self) -> Option<&ViewSummary> {
        match self {
            Self::Opened { view, .. } | Self::Closed { view, .. } | Self::Updated { view, .. } => {
                Some(view)
            }
            Self::NothingOpen { .. } => None,
        }
    }

    /// Whether the view involved is of the animated variant.
    pub fn animated(&self) -> bool {
        self.view().map(|view| view.animated).unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::ViewId;

    #[test]
    fn test_json_shape() {
        let player = PlayerId::new();
        let notification = InventoryNotification::Closed {
            player,
            view: ViewSummary {
                id: ViewId::new(),
                title: "Shop".to_string(),
                animated: true,
            },
        };

        let json = serde_json::to_value(&notification).unwrap();
        assert_eq!(json["kind"], "closed");
        assert_eq!(json["view"]["title"], "Shop");
        assert_eq!(notification.event_name(), INVENTORY_CLOSED);
        assert!(notification.animated());
        assert_eq!(notification.player(), player);
    }

    #[test]
    fn test_nothing_open_has_no_view() {
        let notification = InventoryNotification::NothingOpen { player: PlayerId::new() };
        assert!(notification.view().is_none());
        assert!(!notification.animated());
        assert_eq!(notification.event_name(), INVENTORY_NOTHING_OPEN);
    }
}
