//! Headless host collaborators: a display that logs what would be shown and
//! a notification logger hooked onto the event bus.

use horizon_inventory::notification::{
    INVENTORY_CLOSED, INVENTORY_NOTHING_OPEN, INVENTORY_OPENED, INVENTORY_UPDATED,
};
use horizon_inventory::{InventoryDisplay, InventoryNotification, RenderedInventory};
use horizon_plugin_core::{EventBus, PlayerId};
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, info};

/// Logs every inventory it is asked to show.
#[derive(Debug, Default)]
pub struct LoggingDisplay {
    shown: AtomicU64,
}

impl LoggingDisplay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shown(&self) -> u64 {
        self.shown.load(Ordering::Relaxed)
    }
}

impl InventoryDisplay for LoggingDisplay {
    fn show(&self, player: PlayerId, inventory: RenderedInventory) {
        self.shown.fetch_add(1, Ordering::Relaxed);
        info!(
            "🎒 Showing '{}' to {} ({} slots, {} filled)",
            inventory.title,
            player,
            inventory.size,
            inventory.slots.len()
        );
    }
}

/// Registers a handler logging every inventory notification.
pub fn log_notifications(events: &EventBus) {
    for name in [INVENTORY_OPENED, INVENTORY_CLOSED, INVENTORY_NOTHING_OPEN, INVENTORY_UPDATED] {
        events.on(name, |notification: InventoryNotification| {
            match notification.view() {
                Some(view) => debug!(
                    "📨 {} for {}: '{}' (animated: {})",
                    notification.event_name(),
                    notification.player(),
                    view.title,
                    view.animated
                ),
                None => debug!(
                    "📨 {} for {}",
                    notification.event_name(),
                    notification.player()
                ),
            }
            Ok(())
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn test_logging_display_counts() {
        let display = LoggingDisplay::new();
        let player = PlayerId::new();

        display.show(
            player,
            RenderedInventory {
                player,
                title: "Menu".to_string(),
                size: 27,
                slots: BTreeMap::new(),
            },
        );

        assert_eq!(display.shown(), 1);
    }

    #[test]
    fn test_log_notifications_registers_all_events() {
        let events = EventBus::new();
        log_notifications(&events);
        assert_eq!(events.stats().total_handlers, 4);
    }
}
