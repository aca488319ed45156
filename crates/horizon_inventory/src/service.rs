//! Async façade that runs tracker operations and publishes their notifications.

use crate::error::SessionError;
use crate::notification::InventoryNotification;
use crate::session::SessionTracker;
use crate::view::TrackedView;
use horizon_plugin_core::{EventBus, PlayerId};
use std::sync::Arc;
use tracing::error;

/// Couples a [`SessionTracker`] with the [`EventBus`] its notifications go to.
#[derive(Debug, Clone)]
pub struct InventoryService {
    tracker: Arc<SessionTracker>,
    events: Arc<EventBus>,
}

impl InventoryService {
    pub fn new(tracker: Arc<SessionTracker>, events: Arc<EventBus>) -> Self {
        Self { tracker, events }
    }

    pub fn tracker(&self) -> &Arc<SessionTracker> {
        &self.tracker
    }

    pub async fn open(&self, view: TrackedView, player: PlayerId) -> InventoryNotification {
        let notification = self.tracker.open(view, player);
        self.publish(&notification).await;
        notification
    }

    pub async fn close(&self, player: PlayerId) -> InventoryNotification {
        let notification = self.tracker.close(player);
        self.publish(&notification).await;
        notification
    }

    /// Fails with [`SessionError::NotFound`] and publishes nothing when the
    /// player has no open view.
    pub async fn update(&self, player: PlayerId) -> Result<InventoryNotification, SessionError> {
        let notification = self.tracker.update(player)?;
        self.publish(&notification).await;
        Ok(notification)
    }

    /// Closes every tracked session; returns how many were closed.
    pub async fn close_all(&self) -> usize {
        let players = self.tracker.open_sessions();
        let mut closed = 0;
        for player in players {
            if matches!(self.close(player).await, InventoryNotification::Closed { .. }) {
                closed += 1;
            }
        }
        closed
    }

    async fn publish(&self, notification: &InventoryNotification) {
        if let Err(e) = self.events.emit(notification.event_name(), notification).await {
            error!(
                "❌ Failed to publish {} for {}: {}",
                notification.event_name(),
                notification.player(),
                e
            );
        }
    }
}
