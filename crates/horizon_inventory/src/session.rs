//! # Session Tracker
//!
//! Tracks which view each player currently has open and drives the view
//! lifecycle: open, close and update.
//!
//! ## State
//!
//! - **Sessions**: player → [`TrackedView`]. The animation handle of a player
//!   is the animated variant of its tracked view, so "handle present iff the
//!   open view is animated" holds by construction.
//! - **Pagination**: player → widget → page, shared through [`PaginationState`]
//!   and kept across close events.
//!
//! ## Thread Safety
//!
//! Both maps are `DashMap`s. Starting and stopping animations happens while
//! the player's session entry is held, so concurrent opens for one player
//! cannot leave an orphaned periodic update running. Rendering, display and
//! listener calls happen outside any map guard, so callers must serialize
//! operations for one player: two racing opens may leave the host showing one
//! view while the tracker holds the other.

use crate::error::SessionError;
use crate::listener::ListenerRegistry;
use crate::notification::InventoryNotification;
use crate::pagination::PaginationState;
use crate::render::{InventoryDisplay, InventoryRenderer};
use crate::view::{AnimatedView, InventoryView, TrackedView};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use horizon_plugin_core::PlayerId;
use std::sync::Arc;
use tracing::{debug, info};

pub struct SessionTracker {
    renderer: Arc<dyn InventoryRenderer>,
    display: Arc<dyn InventoryDisplay>,
    listeners: Arc<dyn ListenerRegistry>,
    sessions: DashMap<PlayerId, TrackedView>,
    pagination: Arc<PaginationState>,
}

impl std::fmt::Debug for SessionTracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionTracker")
            .field("open_sessions", &self.sessions.len())
            .field("pagination", &self.pagination)
            .finish()
    }
}

impl SessionTracker {
    pub fn new(
        renderer: Arc<dyn InventoryRenderer>,
        display: Arc<dyn InventoryDisplay>,
        listeners: Arc<dyn ListenerRegistry>,
    ) -> Self {
        Self {
            renderer,
            display,
            listeners,
            sessions: DashMap::new(),
            pagination: Arc::new(PaginationState::new()),
        }
    }

    /// Shows `view` to `player` and tracks it as the player's active view.
    ///
    /// Any view already tracked for the player is replaced without being
    /// closed on the host side, but if it was animated its periodic update is
    /// stopped before the new view's update starts.
    pub fn open(&self, view: TrackedView, player: PlayerId) -> InventoryNotification {
        let rendered = self.renderer.render(&view, player);
        self.display.show(player, rendered);

        let summary = view.summary();
        match self.sessions.entry(player) {
            Entry::Occupied(mut occupied) => {
                if let Some(previous) = occupied.get().animation() {
                    debug!(
                        "⏹️ Stopping animation of replaced view {} for {}",
                        previous.id(),
                        player
                    );
                    previous.stop_periodic_update(player);
                }
                start_animation(&view, player);
                occupied.insert(view);
            }
            Entry::Vacant(vacant) => {
                start_animation(&view, player);
                vacant.insert(view);
            }
        }

        info!(
            "📦 Opened '{}' for {} (animated: {})",
            summary.title, player, summary.animated
        );
        InventoryNotification::Opened { player, view: summary }
    }

    /// Stops tracking the player's view and unregisters the player's listeners.
    ///
    /// Tolerates players without a session; in that case nothing is created
    /// and [`InventoryNotification::NothingOpen`] is returned. Pagination
    /// cursors are left untouched.
    pub fn close(&self, player: PlayerId) -> InventoryNotification {
        let removed = self.sessions.remove(&player).map(|(_, view)| view);

        let notification = match removed {
            Some(view) => {
                if let Some(animation) = view.animation() {
                    animation.stop_periodic_update(player);
                }
                let summary = view.summary();
                info!("📪 Closed '{}' for {}", summary.title, player);
                InventoryNotification::Closed { player, view: summary }
            }
            None => {
                debug!("📭 Close requested for {} with no open view", player);
                InventoryNotification::NothingOpen { player }
            }
        };

        self.listeners.unregister_all(player);
        notification
    }

    /// Asks the player's tracked view to redraw itself.
    pub fn update(&self, player: PlayerId) -> Result<InventoryNotification, SessionError> {
        // Clone out of the map so the view may query the tracker while updating.
        let view = self
            .sessions
            .get(&player)
            .map(|entry| entry.value().clone())
            .ok_or(SessionError::NotFound(player))?;

        view.update(player);
        debug!("🔄 Updated '{}' for {}", view.title(), player);
        Ok(InventoryNotification::Updated {
            player,
            view: view.summary(),
        })
    }

    /// Read/write handle to the per-player page cursors.
    pub fn pagination(&self) -> Arc<PaginationState> {
        self.pagination.clone()
    }

    pub fn active_view(&self, player: PlayerId) -> Option<TrackedView> {
        self.sessions.get(&player).map(|entry| entry.value().clone())
    }

    /// The running animation for `player`, if its open view is animated.
    pub fn animation(&self, player: PlayerId) -> Option<Arc<dyn AnimatedView>> {
        self.sessions
            .get(&player)
            .and_then(|entry| entry.value().animation())
    }

    pub fn is_animated(&self, player: PlayerId) -> bool {
        self.animation(player).is_some()
    }

    pub fn has_session(&self, player: PlayerId) -> bool {
        self.sessions.contains_key(&player)
    }

    /// Players that currently have a tracked view.
    pub fn open_sessions(&self) -> Vec<PlayerId> {
        self.sessions.iter().map(|entry| *entry.key()).collect()
    }
}

fn start_animation(view: &TrackedView, player: PlayerId) {
    if let TrackedView::Animated(animated) = view {
        animated.start_periodic_update(player);
    }
}
