//! Per-player slot click listeners.

use dashmap::DashMap;
use horizon_plugin_core::PlayerId;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{debug, trace};

/// Collaborator the tracker uses to drop a player's callbacks on close.
pub trait ListenerRegistry: Send + Sync {
    fn unregister_all(&self, player: PlayerId);
}

/// Handle returned by [`PlayerListenerRegistry::register`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(pub u64);

/// Callback invoked with the clicking player and the clicked slot.
pub type ClickCallback = Arc<dyn Fn(PlayerId, u16) + Send + Sync>;

struct SlotListener {
    id: ListenerId,
    slot: u16,
    callback: ClickCallback,
}

/// Stores click listeners registered by widgets while a view is open.
#[derive(Default)]
pub struct PlayerListenerRegistry {
    listeners: DashMap<PlayerId, Vec<SlotListener>>,
    next_id: AtomicU64,
}

impl std::fmt::Debug for PlayerListenerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlayerListenerRegistry")
            .field("players", &self.listeners.len())
            .finish()
    }
}

impl PlayerListenerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register<F>(&self, player: PlayerId, slot: u16, callback: F) -> ListenerId
    where
        F: Fn(PlayerId, u16) + Send + Sync + 'static,
    {
        let id = ListenerId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.listeners.entry(player).or_default().push(SlotListener {
            id,
            slot,
            callback: Arc::new(callback),
        });
        trace!("🖱️ Registered listener {:?} on slot {} for {}", id, slot, player);
        id
    }

    /// Invokes every listener of `player` bound to `slot`; returns how many ran.
    pub fn dispatch_click(&self, player: PlayerId, slot: u16) -> usize {
        // Collect first so callbacks may register or unregister listeners.
        let callbacks: Vec<ClickCallback> = self
            .listeners
            .get(&player)
            .map(|listeners| {
                listeners
                    .iter()
                    .filter(|listener| listener.slot == slot)
                    .map(|listener| listener.callback.clone())
                    .collect()
            })
            .unwrap_or_default();

        for callback in &callbacks {
            callback(player, slot);
        }
        callbacks.len()
    }

    pub fn unregister(&self, player: PlayerId, id: ListenerId) -> bool {
        let Some(mut listeners) = self.listeners.get_mut(&player) else {
            return false;
        };
        let before = listeners.len();
        listeners.retain(|listener| listener.id != id);
        before != listeners.len()
    }

    pub fn listener_count(&self, player: PlayerId) -> usize {
        self.listeners
            .get(&player)
            .map(|listeners| listeners.len())
            .unwrap_or(0)
    }
}

impl ListenerRegistry for PlayerListenerRegistry {
    fn unregister_all(&self, player: PlayerId) {
        if let Some((_, removed)) = self.listeners.remove(&player) {
            debug!("🧹 Unregistered {} listeners for {}", removed.len(), player);
        }
    }
}
