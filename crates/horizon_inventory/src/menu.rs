//! Ready-made views: a static menu and a menu with an animated title.

use crate::animation::PeriodicUpdater;
use crate::pagination::{Pagination, PaginationState};
use crate::view::{AnimatedView, InventoryView, ItemStack, ViewId};
use dashmap::DashMap;
use horizon_plugin_core::PlayerId;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::trace;

/// Callback receiving the player and the new title of an animated menu.
pub type FrameSink = Arc<dyn Fn(PlayerId, &str) + Send + Sync>;

/// A menu made of fixed items and an optional paginated list.
pub struct MenuView {
    id: ViewId,
    title: String,
    rows: u8,
    items: BTreeMap<u16, ItemStack>,
    pagination: Option<(Pagination, Arc<PaginationState>)>,
    revision: AtomicU64,
}

impl std::fmt::Debug for MenuView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MenuView")
            .field("id", &self.id)
            .field("title", &self.title)
            .field("rows", &self.rows)
            .field("items", &self.items.len())
            .finish()
    }
}

impl MenuView {
    pub fn new(title: impl Into<String>, rows: u8) -> Self {
        Self {
            id: ViewId::new(),
            title: title.into(),
            rows,
            items: BTreeMap::new(),
            pagination: None,
            revision: AtomicU64::new(0),
        }
    }

    pub fn with_item(mut self, slot: u16, item: ItemStack) -> Self {
        self.items.insert(slot, item);
        self
    }

    /// Attaches a paginated list whose cursor lives in `state`.
    pub fn with_pagination(mut self, widget: Pagination, state: Arc<PaginationState>) -> Self {
        self.pagination = Some((widget, state));
        self
    }

    /// Number of times [`update`](InventoryView::update) ran.
    pub fn revision(&self) -> u64 {
        self.revision.load(Ordering::Relaxed)
    }
}

impl InventoryView for MenuView {
    fn id(&self) -> ViewId {
        self.id
    }

    fn title(&self) -> String {
        self.title.clone()
    }

    fn rows(&self) -> u8 {
        self.rows
    }

    fn contents(&self, player: PlayerId) -> Vec<(u16, ItemStack)> {
        let mut slots = self.items.clone();
        // Page items win over fixed items placed in the same slot.
        if let Some((widget, state)) = &self.pagination {
            slots.extend(widget.contents(player, state));
        }
        slots.into_iter().collect()
    }

    fn update(&self, player: PlayerId) {
        let revision = self.revision.fetch_add(1, Ordering::Relaxed) + 1;
        trace!("🔄 Menu '{}' revision {} for {}", self.title, revision, player);
    }
}

/// Animation process of one player viewing an [`AnimatedMenu`].
#[derive(Debug, Default)]
struct FrameCursor {
    frame: Arc<AtomicUsize>,
    updater: PeriodicUpdater,
}

/// A [`MenuView`] whose title cycles through `frames` while it is open.
///
/// Every player gets its own frame cursor and update task, so one instance
/// can be open for several players at once. The title shown on open is the
/// first frame.
pub struct AnimatedMenu {
    menu: MenuView,
    frames: Arc<Vec<String>>,
    period: Duration,
    sink: Option<FrameSink>,
    cursors: DashMap<PlayerId, FrameCursor>,
}

impl std::fmt::Debug for AnimatedMenu {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnimatedMenu")
            .field("menu", &self.menu)
            .field("frames", &self.frames.len())
            .field("period", &self.period)
            .field("running", &self.running_count())
            .finish()
    }
}

impl AnimatedMenu {
    pub fn new(menu: MenuView, frames: Vec<String>, period: Duration) -> Self {
        Self {
            menu,
            frames: Arc::new(frames),
            period,
            sink: None,
            cursors: DashMap::new(),
        }
    }

    /// Receives every frame change, e.g. to push the new title to the host.
    pub fn with_frame_sink<F>(mut self, sink: F) -> Self
    where
        F: Fn(PlayerId, &str) + Send + Sync + 'static,
    {
        self.sink = Some(Arc::new(sink));
        self
    }

    /// Whether any player's animation is running.
    pub fn is_running(&self) -> bool {
        self.running_count() > 0
    }

    pub fn is_running_for(&self, player: PlayerId) -> bool {
        self.cursors
            .get(&player)
            .map(|cursor| cursor.updater.is_running())
            .unwrap_or(false)
    }

    pub fn running_count(&self) -> usize {
        self.cursors
            .iter()
            .filter(|cursor| cursor.updater.is_running())
            .count()
    }

    /// Index of the frame last pushed to `player`.
    pub fn frame_index(&self, player: PlayerId) -> Option<usize> {
        self.cursors
            .get(&player)
            .map(|cursor| cursor.frame.load(Ordering::Relaxed) % self.frames.len().max(1))
    }
}

impl InventoryView for AnimatedMenu {
    fn id(&self) -> ViewId {
        self.menu.id()
    }

    fn title(&self) -> String {
        self.frames
            .first()
            .cloned()
            .unwrap_or_else(|| self.menu.title())
    }

    fn rows(&self) -> u8 {
        self.menu.rows()
    }

    fn contents(&self, player: PlayerId) -> Vec<(u16, ItemStack)> {
        self.menu.contents(player)
    }

    fn update(&self, player: PlayerId) {
        self.menu.update(player)
    }
}

impl AnimatedView for AnimatedMenu {
    fn start_periodic_update(&self, player: PlayerId) {
        if self.frames.is_empty() {
            return;
        }
        let cursor = FrameCursor::default();
        let frames = self.frames.clone();
        let frame = cursor.frame.clone();
        let sink = self.sink.clone();

        cursor.updater.start(self.period, move || {
            let next = frame.fetch_add(1, Ordering::Relaxed) + 1;
            if let Some(sink) = &sink {
                sink(player, &frames[next % frames.len()]);
            }
        });
        // Dropping a replaced cursor aborts its task.
        self.cursors.insert(player, cursor);
    }

    fn stop_periodic_update(&self, player: PlayerId) {
        if let Some((_, cursor)) = self.cursors.remove(&player) {
            cursor.updater.stop();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pagination::PaginationKey;
    use std::sync::Mutex;

    #[test]
    fn test_menu_merges_fixed_and_paged_items() {
        let state = Arc::new(PaginationState::new());
        let player = PlayerId::new();
        let widget = Pagination::new(
            "warps",
            vec![10, 11],
            vec![ItemStack::new("ENDER_PEARL"), ItemStack::new("BED"), ItemStack::new("MAP")],
        );
        let menu = MenuView::new("Warps", 3)
            .with_item(26, ItemStack::new("ARROW").named("Next"))
            .with_pagination(widget, state.clone());

        let first = menu.contents(player);
        assert_eq!(first.len(), 3);
        assert_eq!(first[0], (10, ItemStack::new("ENDER_PEARL")));

        state.next_page(player, &PaginationKey::new("warps"));
        let second = menu.contents(player);
        assert_eq!(second, vec![(10, ItemStack::new("MAP")), (26, ItemStack::new("ARROW").named("Next"))]);
    }

    #[test]
    fn test_menu_update_bumps_revision() {
        let menu = MenuView::new("Menu", 1);
        menu.update(PlayerId::new());
        menu.update(PlayerId::new());
        assert_eq!(menu.revision(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_animated_title_cycles_until_stopped() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        let player = PlayerId::new();
        let menu = AnimatedMenu::new(
            MenuView::new("Fallback", 1),
            vec!["A".to_string(), "B".to_string()],
            Duration::from_millis(100),
        )
        .with_frame_sink(move |_, title| sink.lock().unwrap().push(title.to_string()));

        assert_eq!(menu.title(), "A");
        menu.start_periodic_update(player);
        assert!(menu.is_running_for(player));

        tokio::time::sleep(Duration::from_millis(250)).await;
        assert_eq!(*seen.lock().unwrap(), vec!["B", "A"]);
        assert_eq!(menu.frame_index(player), Some(0));

        menu.stop_periodic_update(player);
        menu.stop_periodic_update(player);
        assert!(!menu.is_running());
        assert_eq!(menu.frame_index(player), None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_players_animate_independently() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        let alice = PlayerId::new();
        let bob = PlayerId::new();
        let menu = AnimatedMenu::new(
            MenuView::new("Shop", 1),
            vec!["Shop".to_string(), "Shop *".to_string()],
            Duration::from_millis(100),
        )
        .with_frame_sink(move |player, _| sink.lock().unwrap().push(player));

        menu.start_periodic_update(alice);
        menu.start_periodic_update(bob);
        assert_eq!(menu.running_count(), 2);

        menu.stop_periodic_update(alice);
        assert!(!menu.is_running_for(alice));
        assert!(menu.is_running_for(bob));

        tokio::time::sleep(Duration::from_millis(150)).await;
        assert_eq!(*seen.lock().unwrap(), vec![bob]);
        assert_eq!(menu.frame_index(bob), Some(1));
    }

    #[tokio::test]
    async fn test_shared_menu_survives_other_player_closing() {
        use crate::render::SlotRenderer;
        use crate::session::test_support::{RecordingDisplay, RecordingListeners};
        use crate::session::SessionTracker;
        use crate::view::TrackedView;

        let tracker = SessionTracker::new(
            Arc::new(SlotRenderer::default()),
            Arc::new(RecordingDisplay::default()),
            Arc::new(RecordingListeners::default()),
        );
        let menu = Arc::new(AnimatedMenu::new(
            MenuView::new("Shop", 1),
            vec!["Shop".to_string(), "Shop *".to_string()],
            Duration::from_secs(1),
        ));
        let alice = PlayerId::new();
        let bob = PlayerId::new();

        tracker.open(TrackedView::Animated(menu.clone()), alice);
        tracker.open(TrackedView::Animated(menu.clone()), bob);
        tracker.close(alice);

        assert!(tracker.is_animated(bob));
        assert!(menu.is_running_for(bob));
        assert!(!menu.is_running_for(alice));

        tracker.close(bob);
        assert!(!menu.is_running());
    }

    #[test]
    fn test_animated_without_frames_uses_menu_title() {
        let menu = AnimatedMenu::new(MenuView::new("Static", 2), Vec::new(), Duration::from_secs(1));
        menu.start_periodic_update(PlayerId::new());
        assert_eq!(menu.title(), "Static");
        assert!(!menu.is_running());
        assert_eq!(menu.rows(), 2);
    }
}
