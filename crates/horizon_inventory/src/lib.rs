//! # Horizon Inventory
//!
//! Per-player inventory view sessions for Horizon plugins.
//!
//! The [`SessionTracker`] remembers which view every player has open, starts
//! and stops the periodic updates of animated views, and hands back a
//! [`InventoryNotification`] for every lifecycle transition. Rendering, display
//! and listener cleanup are delegated to collaborator traits so the tracker
//! stays independent of the host platform.
//!
//! ## Example
//!
//! ```rust
//! use horizon_inventory::*;
//! use horizon_plugin_core::{EventBus, PlayerId};
//! use std::sync::Arc;
//!
//! struct PrintDisplay;
//!
//! impl InventoryDisplay for PrintDisplay {
//!     fn show(&self, player: PlayerId, inventory: RenderedInventory) {
//!         println!("{player}: {} ({} slots)", inventory.title, inventory.size);
//!     }
//! }
//!
//! # #[tokio::main]
//! # async fn main() {
//! let tracker = Arc::new(SessionTracker::new(
//!     Arc::new(SlotRenderer::default()),
//!     Arc::new(PrintDisplay),
//!     Arc::new(PlayerListenerRegistry::new()),
//! ));
//! let service = InventoryService::new(tracker, Arc::new(EventBus::new()));
//!
//! let player = PlayerId::new();
//! let menu = MenuView::new("Main Menu", 3).with_item(13, ItemStack::new("COMPASS"));
//! service.open(TrackedView::plain(menu), player).await;
//! assert!(service.tracker().has_session(player));
//! service.close(player).await;
//! # }
//! ```

pub mod animation;
pub mod error;
pub mod listener;
pub mod menu;
pub mod notification;
pub mod pagination;
pub mod render;
pub mod service;
pub mod session;
pub mod view;

pub use animation::PeriodicUpdater;
pub use error::SessionError;
pub use listener::{ClickCallback, ListenerId, ListenerRegistry, PlayerListenerRegistry};
pub use menu::{AnimatedMenu, FrameSink, MenuView};
pub use notification::InventoryNotification;
pub use pagination::{Pagination, PaginationKey, PaginationState};
pub use render::{InventoryDisplay, InventoryRenderer, RenderedInventory, SlotRenderer};
pub use service::InventoryService;
pub use session::SessionTracker;
pub use view::{AnimatedView, InventoryView, ItemStack, TrackedView, ViewId, ViewSummary};
